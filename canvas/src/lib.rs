//! Canvas rendering and input engine for the sensor placement editor.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! full lifecycle of the editing surface: translating raw DOM input events into
//! sensor mutations, hit-testing sensor icons, computing field-of-view wedges,
//! and rendering the scene. The host layer is responsible only for wiring DOM
//! events to the engine and persisting the resulting [`engine::Action`]s to the
//! sensor store, reporting each outcome back so failed writes can be undone.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | In-memory sensor list and intruder marker |
//! | [`geometry`] | Hit-testing and field-of-view wedge math |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`panel`] | Config panel form parsing and sanitizing |
//! | [`pending`] | Ledger of unconfirmed store writes for rollback |
//! | [`render`] | Scene rendering onto a 2D [`render::Surface`] |
//! | [`sprites`] | Preloaded sensor icon images |
//! | [`consts`] | Shared numeric constants (icon size, grid scale, colors) |

pub mod consts;
pub mod doc;
pub mod engine;
pub mod geometry;
pub mod input;
pub mod panel;
pub mod pending;
pub mod render;
pub mod sprites;
