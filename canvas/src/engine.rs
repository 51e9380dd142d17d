use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use sensors::{Sensor, SensorId};

use crate::consts::SENSOR_SIZE_PX;
use crate::doc::SensorDoc;
use crate::geometry::{self, Point};
use crate::input::{Button, InputState, Key, Modifiers, UiState};
use crate::panel::ConfigForm;
use crate::pending::{MutationId, MutationKind, PendingLedger, Prior, Revert};
use crate::render::{self, CanvasSurface};
use crate::sprites::SpriteSet;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

const CURSOR_DEFAULT: &str = "default";
const CURSOR_GRAB: &str = "grab";
const CURSOR_GRABBING: &str = "grabbing";

/// Actions returned from input handlers for the host to process.
///
/// The three `Sensor*` variants are optimistic: local state already reflects
/// them. The host sends the carried sensor to the store and reports the
/// outcome through [`EngineCore::confirm`] or [`EngineCore::rollback`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SensorCreated { mutation: MutationId, sensor: Sensor },
    SensorUpdated { mutation: MutationId, sensor: Sensor },
    SensorDeleted { mutation: MutationId, sensor: Sensor },
    /// Show the config panel pre-filled with these values.
    ConfigOpened(ConfigForm),
    ConfigClosed,
    SetCursor(String),
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub doc: SensorDoc,
    pub ui: UiState,
    pub input: InputState,
    pub pending: PendingLedger,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            doc: SensorDoc::new(),
            ui: UiState::default(),
            input: InputState::default(),
            pending: PendingLedger::new(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Hydrate the sensor list from the store's initial listing.
    pub fn load_snapshot(&mut self, sensors: Vec<Sensor>) {
        self.doc.load_snapshot(sensors);
        if let Some(id) = self.ui.selected_id {
            if self.doc.get(&id).is_none() {
                self.ui.selected_id = None;
            }
        }
        if let Some(id) = self.ui.config_id {
            if self.doc.get(&id).is_none() {
                self.ui.config_id = None;
            }
        }
        self.input = InputState::Idle;
    }

    /// Update viewport dimensions (CSS pixels) and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary || !self.input.is_idle() {
            return Vec::new();
        }

        if let Some(intruder) = self.doc.intruder {
            if geometry::is_intruder_hit(intruder, pt) {
                self.input = InputState::DraggingIntruder { offset: Point::new(pt.x - intruder.x, pt.y - intruder.y) };
                return vec![Action::SetCursor(CURSOR_GRABBING.into())];
            }
        }

        let mut actions = Vec::new();
        let Some(id) = geometry::hit_sensor(self.doc.sensors(), pt) else {
            if self.ui.config_id.take().is_some() {
                actions.push(Action::ConfigClosed);
            }
            if self.ui.selected_id.take().is_some() {
                actions.push(Action::RenderNeeded);
            }
            return actions;
        };
        let Some(sensor) = self.doc.get(&id) else {
            return actions;
        };

        let origin = Point::new(sensor.x, sensor.y);
        let was_selected = self.ui.selected_id == Some(id);
        if self.ui.config_id.is_some_and(|open| open != id) {
            self.ui.config_id = None;
            actions.push(Action::ConfigClosed);
        }
        self.ui.selected_id = Some(id);
        self.input = InputState::DraggingSensor {
            id,
            offset: Point::new(pt.x - origin.x, pt.y - origin.y),
            origin,
            was_selected,
        };
        actions.push(Action::SetCursor(CURSOR_GRABBING.into()));
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn on_pointer_move(&mut self, pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        match self.input {
            InputState::DraggingSensor { id, offset, .. } => {
                let Some(sensor) = self.doc.get_mut(&id) else {
                    return Vec::new();
                };
                sensor.x = pt.x - offset.x;
                sensor.y = pt.y - offset.y;
                vec![Action::RenderNeeded]
            }
            InputState::DraggingIntruder { offset } => {
                self.doc.intruder = Some(Point::new(pt.x - offset.x, pt.y - offset.y));
                vec![Action::RenderNeeded]
            }
            InputState::Idle => vec![Action::SetCursor(self.hover_cursor(pt).into())],
        }
    }

    pub fn on_pointer_up(&mut self, pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = self.finish_gesture(true);
        actions.push(Action::SetCursor(self.hover_cursor(pt).into()));
        actions
    }

    /// The pointer left the surface: end any gesture without opening config.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        let mut actions = self.finish_gesture(false);
        actions.push(Action::SetCursor(CURSOR_DEFAULT.into()));
        actions
    }

    // --- Keyboard input ---

    pub fn on_key_down(&mut self, key: &Key, _modifiers: Modifiers) -> Vec<Action> {
        if key.is_delete() {
            return self.delete_selected();
        }
        if key.is_escape() {
            if self.ui.config_id.is_some() {
                return self.config_cancel();
            }
            if self.ui.selected_id.take().is_some() {
                return vec![Action::RenderNeeded];
            }
        }
        Vec::new()
    }

    // --- Commands ---

    /// Place a new default sensor at a random position inside the surface.
    ///
    /// `sample` must return values in `[0, 1)`.
    pub fn add_sensor(&mut self, mut sample: impl FnMut() -> f64) -> Vec<Action> {
        let max_x = (self.viewport_width - SENSOR_SIZE_PX).max(0.0);
        let max_y = (self.viewport_height - SENSOR_SIZE_PX).max(0.0);
        let sensor = Sensor::new(sample() * max_x, sample() * max_y);
        let id = sensor.id;
        self.doc.insert(sensor.clone());

        let mut actions = Vec::new();
        if self.ui.config_id.take().is_some() {
            actions.push(Action::ConfigClosed);
        }
        self.ui.selected_id = Some(id);
        let mutation = self.pending.record(id, MutationKind::Create, Prior::Absent);
        actions.push(Action::SensorCreated { mutation, sensor });
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Delete the selected sensor. Ignored while a drag is in progress.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        if !self.input.is_idle() {
            return Vec::new();
        }
        let Some(id) = self.ui.selected_id.take() else {
            return Vec::new();
        };
        let Some((index, sensor)) = self.doc.remove(&id) else {
            return vec![Action::RenderNeeded];
        };

        let mut actions = Vec::new();
        if self.ui.config_id == Some(id) {
            self.ui.config_id = None;
            actions.push(Action::ConfigClosed);
        }
        let prior = Prior::Present { index, sensor: sensor.clone() };
        let mutation = self.pending.record(id, MutationKind::Delete, prior);
        actions.push(Action::SensorDeleted { mutation, sensor });
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Rotate the selected sensor to `deg`, normalized into `[0, 360)`.
    pub fn set_rotation(&mut self, deg: f64) -> Vec<Action> {
        let Some(id) = self.ui.selected_id else {
            return Vec::new();
        };
        if !deg.is_finite() || !self.input.is_idle() {
            return Vec::new();
        }
        let angle = geometry::normalize_degrees_360(deg);
        self.persist_update(&id, |sensor| sensor.angle = angle)
            .map(|update| vec![update, Action::RenderNeeded])
            .unwrap_or_default()
    }

    /// Open the config panel for `id`.
    pub fn open_config(&mut self, id: &SensorId) -> Vec<Action> {
        let Some(sensor) = self.doc.get(id) else {
            return Vec::new();
        };
        self.ui.config_id = Some(*id);
        vec![Action::ConfigOpened(ConfigForm::from_sensor(sensor))]
    }

    /// Write the form's name, range, and cone width, persist, and close.
    pub fn config_save(&mut self, form: &ConfigForm) -> Vec<Action> {
        let Some(id) = self.ui.config_id else {
            return Vec::new();
        };
        let values = form.parse().sanitized();
        let mut actions: Vec<Action> = self
            .persist_update(&id, |sensor| values.apply_to(sensor))
            .into_iter()
            .collect();
        self.ui.config_id = None;
        actions.push(Action::ConfigClosed);
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Flip the enabled flag of the sensor under configuration and persist.
    pub fn config_toggle(&mut self) -> Vec<Action> {
        let Some(id) = self.ui.config_id else {
            return Vec::new();
        };
        self.persist_update(&id, |sensor| sensor.is_enabled = !sensor.is_enabled)
            .map(|update| vec![update, Action::RenderNeeded])
            .unwrap_or_default()
    }

    /// Close the config panel without saving.
    pub fn config_cancel(&mut self) -> Vec<Action> {
        if self.ui.config_id.take().is_some() { vec![Action::ConfigClosed] } else { Vec::new() }
    }

    /// Place (or move) the intruder marker at a random surface position.
    pub fn add_intruder(&mut self, mut sample: impl FnMut() -> f64) -> Vec<Action> {
        let x = sample() * self.viewport_width.max(0.0);
        let y = sample() * self.viewport_height.max(0.0);
        self.doc.intruder = Some(Point::new(x, y));
        vec![Action::RenderNeeded]
    }

    pub fn remove_intruder(&mut self) -> Vec<Action> {
        if matches!(self.input, InputState::DraggingIntruder { .. }) {
            self.input = InputState::Idle;
        }
        if self.doc.intruder.take().is_some() { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    // --- Store outcomes ---

    /// The store accepted `mutation`.
    pub fn confirm(&mut self, mutation: MutationId) -> bool {
        self.pending.confirm(mutation)
    }

    /// The store rejected `mutation`: revert the optimistic change.
    pub fn rollback(&mut self, mutation: MutationId) -> Vec<Action> {
        match self.pending.rollback(mutation) {
            None => Vec::new(),
            Some(Revert::Superseded { sensor_id, kind }) => {
                log::warn!("store {} failed for sensor {sensor_id}; superseded by a newer change", kind.as_str());
                Vec::new()
            }
            Some(Revert::Restore { sensor_id, kind, prior }) => {
                log::warn!("store {} failed for sensor {sensor_id}; reverting", kind.as_str());
                self.restore(sensor_id, prior)
            }
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn selection(&self) -> Option<SensorId> {
        self.ui.selected_id
    }

    /// The sensor whose config panel is open, if any.
    #[must_use]
    pub fn config_target(&self) -> Option<SensorId> {
        self.ui.config_id
    }

    #[must_use]
    pub fn sensor(&self, id: &SensorId) -> Option<&Sensor> {
        self.doc.get(id)
    }

    #[must_use]
    pub fn sensors(&self) -> &[Sensor] {
        self.doc.sensors()
    }

    #[must_use]
    pub fn intruder(&self) -> Option<Point> {
        self.doc.intruder
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Enabled sensors whose wedge contains the intruder.
    #[must_use]
    pub fn triggered_ids(&self) -> Vec<SensorId> {
        let Some(intruder) = self.doc.intruder else {
            return Vec::new();
        };
        self.doc
            .iter()
            .filter(|sensor| geometry::is_triggered(sensor, intruder))
            .map(|sensor| sensor.id)
            .collect()
    }

    // --- Internals ---

    fn hover_cursor(&self, pt: Point) -> &'static str {
        let over_intruder = self
            .doc
            .intruder
            .is_some_and(|intruder| geometry::is_intruder_hit(intruder, pt));
        if over_intruder || geometry::hit_sensor(self.doc.sensors(), pt).is_some() {
            CURSOR_GRAB
        } else {
            CURSOR_DEFAULT
        }
    }

    fn finish_gesture(&mut self, allow_open: bool) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::DraggingSensor { id, origin, was_selected, .. } => {
                let Some(sensor) = self.doc.get(&id) else {
                    return Vec::new();
                };
                if Point::new(sensor.x, sensor.y) != origin {
                    let before = sensor.moved_to(origin.x, origin.y);
                    let after = sensor.clone();
                    let Some(index) = self.doc.index_of(&id) else {
                        return Vec::new();
                    };
                    let prior = Prior::Present { index, sensor: before };
                    let mutation = self.pending.record(id, MutationKind::Update, prior);
                    return vec![Action::SensorUpdated { mutation, sensor: after }, Action::RenderNeeded];
                }
                if was_selected && allow_open {
                    return self.open_config(&id);
                }
                Vec::new()
            }
            InputState::DraggingIntruder { .. } => vec![Action::RenderNeeded],
            InputState::Idle => Vec::new(),
        }
    }

    fn persist_update(&mut self, id: &SensorId, edit: impl FnOnce(&mut Sensor)) -> Option<Action> {
        let index = self.doc.index_of(id)?;
        let sensor = self.doc.get_mut(id)?;
        let before = sensor.clone();
        edit(sensor);
        let after = sensor.clone();
        let mutation = self
            .pending
            .record(*id, MutationKind::Update, Prior::Present { index, sensor: before });
        Some(Action::SensorUpdated { mutation, sensor: after })
    }

    fn restore(&mut self, sensor_id: SensorId, prior: Prior) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.input.dragging_sensor() == Some(sensor_id) {
            self.input = InputState::Idle;
        }
        match prior {
            Prior::Absent => {
                self.doc.remove(&sensor_id);
                if self.ui.selected_id == Some(sensor_id) {
                    self.ui.selected_id = None;
                }
                if self.ui.config_id == Some(sensor_id) {
                    self.ui.config_id = None;
                    actions.push(Action::ConfigClosed);
                }
            }
            Prior::Present { index, sensor } => {
                if self.doc.get(&sensor_id).is_some() {
                    self.doc.replace(sensor);
                } else {
                    self.doc.insert_at(index, sensor);
                }
            }
        }
        actions.push(Action::RenderNeeded);
        actions
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    sprites: SpriteSet,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to `canvas`, loading icons from `sprite_base`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the icon images cannot be created.
    pub fn new(canvas: HtmlCanvasElement, sprite_base: &str) -> Result<Self, JsValue> {
        let sprites = SpriteSet::load(sprite_base)?;
        Ok(Self { canvas, sprites, core: EngineCore::new() })
    }

    /// Register a callback fired when the sensor icons finish loading.
    pub fn on_sprites_ready(&self, callback: &js_sys::Function) {
        self.sprites.on_ready(callback);
    }

    // --- Delegated data inputs ---

    pub fn load_snapshot(&mut self, sensors: Vec<Sensor>) {
        self.core.load_snapshot(sensors);
    }

    /// Update viewport size and resize the backing store to match the DPR.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.set_viewport(width_css, height_css, dpr);
        let dpr = self.core.dpr;
        self.canvas.set_width((width_css * dpr).round().max(1.0) as u32);
        self.canvas.set_height((height_css * dpr).round().max(1.0) as u32);
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(pt, button, modifiers)
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.core.on_pointer_leave()
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    // --- Delegated commands ---

    /// Add a sensor at a random position drawn from `Math.random`.
    pub fn add_sensor(&mut self) -> Vec<Action> {
        self.core.add_sensor(js_sys::Math::random)
    }

    pub fn add_intruder(&mut self) -> Vec<Action> {
        self.core.add_intruder(js_sys::Math::random)
    }

    pub fn remove_intruder(&mut self) -> Vec<Action> {
        self.core.remove_intruder()
    }

    pub fn delete_selected(&mut self) -> Vec<Action> {
        self.core.delete_selected()
    }

    pub fn set_rotation(&mut self, deg: f64) -> Vec<Action> {
        self.core.set_rotation(deg)
    }

    pub fn config_save(&mut self, form: &ConfigForm) -> Vec<Action> {
        self.core.config_save(form)
    }

    pub fn config_toggle(&mut self) -> Vec<Action> {
        self.core.config_toggle()
    }

    pub fn config_cancel(&mut self) -> Vec<Action> {
        self.core.config_cancel()
    }

    pub fn confirm(&mut self, mutation: MutationId) -> bool {
        self.core.confirm(mutation)
    }

    pub fn rollback(&mut self, mutation: MutationId) -> Vec<Action> {
        self.core.rollback(mutation)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let dpr = self.core.dpr;
        ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
        let mut surface = CanvasSurface::new(&ctx, &self.sprites);
        render::draw(
            &mut surface,
            &self.core.doc,
            &self.core.ui,
            self.core.viewport_width,
            self.core.viewport_height,
        )
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<SensorId> {
        self.core.selection()
    }

    #[must_use]
    pub fn sensor(&self, id: &SensorId) -> Option<&Sensor> {
        self.core.sensor(id)
    }

    #[must_use]
    pub fn sensors(&self) -> &[Sensor] {
        self.core.sensors()
    }
}
