//! Input model: buttons, keys, modifier flags, and the gesture state machine.
//!
//! `UiState` is the persistent, renderer-visible part of interaction (which
//! sensor is selected, which one has its config panel open). `InputState` is
//! the gesture tracked between pointer-down and pointer-up, carrying enough
//! context to emit a single persisted update when the gesture ends.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use sensors::SensorId;

use crate::geometry::Point;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    Middle,
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code. Unknown codes fall back to primary.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// A keyboard key as reported by the browser (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Delete and Backspace both remove the selection.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self.0.as_str(), "Delete" | "Backspace")
    }

    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }
}

/// Persistent UI state visible to the renderer and the host.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The currently selected sensor, if any.
    pub selected_id: Option<SensorId>,
    /// The sensor whose config panel is open, if any.
    pub config_id: Option<SensorId>,
}

/// Active pointer gesture.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A sensor is being moved.
    DraggingSensor {
        id: SensorId,
        /// Pointer position minus sensor position, captured at pointer-down.
        offset: Point,
        /// Sensor position at pointer-down.
        origin: Point,
        /// Whether the sensor was already selected when the gesture began.
        was_selected: bool,
    },
    /// The intruder marker is being moved.
    DraggingIntruder {
        /// Pointer position minus intruder center, captured at pointer-down.
        offset: Point,
    },
}

impl InputState {
    /// Id of the sensor under an active drag, if any.
    #[must_use]
    pub fn dragging_sensor(&self) -> Option<SensorId> {
        match self {
            Self::DraggingSensor { id, .. } => Some(*id),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
