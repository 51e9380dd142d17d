//! Shared numeric constants for the canvas crate.

// ── Layout ──────────────────────────────────────────────────────

/// Side length of the square sensor icon, in surface pixels.
pub const SENSOR_SIZE_PX: f64 = sensors::ICON_SIZE_PX;

/// Pixels per meter. Also the spacing of the background grid.
pub const GRID_SCALE_PX_PER_M: f64 = 50.0;

/// Full circle in degrees.
pub const FULL_TURN_DEG: f64 = 360.0;

// ── Styling ─────────────────────────────────────────────────────

pub const GRID_STROKE: &str = "lightgray";
pub const SELECTION_STROKE: &str = "green";
pub const SELECTION_LINE_WIDTH: f64 = 3.0;
pub const FOV_FILL: &str = "rgba(0, 255, 0, 0.35)";
pub const FOV_TRIGGERED_FILL: &str = "rgba(255, 0, 0, 0.45)";
pub const LABEL_COLOR: &str = "#1F1A17";
pub const LABEL_FONT: &str = "10px sans-serif";
pub const SCALE_CAPTION: &str = "1 Block = 1 Meter";
pub const SCALE_FONT: &str = "bold 12px sans-serif";

/// Placeholder fills used while an icon image is missing or still decoding.
pub const PLACEHOLDER_ON_FILL: &str = "#2E9E4F";
pub const PLACEHOLDER_OFF_FILL: &str = "#8A8F98";

/// Radius of the intruder marker, in surface pixels.
pub const INTRUDER_RADIUS_PX: f64 = 9.0;
pub const INTRUDER_FILL: &str = "#D94B4B";
