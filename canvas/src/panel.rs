//! Config panel data: the editable form fields and their numeric parsing.
//!
//! The panel UI owns raw strings exactly as typed. Parsing is lenient: an
//! empty or malformed number becomes NaN, mirroring what a browser number
//! input yields. `ConfigValues::sanitized` then maps NaN and out-of-range
//! values onto the record invariants before anything reaches the store.

#[cfg(test)]
#[path = "panel_test.rs"]
mod panel_test;

use sensors::{MAX_DETECTION_ANGLE_DEG, Sensor};

/// Raw form contents for one sensor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigForm {
    pub name: String,
    pub detection_range: String,
    pub detection_angle: String,
}

impl ConfigForm {
    /// Pre-fill the form from a sensor's current values.
    #[must_use]
    pub fn from_sensor(sensor: &Sensor) -> Self {
        Self {
            name: sensor.name.clone(),
            detection_range: sensor.detection_range.to_string(),
            detection_angle: sensor.detection_angle.to_string(),
        }
    }

    /// Parse the numeric fields. Unparseable input yields NaN.
    #[must_use]
    pub fn parse(&self) -> ConfigValues {
        ConfigValues {
            name: self.name.trim().to_owned(),
            detection_range: parse_measure(&self.detection_range),
            detection_angle: parse_measure(&self.detection_angle),
        }
    }
}

/// Parsed form values, possibly holding NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValues {
    pub name: String,
    pub detection_range: f64,
    pub detection_angle: f64,
}

impl ConfigValues {
    /// Clamp onto the record invariants: NaN, infinite, or negative values
    /// become 0 and the cone width is capped at a full circle.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            name: self.name,
            detection_range: non_negative(self.detection_range),
            detection_angle: non_negative(self.detection_angle).min(MAX_DETECTION_ANGLE_DEG),
        }
    }

    /// Write name, range, and cone width onto `sensor`, leaving the rest.
    pub fn apply_to(&self, sensor: &mut Sensor) {
        sensor.name.clone_from(&self.name);
        sensor.detection_range = self.detection_range;
        sensor.detection_angle = self.detection_angle;
    }
}

/// Parse a numeric form field, returning NaN on failure.
#[must_use]
pub fn parse_measure(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}
