//! Geometry: pointer hit-testing and field-of-view wedges.
//!
//! Everything here is a closed-form function of sensor attributes. Numeric
//! fields may carry NaN when a config form was left blank, so every wedge
//! predicate is written as `!(value > 0.0)` rather than `value <= 0.0`.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use sensors::{Sensor, SensorId};

use crate::consts::{FULL_TURN_DEG, GRID_SCALE_PX_PER_M, INTRUDER_RADIUS_PX, SENSOR_SIZE_PX};

/// A point in surface pixel coordinates (origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Axis-aligned rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Pie-slice region covered by a sensor.
///
/// Angles are radians measured clockwise on screen from the positive x-axis,
/// matching `CanvasRenderingContext2d::arc`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wedge {
    pub origin: Point,
    pub start_rad: f64,
    pub end_rad: f64,
    pub radius_px: f64,
}

impl Wedge {
    /// Whether the wedge spans the whole circle.
    #[must_use]
    pub fn is_full_circle(&self) -> bool {
        (self.end_rad - self.start_rad) >= std::f64::consts::TAU
    }
}

/// Convert a detection range in meters to surface pixels.
#[must_use]
pub fn meters_to_px(meters: f64) -> f64 {
    meters * GRID_SCALE_PX_PER_M
}

/// The sensor's icon bounding box, anchored at its `(x, y)`.
#[must_use]
pub fn icon_rect(sensor: &Sensor) -> Rect {
    Rect { x: sensor.x, y: sensor.y, width: SENSOR_SIZE_PX, height: SENSOR_SIZE_PX }
}

/// Center of the sensor's icon; the pivot for rotation and the wedge origin.
#[must_use]
pub fn icon_center(sensor: &Sensor) -> Point {
    let half = SENSOR_SIZE_PX / 2.0;
    Point::new(sensor.x + half, sensor.y + half)
}

/// True if `pt` lies inside the sensor icon box, edges included.
#[must_use]
pub fn is_hit(sensor: &Sensor, pt: Point) -> bool {
    pt.x >= sensor.x && pt.x <= sensor.x + SENSOR_SIZE_PX && pt.y >= sensor.y && pt.y <= sensor.y + SENSOR_SIZE_PX
}

/// Topmost sensor under `pt`. Later entries are drawn above earlier ones.
#[must_use]
pub fn hit_sensor(sensors: &[Sensor], pt: Point) -> Option<SensorId> {
    sensors
        .iter()
        .rev()
        .find(|sensor| is_hit(sensor, pt))
        .map(|sensor| sensor.id)
}

/// True if `pt` lies on the intruder marker centered at `center`.
#[must_use]
pub fn is_intruder_hit(center: Point, pt: Point) -> bool {
    center.distance_to(pt) <= INTRUDER_RADIUS_PX
}

/// Field-of-view wedge for a sensor, or `None` when it has no usable cone.
///
/// A sensor has no wedge when its range or cone width is zero, negative, NaN,
/// or infinite, or when its orientation is not finite. Cone widths above a
/// full turn are clamped to one.
#[must_use]
pub fn fov_wedge(sensor: &Sensor) -> Option<Wedge> {
    let range = sensor.detection_range;
    let cone = sensor.detection_angle;
    if !(range > 0.0) || !(cone > 0.0) || !range.is_finite() || !cone.is_finite() || !sensor.angle.is_finite() {
        return None;
    }
    let half = cone.min(FULL_TURN_DEG) / 2.0;
    Some(Wedge {
        origin: icon_center(sensor),
        start_rad: (sensor.angle - half).to_radians(),
        end_rad: (sensor.angle + half).to_radians(),
        radius_px: meters_to_px(range),
    })
}

/// True if `pt` falls inside the sensor's wedge (edges included).
#[must_use]
pub fn covers(sensor: &Sensor, pt: Point) -> bool {
    let Some(wedge) = fov_wedge(sensor) else {
        return false;
    };
    let distance = wedge.origin.distance_to(pt);
    if distance > wedge.radius_px {
        return false;
    }
    if wedge.is_full_circle() || distance == 0.0 {
        return true;
    }
    let bearing = (pt.y - wedge.origin.y)
        .atan2(pt.x - wedge.origin.x)
        .to_degrees();
    let offset = signed_angle_delta_deg(sensor.angle, bearing).abs();
    offset <= sensor.detection_angle.min(FULL_TURN_DEG) / 2.0
}

/// An enabled sensor whose wedge contains the intruder.
#[must_use]
pub fn is_triggered(sensor: &Sensor, intruder: Point) -> bool {
    sensor.is_enabled && covers(sensor, intruder)
}

/// Normalize an angle into `[0, 360)`.
#[must_use]
pub fn normalize_degrees_360(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(FULL_TURN_DEG);
    if wrapped >= FULL_TURN_DEG { 0.0 } else { wrapped }
}

/// Shortest signed rotation from `from` to `to`, in `(-180, 180]`.
#[must_use]
pub fn signed_angle_delta_deg(from: f64, to: f64) -> f64 {
    let delta = normalize_degrees_360(to - from);
    if delta > 180.0 { delta - FULL_TURN_DEG } else { delta }
}
