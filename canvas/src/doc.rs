//! Document model: the ordered sensor list and the optional intruder marker.
//!
//! `SensorDoc` is the single owner of every placed sensor. Order matters:
//! later sensors are drawn above earlier ones and win hit-tests, so the store
//! is a `Vec` and removals report the index they vacated. That index is what
//! the pending ledger uses to put a sensor back exactly where it was when a
//! delete fails upstream.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use sensors::{Sensor, SensorId};

use crate::geometry::Point;

/// In-memory store of placed sensors.
#[derive(Debug, Clone, Default)]
pub struct SensorDoc {
    sensors: Vec<Sensor>,
    /// Simulated intruder position, if one has been placed.
    pub intruder: Option<Point>,
}

impl SensorDoc {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sensor, or replace it in place if its id already exists.
    pub fn insert(&mut self, sensor: Sensor) {
        match self.index_of(&sensor.id) {
            Some(index) => self.sensors[index] = sensor,
            None => self.sensors.push(sensor),
        }
    }

    /// Insert at `index`, clamped to the current length.
    pub fn insert_at(&mut self, index: usize, sensor: Sensor) {
        if let Some(existing) = self.index_of(&sensor.id) {
            self.sensors.remove(existing);
        }
        let index = index.min(self.sensors.len());
        self.sensors.insert(index, sensor);
    }

    /// Remove a sensor by id, returning its former index and value.
    pub fn remove(&mut self, id: &SensorId) -> Option<(usize, Sensor)> {
        let index = self.index_of(id)?;
        Some((index, self.sensors.remove(index)))
    }

    /// Overwrite an existing sensor. Returns the previous value, or `None`
    /// (leaving the store untouched) when the id is unknown.
    pub fn replace(&mut self, sensor: Sensor) -> Option<Sensor> {
        let index = self.index_of(&sensor.id)?;
        Some(std::mem::replace(&mut self.sensors[index], sensor))
    }

    #[must_use]
    pub fn get(&self, id: &SensorId) -> Option<&Sensor> {
        self.sensors.iter().find(|s| s.id == *id)
    }

    pub fn get_mut(&mut self, id: &SensorId) -> Option<&mut Sensor> {
        self.sensors.iter_mut().find(|s| s.id == *id)
    }

    #[must_use]
    pub fn index_of(&self, id: &SensorId) -> Option<usize> {
        self.sensors.iter().position(|s| s.id == *id)
    }

    /// Replace all sensors with a full snapshot. The intruder is kept.
    pub fn load_snapshot(&mut self, sensors: Vec<Sensor>) {
        self.sensors = sensors;
    }

    /// Sensors in draw order (bottom first).
    #[must_use]
    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sensor> {
        self.sensors.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}
