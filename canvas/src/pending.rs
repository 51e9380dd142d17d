//! Pending-mutation ledger for optimistic store writes.
//!
//! Every create, update, or delete is applied locally before the store call
//! returns. The ledger remembers what each sensor looked like before the
//! mutation so a failed call can be reverted instead of leaving the editor
//! silently diverged from the store.
//!
//! Requests always carry the full sensor record, so when several mutations
//! for one sensor are in flight a newer one already holds newer state. A
//! failure of an older mutation therefore does not touch local state; its
//! prior snapshot is handed to the next pending mutation for that sensor,
//! which will restore it if that call fails too.
//!
//! Once the store accepts a mutation, every older one for the same sensor is
//! superseded: the store already holds state at least as new, so their
//! failures leave local state alone.

#[cfg(test)]
#[path = "pending_test.rs"]
mod pending_test;

use sensors::{Sensor, SensorId};

/// Host-visible handle for one in-flight store call.
pub type MutationId = u64;

/// Which store call a mutation was sent as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Local state of a sensor before a mutation was applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Prior {
    /// The sensor did not exist locally.
    Absent,
    /// The sensor existed at `index` with value `sensor`.
    Present { index: usize, sensor: Sensor },
}

/// What the caller must do to local state after a rollback.
#[derive(Debug, Clone, PartialEq)]
pub enum Revert {
    /// Put `sensor_id` back to `prior`.
    Restore { sensor_id: SensorId, kind: MutationKind, prior: Prior },
    /// A newer mutation for the same sensor is in flight or already accepted;
    /// leave state.
    Superseded { sensor_id: SensorId, kind: MutationKind },
}

#[derive(Debug, Clone)]
struct Entry {
    id: MutationId,
    sensor_id: SensorId,
    kind: MutationKind,
    prior: Prior,
    superseded: bool,
}

/// Ordered record of unconfirmed store calls, oldest first.
#[derive(Debug, Clone)]
pub struct PendingLedger {
    entries: Vec<Entry>,
    next_id: MutationId,
}

impl Default for PendingLedger {
    fn default() -> Self {
        Self { entries: Vec::new(), next_id: 1 }
    }
}

impl PendingLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a mutation that has just been applied locally.
    pub fn record(&mut self, sensor_id: SensorId, kind: MutationKind, prior: Prior) -> MutationId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Entry { id, sensor_id, kind, prior, superseded: false });
        id
    }

    /// The store accepted the mutation. Returns `false` for unknown ids.
    pub fn confirm(&mut self, id: MutationId) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        let accepted = self.entries.remove(pos);
        for entry in &mut self.entries[..pos] {
            if entry.sensor_id == accepted.sensor_id {
                entry.superseded = true;
            }
        }
        true
    }

    /// The store rejected the mutation. Returns `None` for unknown ids.
    pub fn rollback(&mut self, id: MutationId) -> Option<Revert> {
        let pos = self.position(id)?;
        let failed = self.entries.remove(pos);
        if failed.superseded {
            return Some(Revert::Superseded { sensor_id: failed.sensor_id, kind: failed.kind });
        }
        let newer = self.entries[pos..]
            .iter_mut()
            .find(|entry| entry.sensor_id == failed.sensor_id);
        match newer {
            Some(entry) => {
                entry.prior = failed.prior;
                Some(Revert::Superseded { sensor_id: failed.sensor_id, kind: failed.kind })
            }
            None => Some(Revert::Restore { sensor_id: failed.sensor_id, kind: failed.kind, prior: failed.prior }),
        }
    }

    /// Number of unconfirmed mutations touching `sensor_id`.
    #[must_use]
    pub fn pending_for(&self, sensor_id: &SensorId) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.sensor_id == *sensor_id)
            .count()
    }

    /// Kind of a pending mutation, if it is still tracked.
    #[must_use]
    pub fn kind_of(&self, id: MutationId) -> Option<MutationKind> {
        self.position(id).map(|pos| self.entries[pos].kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, id: MutationId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }
}
