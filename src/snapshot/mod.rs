//! Snapshot and restore for machine topology and position.
//!
//! Callbacks are arbitrary closures and cannot be serialized, so a snapshot
//! captures everything else: the capacity, the current state, which ids
//! were registered, and the transition edges. Restoring rebuilds a machine
//! with the same topology and position but every slot disabled; the
//! embedder re-attaches callbacks with
//! [`register_state`](crate::Machine::register_state), using
//! [`registered`](Snapshot::registered) to see which ids need one.
//!
//! A pending transition request is deliberately not captured: it is
//! transient intent, consumed by the very next step, and a restored machine
//! starts with no request pending.

use crate::core::{Machine, StateId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable capture of a machine's topology and position.
///
/// Does NOT include state callbacks (not serializable).
///
/// # Example
///
/// ```rust
/// use machina::{Machine, Snapshot, StateCallbacks};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut machine: Machine<()> = Machine::new(2, 0)?;
/// machine.register_state(0, StateCallbacks::none())?;
/// machine.register_transition(0, 1)?;
///
/// let snapshot = machine.snapshot();
/// let json = snapshot.to_json()?;
///
/// let restored: Machine<()> = Snapshot::from_json(&json)?.restore()?;
/// assert_eq!(restored.current_state(), 0);
/// assert!(restored.can_transition(0, 1)?);
/// assert!(!restored.is_registered(0)?); // callbacks must be re-attached
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: String,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    /// Number of state slots in the machine
    pub capacity: usize,

    /// State the machine was in
    pub current: StateId,

    /// Ids that had been registered, ascending
    pub registered: Vec<StateId>,

    /// Transition edges as `(from, to)` pairs, ascending by source then target
    pub transitions: Vec<(StateId, StateId)>,
}

impl Snapshot {
    /// Capture the topology and position of `machine`.
    pub fn capture<C>(machine: &Machine<C>) -> Self {
        let capacity = machine.capacity();
        let mut registered = Vec::new();
        let mut transitions = Vec::new();
        for id in 0..capacity {
            // Ids below capacity are always in range.
            if machine.is_registered(id).unwrap_or(false) {
                registered.push(id);
            }
            if let Ok(targets) = machine.valid_targets(id) {
                transitions.extend(targets.map(|to| (id, to)));
            }
        }

        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4().to_string(),
            taken_at: Utc::now(),
            capacity,
            current: machine.current_state(),
            registered,
            transitions,
        }
    }

    /// Rebuild a machine from this snapshot.
    ///
    /// The restored machine has the captured capacity, current state, and
    /// transition table, with all slots disabled.
    ///
    /// # Errors
    ///
    /// [`SnapshotError::UnsupportedVersion`] for a format version this
    /// crate does not understand, [`SnapshotError::ValidationFailed`] if
    /// the snapshot is internally inconsistent (zero capacity, any id at or
    /// beyond capacity).
    pub fn restore<C>(&self) -> Result<Machine<C>, SnapshotError> {
        self.validate()?;

        let mut machine = Machine::new(self.capacity, self.current)
            .map_err(|e| SnapshotError::ValidationFailed(e.to_string()))?;
        for &(from, to) in &self.transitions {
            machine
                .register_transition(from, to)
                .map_err(|e| SnapshotError::ValidationFailed(e.to_string()))?;
        }
        Ok(machine)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from JSON, checking the format version.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    /// Serialize to a compact binary format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from the binary format, checking the format version.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    fn check_version(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), SnapshotError> {
        self.check_version()?;
        if self.capacity == 0 {
            return Err(SnapshotError::ValidationFailed(
                "snapshot has zero capacity".to_string(),
            ));
        }
        if self.current >= self.capacity {
            return Err(SnapshotError::ValidationFailed(format!(
                "current state {} is out of range for capacity {}",
                self.current, self.capacity
            )));
        }
        if let Some(id) = self.registered.iter().find(|id| **id >= self.capacity) {
            return Err(SnapshotError::ValidationFailed(format!(
                "registered state {} is out of range for capacity {}",
                id, self.capacity
            )));
        }
        if let Some((from, to)) = self
            .transitions
            .iter()
            .find(|(from, to)| *from >= self.capacity || *to >= self.capacity)
        {
            return Err(SnapshotError::ValidationFailed(format!(
                "transition {from} -> {to} is out of range for capacity {}",
                self.capacity
            )));
        }
        Ok(())
    }
}

impl<C> Machine<C> {
    /// Capture a [`Snapshot`] of this machine's topology and position.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}
