//! Machine error types.

use super::state::StateId;
use thiserror::Error;

/// Errors reported by machine construction and configuration.
///
/// Every variant is a recoverable caller error: the machine is left
/// unchanged and the embedder fixes the call site. None of these conditions
/// abort the process, and there is no retry logic to apply.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MachineError {
    /// A machine needs room for at least one state.
    #[error("machine capacity must be at least 1")]
    ZeroCapacity,

    /// A state id at or beyond the machine's capacity.
    #[error("state id {id} is out of range for capacity {capacity}")]
    OutOfRange { id: StateId, capacity: usize },

    /// `register_state` called twice for the same id. The first
    /// registration's callbacks remain in effect.
    #[error("state {id} is already registered")]
    AlreadyRegistered { id: StateId },

    /// A transition was requested to a target with no edge from the
    /// current state.
    #[error("no transition from state {from} to state {to}")]
    IllegalTransition { from: StateId, to: StateId },
}
