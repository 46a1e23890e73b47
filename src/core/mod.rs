//! Core engine: state registry, transition table, and the step dispatcher.
//!
//! This module contains the whole mechanism:
//! - State slots addressed by id, registered once with optional callbacks
//! - A per-state bitset of valid transition targets
//! - The dispatcher that either re-runs the current state or commits a
//!   deferred transition
//!
//! The engine is synchronous and single-threaded; the caller decides when
//! each step happens.

mod error;
mod machine;
mod state;
mod targets;

pub use error::MachineError;
pub use machine::Machine;
pub use state::{EnterFn, StateCallbacks, StateId, SteadyFn};
pub use targets::TargetSet;
