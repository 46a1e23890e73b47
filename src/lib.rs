//! Machina: an embeddable, caller-driven finite state machine engine.
//!
//! A machine is a fixed set of state slots, a table of legal transitions
//! between them, and two optional callbacks per state. The caller drives it
//! forward one step at a time, typically from a polling or event loop; the
//! engine itself has no timers, no threads, and no scheduling.
//!
//! # Core Concepts
//!
//! - **States**: fixed-capacity registry, addressed by index; each state is
//!   registered once with an optional steady and an optional on-enter
//!   callback
//! - **Transitions**: directed, unconditional edges; legality is purely
//!   topological
//! - **Deferred requests**: `request_transition` records intent, and the
//!   next `step` commits it and fires the target's on-enter callback
//!
//! # Example
//!
//! ```rust
//! use machina::{Machine, StateCallbacks};
//!
//! const RED: usize = 0;
//! const GREEN: usize = 1;
//!
//! # fn main() -> Result<(), machina::MachineError> {
//! let mut light: Machine<u32> = Machine::new(2, RED)?;
//! light.register_state(RED, StateCallbacks::none().steady(|waits| *waits += 1))?;
//! light.register_state(GREEN, StateCallbacks::none().enter(|exited, _waits| {
//!     assert_eq!(exited, RED);
//! }))?;
//! light.register_transition(RED, GREEN)?;
//! light.register_transition(GREEN, RED)?;
//!
//! let mut waits = 0;
//! light.step(&mut waits); // steady tick in RED
//! light.request_transition(GREEN)?;
//! assert_eq!(light.step(&mut waits), GREEN);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod core;
pub mod snapshot;

// Re-export commonly used types
pub use crate::builder::{BuildError, MachineBuilder};
pub use crate::core::{EnterFn, Machine, MachineError, StateCallbacks, StateId, SteadyFn, TargetSet};
pub use crate::snapshot::{Snapshot, SnapshotError};
