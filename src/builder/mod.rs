//! Builder API for ergonomic machine construction.
//!
//! The builder records states and transitions up front and replays them
//! through the core operations in [`build`](MachineBuilder::build), so all
//! validation lives in one place. Nothing is checked until `build` runs.

pub mod error;

pub use error::BuildError;

use crate::core::{Machine, StateCallbacks, StateId};

/// Fluent builder for a [`Machine`].
///
/// # Example
///
/// ```rust
/// use machina::{MachineBuilder, StateCallbacks};
///
/// const OFF: usize = 0;
/// const ON: usize = 1;
///
/// let machine: machina::Machine<u32> = MachineBuilder::new(2)
///     .initial(OFF)
///     .state(OFF, StateCallbacks::none())
///     .state(ON, StateCallbacks::none().enter(|_exited, presses| *presses += 1))
///     .transition(OFF, ON)
///     .transition(ON, OFF)
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.current_state(), OFF);
/// ```
pub struct MachineBuilder<C> {
    capacity: usize,
    initial: Option<StateId>,
    states: Vec<(StateId, StateCallbacks<C>)>,
    transitions: Vec<(StateId, StateId)>,
}

impl<C> MachineBuilder<C> {
    /// Create a builder for a machine with `capacity` state slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            initial: None,
            states: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, id: StateId) -> Self {
        self.initial = Some(id);
        self
    }

    /// Record a state registration.
    pub fn state(mut self, id: StateId, callbacks: StateCallbacks<C>) -> Self {
        self.states.push((id, callbacks));
        self
    }

    /// Record a state registration with only a steady-state callback.
    pub fn steady_state<F>(self, id: StateId, f: F) -> Self
    where
        F: FnMut(&mut C) + Send + 'static,
    {
        self.state(id, StateCallbacks::none().steady(f))
    }

    /// Record a transition edge.
    pub fn transition(mut self, from: StateId, to: StateId) -> Self {
        self.transitions.push((from, to));
        self
    }

    /// Build the machine, replaying every recorded registration.
    ///
    /// # Errors
    ///
    /// [`BuildError::MissingInitialState`] if [`initial`](Self::initial)
    /// was never called; otherwise the first [`MachineError`] any recorded
    /// registration produces (out-of-range id, duplicate state, zero
    /// capacity).
    ///
    /// [`MachineError`]: crate::core::MachineError
    pub fn build(self) -> Result<Machine<C>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let mut machine = Machine::new(self.capacity, initial)?;
        for (id, callbacks) in self.states {
            machine.register_state(id, callbacks)?;
        }
        for (from, to) in self.transitions {
            machine.register_transition(from, to)?;
        }
        Ok(machine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MachineError;

    #[test]
    fn build_requires_initial_state() {
        let result = MachineBuilder::<()>::new(2).build();
        assert!(matches!(result, Err(BuildError::MissingInitialState)));
    }

    #[test]
    fn build_rejects_zero_capacity() {
        let result = MachineBuilder::<()>::new(0).initial(0).build();
        assert!(matches!(
            result,
            Err(BuildError::Machine(MachineError::ZeroCapacity))
        ));
    }

    #[test]
    fn build_surfaces_out_of_range_state() {
        let result = MachineBuilder::<()>::new(2)
            .initial(0)
            .state(5, StateCallbacks::none())
            .build();
        assert!(matches!(
            result,
            Err(BuildError::Machine(MachineError::OutOfRange {
                id: 5,
                capacity: 2
            }))
        ));
    }

    #[test]
    fn build_surfaces_duplicate_state() {
        let result = MachineBuilder::<()>::new(2)
            .initial(0)
            .state(1, StateCallbacks::none())
            .state(1, StateCallbacks::none())
            .build();
        assert!(matches!(
            result,
            Err(BuildError::Machine(MachineError::AlreadyRegistered { id: 1 }))
        ));
    }

    #[test]
    fn fluent_api_builds_working_machine() {
        let mut machine: Machine<Vec<StateId>> = MachineBuilder::new(3)
            .initial(0)
            .steady_state(0, |log: &mut Vec<StateId>| log.push(0))
            .state(
                1,
                StateCallbacks::none().enter(|exited, log: &mut Vec<StateId>| log.push(exited)),
            )
            .transition(0, 1)
            .transition(1, 2)
            .build()
            .unwrap();

        assert_eq!(machine.current_state(), 0);
        assert!(machine.is_registered(0).unwrap());
        assert!(machine.is_registered(1).unwrap());
        assert!(!machine.is_registered(2).unwrap());
        assert!(machine.can_transition(0, 1).unwrap());
        assert!(machine.can_transition(1, 2).unwrap());

        let mut log = Vec::new();
        machine.step(&mut log);
        machine.request_transition(1).unwrap();
        machine.step(&mut log);
        assert_eq!(log, vec![0, 0]);
        assert_eq!(machine.current_state(), 1);
    }

    #[test]
    fn duplicate_edges_are_harmless() {
        let machine = MachineBuilder::<()>::new(2)
            .initial(0)
            .transition(0, 1)
            .transition(0, 1)
            .build()
            .unwrap();
        assert!(machine.can_transition(0, 1).unwrap());
    }
}
