//! The machine: state registry, transition table, and the step dispatcher.

use super::error::MachineError;
use super::state::{StateCallbacks, StateId};
use super::targets::TargetSet;

/// One slot in the registry. The slot's index in the machine is its id.
#[derive(Debug)]
struct StateSlot<C> {
    enabled: bool,
    targets: TargetSet,
    callbacks: StateCallbacks<C>,
}

impl<C> StateSlot<C> {
    fn empty(capacity: usize) -> Self {
        Self {
            enabled: false,
            targets: TargetSet::with_capacity(capacity),
            callbacks: StateCallbacks::none(),
        }
    }
}

/// A finite state machine driven one step at a time by the caller.
///
/// The machine owns a fixed-capacity registry of states, a per-state table
/// of valid transition targets, and the dispatcher that advances it. It has
/// no timing or threading of its own: the embedder decides when to call
/// [`step`](Machine::step), typically from a polling or event loop.
///
/// `C` is the caller-defined context type delivered to callbacks on every
/// step. The context is borrowed only for the duration of that call; the
/// machine never retains it.
///
/// Destruction is ordinary ownership: dropping the machine releases every
/// slot and its boxed callbacks exactly once, and a moved-out machine
/// cannot be used again. There is no dangling-handle failure mode to check
/// for at runtime.
///
/// # Example
///
/// ```rust
/// use machina::{Machine, StateCallbacks};
///
/// const IDLE: usize = 0;
/// const BUSY: usize = 1;
///
/// # fn main() -> Result<(), machina::MachineError> {
/// let mut machine: Machine<u32> = Machine::new(2, IDLE)?;
/// machine.register_state(IDLE, StateCallbacks::none().steady(|ticks| *ticks += 1))?;
/// machine.register_state(BUSY, StateCallbacks::none().enter(|exited, _ticks| {
///     assert_eq!(exited, IDLE);
/// }))?;
/// machine.register_transition(IDLE, BUSY)?;
///
/// let mut ticks = 0;
/// machine.step(&mut ticks); // steady: stays in IDLE
/// assert_eq!(ticks, 1);
///
/// machine.request_transition(BUSY)?; // deferred: records intent only
/// assert_eq!(machine.current_state(), IDLE);
///
/// assert_eq!(machine.step(&mut ticks), BUSY); // transition commits here
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Machine<C> {
    slots: Vec<StateSlot<C>>,
    current: StateId,
    /// Deferred transition request. `None` means no transition is pending,
    /// which keeps a pending self-transition (`Some(current)`) distinct
    /// from the steady case without reserving a sentinel id.
    pending: Option<StateId>,
}

impl<C> Machine<C> {
    /// Create a machine with `capacity` state slots, starting in `initial`.
    ///
    /// Every slot begins unregistered, with no callbacks and no outgoing
    /// transitions. No callback fires for the starting state; `on_enter`
    /// only ever runs as part of a transition.
    ///
    /// # Errors
    ///
    /// [`MachineError::ZeroCapacity`] if `capacity` is zero, and
    /// [`MachineError::OutOfRange`] if `initial >= capacity`.
    pub fn new(capacity: usize, initial: StateId) -> Result<Self, MachineError> {
        if capacity == 0 {
            return Err(MachineError::ZeroCapacity);
        }
        if initial >= capacity {
            return Err(MachineError::OutOfRange {
                id: initial,
                capacity,
            });
        }

        let slots = (0..capacity).map(|_| StateSlot::empty(capacity)).collect();
        Ok(Self {
            slots,
            current: initial,
            pending: None,
        })
    }

    /// Number of state slots. Valid ids are `0..capacity`.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Id of the state the machine is presently in.
    pub fn current_state(&self) -> StateId {
        self.current
    }

    /// Id of the state the machine will be in after the next step.
    ///
    /// Equals [`current_state`](Machine::current_state) when no transition
    /// is pending.
    pub fn requested_state(&self) -> StateId {
        self.pending.unwrap_or(self.current)
    }

    /// Whether a transition request is waiting to be consumed by the next
    /// step. A pending self-transition also reports `true`.
    pub fn transition_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Attach behavior to the state slot at `id`, enabling it.
    ///
    /// A state may be registered exactly once; re-registration is rejected
    /// rather than overwritten, as a guard against accidental
    /// double-configuration. Both callbacks are optional
    /// ([`StateCallbacks::none`] is a legal registration).
    ///
    /// # Errors
    ///
    /// [`MachineError::OutOfRange`] if `id >= capacity`, or
    /// [`MachineError::AlreadyRegistered`] if the slot is enabled. In the
    /// latter case the first registration's callbacks remain in effect.
    pub fn register_state(
        &mut self,
        id: StateId,
        callbacks: StateCallbacks<C>,
    ) -> Result<(), MachineError> {
        self.check_id(id)?;
        let slot = &mut self.slots[id];
        if slot.enabled {
            return Err(MachineError::AlreadyRegistered { id });
        }
        slot.enabled = true;
        slot.callbacks = callbacks;
        Ok(())
    }

    /// Whether the state slot at `id` has been registered.
    ///
    /// # Errors
    ///
    /// [`MachineError::OutOfRange`] if `id >= capacity`.
    pub fn is_registered(&self, id: StateId) -> Result<bool, MachineError> {
        self.check_id(id)?;
        Ok(self.slots[id].enabled)
    }

    /// Record that `to` is directly reachable from `from`.
    ///
    /// Idempotent: registering the same edge twice is harmless. Self-edges
    /// (`from == to`) are permitted and make a self-transition requestable;
    /// the dispatcher treats it like any other transition, firing `on_enter`
    /// even though the id does not change.
    ///
    /// Neither endpoint needs to be registered yet; adjacency is purely
    /// topological.
    ///
    /// # Errors
    ///
    /// [`MachineError::OutOfRange`] if either id is `>= capacity`.
    pub fn register_transition(&mut self, from: StateId, to: StateId) -> Result<(), MachineError> {
        self.check_id(from)?;
        self.check_id(to)?;
        self.slots[from].targets.insert(to);
        Ok(())
    }

    /// Whether an edge `from -> to` has been registered.
    ///
    /// # Errors
    ///
    /// [`MachineError::OutOfRange`] if either id is `>= capacity`.
    pub fn can_transition(&self, from: StateId, to: StateId) -> Result<bool, MachineError> {
        self.check_id(from)?;
        self.check_id(to)?;
        Ok(self.slots[from].targets.contains(to))
    }

    /// Iterate over the ids directly reachable from `id`, ascending.
    ///
    /// # Errors
    ///
    /// [`MachineError::OutOfRange`] if `id >= capacity`.
    pub fn valid_targets(
        &self,
        id: StateId,
    ) -> Result<impl Iterator<Item = StateId> + '_, MachineError> {
        self.check_id(id)?;
        Ok(self.slots[id].targets.iter())
    }

    /// Request a transition to `target`, to be executed by the next step.
    ///
    /// This call is deferred: it never moves the machine, it only records
    /// intent. Calling it again before the next step overwrites the pending
    /// request (last write wins); there is no queue of requests.
    ///
    /// # Errors
    ///
    /// [`MachineError::OutOfRange`] if `target >= capacity`, or
    /// [`MachineError::IllegalTransition`] if no edge exists from the
    /// current state to `target`. On error the machine is unchanged and any
    /// previously pending request stays in place.
    pub fn request_transition(&mut self, target: StateId) -> Result<(), MachineError> {
        self.check_id(target)?;
        if !self.slots[self.current].targets.contains(target) {
            return Err(MachineError::IllegalTransition {
                from: self.current,
                to: target,
            });
        }
        self.pending = Some(target);
        Ok(())
    }

    /// Advance the machine by one step and return the id it ends up in.
    ///
    /// Two cases:
    ///
    /// - No transition pending: the current state's `on_steady` callback
    ///   runs (if attached) and the state does not change. This is the
    ///   common tick path.
    /// - A transition is pending: the machine commits to the target first,
    ///   then runs the target's `on_enter` callback (if attached) with the
    ///   id of the state just exited. Exactly one callback fires per
    ///   transition; the state being left gets no exit callback. A pending
    ///   self-transition takes this path too, with `exited == target`.
    ///
    /// The pending request is consumed either way, so stepping again
    /// without a new request takes the steady path. Callbacks run inline
    /// and complete before `step` returns; `ctx` is borrowed only for this
    /// call.
    pub fn step(&mut self, ctx: &mut C) -> StateId {
        match self.pending.take() {
            Some(target) => {
                let exited = self.current;
                // Committed before the callback runs: a transition cannot
                // be canceled mid-step.
                self.current = target;
                if let Some(enter) = self.slots[target].callbacks.on_enter.as_mut() {
                    enter(exited, ctx);
                }
            }
            None => {
                if let Some(steady) = self.slots[self.current].callbacks.on_steady.as_mut() {
                    steady(ctx);
                }
            }
        }
        self.current
    }

    fn check_id(&self, id: StateId) -> Result<(), MachineError> {
        if id >= self.slots.len() {
            return Err(MachineError::OutOfRange {
                id,
                capacity: self.slots.len(),
            });
        }
        Ok(())
    }
}
