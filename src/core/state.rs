//! State identifiers and per-state callbacks.
//!
//! States are addressed by their fixed position in the machine's registry,
//! so an id is nothing more than an index. Behavior is attached to a state
//! at registration time as a pair of optional callbacks.

use std::fmt;

/// Identifier of a state: its fixed position in the machine's registry.
///
/// Ids are assigned at construction time (0-based, contiguous) and never
/// change. Every id below the machine's capacity names a slot, whether or
/// not a state has been registered there yet.
pub type StateId = usize;

/// Callback invoked once per step while the machine stays in its state.
///
/// Receives the caller-supplied context for that step.
pub type SteadyFn<C> = Box<dyn FnMut(&mut C) + Send>;

/// Callback invoked once, immediately after a transition lands on its state.
///
/// Receives the id of the state just exited and the caller-supplied context
/// for that step.
pub type EnterFn<C> = Box<dyn FnMut(StateId, &mut C) + Send>;

/// Behavior attached to a state when it is registered.
///
/// Both callbacks are optional: a state may legally have neither, in which
/// case stepping through it does nothing observable.
///
/// # Example
///
/// ```rust
/// use machina::{StateCallbacks, StateId};
///
/// let callbacks: StateCallbacks<u32> = StateCallbacks::none()
///     .steady(|ticks: &mut u32| *ticks += 1)
///     .enter(|exited: StateId, _ticks: &mut u32| {
///         println!("arrived from state {exited}");
///     });
///
/// assert!(callbacks.has_steady());
/// assert!(callbacks.has_enter());
/// ```
pub struct StateCallbacks<C> {
    /// Invoked on every step in which the machine stays in this state.
    pub on_steady: Option<SteadyFn<C>>,
    /// Invoked once after a transition lands on this state.
    pub on_enter: Option<EnterFn<C>>,
}

impl<C> StateCallbacks<C> {
    /// Create an empty callback set (neither callback registered).
    pub fn none() -> Self {
        Self {
            on_steady: None,
            on_enter: None,
        }
    }

    /// Attach the steady-state callback.
    pub fn steady<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut C) + Send + 'static,
    {
        self.on_steady = Some(Box::new(f));
        self
    }

    /// Attach the on-enter callback.
    pub fn enter<F>(mut self, f: F) -> Self
    where
        F: FnMut(StateId, &mut C) + Send + 'static,
    {
        self.on_enter = Some(Box::new(f));
        self
    }

    /// Whether a steady-state callback is attached.
    pub fn has_steady(&self) -> bool {
        self.on_steady.is_some()
    }

    /// Whether an on-enter callback is attached.
    pub fn has_enter(&self) -> bool {
        self.on_enter.is_some()
    }
}

impl<C> Default for StateCallbacks<C> {
    fn default() -> Self {
        Self::none()
    }
}

impl<C> fmt::Debug for StateCallbacks<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCallbacks")
            .field("on_steady", &self.on_steady.is_some())
            .field("on_enter", &self.on_enter.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_has_no_callbacks() {
        let callbacks: StateCallbacks<()> = StateCallbacks::none();
        assert!(!callbacks.has_steady());
        assert!(!callbacks.has_enter());
    }

    #[test]
    fn default_matches_none() {
        let callbacks: StateCallbacks<u32> = StateCallbacks::default();
        assert!(!callbacks.has_steady());
        assert!(!callbacks.has_enter());
    }

    #[test]
    fn steady_attaches_callback() {
        let callbacks: StateCallbacks<u32> =
            StateCallbacks::none().steady(|count| *count += 1);
        assert!(callbacks.has_steady());
        assert!(!callbacks.has_enter());
    }

    #[test]
    fn enter_attaches_callback() {
        let callbacks: StateCallbacks<u32> =
            StateCallbacks::none().enter(|_exited, count| *count += 1);
        assert!(!callbacks.has_steady());
        assert!(callbacks.has_enter());
    }

    #[test]
    fn stored_callbacks_mutate_context() {
        let mut callbacks: StateCallbacks<Vec<StateId>> = StateCallbacks::none()
            .steady(|seen: &mut Vec<StateId>| seen.push(usize::MAX))
            .enter(|exited, seen| seen.push(exited));

        let mut seen = Vec::new();
        if let Some(steady) = callbacks.on_steady.as_mut() {
            steady(&mut seen);
        }
        if let Some(enter) = callbacks.on_enter.as_mut() {
            enter(7, &mut seen);
        }

        assert_eq!(seen, vec![usize::MAX, 7]);
    }

    #[test]
    fn debug_reports_presence_not_contents() {
        let callbacks: StateCallbacks<()> = StateCallbacks::none().steady(|_| {});
        let rendered = format!("{callbacks:?}");
        assert!(rendered.contains("on_steady: true"));
        assert!(rendered.contains("on_enter: false"));
    }
}
