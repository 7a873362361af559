//! State definitions and the request handle passed to hooks

use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;

use crate::FsmError;

/// Anything usable as a state key (usually a fieldless enum)
pub trait StateId: Copy + Eq + Hash + fmt::Debug {}

impl<T> StateId for T where T: Copy + Eq + Hash + fmt::Debug {}

/// Invoked once every time the state is entered
pub type EnterHook<S, C> = fn(&mut C, &mut Transitions<'_, S>) -> Result<(), FsmError>;

/// Invoked once per tick while the state is current
pub type UpdateHook<S, C, A> =
    fn(&mut C, &mut Transitions<'_, S>, &A) -> Result<(), FsmError>;

/// A registered state and its lifecycle hooks
pub struct StateDef<S, C, A = ()> {
    pub(crate) name: S,
    pub(crate) on_enter: Option<EnterHook<S, C>>,
    pub(crate) on_update: Option<UpdateHook<S, C, A>>,
}

impl<S: StateId, C, A> StateDef<S, C, A> {
    /// Create a state with no hooks
    pub fn new(name: S) -> Self {
        Self {
            name,
            on_enter: None,
            on_update: None,
        }
    }

    pub fn on_enter(mut self, hook: EnterHook<S, C>) -> Self {
        self.on_enter = Some(hook);
        self
    }

    pub fn on_update(mut self, hook: UpdateHook<S, C, A>) -> Self {
        self.on_update = Some(hook);
        self
    }

    pub fn name(&self) -> S {
        self.name
    }
}

impl<S: StateId, C, A> fmt::Debug for StateDef<S, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDef")
            .field("name", &self.name)
            .field("on_enter", &self.on_enter.is_some())
            .field("on_update", &self.on_update.is_some())
            .finish()
    }
}

/// Handle through which hooks request transitions.
///
/// Requests are validated immediately against the registered states and
/// applied by the machine, in order, after the hook returns.
pub struct Transitions<'a, S> {
    machine: &'a str,
    registered: &'a [S],
    queue: &'a mut VecDeque<S>,
    entering: bool,
}

impl<'a, S: StateId> Transitions<'a, S> {
    pub(crate) fn new(
        machine: &'a str,
        registered: &'a [S],
        queue: &'a mut VecDeque<S>,
        entering: bool,
    ) -> Self {
        Self {
            machine,
            registered,
            queue,
            entering,
        }
    }

    /// Request a transition to `name` once the running hook has returned
    pub fn request(&mut self, name: S) -> Result<(), FsmError> {
        if !self.registered.contains(&name) {
            return Err(FsmError::unknown(self.machine, name, self.registered));
        }
        tracing::trace!(machine = %self.machine, state = ?name, "transition queued");
        self.queue.push_back(name);
        Ok(())
    }

    /// True inside `on_enter`, while the transition that invoked the hook is
    /// still in flight; false inside `on_update`
    pub fn is_changing_state(&self) -> bool {
        self.entering
    }

    /// Number of transitions waiting to be applied
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}
