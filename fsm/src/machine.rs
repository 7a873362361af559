//! StateMachine - registration, transitions and per-tick dispatch

use std::collections::VecDeque;
use std::fmt;

use crate::FsmError;
use crate::state::{StateDef, StateId, Transitions};

/// A finite state machine over named states.
///
/// `S` is the state key, `C` the context handed to every hook and `A` the
/// per-tick argument type forwarded to `on_update`.
pub struct StateMachine<S, C, A = ()> {
    /// Diagnostic label used in logs and errors
    name: String,

    /// Registered states, in registration order
    states: Vec<StateDef<S, C, A>>,

    /// Keys of `states`, kept separately so hooks can validate requests
    names: Vec<S>,

    current: Option<S>,

    /// Transitions waiting for the in-flight one to finish
    pending: VecDeque<S>,
}

impl<S: StateId, C, A> StateMachine<S, C, A> {
    /// Create an empty machine
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            states: Vec::new(),
            names: Vec::new(),
            current: None,
            pending: VecDeque::new(),
        }
    }

    /// Register a state. Names must be unique.
    pub fn add_state(&mut self, def: StateDef<S, C, A>) -> Result<(), FsmError> {
        if self.has_state(def.name) {
            return Err(FsmError::DuplicateState {
                machine: self.name.clone(),
                name: format!("{:?}", def.name),
            });
        }
        self.names.push(def.name);
        self.states.push(def);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The active state, `None` before the first transition
    pub fn current_state(&self) -> Option<S> {
        self.current
    }

    pub fn has_state(&self, name: S) -> bool {
        self.names.contains(&name)
    }

    /// Registered state keys in registration order
    pub fn states(&self) -> &[S] {
        &self.names
    }

    /// Transition to `name`.
    ///
    /// The state's `on_enter` runs before this returns, followed by every
    /// transition it (transitively) requested, one at a time. Entering the
    /// current state again re-runs its `on_enter`.
    ///
    /// Hooks cannot call this while a transition is in flight; they queue
    /// through [`Transitions::request`] instead.
    pub fn set_state(&mut self, ctx: &mut C, name: S) -> Result<(), FsmError> {
        if !self.has_state(name) {
            return Err(FsmError::unknown(&self.name, name, &self.names));
        }

        self.pending.push_back(name);
        self.drain(ctx)
    }

    /// Run the current state's `on_update`, then apply what it requested
    pub fn update(&mut self, ctx: &mut C, args: &A) -> Result<(), FsmError> {
        let Some(current) = self.current else {
            return Ok(());
        };
        let Some(hook) = self.def(current).and_then(|def| def.on_update) else {
            return Ok(());
        };

        let mut requests = Transitions::new(&self.name, &self.names, &mut self.pending, false);
        if let Err(error) = hook(ctx, &mut requests, args) {
            self.pending.clear();
            return Err(error);
        }

        self.drain(ctx)
    }

    fn def(&self, name: S) -> Option<&StateDef<S, C, A>> {
        self.states.iter().find(|def| def.name == name)
    }

    fn drain(&mut self, ctx: &mut C) -> Result<(), FsmError> {
        while let Some(next) = self.pending.pop_front() {
            if let Err(error) = self.enter(ctx, next) {
                self.pending.clear();
                return Err(error);
            }
        }
        Ok(())
    }

    fn enter(&mut self, ctx: &mut C, name: S) -> Result<(), FsmError> {
        let previous = self.current.replace(name);
        tracing::debug!(machine = %self.name, from = ?previous, to = ?name, "entering state");

        match self.def(name).and_then(|def| def.on_enter) {
            Some(hook) => {
                let mut requests = Transitions::new(&self.name, &self.names, &mut self.pending, true);
                hook(ctx, &mut requests)
            }
            None => Ok(()),
        }
    }
}

impl<S: StateId, C, A> fmt::Debug for StateMachine<S, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("name", &self.name)
            .field("states", &self.names)
            .field("current", &self.current)
            .field("pending", &self.pending)
            .finish()
    }
}
