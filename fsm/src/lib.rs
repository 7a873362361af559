//! Named-state machine with lifecycle hooks and deferred transitions.
//!
//! States are registered up front with optional `on_enter` and `on_update`
//! hooks. Every hook receives the owner's context explicitly along with a
//! [`Transitions`] handle through which it may request further transitions.
//!
//! Requests made while a state is being entered are queued and drained in
//! FIFO order once the current `on_enter` returns, so enter hooks never nest
//! and a chain of transitions settles before [`StateMachine::set_state`]
//! hands control back.
//!
//! # Example
//!
//! ```
//! use tallgrass_fsm::{StateDef, StateMachine, Transitions, FsmError};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Light { Red, Green }
//!
//! fn red(count: &mut u32, next: &mut Transitions<'_, Light>) -> Result<(), FsmError> {
//!     *count += 1;
//!     next.request(Light::Green)
//! }
//!
//! let mut machine: StateMachine<Light, u32> = StateMachine::new("lights");
//! machine.add_state(StateDef::new(Light::Red).on_enter(red)).unwrap();
//! machine.add_state(StateDef::new(Light::Green)).unwrap();
//!
//! let mut count = 0;
//! machine.set_state(&mut count, Light::Red).unwrap();
//! assert_eq!(machine.current_state(), Some(Light::Green));
//! assert_eq!(count, 1);
//! ```

mod machine;
mod state;

use thiserror::Error;

pub use machine::StateMachine;
pub use state::{EnterHook, StateDef, StateId, Transitions, UpdateHook};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FsmError {
    #[error("[{machine}] unknown state {requested}, registered states: {registered:?}")]
    UnknownState {
        machine: String,
        requested: String,
        registered: Vec<String>,
    },

    #[error("[{machine}] state {name} is already registered")]
    DuplicateState { machine: String, name: String },
}

impl FsmError {
    pub(crate) fn unknown<S: StateId>(machine: &str, requested: S, registered: &[S]) -> Self {
        FsmError::UnknownState {
            machine: machine.to_string(),
            requested: format!("{:?}", requested),
            registered: registered.iter().map(|s| format!("{:?}", s)).collect(),
        }
    }
}
