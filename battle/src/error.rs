use tallgrass_fsm::FsmError;
use thiserror::Error;

/// Configuration errors surfaced while setting up or driving an encounter.
///
/// Invalid player input is never an error; it is absorbed by the battle.
#[derive(Error, Debug)]
pub enum BattleError {
    #[error(transparent)]
    StateMachine(#[from] FsmError),

    #[error("{combatant} references unknown attack id {attack_id}")]
    MissingAttack { combatant: String, attack_id: u32 },

    #[error("Invalid template for {name}: {reason}")]
    InvalidTemplate { name: String, reason: String },

    #[error("Invalid battle data: {0}")]
    Data(#[from] serde_json::Error),
}
