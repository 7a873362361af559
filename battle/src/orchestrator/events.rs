//! Notifications emitted to the host

use super::states::BattleState;
use crate::types::Controller;

/// How an encounter ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncounterOutcome {
    /// The enemy fainted
    Victory,
    /// The player's combatant fainted
    Defeat,
    /// The player ran away
    Fled,
}

/// Something the host may want to present, drained once per tick
#[derive(Debug, Clone, PartialEq)]
pub enum BattleEvent {
    StateEntered(BattleState),
    /// A message became visible and waits for acknowledgement
    MessageShown(String),
    HealthChanged {
        controller: Controller,
        current: u32,
        max: u32,
    },
    /// Terminal notification; nothing follows it
    Finished(EncounterOutcome),
}
