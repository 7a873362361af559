//! BattleOrchestrator - drives an encounter through its state graph
//!
//! The host calls [`BattleOrchestrator::tick`] once per frame with the time
//! elapsed and at most one input event. Within a tick the orchestrator:
//!
//! 1. routes the input to the message layer when a message awaits
//!    acknowledgement, otherwise to the battle menu while in `PLAYER_INPUT`,
//!    otherwise drops it
//! 2. advances the timeline and resumes every continuation now due
//! 3. resumes the continuation released by an acknowledged message
//! 4. runs the current state's update hook
//!
//! and returns the events produced along the way.

mod encounter;
mod events;
mod states;

#[cfg(test)]
mod tests;

use std::time::Duration;

use tallgrass_fsm::StateMachine;

use crate::strategy::{EnemyStrategy, FirstAttack};
use crate::timeline::Scheduler;
use crate::types::{AttackTable, Combatant, EncounterConfig};
use crate::ui::{BattleMenu, InputEvent, InputGateway};
use crate::BattleError;

use encounter::{Encounter, Step};

pub use events::{BattleEvent, EncounterOutcome};
pub use states::BattleState;

/// Arguments handed to update hooks every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Time since the previous tick
    pub delta: Duration,
    /// Timeline clock after advancing
    pub now: Duration,
}

/// Runs one encounter from `INTRO` to `FINISHED`
pub struct BattleOrchestrator {
    machine: StateMachine<BattleState, Encounter, Tick>,
    encounter: Encounter,
}

impl BattleOrchestrator {
    /// Build both combatants and enter `INTRO`, using the default battle
    /// menu and an enemy that always picks its first attack
    pub fn start(config: &EncounterConfig, attacks: &AttackTable) -> Result<Self, BattleError> {
        Self::start_with(
            config,
            attacks,
            Box::new(BattleMenu::new()),
            Box::new(FirstAttack),
        )
    }

    /// Start with a custom input gateway and enemy strategy
    pub fn start_with(
        config: &EncounterConfig,
        attacks: &AttackTable,
        gateway: Box<dyn InputGateway>,
        strategy: Box<dyn EnemyStrategy>,
    ) -> Result<Self, BattleError> {
        let encounter = Encounter::new(config, attacks, gateway, strategy)?;

        let mut machine = StateMachine::new("battle");
        for def in states::definitions() {
            machine.add_state(def)?;
        }

        let mut orchestrator = Self { machine, encounter };
        tracing::info!(
            player = %orchestrator.encounter.player.name(),
            enemy = %orchestrator.encounter.enemy.name(),
            "encounter started"
        );
        orchestrator
            .machine
            .set_state(&mut orchestrator.encounter, BattleState::Intro)?;
        Ok(orchestrator)
    }

    /// Advance the encounter by one frame
    pub fn tick(
        &mut self,
        delta: Duration,
        input: Option<InputEvent>,
    ) -> Result<Vec<BattleEvent>, BattleError> {
        if let Some(event) = input {
            self.route_input(event);
        }

        for step in self.encounter.timeline.advance(delta) {
            self.resume(step)?;
        }

        if let Some(step) = self.encounter.dialog.take_ready() {
            self.resume(step)?;
        }

        let tick = Tick {
            delta,
            now: self.encounter.timeline.now(),
        };
        self.machine.update(&mut self.encounter, &tick)?;

        Ok(self.encounter.drain_events())
    }

    fn route_input(&mut self, event: InputEvent) {
        let encounter = &mut self.encounter;

        if encounter.dialog.is_waiting() {
            if event == InputEvent::Confirm {
                encounter.acknowledge();
            }
            return;
        }

        if self.machine.current_state() == Some(BattleState::PlayerInput) {
            encounter.gateway.handle_player_input(event);
        } else {
            tracing::trace!(?event, state = ?self.machine.current_state(), "input ignored");
        }
    }

    fn resume(&mut self, step: Step) -> Result<(), BattleError> {
        if let Some(next) = self.encounter.resume(step) {
            self.machine.set_state(&mut self.encounter, next)?;
        }
        Ok(())
    }

    pub fn current_state(&self) -> Option<BattleState> {
        self.machine.current_state()
    }

    pub fn player(&self) -> &Combatant {
        &self.encounter.player
    }

    pub fn enemy(&self) -> &Combatant {
        &self.encounter.enemy
    }

    pub fn gateway(&self) -> &dyn InputGateway {
        self.encounter.gateway.as_ref()
    }

    /// The player's confirmed attack slot not yet consumed by an exchange
    pub fn selected_attack_index(&self) -> Option<usize> {
        self.encounter.selected_attack_index
    }

    /// Number of exchanges started so far
    pub fn turn(&self) -> u32 {
        self.encounter.turn
    }

    pub fn outcome(&self) -> Option<EncounterOutcome> {
        self.encounter.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.current_state() == Some(BattleState::Finished)
    }

    /// Message on screen waiting for CONFIRM, if any
    pub fn current_message(&self) -> Option<&str> {
        self.encounter.dialog.current_message()
    }

    pub fn is_awaiting_acknowledgement(&self) -> bool {
        self.encounter.dialog.is_waiting()
    }

    /// Timeline clock; use with [`Combatant::meter`] to read meter positions
    pub fn now(&self) -> Duration {
        self.encounter.timeline.now()
    }
}
