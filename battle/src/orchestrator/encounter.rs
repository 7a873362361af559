//! Encounter - the mutable battle state every state hook receives

use super::events::{BattleEvent, EncounterOutcome};
use super::states::BattleState;
use crate::strategy::EnemyStrategy;
use crate::timeline::{Scheduler, Timeline};
use crate::types::{AttackTable, BattleTiming, Combatant, Controller, EncounterConfig};
use crate::ui::{Acknowledged, Dialog, InputGateway};
use crate::BattleError;

/// Continuations resumed once a delay, animation or acknowledgement completes.
///
/// At most one is outstanding at a time; each one's handler schedules the
/// next step of its sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Enter(BattleState),
    /// Wait the post-message pause, then enter
    EnterAfterPause(BattleState),
    PlayerAttackAnnounced,
    PlayerStrike,
    PlayerStrikeLanded,
    EnemyAttackAnnounced,
    EnemyStrike,
    EnemyStrikeLanded,
    ReturnToMenu,
    Conclude(EncounterOutcome),
}

pub(crate) struct Encounter {
    // === Combatants ===
    pub(crate) player: Combatant,
    pub(crate) enemy: Combatant,

    // === Collaborators ===
    pub(crate) gateway: Box<dyn InputGateway>,
    pub(crate) strategy: Box<dyn EnemyStrategy>,
    pub(crate) dialog: Dialog<Step>,
    pub(crate) timeline: Timeline<Step>,
    pub(crate) timing: BattleTiming,

    // === Turn state ===
    /// Number of exchanges started
    pub(crate) turn: u32,

    /// Player's confirmed attack slot, consumed when the exchange starts
    pub(crate) selected_attack_index: Option<usize>,

    pub(crate) enemy_attack_index: Option<usize>,

    pub(crate) outcome: Option<EncounterOutcome>,

    events: Vec<BattleEvent>,
}

impl Encounter {
    pub(crate) fn new(
        config: &EncounterConfig,
        attacks: &AttackTable,
        mut gateway: Box<dyn InputGateway>,
        strategy: Box<dyn EnemyStrategy>,
    ) -> Result<Self, BattleError> {
        let animation = config.timing.health_animation();
        let player = Combatant::from_template(&config.player, attacks, Controller::Player)?
            .with_meter_animation(animation);
        let enemy = Combatant::from_template(&config.enemy, attacks, Controller::Ai)?
            .with_meter_animation(animation);

        gateway.set_active_monster(player.name(), player.attacks());
        gateway.hide_move_submenu();
        gateway.hide_main_menu();

        Ok(Self {
            player,
            enemy,
            gateway,
            strategy,
            dialog: Dialog::new(),
            timeline: Timeline::new(),
            timing: config.timing.clone(),
            turn: 0,
            selected_attack_index: None,
            enemy_attack_index: None,
            outcome: None,
            events: Vec::new(),
        })
    }

    pub(crate) fn entered(&mut self, state: BattleState) {
        self.events.push(BattleEvent::StateEntered(state));
    }

    pub(crate) fn push_event(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub(crate) fn drain_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Put `messages` on screen; `then` resumes after the last is dismissed
    pub(crate) fn show_messages(&mut self, messages: Vec<String>, then: Step) {
        if let Some(first) = self.dialog.display_messages_and_wait(messages, then) {
            self.events.push(BattleEvent::MessageShown(first.to_string()));
        }
    }

    pub(crate) fn acknowledge(&mut self) {
        if let Acknowledged::Next(message) = self.dialog.acknowledge() {
            self.events.push(BattleEvent::MessageShown(message));
        }
    }

    pub(crate) fn after(&mut self, delay: std::time::Duration, step: Step) {
        self.timeline.schedule_delayed(delay, step);
    }

    /// Run one continuation. Returns the state to transition to, if any.
    pub(crate) fn resume(&mut self, step: Step) -> Option<BattleState> {
        tracing::trace!(?step, "resuming");
        match step {
            Step::Enter(state) => Some(state),
            Step::EnterAfterPause(state) => {
                self.after(self.timing.message_delay(), Step::Enter(state));
                None
            }
            Step::PlayerAttackAnnounced => {
                self.after(self.timing.attack_delay(), Step::PlayerStrike);
                None
            }
            Step::PlayerStrike => {
                let damage = self.player.base_attack();
                self.enemy
                    .apply_damage(damage, &mut self.timeline, Step::PlayerStrikeLanded);
                self.health_changed(Controller::Ai);
                None
            }
            Step::PlayerStrikeLanded => {
                if self.enemy.is_fainted() {
                    return Some(BattleState::PostAttackCheck);
                }
                self.announce_enemy_attack()
            }
            Step::EnemyAttackAnnounced => {
                self.after(self.timing.attack_delay(), Step::EnemyStrike);
                None
            }
            Step::EnemyStrike => {
                let damage = self.enemy.base_attack();
                self.player
                    .apply_damage(damage, &mut self.timeline, Step::EnemyStrikeLanded);
                self.health_changed(Controller::Player);
                None
            }
            Step::EnemyStrikeLanded => Some(BattleState::PostAttackCheck),
            Step::ReturnToMenu => {
                self.gateway.show_main_menu();
                None
            }
            Step::Conclude(outcome) => {
                self.outcome = Some(outcome);
                Some(BattleState::Finished)
            }
        }
    }

    fn announce_enemy_attack(&mut self) -> Option<BattleState> {
        let attack = self
            .enemy_attack_index
            .take()
            .and_then(|index| self.enemy.attack(index))
            .map(|attack| attack.name.clone());

        let Some(attack) = attack else {
            tracing::debug!(enemy = %self.enemy.name(), "enemy has no attack to use");
            return Some(BattleState::PostAttackCheck);
        };

        let message = format!("foe {} used {}", self.enemy.name(), attack);
        self.show_messages(vec![message], Step::EnemyAttackAnnounced);
        None
    }

    fn health_changed(&mut self, controller: Controller) {
        let combatant = match controller {
            Controller::Player => &self.player,
            Controller::Ai => &self.enemy,
        };
        let event = BattleEvent::HealthChanged {
            controller,
            current: combatant.current_health(),
            max: combatant.max_health(),
        };
        self.events.push(event);
    }
}
