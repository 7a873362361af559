//! The encounter's state graph

use std::fmt;

use tallgrass_fsm::{FsmError, StateDef, Transitions};

use super::Tick;
use super::encounter::{Encounter, Step};
use super::events::{BattleEvent, EncounterOutcome};
use crate::ui::MenuChoice;

/// Phases of an encounter, in transition order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BattleState {
    Intro,
    PreBattleInfo,
    BringOutMonster,
    PlayerInput,
    EnemyInput,
    Battle,
    PostAttackCheck,
    FleeAttempt,
    Finished,
}

impl BattleState {
    pub const ALL: [BattleState; 9] = [
        BattleState::Intro,
        BattleState::PreBattleInfo,
        BattleState::BringOutMonster,
        BattleState::PlayerInput,
        BattleState::EnemyInput,
        BattleState::Battle,
        BattleState::PostAttackCheck,
        BattleState::FleeAttempt,
        BattleState::Finished,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BattleState::Intro => "INTRO",
            BattleState::PreBattleInfo => "PRE_BATTLE_INFO",
            BattleState::BringOutMonster => "BRING_OUT_MONSTER",
            BattleState::PlayerInput => "PLAYER_INPUT",
            BattleState::EnemyInput => "ENEMY_INPUT",
            BattleState::Battle => "BATTLE",
            BattleState::PostAttackCheck => "POST_ATTACK_CHECK",
            BattleState::FleeAttempt => "FLEE_ATTEMPT",
            BattleState::Finished => "FINISHED",
        }
    }
}

impl fmt::Display for BattleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Requests<'a> = Transitions<'a, BattleState>;

pub(crate) fn definitions() -> Vec<StateDef<BattleState, Encounter, Tick>> {
    vec![
        StateDef::new(BattleState::Intro).on_enter(intro),
        StateDef::new(BattleState::PreBattleInfo).on_enter(pre_battle_info),
        StateDef::new(BattleState::BringOutMonster).on_enter(bring_out_monster),
        StateDef::new(BattleState::PlayerInput)
            .on_enter(player_input)
            .on_update(collect_player_input),
        StateDef::new(BattleState::EnemyInput).on_enter(enemy_input),
        StateDef::new(BattleState::Battle).on_enter(battle),
        StateDef::new(BattleState::PostAttackCheck).on_enter(post_attack_check),
        StateDef::new(BattleState::FleeAttempt).on_enter(flee_attempt),
        StateDef::new(BattleState::Finished).on_enter(finished),
    ]
}

fn intro(enc: &mut Encounter, _: &mut Requests<'_>) -> Result<(), FsmError> {
    enc.entered(BattleState::Intro);
    enc.after(enc.timing.intro_delay(), Step::Enter(BattleState::PreBattleInfo));
    Ok(())
}

fn pre_battle_info(enc: &mut Encounter, _: &mut Requests<'_>) -> Result<(), FsmError> {
    enc.entered(BattleState::PreBattleInfo);
    let message = format!("wild {} appeared!", enc.enemy.name());
    enc.show_messages(
        vec![message],
        Step::EnterAfterPause(BattleState::BringOutMonster),
    );
    Ok(())
}

fn bring_out_monster(enc: &mut Encounter, _: &mut Requests<'_>) -> Result<(), FsmError> {
    enc.entered(BattleState::BringOutMonster);
    let message = format!("go {}!", enc.player.name());
    enc.show_messages(vec![message], Step::EnterAfterPause(BattleState::PlayerInput));
    Ok(())
}

fn player_input(enc: &mut Encounter, _: &mut Requests<'_>) -> Result<(), FsmError> {
    enc.entered(BattleState::PlayerInput);
    enc.selected_attack_index = None;
    enc.gateway.clear_selected_attack();
    enc.gateway.hide_move_submenu();
    enc.gateway.show_main_menu();
    Ok(())
}

fn collect_player_input(
    enc: &mut Encounter,
    next: &mut Requests<'_>,
    _: &Tick,
) -> Result<(), FsmError> {
    if enc.dialog.is_waiting() {
        return Ok(());
    }

    if let Some(choice) = enc.gateway.take_menu_choice() {
        enc.gateway.hide_main_menu();
        let message = match choice {
            MenuChoice::Flee => return next.request(BattleState::FleeAttempt),
            MenuChoice::Item => "Your bag is empty...",
            MenuChoice::Switch => "You have no other monsters to switch to...",
        };
        enc.show_messages(vec![message.to_string()], Step::ReturnToMenu);
        return Ok(());
    }

    let Some(index) = enc.gateway.selected_attack() else {
        return Ok(());
    };
    if enc.player.attack(index).is_none() {
        tracing::trace!(index, "selected slot holds no attack");
        return Ok(());
    }

    enc.selected_attack_index = Some(index);
    enc.gateway.clear_selected_attack();
    enc.gateway.hide_move_submenu();
    enc.gateway.hide_main_menu();
    next.request(BattleState::EnemyInput)
}

fn enemy_input(enc: &mut Encounter, next: &mut Requests<'_>) -> Result<(), FsmError> {
    enc.entered(BattleState::EnemyInput);
    enc.enemy_attack_index = enc.strategy.choose_attack(&enc.enemy, &enc.player);
    next.request(BattleState::Battle)
}

fn battle(enc: &mut Encounter, next: &mut Requests<'_>) -> Result<(), FsmError> {
    enc.entered(BattleState::Battle);

    let attack = enc
        .selected_attack_index
        .take()
        .and_then(|index| enc.player.attack(index))
        .map(|attack| attack.name.clone());
    let Some(attack) = attack else {
        tracing::debug!("no player attack chosen, back to input");
        return next.request(BattleState::PlayerInput);
    };

    enc.turn += 1;
    let message = format!("{} used {}", enc.player.name(), attack);
    enc.show_messages(vec![message], Step::PlayerAttackAnnounced);
    Ok(())
}

fn post_attack_check(enc: &mut Encounter, next: &mut Requests<'_>) -> Result<(), FsmError> {
    enc.entered(BattleState::PostAttackCheck);

    if enc.enemy.is_fainted() {
        let messages = vec![
            format!("Wild {} fainted", enc.enemy.name()),
            "You have gained some experience".to_string(),
        ];
        enc.show_messages(messages, Step::Conclude(EncounterOutcome::Victory));
        return Ok(());
    }

    if enc.player.is_fainted() {
        let messages = vec![
            format!("{} fainted.", enc.player.name()),
            "You have no more monsters, escaping to safety...".to_string(),
        ];
        enc.show_messages(messages, Step::Conclude(EncounterOutcome::Defeat));
        return Ok(());
    }

    next.request(BattleState::PlayerInput)
}

fn flee_attempt(enc: &mut Encounter, _: &mut Requests<'_>) -> Result<(), FsmError> {
    enc.entered(BattleState::FleeAttempt);
    enc.show_messages(
        vec!["You got away safely!".to_string()],
        Step::Conclude(EncounterOutcome::Fled),
    );
    Ok(())
}

fn finished(enc: &mut Encounter, _: &mut Requests<'_>) -> Result<(), FsmError> {
    enc.entered(BattleState::Finished);
    enc.gateway.hide_move_submenu();
    enc.gateway.hide_main_menu();

    match enc.outcome {
        Some(outcome) => {
            tracing::info!(?outcome, turns = enc.turn, "encounter finished");
            enc.push_event(BattleEvent::Finished(outcome));
        }
        None => tracing::warn!("encounter finished without an outcome"),
    }
    Ok(())
}
