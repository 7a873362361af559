use std::time::Duration;

use super::*;
use crate::types::{Attack, BattleTiming, Controller, MonsterTemplate};

const FRAME: Duration = Duration::from_millis(100);

fn attacks() -> AttackTable {
    AttackTable::new(vec![Attack::new(2, "Ice Shard"), Attack::new(3, "Ember")])
}

fn player() -> MonsterTemplate {
    MonsterTemplate::new("Iguanignite", 25, 5, 5).with_attacks([2])
}

fn enemy() -> MonsterTemplate {
    MonsterTemplate::new("Carnodusk", 25, 5, 5).with_attacks([3])
}

struct Driver {
    battle: BattleOrchestrator,
    events: Vec<BattleEvent>,
}

impl Driver {
    fn start(config: EncounterConfig) -> Self {
        Self {
            battle: BattleOrchestrator::start(&config, &attacks()).unwrap(),
            events: Vec::new(),
        }
    }

    fn standard() -> Self {
        Self::start(EncounterConfig::new(player(), enemy()))
    }

    fn tick(&mut self, input: Option<InputEvent>) {
        let events = self.battle.tick(FRAME, input).unwrap();
        self.events.extend(events);
    }

    fn ticks(&mut self, count: usize) {
        for _ in 0..count {
            self.tick(None);
        }
    }

    fn press(&mut self, input: InputEvent) {
        self.tick(Some(input));
    }

    /// Tick, acknowledging every message, until `state` is current and idle
    fn run_to(&mut self, state: BattleState) {
        for _ in 0..500 {
            let waiting = self.battle.is_awaiting_acknowledgement();
            if self.battle.current_state() == Some(state) && !waiting {
                return;
            }
            self.tick(waiting.then_some(InputEvent::Confirm));
        }
        panic!(
            "never reached {state}, stuck in {:?}",
            self.battle.current_state()
        );
    }

    /// FIGHT, then the first move slot
    fn choose_first_attack(&mut self) {
        self.press(InputEvent::Confirm);
        self.press(InputEvent::Confirm);
    }

    fn messages(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                BattleEvent::MessageShown(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    fn entered(&self) -> Vec<BattleState> {
        self.events
            .iter()
            .filter_map(|event| match event {
                BattleEvent::StateEntered(state) => Some(*state),
                _ => None,
            })
            .collect()
    }
}

#[test]
fn test_start_enters_intro() {
    let driver = Driver::standard();
    assert_eq!(driver.battle.current_state(), Some(BattleState::Intro));
    assert_eq!(driver.battle.turn(), 0);
    assert!(driver.battle.outcome().is_none());
    assert!(!driver.battle.gateway().is_main_menu_visible());
}

#[test]
fn test_meters_rest_at_start() {
    let mut driver = Driver::standard();
    let now = driver.battle.now();

    for combatant in [driver.battle.player(), driver.battle.enemy()] {
        assert!(!combatant.meter().is_animating(now));
        assert_eq!(combatant.meter().fraction_at(now), 1.0);
    }

    driver.run_to(BattleState::PlayerInput);
    let now = driver.battle.now();
    assert!(!driver.battle.player().meter().is_animating(now));
    assert!(!driver.battle.enemy().meter().is_animating(now));
}

#[test]
fn test_missing_attack_fails_start() {
    let config = EncounterConfig::new(player(), enemy().with_attacks([3, 99]));
    let result = BattleOrchestrator::start(&config, &attacks());

    match result {
        Err(BattleError::MissingAttack {
            combatant,
            attack_id,
        }) => {
            assert_eq!(combatant, "Carnodusk");
            assert_eq!(attack_id, 99);
        }
        Err(other) => panic!("unexpected error: {other:?}"),
        Ok(_) => panic!("encounter should not start"),
    }
}

#[test]
fn test_intro_sequence() {
    let mut driver = Driver::standard();

    driver.ticks(4);
    assert_eq!(driver.battle.current_state(), Some(BattleState::Intro));

    driver.tick(None);
    assert_eq!(driver.battle.current_state(), Some(BattleState::PreBattleInfo));
    assert_eq!(driver.battle.current_message(), Some("wild Carnodusk appeared!"));

    driver.run_to(BattleState::PlayerInput);

    assert_eq!(
        driver.entered(),
        vec![
            BattleState::Intro,
            BattleState::PreBattleInfo,
            BattleState::BringOutMonster,
            BattleState::PlayerInput,
        ]
    );
    assert_eq!(
        driver.messages(),
        vec!["wild Carnodusk appeared!", "go Iguanignite!"]
    );
    assert!(driver.battle.gateway().is_main_menu_visible());
    assert!(!driver.battle.gateway().is_move_submenu_visible());
}

#[test]
fn test_message_waits_for_acknowledgement() {
    let mut driver = Driver::standard();
    driver.ticks(5);

    driver.ticks(50);
    assert_eq!(driver.battle.current_state(), Some(BattleState::PreBattleInfo));
    assert!(driver.battle.is_awaiting_acknowledgement());

    // only CONFIRM dismisses a message
    driver.press(InputEvent::Cancel);
    driver.press(InputEvent::Down);
    assert!(driver.battle.is_awaiting_acknowledgement());

    driver.press(InputEvent::Confirm);
    assert!(!driver.battle.is_awaiting_acknowledgement());

    // acknowledged, but the pause before the next phase is still running
    driver.ticks(4);
    assert_eq!(driver.battle.current_state(), Some(BattleState::PreBattleInfo));
    driver.tick(None);
    assert_eq!(driver.battle.current_state(), Some(BattleState::BringOutMonster));
}

#[test]
fn test_input_ignored_outside_player_input() {
    let mut driver = Driver::standard();

    driver.press(InputEvent::Down);
    driver.press(InputEvent::Confirm);
    assert_eq!(driver.battle.current_state(), Some(BattleState::Intro));
    assert!(!driver.battle.gateway().is_main_menu_visible());

    driver.run_to(BattleState::PlayerInput);

    // the cursor never moved, so CONFIRM lands on FIGHT
    driver.press(InputEvent::Confirm);
    assert!(driver.battle.gateway().is_move_submenu_visible());
}

#[test]
fn test_five_exchanges_end_in_victory() {
    let mut driver = Driver::standard();

    for exchange in 1..=5u32 {
        driver.run_to(BattleState::PlayerInput);
        assert_eq!(driver.battle.selected_attack_index(), None);
        assert_eq!(driver.battle.gateway().selected_attack(), None);

        driver.choose_first_attack();
        assert_eq!(driver.battle.current_state(), Some(BattleState::Battle));
        assert_eq!(driver.battle.turn(), exchange);

        if exchange < 5 {
            driver.run_to(BattleState::PlayerInput);
            assert_eq!(driver.battle.enemy().current_health(), 25 - 5 * exchange);
            assert_eq!(driver.battle.player().current_health(), 25 - 5 * exchange);
        }
    }

    driver.run_to(BattleState::Finished);

    let battle = &driver.battle;
    assert_eq!(battle.enemy().current_health(), 0);
    assert!(battle.enemy().is_fainted());
    // the fainted enemy never got its fifth attack in
    assert_eq!(battle.player().current_health(), 5);
    assert!(!battle.player().is_fainted());
    assert_eq!(battle.outcome(), Some(EncounterOutcome::Victory));
    assert!(battle.is_finished());

    let messages = driver.messages();
    assert_eq!(
        messages.iter().filter(|m| **m == "Iguanignite used Ice Shard").count(),
        5
    );
    assert_eq!(
        messages.iter().filter(|m| **m == "foe Carnodusk used Ember").count(),
        4
    );
    assert!(messages.contains(&"Wild Carnodusk fainted"));
    assert!(messages.contains(&"You have gained some experience"));
    assert!(!messages.contains(&"Iguanignite fainted."));
    assert_eq!(
        driver.events.last(),
        Some(&BattleEvent::Finished(EncounterOutcome::Victory))
    );
}

#[test]
fn test_exchange_waits_for_health_animation() {
    let mut driver = Driver::standard();
    driver.run_to(BattleState::PlayerInput);
    driver.choose_first_attack();
    assert_eq!(driver.battle.current_message(), Some("Iguanignite used Ice Shard"));

    driver.press(InputEvent::Confirm);
    driver.ticks(4);
    assert_eq!(driver.battle.enemy().current_health(), 25);

    // attack lands after the 500ms pause
    driver.tick(None);
    assert_eq!(driver.battle.enemy().current_health(), 20);
    assert!(driver.events.contains(&BattleEvent::HealthChanged {
        controller: Controller::Ai,
        current: 20,
        max: 25,
    }));
    assert!(driver.battle.enemy().meter().is_animating(driver.battle.now()));

    // the enemy answers only once the meter has caught up
    driver.ticks(9);
    assert_eq!(driver.battle.current_message(), None);
    assert_eq!(driver.battle.current_state(), Some(BattleState::Battle));

    driver.tick(None);
    assert_eq!(driver.battle.current_message(), Some("foe Carnodusk used Ember"));
    assert!(!driver.battle.enemy().meter().is_animating(driver.battle.now()));
}

#[test]
fn test_cancel_returns_to_main_menu() {
    let mut driver = Driver::standard();
    driver.run_to(BattleState::PlayerInput);

    driver.press(InputEvent::Confirm);
    assert!(driver.battle.gateway().is_move_submenu_visible());
    assert!(!driver.battle.gateway().is_main_menu_visible());

    driver.press(InputEvent::Cancel);

    let battle = &driver.battle;
    assert_eq!(battle.current_state(), Some(BattleState::PlayerInput));
    assert!(battle.gateway().is_main_menu_visible());
    assert!(!battle.gateway().is_move_submenu_visible());
    assert_eq!(battle.selected_attack_index(), None);
    assert_eq!(battle.gateway().selected_attack(), None);
    assert_eq!(battle.player().current_health(), 25);
    assert_eq!(battle.enemy().current_health(), 25);
}

#[test]
fn test_empty_slot_selection_is_absorbed() {
    let mut driver = Driver::standard();
    driver.run_to(BattleState::PlayerInput);

    driver.press(InputEvent::Confirm);
    driver.press(InputEvent::Right);
    driver.press(InputEvent::Confirm);
    assert_eq!(driver.battle.gateway().selected_attack(), Some(1));

    driver.ticks(20);
    assert_eq!(driver.battle.current_state(), Some(BattleState::PlayerInput));
    assert_eq!(driver.battle.selected_attack_index(), None);
    assert_eq!(driver.battle.turn(), 0);
    assert_eq!(driver.battle.enemy().current_health(), 25);

    driver.press(InputEvent::Left);
    driver.press(InputEvent::Confirm);
    assert_eq!(driver.battle.current_state(), Some(BattleState::Battle));
    assert_eq!(driver.battle.turn(), 1);
}

#[test]
fn test_flee() {
    let mut driver = Driver::standard();
    driver.run_to(BattleState::PlayerInput);

    driver.press(InputEvent::Right);
    driver.press(InputEvent::Down);
    driver.press(InputEvent::Confirm);
    assert_eq!(driver.battle.current_state(), Some(BattleState::FleeAttempt));
    assert_eq!(driver.battle.current_message(), Some("You got away safely!"));
    assert!(!driver.battle.gateway().is_main_menu_visible());

    driver.run_to(BattleState::Finished);

    assert_eq!(driver.battle.outcome(), Some(EncounterOutcome::Fled));
    assert_eq!(driver.battle.player().current_health(), 25);
    assert_eq!(driver.battle.enemy().current_health(), 25);
    assert_eq!(
        driver.events.last(),
        Some(&BattleEvent::Finished(EncounterOutcome::Fled))
    );
}

#[test]
fn test_item_and_switch_return_to_menu() {
    let mut driver = Driver::standard();
    driver.run_to(BattleState::PlayerInput);

    driver.press(InputEvent::Down);
    driver.press(InputEvent::Confirm);
    assert_eq!(driver.battle.current_message(), Some("Your bag is empty..."));
    assert!(!driver.battle.gateway().is_main_menu_visible());

    driver.press(InputEvent::Confirm);
    assert_eq!(driver.battle.current_state(), Some(BattleState::PlayerInput));
    assert!(driver.battle.gateway().is_main_menu_visible());

    driver.press(InputEvent::Up);
    driver.press(InputEvent::Right);
    driver.press(InputEvent::Confirm);
    assert_eq!(
        driver.battle.current_message(),
        Some("You have no other monsters to switch to...")
    );

    driver.press(InputEvent::Confirm);
    assert!(driver.battle.gateway().is_main_menu_visible());
    assert_eq!(driver.battle.turn(), 0);
}

#[test]
fn test_defeat() {
    let strong_enemy = MonsterTemplate::new("Carnodusk", 25, 30, 5).with_attacks([3]);
    let config = EncounterConfig::new(player(), strong_enemy).with_timing(BattleTiming::instant());
    let mut driver = Driver::start(config);

    driver.run_to(BattleState::PlayerInput);
    driver.choose_first_attack();
    driver.run_to(BattleState::Finished);

    assert_eq!(driver.battle.outcome(), Some(EncounterOutcome::Defeat));
    assert_eq!(driver.battle.player().current_health(), 0);
    assert_eq!(driver.battle.enemy().current_health(), 20);

    let messages = driver.messages();
    assert!(messages.contains(&"Iguanignite fainted."));
    assert!(messages.contains(&"You have no more monsters, escaping to safety..."));
    assert!(!messages.contains(&"Wild Carnodusk fainted"));
}

#[test]
fn test_enemy_faint_checked_before_player_faint() {
    let config = EncounterConfig::new(player().with_current_hp(0), enemy().with_current_hp(5))
        .with_timing(BattleTiming::instant());
    let mut driver = Driver::start(config);

    driver.run_to(BattleState::PlayerInput);
    driver.choose_first_attack();
    driver.run_to(BattleState::Finished);

    assert!(driver.battle.player().is_fainted());
    assert!(driver.battle.enemy().is_fainted());
    assert_eq!(driver.battle.outcome(), Some(EncounterOutcome::Victory));
    assert!(!driver.messages().contains(&"Iguanignite fainted."));
}

#[test]
fn test_enemy_without_attacks_skips_its_turn() {
    let config = EncounterConfig::new(player(), enemy().with_attacks(Vec::new()))
        .with_timing(BattleTiming::instant());
    let mut driver = Driver::start(config);

    driver.run_to(BattleState::PlayerInput);
    driver.choose_first_attack();
    driver.run_to(BattleState::PlayerInput);

    assert_eq!(driver.battle.enemy().current_health(), 20);
    assert_eq!(driver.battle.player().current_health(), 25);
    assert!(!driver.messages().iter().any(|m| m.starts_with("foe")));
}

#[test]
fn test_custom_strategy() {
    let config = EncounterConfig::new(player(), enemy().with_attacks([2, 3]))
        .with_timing(BattleTiming::instant());
    let battle = BattleOrchestrator::start_with(
        &config,
        &attacks(),
        Box::new(BattleMenu::new()),
        Box::new(crate::RandomAttack::new(3)),
    )
    .unwrap();
    let mut driver = Driver {
        battle,
        events: Vec::new(),
    };

    driver.run_to(BattleState::PlayerInput);
    driver.choose_first_attack();
    driver.run_to(BattleState::PlayerInput);

    assert_eq!(driver.battle.player().current_health(), 20);
    assert!(driver.messages().iter().any(|m| m.starts_with("foe Carnodusk used")));
}
