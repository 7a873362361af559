//! Turn-based monster battle orchestration.
//!
//! This crate sequences an encounter between a player-controlled combatant
//! and a wild one on top of the generic [`tallgrass_fsm`] state machine.
//!
//! # Overview
//!
//! ```text
//! raw input ──> InputGateway (battle menu)
//!                    │ selected attack
//!                    ▼
//!            BattleOrchestrator ──> Combatant::apply_damage
//!                    ▲                      │
//!                    └── Timeline / Dialog ◄┘ continuation
//! ```
//!
//! # Main Types
//!
//! - [`BattleOrchestrator`] - entry point; tick it once per frame
//! - [`BattleState`] - the phases of an encounter
//! - [`Combatant`] - one side's fighter with an animated health meter
//! - [`BattleMenu`] - default [`InputGateway`]
//! - [`Timeline`] - tick-driven [`Scheduler`] for delayed continuations
//! - [`Dialog`] - message layer waiting for acknowledgement
//! - [`EncounterConfig`], [`AttackTable`] - static data, loadable from JSON
//!
//! # Example Usage
//!
//! ```
//! use std::time::Duration;
//! use tallgrass_battle::{AttackTable, BattleOrchestrator, BattleState, EncounterConfig};
//!
//! let config = EncounterConfig::wild_encounter();
//! let mut battle = BattleOrchestrator::start(&config, &AttackTable::builtin()).unwrap();
//! assert_eq!(battle.current_state(), Some(BattleState::Intro));
//!
//! let events = battle.tick(Duration::from_millis(500), None).unwrap();
//! assert_eq!(battle.current_state(), Some(BattleState::PreBattleInfo));
//! assert!(!events.is_empty());
//! ```

mod error;
pub mod orchestrator;
pub mod strategy;
pub mod timeline;
pub mod types;
pub mod ui;

pub use error::BattleError;
pub use orchestrator::{BattleEvent, BattleOrchestrator, BattleState, EncounterOutcome, Tick};
pub use strategy::{EnemyStrategy, FirstAttack, RandomAttack};
pub use timeline::{Scheduler, Timeline};
pub use types::{
    Attack, AttackTable, BattleTiming, Combatant, Controller, EncounterConfig, HealthMeter,
    MonsterTemplate,
};
pub use ui::{BattleMenu, Dialog, InputEvent, InputGateway, MainMenuOption, MenuChoice};

pub use tallgrass_fsm::FsmError;
