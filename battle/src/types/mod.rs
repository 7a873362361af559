//! Domain types for an encounter

mod attack;
mod combatant;
mod config;
mod meter;

pub use attack::{Attack, AttackTable};
pub use combatant::{Combatant, Controller};
pub use config::{BattleTiming, EncounterConfig, MonsterTemplate};
pub use meter::HealthMeter;
