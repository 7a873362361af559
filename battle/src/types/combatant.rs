//! Combatant - one side's active fighter

use std::time::Duration;

use super::attack::{Attack, AttackTable};
use super::config::MonsterTemplate;
use super::meter::HealthMeter;
use crate::BattleError;
use crate::timeline::Scheduler;

/// Which side supplies a combatant's decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Controller {
    /// Chosen through the battle menu
    Player,
    /// Chosen by an enemy strategy
    Ai,
}

/// A fighter in an encounter
#[derive(Debug, Clone)]
pub struct Combatant {
    name: String,
    controller: Controller,

    // === Stats ===
    current_health: u32,
    max_health: u32,
    base_attack: u32,
    level: u32,

    /// Attacks in menu order
    attacks: Vec<Attack>,

    meter: HealthMeter,
}

impl Combatant {
    /// Build a combatant from its template, resolving attack ids
    pub fn from_template(
        template: &MonsterTemplate,
        table: &AttackTable,
        controller: Controller,
    ) -> Result<Self, BattleError> {
        template.validate()?;

        let attacks = template
            .attack_ids
            .iter()
            .map(|&id| {
                table.get(id).cloned().ok_or_else(|| BattleError::MissingAttack {
                    combatant: template.name.clone(),
                    attack_id: id,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let current_health = template.current_hp.min(template.max_hp);
        let fraction = current_health as f32 / template.max_hp as f32;

        Ok(Self {
            name: template.name.clone(),
            controller,
            current_health,
            max_health: template.max_hp,
            base_attack: template.base_attack,
            level: template.level,
            attacks,
            meter: HealthMeter::new(fraction, Duration::from_secs(1)),
        })
    }

    /// Set how long the health meter takes to catch up after damage
    pub fn with_meter_animation(mut self, duration: Duration) -> Self {
        self.meter = HealthMeter::new(self.health_fraction(), duration);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn controller(&self) -> Controller {
        self.controller
    }

    pub fn is_player_controlled(&self) -> bool {
        self.controller == Controller::Player
    }

    pub fn current_health(&self) -> u32 {
        self.current_health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn base_attack(&self) -> u32 {
        self.base_attack
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn attacks(&self) -> &[Attack] {
        &self.attacks
    }

    /// Attack at a menu slot, if that slot is filled
    pub fn attack(&self, index: usize) -> Option<&Attack> {
        self.attacks.get(index)
    }

    pub fn is_fainted(&self) -> bool {
        self.current_health == 0
    }

    /// Current health over max health (0.0 - 1.0)
    pub fn health_fraction(&self) -> f32 {
        self.current_health as f32 / self.max_health as f32
    }

    pub fn meter(&self) -> &HealthMeter {
        &self.meter
    }

    /// Subtract `amount` from health and animate the meter.
    ///
    /// Health and fainted status change immediately. `on_complete` is handed
    /// to the scheduler to fire once the meter animation has finished, so it
    /// never runs before this returns. Returns the damage actually taken.
    pub fn apply_damage<K>(
        &mut self,
        amount: u32,
        scheduler: &mut impl Scheduler<K>,
        on_complete: K,
    ) -> u32 {
        let before = self.current_health;
        self.current_health = self.current_health.saturating_sub(amount);

        let animation = self.meter.animate_to(self.health_fraction(), scheduler.now());
        scheduler.schedule_delayed(animation, on_complete);

        tracing::debug!(
            combatant = %self.name,
            amount,
            health = self.current_health,
            max = self.max_health,
            "damage applied"
        );
        before - self.current_health
    }
}
