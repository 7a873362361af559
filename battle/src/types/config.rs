//! Encounter configuration: monster templates and battle pacing

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::BattleError;

/// Static definition a combatant is built from at encounter start
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterTemplate {
    pub name: String,
    pub current_hp: u32,
    pub max_hp: u32,
    pub base_attack: u32,
    #[serde(default = "default_level")]
    pub level: u32,
    /// Ids resolved against the attack table, in menu order
    #[serde(default)]
    pub attack_ids: Vec<u32>,
}

fn default_level() -> u32 {
    1
}

impl MonsterTemplate {
    /// Create a template at full health
    pub fn new(name: impl Into<String>, max_hp: u32, base_attack: u32, level: u32) -> Self {
        Self {
            name: name.into(),
            current_hp: max_hp,
            max_hp,
            base_attack,
            level,
            attack_ids: Vec::new(),
        }
    }

    pub fn with_attacks(mut self, attack_ids: impl IntoIterator<Item = u32>) -> Self {
        self.attack_ids = attack_ids.into_iter().collect();
        self
    }

    pub fn with_current_hp(mut self, current_hp: u32) -> Self {
        self.current_hp = current_hp;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), BattleError> {
        if self.max_hp == 0 {
            return Err(self.invalid("max_hp must be greater than 0"));
        }
        if self.level == 0 {
            return Err(self.invalid("level must be at least 1"));
        }
        Ok(())
    }

    fn invalid(&self, reason: &str) -> BattleError {
        BattleError::InvalidTemplate {
            name: self.name.clone(),
            reason: reason.to_string(),
        }
    }
}

/// Delays and animation lengths, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleTiming {
    /// Grace period before the first message
    pub intro_delay_ms: u64,
    /// Pause after an acknowledged message before the next phase
    pub message_delay_ms: u64,
    /// Pause between announcing an attack and landing it
    pub attack_delay_ms: u64,
    /// Length of the health meter animation
    pub health_animation_ms: u64,
}

impl Default for BattleTiming {
    fn default() -> Self {
        Self {
            intro_delay_ms: 500,
            message_delay_ms: 500,
            attack_delay_ms: 500,
            health_animation_ms: 1000,
        }
    }
}

impl BattleTiming {
    /// No delays at all; every continuation fires on the following tick
    pub fn instant() -> Self {
        Self {
            intro_delay_ms: 0,
            message_delay_ms: 0,
            attack_delay_ms: 0,
            health_animation_ms: 0,
        }
    }

    pub fn intro_delay(&self) -> Duration {
        Duration::from_millis(self.intro_delay_ms)
    }

    pub fn message_delay(&self) -> Duration {
        Duration::from_millis(self.message_delay_ms)
    }

    pub fn attack_delay(&self) -> Duration {
        Duration::from_millis(self.attack_delay_ms)
    }

    pub fn health_animation(&self) -> Duration {
        Duration::from_millis(self.health_animation_ms)
    }
}

/// Everything needed to start an encounter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterConfig {
    pub player: MonsterTemplate,
    pub enemy: MonsterTemplate,
    #[serde(default)]
    pub timing: BattleTiming,
}

impl EncounterConfig {
    pub fn new(player: MonsterTemplate, enemy: MonsterTemplate) -> Self {
        Self {
            player,
            enemy,
            timing: BattleTiming::default(),
        }
    }

    pub fn with_timing(mut self, timing: BattleTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Parse a config from JSON
    pub fn from_json(json: &str) -> Result<Self, BattleError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Iguanignite against a wild Carnodusk, using the builtin attacks
    pub fn wild_encounter() -> Self {
        Self::new(
            MonsterTemplate::new("Iguanignite", 25, 5, 5).with_attacks([2]),
            MonsterTemplate::new("Carnodusk", 25, 5, 5).with_attacks([1]),
        )
    }
}
