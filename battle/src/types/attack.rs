//! Attacks and the static attack lookup table

use serde::{Deserialize, Serialize};

use crate::BattleError;

/// A named attack a combatant can use
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attack {
    pub id: u32,
    pub name: String,
}

impl Attack {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Static lookup table resolving attack ids to attacks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttackTable {
    attacks: Vec<Attack>,
}

impl AttackTable {
    /// Build a table from a list of attacks
    pub fn new(attacks: Vec<Attack>) -> Self {
        Self { attacks }
    }

    /// The attacks shipped with the game
    pub fn builtin() -> Self {
        Self::new(vec![Attack::new(1, "Slash"), Attack::new(2, "Ice Shard")])
    }

    /// Parse a JSON array of `{ "id": .., "name": .. }` objects
    pub fn from_json(json: &str) -> Result<Self, BattleError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Look up an attack by id
    pub fn get(&self, id: u32) -> Option<&Attack> {
        self.attacks.iter().find(|attack| attack.id == id)
    }

    /// Add an attack, replacing any existing entry with the same id
    pub fn insert(&mut self, attack: Attack) {
        match self.attacks.iter_mut().find(|a| a.id == attack.id) {
            Some(existing) => *existing = attack,
            None => self.attacks.push(attack),
        }
    }

    pub fn len(&self) -> usize {
        self.attacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attacks.is_empty()
    }
}
