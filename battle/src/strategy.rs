//! Enemy action selection

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::Combatant;

/// Picks the attack slot an AI-controlled combatant uses this turn
pub trait EnemyStrategy: Send {
    /// `None` means the enemy does not attack this turn
    fn choose_attack(&mut self, enemy: &Combatant, player: &Combatant) -> Option<usize>;
}

/// Always the first available attack
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstAttack;

impl EnemyStrategy for FirstAttack {
    fn choose_attack(&mut self, enemy: &Combatant, _player: &Combatant) -> Option<usize> {
        (!enemy.attacks().is_empty()).then_some(0)
    }
}

/// Uniformly random attack from a seeded generator
#[derive(Debug, Clone)]
pub struct RandomAttack {
    rng: StdRng,
}

impl RandomAttack {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl EnemyStrategy for RandomAttack {
    fn choose_attack(&mut self, enemy: &Combatant, _player: &Combatant) -> Option<usize> {
        let count = enemy.attacks().len();
        (count > 0).then(|| self.rng.gen_range(0..count))
    }
}
