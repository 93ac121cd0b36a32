//! Boss attack descriptors and weighted selection.

use rand::Rng;
use serde::Deserialize;

/// Shape of an attack, for presentation and hit resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum AttackPattern {
    Melee,
    Charge,
    Sweep,
    Slam,
    Projectile,
    Summon,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BossAttack {
    pub pattern: AttackPattern,
    pub base_damage: f32,
    /// Seconds before this attack may be used again.
    pub cooldown: f32,
    pub range: f32,
    /// Relative selection weight within the phase.
    pub weight: f32,
    /// Warning time before the hit, in seconds.
    #[serde(default)]
    pub telegraph: f32,
}

/// Pick an attack index with probability proportional to its weight.
///
/// Falls back to the first attack when the weights don't add up to anything
/// positive. `None` only for an empty list.
pub fn pick_weighted<R: Rng + ?Sized>(attacks: &[BossAttack], rng: &mut R) -> Option<usize> {
    if attacks.is_empty() {
        return None;
    }

    let total: f32 = attacks.iter().map(|attack| attack.weight).sum();
    if !total.is_finite() || total <= 0.0 {
        return Some(0);
    }

    let mut remainder = rng.gen_range(0.0..total);
    for (index, attack) in attacks.iter().enumerate() {
        remainder -= attack.weight;
        if remainder <= 0.0 {
            return Some(index);
        }
    }

    Some(0)
}
