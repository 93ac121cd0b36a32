//! Boss-related components.

use bevy::prelude::*;
use rand::Rng;

use super::attacks::{pick_weighted, BossAttack};
use super::data::BossDefinition;
use super::phase::{BossPhase, PhaseTracker, PhaseTransition};
use crate::core::{Cooldowns, Throttle};
use crate::enemies::EnemyConfigId;

/// Phase and attack decisions for one boss.
#[derive(Component, Debug)]
pub struct BossBrain {
    phases: Vec<BossPhase>,
    tracker: PhaseTracker,
    /// Keyed by (phase index, attack index).
    cooldowns: Cooldowns<(usize, usize)>,
    decision: Throttle,
    minion: Option<EnemyConfigId>,
}

impl BossBrain {
    pub fn new(definition: &BossDefinition) -> Self {
        Self {
            phases: definition.phases.clone(),
            tracker: PhaseTracker::starting_at(&definition.phases, 100.0),
            cooldowns: Cooldowns::default(),
            decision: Throttle::new(definition.decision_interval),
            minion: definition.minion_id(),
        }
    }

    pub fn phase_index(&self) -> usize {
        self.tracker.current()
    }

    pub fn active_phase(&self) -> Option<&BossPhase> {
        self.phases.get(self.tracker.current())
    }

    /// Enemy spawned by summon attacks.
    pub fn minion(&self) -> Option<EnemyConfigId> {
        self.minion
    }

    pub fn phase(&self, index: usize) -> Option<&BossPhase> {
        self.phases.get(index)
    }

    /// Advance the phase for the current health percentage.
    pub fn update_phase(&mut self, health_percent: f32) -> Option<PhaseTransition> {
        self.tracker.advance(&self.phases, health_percent)
    }

    /// Whether a decision tick is due, consuming it if so.
    pub fn ready_to_decide(&mut self, now: f64) -> bool {
        self.decision.try_fire(now)
    }

    /// Draw an attack from the active phase.
    ///
    /// The draw covers every attack in the phase; if the drawn attack is still
    /// cooling down nothing is dispatched this tick.
    pub fn choose_attack<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R) -> Option<&BossAttack> {
        let phase_index = self.tracker.current();
        let phase = self.phases.get(phase_index)?;
        let attack_index = pick_weighted(&phase.attacks, rng)?;
        let attack = phase.attacks.get(attack_index)?;

        let key = (phase_index, attack_index);
        if !self.cooldowns.is_ready(&key, f64::from(attack.cooldown), now) {
            return None;
        }

        self.cooldowns.mark_used(key, now);
        Some(attack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bosses::phase::tests::{phase, three_phases};
    use crate::bosses::phase::PhaseKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn brain(phases: Vec<BossPhase>) -> BossBrain {
        BossBrain::new(&BossDefinition {
            name: "Test".to_string(),
            enemy: "skeleton".to_string(),
            base_health: 100.0,
            decision_interval: 1.0,
            minion: None,
            phases,
        })
    }

    #[test]
    fn attack_waits_for_its_own_cooldown() {
        let mut brain = brain(vec![phase(PhaseKind::Opening, 100.0, &[1.0])]);
        let mut rng = StdRng::seed_from_u64(11);

        assert!(brain.choose_attack(0.0, &mut rng).is_some());
        assert!(brain.choose_attack(0.5, &mut rng).is_none());
        assert!(brain.choose_attack(1.0, &mut rng).is_some());
    }

    #[test]
    fn cooldowns_are_independent_per_attack() {
        let mut opening = phase(PhaseKind::Opening, 100.0, &[1.0, 1.0]);
        opening.attacks[0].cooldown = 100.0;
        opening.attacks[1].cooldown = 100.0;
        let mut brain = brain(vec![opening]);
        let mut rng = StdRng::seed_from_u64(5);

        let mut used = Vec::new();
        for step in 0..200 {
            if let Some(attack) = brain.choose_attack(step as f64 * 0.1, &mut rng) {
                used.push(attack.pattern);
            }
        }

        // Each attack fires once before its long cooldown locks it out.
        assert_eq!(used.len(), 2);
    }

    #[test]
    fn phase_change_switches_attack_list() {
        let mut brain = brain(three_phases());

        assert_eq!(brain.phase_index(), 0);
        let transition = brain.update_phase(55.0).unwrap();
        assert_eq!((transition.from, transition.to), (0, 1));
        assert_eq!(brain.active_phase().unwrap().kind, PhaseKind::Aggressive);
    }

    #[test]
    fn decision_ticks_are_throttled() {
        let mut brain = brain(three_phases());

        assert!(brain.ready_to_decide(1.5));
        assert!(!brain.ready_to_decide(2.0));
        assert!(brain.ready_to_decide(2.6));
    }
}
