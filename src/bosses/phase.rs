//! Boss phases and health-driven phase selection.

use std::collections::BTreeSet;

use serde::Deserialize;

use super::attacks::BossAttack;
use crate::combat::StatModifiers;

/// Behavioral tag of a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum PhaseKind {
    Opening,
    Aggressive,
    Defensive,
    Enraged,
    Desperate,
}

/// Extra behaviour layered on top of a phase's attacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum Mechanic {
    Enrage,
    Summons,
    Shield,
    ArenaHazard,
    Teleport,
}

fn one() -> f32 {
    1.0
}

/// One phase of a boss encounter, active within a health band.
#[derive(Debug, Clone, Deserialize)]
pub struct BossPhase {
    pub kind: PhaseKind,
    /// Health percentage (0..=100) at or below which this phase applies.
    pub health_threshold: f32,
    /// Seconds the phase lasts; 0 means until the next threshold is crossed.
    #[serde(default)]
    pub duration: f32,
    pub attacks: Vec<BossAttack>,
    #[serde(default)]
    pub mechanics: BTreeSet<Mechanic>,
    #[serde(default = "one")]
    pub speed_multiplier: f32,
    #[serde(default = "one")]
    pub defense_multiplier: f32,
    #[serde(default = "one")]
    pub damage_multiplier: f32,
}

impl BossPhase {
    pub fn modifiers(&self) -> StatModifiers {
        StatModifiers {
            speed: self.speed_multiplier,
            defense: self.defense_multiplier,
            damage: self.damage_multiplier,
        }
    }

    pub fn has_mechanic(&self, mechanic: Mechanic) -> bool {
        self.mechanics.contains(&mechanic)
    }
}

/// Index of the phase a boss at `health_percent` belongs in.
///
/// Scans every phase in order and keeps the last one whose threshold is still
/// at or above the health percentage, starting from the first phase. Exact
/// boundaries go to the later phase. `None` only for an empty list.
pub fn select_phase(phases: &[BossPhase], health_percent: f32) -> Option<usize> {
    if phases.is_empty() {
        return None;
    }

    let mut active = 0;
    for (index, phase) in phases.iter().enumerate() {
        if health_percent <= phase.health_threshold {
            active = index;
        }
    }
    Some(active)
}

/// Whether a boss in phase `current` has dropped into the next phase.
pub fn should_advance(phases: &[BossPhase], current: usize, health_percent: f32) -> bool {
    phases
        .get(current + 1)
        .is_some_and(|next| health_percent <= next.health_threshold)
}

/// A completed phase change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTransition {
    pub from: usize,
    pub to: usize,
}

/// Forward-only cursor into a boss's phase list.
#[derive(Debug, Clone, Default)]
pub struct PhaseTracker {
    current: usize,
}

impl PhaseTracker {
    /// Start in the phase matching the given health.
    pub fn starting_at(phases: &[BossPhase], health_percent: f32) -> Self {
        Self {
            current: select_phase(phases, health_percent).unwrap_or(0),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Move forward through every phase whose threshold has been crossed.
    ///
    /// Never moves backward; healing above a threshold keeps the phase.
    pub fn advance(&mut self, phases: &[BossPhase], health_percent: f32) -> Option<PhaseTransition> {
        let from = self.current;
        while should_advance(phases, self.current, health_percent) {
            self.current += 1;
        }

        (self.current != from).then_some(PhaseTransition {
            from,
            to: self.current,
        })
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }
}
