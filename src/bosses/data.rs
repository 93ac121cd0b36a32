//! Boss definitions loaded from RON files, validated on load.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use super::error::BossDataError;
use super::phase::BossPhase;
use crate::core::{definition_files, parse_definition, DataLoadError};
use crate::enemies::EnemyConfigId;

/// Directory scanned for boss definitions.
pub const BOSS_DATA_DIR: &str = "assets/data/bosses";

fn default_decision_interval() -> f64 {
    1.0
}

/// A boss encounter as authored.
#[derive(Debug, Clone, Deserialize)]
pub struct BossDefinition {
    pub name: String,
    /// Enemy definition supplying the body, perception, and movement.
    pub enemy: String,
    pub base_health: f32,
    /// Seconds between attack decisions.
    #[serde(default = "default_decision_interval")]
    pub decision_interval: f64,
    /// Config id of the enemy spawned by summon attacks.
    #[serde(default)]
    pub minion: Option<u32>,
    pub phases: Vec<BossPhase>,
}

impl BossDefinition {
    pub fn minion_id(&self) -> Option<EnemyConfigId> {
        self.minion.map(EnemyConfigId)
    }

    /// Every authoring rule this definition breaks.
    pub fn validate(&self) -> Vec<BossDataError> {
        let mut errors = Vec::new();

        if self.base_health.is_nan() || self.base_health <= 0.0 {
            errors.push(BossDataError::NonPositiveHealth(self.base_health));
        }
        if self.decision_interval.is_nan() || self.decision_interval < 0.0 {
            errors.push(BossDataError::Negative {
                field: "decision_interval".to_string(),
                value: self.decision_interval as f32,
            });
        }

        let Some(first) = self.phases.first() else {
            errors.push(BossDataError::NoPhases);
            return errors;
        };
        if first.health_threshold != 100.0 {
            errors.push(BossDataError::FirstThreshold(first.health_threshold));
        }

        for (index, pair) in self.phases.windows(2).enumerate() {
            let (previous, phase) = (&pair[0], &pair[1]);
            // NaN never compares as ordered, so it is reported too.
            let threshold = phase.health_threshold;
            if threshold.is_nan() || threshold > previous.health_threshold {
                errors.push(BossDataError::ThresholdIncreases {
                    index: index + 1,
                    threshold,
                    previous: previous.health_threshold,
                });
            }
        }

        for (index, phase) in self.phases.iter().enumerate() {
            if phase.attacks.is_empty() {
                errors.push(BossDataError::NoAttacks(index));
            }

            let mut check = |field: String, value: f32| {
                if value.is_nan() || value < 0.0 {
                    errors.push(BossDataError::Negative { field, value });
                }
            };

            check(format!("phase {index} health_threshold"), phase.health_threshold);
            check(format!("phase {index} duration"), phase.duration);
            check(format!("phase {index} speed_multiplier"), phase.speed_multiplier);
            check(format!("phase {index} defense_multiplier"), phase.defense_multiplier);
            check(format!("phase {index} damage_multiplier"), phase.damage_multiplier);

            for (slot, attack) in phase.attacks.iter().enumerate() {
                let prefix = format!("phase {index} attack {slot}");
                check(format!("{prefix} base_damage"), attack.base_damage);
                check(format!("{prefix} cooldown"), attack.cooldown);
                check(format!("{prefix} range"), attack.range);
                check(format!("{prefix} weight"), attack.weight);
                check(format!("{prefix} telegraph"), attack.telegraph);
            }
        }

        errors
    }
}

/// Registry of all valid boss definitions, keyed by file stem.
#[derive(Resource, Default)]
pub struct BossRegistry {
    pub definitions: HashMap<String, BossDefinition>,
}

impl BossRegistry {
    pub fn get(&self, boss: &str) -> Option<&BossDefinition> {
        self.definitions.get(boss)
    }

    /// Validate and store a definition, returning the violations on rejection.
    pub fn register(
        &mut self,
        boss: impl Into<String>,
        definition: BossDefinition,
    ) -> Result<(), Vec<BossDataError>> {
        let violations = definition.validate();
        if !violations.is_empty() {
            return Err(violations);
        }

        self.definitions.insert(boss.into(), definition);
        Ok(())
    }
}

/// Load boss definitions from RON files, rejecting invalid ones.
pub fn load_boss_definitions(mut registry: ResMut<BossRegistry>) {
    let files = match definition_files(Path::new(BOSS_DATA_DIR)) {
        Ok(files) => files,
        Err(e) => {
            warn!("Boss definitions unavailable: {}", e);
            return;
        }
    };

    for (boss, path) in files {
        let definition = match parse_definition::<BossDefinition>(&path) {
            Ok(definition) => definition,
            Err(e) => {
                error!("Failed to load boss definition: {}", e);
                continue;
            }
        };

        let name = definition.name.clone();
        match registry.register(boss.clone(), definition) {
            Ok(()) => info!("Loaded boss definition: {} ({})", name, boss),
            Err(violations) => {
                for violation in &violations {
                    error!("{}: {}", boss, violation);
                }
                let rejected = DataLoadError::Invalid {
                    name: boss,
                    violations: violations.len(),
                };
                error!("{}", rejected);
            }
        }
    }

    info!("Loaded {} boss definitions", registry.definitions.len());
}
