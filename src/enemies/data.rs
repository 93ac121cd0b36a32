//! Enemy data loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use super::components::{
    EnemyConfigId, EnemyStats, EntityKind, Perception, PATH_UPDATE_INTERVAL,
    PERCEPTION_CHECK_INTERVAL, WAYPOINT_REACHED_DISTANCE,
};
use super::pathing::PathFollower;
use crate::core::{definition_files, parse_definition};

/// Directory scanned for enemy definitions.
pub const ENEMY_DATA_DIR: &str = "assets/data/enemies";

fn default_attack_duration() -> f32 {
    0.4
}

/// Per-type overrides of the chase controller's fixed timings.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AiTuning {
    pub perception_interval: f64,
    pub path_update_interval: f64,
    pub waypoint_reached_distance: f32,
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            perception_interval: PERCEPTION_CHECK_INTERVAL,
            path_update_interval: PATH_UPDATE_INTERVAL,
            waypoint_reached_distance: WAYPOINT_REACHED_DISTANCE,
        }
    }
}

/// Enemy definition loaded from RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct EnemyDefinition {
    /// Config id used by spawners and level data
    pub id: u32,
    pub name: String,
    pub max_health: f32,
    pub damage: f32,
    pub move_speed: f32,
    pub perception_radius: f32,
    pub hit_radius: f32,
    pub attack_cooldown: f32,
    #[serde(default = "default_attack_duration")]
    pub attack_duration: f32,
    /// Sprite size in pixels (width, height)
    pub size: (f32, f32),
    /// Kind of entity this enemy hunts
    #[serde(default)]
    pub target: EntityKind,
    #[serde(default)]
    pub tuning: AiTuning,
}

impl EnemyDefinition {
    pub fn config_id(&self) -> EnemyConfigId {
        EnemyConfigId(self.id)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.size.0, self.size.1)
    }

    /// Convert to EnemyStats component.
    pub fn to_stats(&self) -> EnemyStats {
        EnemyStats {
            max_health: self.max_health,
            damage: self.damage,
            move_speed: self.move_speed,
            hit_radius: self.hit_radius,
            attack_cooldown: self.attack_cooldown,
            attack_duration: self.attack_duration,
        }
    }

    pub fn perception(&self) -> Perception {
        Perception::new(self.perception_radius, self.target)
            .with_interval(self.tuning.perception_interval)
    }

    pub fn path_follower(&self) -> PathFollower {
        PathFollower::new(
            self.tuning.path_update_interval,
            self.tuning.waypoint_reached_distance,
        )
    }
}

/// Resource holding all loaded enemy definitions, keyed by file stem.
#[derive(Resource, Default)]
pub struct EnemyRegistry {
    pub definitions: HashMap<String, EnemyDefinition>,
}

impl EnemyRegistry {
    /// Get an enemy definition by type name.
    pub fn get(&self, enemy_type: &str) -> Option<&EnemyDefinition> {
        self.definitions.get(enemy_type)
    }

    /// Get an enemy definition by config id.
    pub fn get_by_id(&self, id: EnemyConfigId) -> Option<&EnemyDefinition> {
        self.definitions.values().find(|d| d.id == id.0)
    }

    pub fn insert(&mut self, enemy_type: impl Into<String>, definition: EnemyDefinition) {
        self.definitions.insert(enemy_type.into(), definition);
    }
}

/// Load all enemy definitions from the assets/data/enemies/ directory.
pub fn load_enemy_definitions(mut registry: ResMut<EnemyRegistry>) {
    let files = match definition_files(Path::new(ENEMY_DATA_DIR)) {
        Ok(files) => files,
        Err(e) => {
            warn!("Enemy definitions unavailable: {}", e);
            return;
        }
    };

    for (enemy_type, path) in files {
        match parse_definition::<EnemyDefinition>(&path) {
            Ok(definition) => {
                if let Some(existing) = registry.get_by_id(definition.config_id()) {
                    warn!(
                        "Enemy config id {} used by both '{}' and '{}'",
                        definition.id, existing.name, definition.name
                    );
                }
                info!("Loaded enemy definition: {} ({})", definition.name, enemy_type);
                registry.insert(enemy_type, definition);
            }
            Err(e) => {
                error!("Failed to load enemy definition: {}", e);
            }
        }
    }

    info!("Loaded {} enemy definitions", registry.definitions.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    const SKELETON: &str = include_str!("../../assets/data/enemies/skeleton.ron");
    const WARDEN: &str = include_str!("../../assets/data/enemies/bone_warden.ron");

    #[test]
    fn missing_tuning_uses_fixed_constants() {
        let definition: EnemyDefinition = ron::from_str(SKELETON).unwrap();
        assert_eq!(definition.target, EntityKind::Player);
        assert_eq!(definition.tuning, AiTuning::default());

        let perception = definition.perception();
        assert_eq!(perception.radius, 160.0);
        assert_eq!(perception.throttle.interval(), PERCEPTION_CHECK_INTERVAL);
        assert_eq!(definition.path_follower().reached_distance(), WAYPOINT_REACHED_DISTANCE);
    }

    #[test]
    fn partial_tuning_overrides_only_named_fields() {
        let definition: EnemyDefinition = ron::from_str(WARDEN).unwrap();
        assert_eq!(definition.tuning.perception_interval, 0.3);
        assert_eq!(definition.tuning.path_update_interval, PATH_UPDATE_INTERVAL);
        assert_eq!(definition.tuning.waypoint_reached_distance, 12.0);
        assert_eq!(definition.size(), Vec2::new(40.0, 48.0));
    }

    #[test]
    fn registry_looks_up_by_config_id() {
        let mut registry = EnemyRegistry::default();
        registry.insert("skeleton", ron::from_str(SKELETON).unwrap());
        registry.insert("bone_warden", ron::from_str(WARDEN).unwrap());

        let found = registry.get_by_id(EnemyConfigId(90)).unwrap();
        assert_eq!(found.name, "Bone Warden");
        assert!(registry.get_by_id(EnemyConfigId(5)).is_none());
    }
}
