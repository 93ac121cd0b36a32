//! Enemy spawning from config ids.
//!
//! Level and encounter code sends [`SpawnEnemy`]; the definition behind the
//! config id decides stats, perception, and path tuning.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::ai::BodyFit;
use super::animation::SpriteAnimation;
use super::components::{AiState, Enemy, EnemyConfigId, EntityKind};
use super::data::{EnemyDefinition, EnemyRegistry};
use crate::combat::{CombatState, Health, HitZone};

/// Request to spawn an enemy.
#[derive(Event, Debug, Clone)]
pub struct SpawnEnemy {
    pub config_id: EnemyConfigId,
    pub position: Vec2,
}

/// Spawn one enemy from its definition.
pub fn spawn_enemy(
    commands: &mut Commands,
    definition: &EnemyDefinition,
    kind: EntityKind,
    position: Vec2,
) -> Entity {
    let size = definition.size();

    commands
        .spawn((
            Enemy,
            kind,
            definition.config_id(),
            definition.to_stats(),
            Health::new(definition.max_health),
            CombatState::default(),
            HitZone {
                radius: definition.hit_radius,
            },
            definition.perception(),
            definition.path_follower(),
            AiState::default(),
            SpriteAnimation::default(),
            Name::new(definition.name.clone()),
        ))
        .insert((
            Sprite::from_color(Color::srgb(0.6, 0.65, 0.7), size),
            Transform::from_translation(position.extend(0.5)),
            RigidBody::Dynamic,
            GravityScale(0.0),
            LockedAxes::ROTATION_LOCKED,
            Velocity::zero(),
            Collider::cuboid(size.x * 0.5, size.y * 0.5),
            BodyFit::default(),
        ))
        .id()
}

/// Spawn enemies requested this frame.
pub fn spawn_requested_enemies(
    mut commands: Commands,
    mut requests: EventReader<SpawnEnemy>,
    registry: Res<EnemyRegistry>,
) {
    for request in requests.read() {
        let Some(definition) = registry.get_by_id(request.config_id) else {
            warn!("No enemy definition for config id {}", request.config_id.0);
            continue;
        };

        let entity = spawn_enemy(&mut commands, definition, EntityKind::Enemy, request.position);
        debug!("Spawned {} as {}", definition.name, entity);
    }
}
