//! Player spawning.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{Player, PlayerConfig};
use crate::combat::{CombatState, HitZone, Health};
use crate::enemies::EntityKind;

/// Spawn the player at `position`.
pub fn spawn_player(commands: &mut Commands, config: &PlayerConfig, position: Vec2) -> Entity {
    commands
        .spawn((
            Player,
            EntityKind::Player,
            Health::new(config.max_health),
            CombatState::default(),
            HitZone {
                radius: config.hit_radius,
            },
            Sprite::from_color(Color::srgb(0.85, 0.8, 0.6), config.size),
            Transform::from_translation(position.extend(1.0)),
            RigidBody::KinematicVelocityBased,
            Velocity::zero(),
            Collider::cuboid(config.size.x * 0.5, config.size.y * 0.5),
            LockedAxes::ROTATION_LOCKED,
        ))
        .id()
}
