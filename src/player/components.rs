//! Player-related components.

use bevy::prelude::*;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Player spawn configuration.
#[derive(Resource)]
pub struct PlayerConfig {
    /// Where the player appears when a run starts
    pub spawn_position: Vec2,
    pub max_health: f32,
    /// Sprite and collider size in pixels
    pub size: Vec2,
    /// Radius used for melee overlap tests against enemies
    pub hit_radius: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn_position: Vec2::ZERO,
            max_health: 100.0,
            size: Vec2::new(16.0, 24.0),
            hit_radius: 10.0,
        }
    }
}
