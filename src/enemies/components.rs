//! Enemy-related components.

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::Throttle;

/// Seconds between full target scans.
pub const PERCEPTION_CHECK_INTERVAL: f64 = 0.5;
/// Seconds before an existing path may be requested again.
pub const PATH_UPDATE_INTERVAL: f64 = 1.0;
/// Distance in pixels at which a waypoint counts as reached.
pub const WAYPOINT_REACHED_DISTANCE: f32 = 8.0;

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// Enemies whose attacks are picked by a pattern brain instead of a plain
/// melee strike.
#[derive(Component, Debug, Default)]
pub struct PatternAttacks;

/// Content-table row an enemy was spawned from.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub struct EnemyConfigId(pub u32);

/// What an entity is, as far as perception is concerned.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum EntityKind {
    #[default]
    Player,
    Enemy,
    Boss,
    Npc,
}

/// Chase state machine for enemy behavior.
#[derive(Component, Default, PartialEq, Eq, Clone, Copy, Debug)]
pub enum AiState {
    /// No visible target in range.
    #[default]
    Idle,
    /// Steering straight at the target.
    ChasingDirect,
    /// Following waypoints from the pathfinding service.
    ChasingPath,
    /// In melee contact with the target; movement suspended.
    Engaged,
}

/// Enemy stats loaded from RON data files.
#[derive(Component, Clone, Debug)]
pub struct EnemyStats {
    pub max_health: f32,
    pub damage: f32,
    /// Pixels per second
    pub move_speed: f32,
    /// Melee hit zone radius in pixels
    pub hit_radius: f32,
    /// Seconds between attack starts
    pub attack_cooldown: f32,
    /// Seconds an attack keeps the enemy rooted
    pub attack_duration: f32,
}

impl Default for EnemyStats {
    fn default() -> Self {
        Self {
            max_health: 50.0,
            damage: 10.0,
            move_speed: 60.0,
            hit_radius: 14.0,
            attack_cooldown: 1.5,
            attack_duration: 0.4,
        }
    }
}

/// Throttled target scanning.
#[derive(Component, Debug, Clone)]
pub struct Perception {
    /// Scan radius in pixels
    pub radius: f32,
    /// Only entities of this kind are chased
    pub target: EntityKind,
    pub throttle: Throttle,
}

impl Perception {
    pub fn new(radius: f32, target: EntityKind) -> Self {
        Self {
            radius,
            target,
            throttle: Throttle::new(PERCEPTION_CHECK_INTERVAL),
        }
    }

    pub fn with_interval(mut self, interval: f64) -> Self {
        self.throttle = Throttle::new(interval);
        self
    }
}

/// Timer for death animation before despawn.
#[derive(Component)]
pub struct DeathTimer(pub Timer);

impl Default for DeathTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(1.0, TimerMode::Once))
    }
}
