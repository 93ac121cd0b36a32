//! Global events used for cross-system communication.
//!
//! Events allow decoupled systems to communicate. Enemy and boss controllers
//! never touch health directly: they send attack events, the combat systems
//! turn those into DamageEvents, and the health system applies them.

use bevy::prelude::*;

/// Sent when an entity takes damage.
#[derive(Event, Debug, Clone)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage
    pub source: Entity,
    /// Damage amount before the target's defense multiplier
    pub amount: f32,
}

/// Sent when an entity dies (health reaches 0).
///
/// Systems can listen for this to trigger death animations, despawn the
/// entity, or end the run.
#[derive(Event, Debug, Clone)]
pub struct DeathEvent {
    /// Entity that died
    pub entity: Entity,
    /// Entity that killed them (if any)
    pub killed_by: Option<Entity>,
}
