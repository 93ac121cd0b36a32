//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::ai;
use super::data::{load_enemy_definitions, EnemyRegistry};
use super::pathing::PathResolved;
use super::spawning::{spawn_requested_enemies, SpawnEnemy};
use crate::combat::CombatSet;
use crate::core::GameState;

/// Ordering of enemy systems inside a frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum EnemySet {
    /// Spawn requests and deferred path answers
    Intake,
    /// Perception and chase
    Think,
}

/// Enemy plugin - handles enemy spawning, AI, and death.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnemyRegistry>()
            .add_event::<SpawnEnemy>()
            .add_event::<PathResolved>()
            .add_event::<ai::EnemyAttackEvent>()
            .add_systems(Startup, load_enemy_definitions)
            .configure_sets(
                Update,
                (EnemySet::Intake, EnemySet::Think)
                    .chain()
                    .after(CombatSet::Timers)
                    .before(CombatSet::Resolve)
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(
                Update,
                (spawn_requested_enemies, ai::apply_path_results).in_set(EnemySet::Intake),
            )
            .add_systems(Update, ai::ai_chase.in_set(EnemySet::Think))
            .add_systems(Update, ai::resolve_enemy_attacks.in_set(CombatSet::Resolve))
            // Death handling runs after damage lands
            .add_systems(
                Update,
                (ai::handle_enemy_death, ai::despawn_dead_enemies)
                    .chain()
                    .after(CombatSet::Damage)
                    .run_if(in_state(GameState::InGame)),
            );
    }
}
