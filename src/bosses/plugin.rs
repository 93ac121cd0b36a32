//! Boss plugin - registers boss systems.

use bevy::prelude::*;

use super::data::{load_boss_definitions, BossRegistry};
use super::systems::{self, BossAttackEvent, BossPhaseChanged, BossRng, SpawnBoss};
use crate::combat::CombatSet;
use crate::enemies::EnemySet;

/// Boss plugin - phase tracking and patterned attacks on top of enemy AI.
pub struct BossPlugin;

impl Plugin for BossPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BossRegistry>()
            .init_resource::<BossRng>()
            .add_event::<SpawnBoss>()
            .add_event::<BossPhaseChanged>()
            .add_event::<BossAttackEvent>()
            .add_systems(Startup, load_boss_definitions)
            .add_systems(
                Update,
                (systems::spawn_requested_bosses, systems::update_boss_phases)
                    .chain()
                    .in_set(EnemySet::Intake),
            )
            .add_systems(
                Update,
                (systems::decide_boss_attacks, systems::resolve_boss_attacks)
                    .chain()
                    .in_set(CombatSet::Resolve),
            );
    }
}
