//! Player plugin - player spawning and teardown.

use bevy::prelude::*;

use super::components::*;
use super::spawning::spawn_player;
use crate::core::GameState;

/// Player plugin - spawns the player when a run starts.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerConfig>()
            .add_systems(OnEnter(GameState::InGame), spawn_player_if_missing)
            .add_systems(OnEnter(GameState::GameOver), despawn_player);
    }
}

/// Spawn the player unless one already exists (returning from pause).
fn spawn_player_if_missing(
    mut commands: Commands,
    config: Res<PlayerConfig>,
    existing: Query<(), With<Player>>,
) {
    if !existing.is_empty() {
        return;
    }
    spawn_player(&mut commands, &config, config.spawn_position);
}

fn despawn_player(mut commands: Commands, query: Query<Entity, With<Player>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
