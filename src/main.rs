//! Hollowreach - Entry Point
//!
//! Starts a single arena with a few skeletons and the Bone Warden.
//!
//! Controls:
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use hollowreach::bosses::SpawnBoss;
use hollowreach::core::GameState;
use hollowreach::enemies::{Enemy, EnemyConfigId, SpawnEnemy};

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Hollowreach".to_string(),
                resolution: (1280.0, 720.0).into(),
                canvas: Some("#bevy".to_string()),
                fit_canvas_to_parent: true,
                ..default()
            }),
            ..default()
        }))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(32.0))

        // Our game plugin
        .add_plugins(hollowreach::HollowreachPlugin)

        .add_systems(Startup, spawn_camera)
        .add_systems(OnEnter(GameState::InGame), spawn_opening_encounter)
        .run();
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Populate the arena unless a run is already in progress.
fn spawn_opening_encounter(
    existing: Query<(), With<Enemy>>,
    mut enemies: EventWriter<SpawnEnemy>,
    mut bosses: EventWriter<SpawnBoss>,
) {
    if !existing.is_empty() {
        return;
    }

    for position in [Vec2::new(-240.0, 120.0), Vec2::new(260.0, -80.0), Vec2::new(0.0, -220.0)] {
        enemies.send(SpawnEnemy {
            config_id: EnemyConfigId(1),
            position,
        });
    }

    bosses.send(SpawnBoss {
        boss: "bone_warden".to_string(),
        position: Vec2::new(0.0, 260.0),
    });
}
