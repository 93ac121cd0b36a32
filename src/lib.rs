//! Hollowreach - a 2D action RPG core in Bevy.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, geometry and timing helpers
//! - **Player**: The player entity enemies hunt
//! - **Combat**: Health, attack windows, damage application
//! - **Enemies**: Perception, pathing, and chase AI
//! - **Bosses**: Health-driven phases and weighted attack patterns

pub mod bosses;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod player;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct HollowreachPlugin;

impl Plugin for HollowreachPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // Combat systems
            .add_plugins(combat::CombatPlugin)

            // Enemy systems
            .add_plugins(enemies::EnemyPlugin)

            // Boss systems (build on enemy systems)
            .add_plugins(bosses::BossPlugin);
    }
}
