//! Player module - the entity enemies perceive and chase.

mod components;
mod plugin;
mod spawning;

pub use components::*;
pub use plugin::PlayerPlugin;
pub use spawning::spawn_player;
