//! Enemies module - perception, pathing, chase AI, and spawning.
//!
//! The chase controller in [`chase`] only talks to the traits in [`senses`];
//! the systems in `ai` adapt the Bevy world to them.

pub mod animation;
mod ai;
pub mod chase;
mod components;
pub mod data;
pub mod pathing;
mod plugin;
pub mod senses;
mod spawning;

pub use ai::{BodyFit, EnemyAttackEvent, PathfindingService};
pub use animation::{AnimationClip, SpriteAnimation};
pub use components::*;
pub use data::{EnemyDefinition, EnemyRegistry};
pub use pathing::{PathFollower, PathReply, PathRequest, PathResolved, PathTicket};
pub use plugin::{EnemyPlugin, EnemySet};
pub use spawning::{spawn_enemy, SpawnEnemy};
