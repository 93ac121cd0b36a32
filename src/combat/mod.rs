//! Combat module - health, attack windows, and damage.
//!
//! Enemy and boss controllers only read the flags kept here. Attack windows are
//! opened by the attack events they send and closed by the combat systems.

mod components;
mod plugin;
mod systems;

pub use components::*;
pub use plugin::CombatPlugin;
pub use systems::CombatSet;
