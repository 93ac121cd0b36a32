//! Core game module - states, events, and fundamental helpers.
//!
//! This module provides the foundation that all other game systems build upon:
//! game states, global events, 2D geometry helpers, timestamp throttles, and
//! the shared RON definition loader.

mod cooldown;
mod data;
mod error;
mod events;
mod geometry;
mod plugin;
mod states;

pub use cooldown::{Cooldowns, Throttle};
pub use data::{definition_files, parse_definition};
pub use error::DataLoadError;
pub use events::*;
pub use geometry::{bearing, distance, velocity_from_angle, Facing};
pub use plugin::CorePlugin;
pub use states::*;
