//! Bosses module - health-driven phases and weighted attack patterns.
//!
//! A boss is an enemy with a [`BossBrain`]: the enemy chase AI moves it and
//! decides when it is in reach, the brain decides which attack it uses.

pub mod attacks;
mod components;
pub mod data;
mod error;
pub mod phase;
mod plugin;
mod systems;

pub use attacks::{pick_weighted, AttackPattern, BossAttack};
pub use components::BossBrain;
pub use data::{BossDefinition, BossRegistry};
pub use error::BossDataError;
pub use phase::{select_phase, should_advance, BossPhase, Mechanic, PhaseKind, PhaseTracker};
pub use plugin::BossPlugin;
pub use systems::{BossAttackEvent, BossPhaseChanged, BossRng, SpawnBoss};
