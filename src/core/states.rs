//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. Enemy AI and boss
//! decisions only run in the InGame state.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` while enemy and boss definitions are read
/// - Enter `InGame` once definitions are available
/// - `Paused` freezes gameplay but keeps the world visible
/// - `GameOver` when the player dies
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Active gameplay
    InGame,
    /// Game is paused (overlay on gameplay)
    Paused,
    /// Player has died
    GameOver,
}
