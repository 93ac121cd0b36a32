//! Sprite animation state written by the enemy controllers.
//!
//! The sprite sheet renderer reads [`SpriteAnimation`] and picks frames; only
//! the clip and facing are decided here.

use bevy::prelude::*;

use super::senses::AnimationSink;
use crate::core::Facing;

/// Animation clips every enemy sprite sheet provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationClip {
    #[default]
    Idle,
    Walk,
    Attack,
    Death,
}

impl AnimationClip {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationClip::Idle => "idle",
            AnimationClip::Walk => "walk",
            AnimationClip::Attack => "attack",
            AnimationClip::Death => "death",
        }
    }
}

/// Current clip and facing of a sprite.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpriteAnimation {
    pub clip: AnimationClip,
    pub facing: Facing,
}

impl SpriteAnimation {
    /// Sheet row name, e.g. `walk_left`.
    pub fn sheet_key(&self) -> String {
        format!("{}_{}", self.clip.as_str(), self.facing.as_str())
    }
}

impl AnimationSink for SpriteAnimation {
    /// Without a direction the previous facing is kept.
    fn play(&mut self, clip: AnimationClip, direction: Option<f32>) {
        self.clip = clip;
        if let Some(angle) = direction {
            self.facing = Facing::from_angle(angle);
        }
    }
}
