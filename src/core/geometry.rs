//! 2D geometry helpers shared by the enemy and boss controllers.

use std::f32::consts::{FRAC_PI_4, TAU};

use bevy::prelude::*;

/// Euclidean distance between two points.
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Angle in radians from `from` toward `to`, measured from +X counter-clockwise.
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Velocity of magnitude `speed` along `angle`.
pub fn velocity_from_angle(angle: f32, speed: f32) -> Vec2 {
    Vec2::from_angle(angle) * speed
}

/// Four-way facing used to pick directional sprite animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    #[default]
    Down,
    Up,
    Left,
    Right,
}

impl Facing {
    /// Quantize an angle to the nearest of the four facings.
    pub fn from_angle(angle: f32) -> Self {
        let a = angle.rem_euclid(TAU);
        if a < FRAC_PI_4 || a >= 7.0 * FRAC_PI_4 {
            Facing::Right
        } else if a < 3.0 * FRAC_PI_4 {
            Facing::Up
        } else if a < 5.0 * FRAC_PI_4 {
            Facing::Left
        } else {
            Facing::Down
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Facing::Down => "down",
            Facing::Up => "up",
            Facing::Left => "left",
            Facing::Right => "right",
        }
    }
}
