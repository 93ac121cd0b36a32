//! Collaborator interfaces consumed by the chase controller.
//!
//! The controller never talks to the physics world, the renderer, or the
//! pathfinder directly. Scene-wide services are bundled in [`Senses`], and the
//! per-enemy sinks it writes to are bundled in [`Rig`]. The Bevy adapters live
//! in `ai.rs`; tests provide recording fakes.

use bevy::prelude::*;

use super::animation::AnimationClip;
use super::components::EntityKind;
use super::pathing::{PathReply, PathRequest};

/// One entity returned by a spatial query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sighting {
    pub entity: Entity,
    pub position: Vec2,
    pub kind: EntityKind,
    /// Hit zone radius of the sighted entity (0 when it has none)
    pub radius: f32,
}

/// Finds entities around a point.
pub trait SpatialQuery {
    fn within_radius(&self, center: Vec2, radius: f32) -> Vec<Sighting>;
}

/// Occlusion test between two points.
pub trait LineOfSight {
    fn is_visible(&self, from: Vec2, to: Vec2) -> bool;
}

/// Route planner.
///
/// A planner may answer immediately with [`PathReply::Ready`] or defer with
/// [`PathReply::Pending`]; deferred answers are delivered later together with
/// the request's ticket.
pub trait Pathfinder {
    fn find_path(&mut self, request: PathRequest) -> PathReply;
}

/// Physics body of the controlled enemy.
pub trait MovementSink {
    /// False while the entity has no physics body (e.g. mid-destruction).
    fn has_body(&self) -> bool;
    fn position(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);
    /// Steer straight at `target` at `speed`, returning the velocity applied.
    fn move_toward(&mut self, target: Vec2, speed: f32) -> Vec2;
    /// Zero velocity and acceleration.
    fn stop(&mut self);
    /// Fit the collision body to the current sprite size and offset.
    fn refresh_body(&mut self);
}

/// Sprite animation output.
pub trait AnimationSink {
    fn play(&mut self, clip: AnimationClip, direction: Option<f32>);
}

/// Engine-side melee combat.
pub trait CombatHook {
    /// Whether the enemy's hit zone overlaps `target`.
    fn in_melee_range(&self, target: &Sighting) -> bool;
    /// Start a melee attack against `target`.
    fn attack(&mut self, target: &Sighting);
}

/// Scene-wide services. Line of sight and pathfinding are optional.
pub struct Senses<'a> {
    pub spatial: &'a dyn SpatialQuery,
    pub line_of_sight: Option<&'a dyn LineOfSight>,
    pub pathfinder: Option<&'a mut dyn Pathfinder>,
}

impl<'a> Senses<'a> {
    pub fn new(spatial: &'a dyn SpatialQuery) -> Self {
        Self {
            spatial,
            line_of_sight: None,
            pathfinder: None,
        }
    }

    pub fn with_line_of_sight(mut self, line_of_sight: &'a dyn LineOfSight) -> Self {
        self.line_of_sight = Some(line_of_sight);
        self
    }

    pub fn with_pathfinder(mut self, pathfinder: &'a mut dyn Pathfinder) -> Self {
        self.pathfinder = Some(pathfinder);
        self
    }

    /// Without a line-of-sight service every target counts as visible.
    pub fn can_see(&self, from: Vec2, to: Vec2) -> bool {
        self.line_of_sight
            .map_or(true, |los| los.is_visible(from, to))
    }
}

/// Per-enemy output sinks.
pub struct Rig<'a> {
    pub body: &'a mut dyn MovementSink,
    pub animation: &'a mut dyn AnimationSink,
    pub combat: &'a mut dyn CombatHook,
}
