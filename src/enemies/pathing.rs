//! Waypoint paths and pathfinding request bookkeeping.
//!
//! Path results may arrive frames after the request. Every request carries a
//! [`PathTicket`]; the follower bumps its generation whenever it starts a new
//! request or clears its path, so an answer to an older request is recognised
//! and dropped instead of overwriting newer state.

use bevy::prelude::*;

use super::components::{PATH_UPDATE_INTERVAL, WAYPOINT_REACHED_DISTANCE};
use crate::core::Throttle;

/// Identifies one path request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathTicket {
    pub owner: Entity,
    pub generation: u32,
}

/// A route query handed to the pathfinding service.
#[derive(Debug, Clone, PartialEq)]
pub struct PathRequest {
    pub ticket: PathTicket,
    pub from: Vec2,
    pub to: Vec2,
}

/// Answer from the pathfinding service.
#[derive(Debug, Clone, PartialEq)]
pub enum PathReply {
    /// Answered now; `None` means no route exists.
    Ready(Option<Vec<Vec2>>),
    /// Will be delivered later as a [`PathResolved`] event.
    Pending,
}

/// Deferred pathfinding answer.
#[derive(Event, Debug, Clone)]
pub struct PathResolved {
    pub ticket: PathTicket,
    pub waypoints: Option<Vec<Vec2>>,
}

/// Outcome of handing a result to a [`PathFollower`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathAcceptance {
    /// Stored; following starts at waypoint 1.
    Assigned,
    /// No route, or fewer than two points.
    Unusable,
    /// Answer to a request that is no longer current.
    Stale,
}

/// Current path and request state of one enemy.
#[derive(Component, Debug, Clone)]
pub struct PathFollower {
    path: Option<Vec<Vec2>>,
    waypoint_index: usize,
    refresh: Throttle,
    reached_distance: f32,
    generation: u32,
    pending: bool,
}

impl Default for PathFollower {
    fn default() -> Self {
        Self::new(PATH_UPDATE_INTERVAL, WAYPOINT_REACHED_DISTANCE)
    }
}

impl PathFollower {
    pub fn new(update_interval: f64, reached_distance: f32) -> Self {
        Self {
            path: None,
            waypoint_index: 0,
            refresh: Throttle::new(update_interval),
            reached_distance,
            generation: 0,
            pending: false,
        }
    }

    pub fn has_path(&self) -> bool {
        self.path.is_some()
    }

    pub fn waypoint_index(&self) -> usize {
        self.waypoint_index
    }

    pub fn reached_distance(&self) -> f32 {
        self.reached_distance
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Timestamp of the last path request.
    pub fn last_request(&self) -> f64 {
        self.refresh.last()
    }

    /// Waypoint the enemy is currently heading for.
    pub fn current_waypoint(&self) -> Option<Vec2> {
        self.path
            .as_ref()
            .and_then(|path| path.get(self.waypoint_index).copied())
    }

    /// Cursor has moved past the last waypoint.
    pub fn is_exhausted(&self) -> bool {
        self.path
            .as_ref()
            .is_some_and(|path| self.waypoint_index >= path.len())
    }

    /// A new request is due when there is no path (and none outstanding), or
    /// the update interval has elapsed since the last request.
    pub fn needs_refresh(&self, now: f64) -> bool {
        if self.refresh.elapsed(now) {
            return true;
        }
        self.path.is_none() && !self.pending
    }

    /// Start a request, invalidating any outstanding one.
    pub fn begin_request(&mut self, owner: Entity, from: Vec2, to: Vec2, now: f64) -> PathRequest {
        self.generation = self.generation.wrapping_add(1);
        self.pending = true;
        self.refresh.mark(now);
        PathRequest {
            ticket: PathTicket {
                owner,
                generation: self.generation,
            },
            from,
            to,
        }
    }

    /// Take a result for `ticket`. Index 0 is the start position and is skipped.
    pub fn accept(&mut self, ticket: PathTicket, waypoints: Option<Vec<Vec2>>) -> PathAcceptance {
        if !self.pending || ticket.generation != self.generation {
            return PathAcceptance::Stale;
        }
        self.pending = false;

        match waypoints {
            Some(points) if points.len() >= 2 => {
                self.path = Some(points);
                self.waypoint_index = 1;
                PathAcceptance::Assigned
            }
            _ => {
                self.path = None;
                self.waypoint_index = 0;
                PathAcceptance::Unusable
            }
        }
    }

    /// Move the cursor to the next waypoint.
    pub fn advance(&mut self) {
        if let Some(path) = &self.path {
            self.waypoint_index = (self.waypoint_index + 1).min(path.len());
        }
    }

    /// Drop a path the enemy walked to the end. A refresh already in flight
    /// still belongs to the current chase and stays valid.
    pub fn finish_path(&mut self) {
        self.path = None;
        self.waypoint_index = 0;
    }

    /// Drop the path and invalidate any outstanding request.
    pub fn clear(&mut self) {
        self.path = None;
        self.waypoint_index = 0;
        self.pending = false;
        self.generation = self.generation.wrapping_add(1);
    }
}
