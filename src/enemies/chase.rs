//! Perception and chase controller.
//!
//! Runs once per frame per enemy. A full target scan only happens on a
//! perception tick; between ticks the enemy keeps following whatever path it
//! already has.

use bevy::prelude::*;

use super::animation::AnimationClip;
use super::components::{AiState, Perception};
use super::pathing::{PathAcceptance, PathFollower, PathReply};
use super::senses::{Pathfinder, Rig, Senses, Sighting};
use crate::combat::CombatState;
use crate::core::{bearing, distance, velocity_from_angle};

/// Result of one path-following step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStep {
    /// Waypoint reached; cursor advanced with no displacement this call.
    Advanced,
    /// Moving toward the current waypoint.
    Moving,
    /// Cursor ran past the last waypoint; path dropped, any refresh kept.
    Exhausted,
    /// Nothing to follow.
    NoPath,
}

/// Mutable view of one enemy's chase state.
pub struct Agent<'a> {
    pub entity: Entity,
    /// Effective movement speed in pixels per second
    pub speed: f32,
    pub flags: &'a CombatState,
    pub perception: &'a mut Perception,
    pub path: &'a mut PathFollower,
    pub state: &'a mut AiState,
}

impl Agent<'_> {
    /// Run one frame of the controller and return the resulting state.
    pub fn update(&mut self, now: f64, senses: &mut Senses, rig: &mut Rig) -> AiState {
        if !rig.body.has_body() {
            return *self.state;
        }

        // The combat subsystem owns this flag and clears it when the attack ends.
        if self.flags.is_attacking {
            return *self.state;
        }

        if self.perception.throttle.try_fire(now) {
            *self.state = self.scan(now, senses, rig);
        } else if self.path.has_path() && *self.state != AiState::Engaged && self.flags.can_move {
            if matches!(self.follow_path(rig), PathStep::Moving | PathStep::Advanced) {
                *self.state = AiState::ChasingPath;
            }
        }

        *self.state
    }

    /// Nearest visible candidate of the designated kind.
    fn acquire_target(&self, senses: &Senses, position: Vec2) -> Option<Sighting> {
        senses
            .spatial
            .within_radius(position, self.perception.radius)
            .into_iter()
            .filter(|s| s.entity != self.entity && s.kind == self.perception.target)
            .filter(|s| senses.can_see(position, s.position))
            .min_by(|a, b| {
                distance(position, a.position).total_cmp(&distance(position, b.position))
            })
    }

    fn scan(&mut self, now: f64, senses: &mut Senses, rig: &mut Rig) -> AiState {
        let position = rig.body.position();

        let Some(target) = self.acquire_target(senses, position) else {
            rig.body.stop();
            self.path.clear();
            return AiState::Idle;
        };

        if rig.combat.in_melee_range(&target) {
            rig.body.stop();
            rig.animation.play(AnimationClip::Idle, None);
            if self.flags.can_attack {
                rig.combat.attack(&target);
            }
            return AiState::Engaged;
        }

        if !self.flags.can_move {
            rig.body.stop();
            return AiState::Idle;
        }

        match senses.pathfinder.as_deref_mut() {
            Some(pathfinder) => self.chase_path(now, position, &target, pathfinder, rig),
            None => {
                self.steer_direct(target.position, rig);
                AiState::ChasingDirect
            }
        }
    }

    fn chase_path(
        &mut self,
        now: f64,
        position: Vec2,
        target: &Sighting,
        pathfinder: &mut dyn Pathfinder,
        rig: &mut Rig,
    ) -> AiState {
        if self.path.needs_refresh(now) {
            let request = self.path.begin_request(self.entity, position, target.position, now);
            let ticket = request.ticket;

            if let PathReply::Ready(waypoints) = pathfinder.find_path(request) {
                if self.path.accept(ticket, waypoints) != PathAcceptance::Assigned {
                    self.steer_direct(target.position, rig);
                    return AiState::ChasingDirect;
                }
            }
        }

        if self.path.has_path() && self.follow_path(rig) != PathStep::Exhausted {
            AiState::ChasingPath
        } else {
            // Deferred answer not in yet, or the old path just ran out.
            self.steer_direct(target.position, rig);
            AiState::ChasingDirect
        }
    }

    /// One step along the stored path.
    pub fn follow_path(&mut self, rig: &mut Rig) -> PathStep {
        let Some(waypoint) = self.path.current_waypoint() else {
            if self.path.is_exhausted() {
                rig.body.stop();
                self.path.finish_path();
                return PathStep::Exhausted;
            }
            return PathStep::NoPath;
        };

        let position = rig.body.position();
        if distance(position, waypoint) < self.path.reached_distance() {
            self.path.advance();
            rig.body.stop();
            return PathStep::Advanced;
        }

        let angle = bearing(position, waypoint);
        rig.body.set_velocity(velocity_from_angle(angle, self.speed));
        rig.animation.play(AnimationClip::Walk, Some(angle));
        rig.body.refresh_body();
        PathStep::Moving
    }

    fn steer_direct(&mut self, target: Vec2, rig: &mut Rig) {
        let velocity = rig.body.move_toward(target, self.speed);
        let direction = (velocity != Vec2::ZERO).then(|| velocity.to_angle());
        rig.animation.play(AnimationClip::Walk, direction);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::core::Facing;
    use crate::enemies::animation::SpriteAnimation;
    use crate::enemies::components::EntityKind;
    use crate::enemies::pathing::PathRequest;
    use crate::enemies::senses::{CombatHook, LineOfSight, MovementSink, SpatialQuery};

    const ME: Entity = Entity::from_raw(1);
    const HERO: Entity = Entity::from_raw(2);
    const SPEED: f32 = 50.0;

    fn sighting(entity: Entity, kind: EntityKind, x: f32, y: f32) -> Sighting {
        Sighting {
            entity,
            position: Vec2::new(x, y),
            kind,
            radius: 8.0,
        }
    }

    fn hero_at(x: f32, y: f32) -> Sighting {
        sighting(HERO, EntityKind::Player, x, y)
    }

    struct Crowd {
        sightings: Vec<Sighting>,
        scans: Cell<usize>,
    }

    impl Crowd {
        fn new(sightings: Vec<Sighting>) -> Self {
            Self {
                sightings,
                scans: Cell::new(0),
            }
        }
    }

    impl SpatialQuery for Crowd {
        fn within_radius(&self, center: Vec2, radius: f32) -> Vec<Sighting> {
            self.scans.set(self.scans.get() + 1);
            self.sightings
                .iter()
                .filter(|s| distance(center, s.position) <= radius)
                .copied()
                .collect()
        }
    }

    struct Wall {
        blocked: bool,
    }

    impl LineOfSight for Wall {
        fn is_visible(&self, _from: Vec2, _to: Vec2) -> bool {
            !self.blocked
        }
    }

    struct ScriptedPathfinder {
        reply: PathReply,
        requests: Vec<PathRequest>,
    }

    impl ScriptedPathfinder {
        fn answering(reply: PathReply) -> Self {
            Self {
                reply,
                requests: Vec::new(),
            }
        }
    }

    impl Pathfinder for ScriptedPathfinder {
        fn find_path(&mut self, request: PathRequest) -> PathReply {
            self.requests.push(request);
            self.reply.clone()
        }
    }

    #[derive(Default)]
    struct TestBody {
        position: Vec2,
        absent: bool,
        velocity: Vec2,
        velocity_writes: usize,
        stops: usize,
        refreshes: usize,
    }

    impl MovementSink for TestBody {
        fn has_body(&self) -> bool {
            !self.absent
        }

        fn position(&self) -> Vec2 {
            self.position
        }

        fn set_velocity(&mut self, velocity: Vec2) {
            self.velocity = velocity;
            self.velocity_writes += 1;
        }

        fn move_toward(&mut self, target: Vec2, speed: f32) -> Vec2 {
            let velocity = (target - self.position).normalize_or_zero() * speed;
            self.set_velocity(velocity);
            velocity
        }

        fn stop(&mut self) {
            self.velocity = Vec2::ZERO;
            self.stops += 1;
        }

        fn refresh_body(&mut self) {
            self.refreshes += 1;
        }
    }

    #[derive(Default)]
    struct TestMelee {
        in_range: bool,
        attacks: Vec<Entity>,
    }

    impl CombatHook for TestMelee {
        fn in_melee_range(&self, _target: &Sighting) -> bool {
            self.in_range
        }

        fn attack(&mut self, target: &Sighting) {
            self.attacks.push(target.entity);
        }
    }

    struct Harness {
        perception: Perception,
        path: PathFollower,
        state: AiState,
        flags: CombatState,
        body: TestBody,
        animation: SpriteAnimation,
        melee: TestMelee,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                perception: Perception::new(200.0, EntityKind::Player),
                path: PathFollower::default(),
                state: AiState::Idle,
                flags: CombatState::default(),
                body: TestBody::default(),
                animation: SpriteAnimation::default(),
                melee: TestMelee::default(),
            }
        }

        fn tick(&mut self, now: f64, senses: &mut Senses) -> AiState {
            let mut rig = Rig {
                body: &mut self.body,
                animation: &mut self.animation,
                combat: &mut self.melee,
            };
            let mut agent = Agent {
                entity: ME,
                speed: SPEED,
                flags: &self.flags,
                perception: &mut self.perception,
                path: &mut self.path,
                state: &mut self.state,
            };
            agent.update(now, senses, &mut rig)
        }

        /// Give the enemy a path by running one scan against `points`.
        fn with_path(mut self, points: Vec<Vec2>) -> Self {
            let crowd = Crowd::new(vec![hero_at(150.0, 0.0)]);
            let mut pathfinder = ScriptedPathfinder::answering(PathReply::Ready(Some(points)));
            let mut senses = Senses::new(&crowd).with_pathfinder(&mut pathfinder);
            self.tick(1.0, &mut senses);
            self
        }
    }

    #[test]
    fn no_target_in_range_goes_idle_and_clears_path() {
        let mut harness = Harness::new().with_path(vec![Vec2::ZERO, Vec2::new(100.0, 0.0)]);
        assert!(harness.path.has_path());

        let crowd = Crowd::new(vec![hero_at(900.0, 0.0)]);
        let mut senses = Senses::new(&crowd);
        assert_eq!(harness.tick(2.0, &mut senses), AiState::Idle);
        assert!(!harness.path.has_path());
        assert_eq!(harness.body.velocity, Vec2::ZERO);
    }

    #[test]
    fn scans_are_throttled_to_the_perception_interval() {
        let mut harness = Harness::new();
        let crowd = Crowd::new(vec![hero_at(100.0, 0.0)]);
        let mut senses = Senses::new(&crowd);

        harness.tick(1.0, &mut senses);
        harness.tick(1.3, &mut senses);
        assert_eq!(crowd.scans.get(), 1);
        assert_eq!(harness.body.velocity_writes, 1);

        harness.tick(1.6, &mut senses);
        assert_eq!(crowd.scans.get(), 2);
    }

    #[test]
    fn between_ticks_the_existing_path_is_followed() {
        let mut harness =
            Harness::new().with_path(vec![Vec2::ZERO, Vec2::new(100.0, 0.0), Vec2::new(200.0, 0.0)]);
        harness.body.velocity_writes = 0;

        let crowd = Crowd::new(vec![hero_at(150.0, 0.0)]);
        let mut senses = Senses::new(&crowd);
        harness.tick(1.2, &mut senses);

        assert_eq!(crowd.scans.get(), 0);
        assert_eq!(harness.body.velocity_writes, 1);
        assert_eq!(harness.state, AiState::ChasingPath);
    }

    #[test]
    fn occluded_target_is_treated_as_absent() {
        let mut harness = Harness::new().with_path(vec![Vec2::ZERO, Vec2::new(100.0, 0.0)]);

        let crowd = Crowd::new(vec![hero_at(60.0, 0.0)]);
        let wall = Wall { blocked: true };
        let mut senses = Senses::new(&crowd).with_line_of_sight(&wall);
        harness.melee.in_range = true;

        assert_eq!(harness.tick(2.0, &mut senses), AiState::Idle);
        assert!(!harness.path.has_path());
        assert!(harness.melee.attacks.is_empty());
    }

    #[test]
    fn melee_overlap_engages_and_attacks_when_allowed() {
        let mut harness = Harness::new();
        harness.melee.in_range = true;
        harness.animation.clip = AnimationClip::Walk;

        let crowd = Crowd::new(vec![hero_at(12.0, 0.0)]);
        let wall = Wall { blocked: false };
        let mut senses = Senses::new(&crowd).with_line_of_sight(&wall);

        assert_eq!(harness.tick(1.0, &mut senses), AiState::Engaged);
        assert_eq!(harness.melee.attacks, vec![HERO]);
        assert_eq!(harness.body.stops, 1);
        assert_eq!(harness.body.velocity, Vec2::ZERO);
        assert_eq!(harness.animation.clip, AnimationClip::Idle);
    }

    #[test]
    fn melee_overlap_without_can_attack_only_holds_position() {
        let mut harness = Harness::new();
        harness.melee.in_range = true;
        harness.flags.can_attack = false;

        let crowd = Crowd::new(vec![hero_at(12.0, 0.0)]);
        let mut senses = Senses::new(&crowd);

        assert_eq!(harness.tick(1.0, &mut senses), AiState::Engaged);
        assert!(harness.melee.attacks.is_empty());
    }

    #[test]
    fn without_pathfinder_steers_directly_at_target() {
        let mut harness = Harness::new();
        let crowd = Crowd::new(vec![hero_at(100.0, 0.0)]);
        let mut senses = Senses::new(&crowd);

        assert_eq!(harness.tick(1.0, &mut senses), AiState::ChasingDirect);
        assert_eq!(harness.body.velocity, Vec2::new(SPEED, 0.0));
        assert_eq!(harness.animation.clip, AnimationClip::Walk);
        assert_eq!(harness.animation.facing, Facing::Right);
    }

    #[test]
    fn only_the_nearest_target_of_the_designated_kind_is_chased() {
        let mut harness = Harness::new();
        let crowd = Crowd::new(vec![
            sighting(ME, EntityKind::Enemy, 0.0, 0.0),
            sighting(Entity::from_raw(3), EntityKind::Enemy, 10.0, 0.0),
            sighting(Entity::from_raw(4), EntityKind::Player, 90.0, 0.0),
            sighting(HERO, EntityKind::Player, 0.0, 40.0),
        ]);
        let mut senses = Senses::new(&crowd);

        harness.tick(1.0, &mut senses);
        assert_eq!(harness.body.velocity, Vec2::new(0.0, SPEED));
        assert_eq!(harness.animation.facing, Facing::Up);
    }

    #[test]
    fn ready_path_is_followed_from_its_second_point() {
        let mut harness = Harness::new();
        let crowd = Crowd::new(vec![hero_at(60.0, 80.0)]);
        let points = vec![Vec2::ZERO, Vec2::new(30.0, 40.0), Vec2::new(60.0, 80.0)];
        let mut pathfinder = ScriptedPathfinder::answering(PathReply::Ready(Some(points)));
        let mut senses = Senses::new(&crowd).with_pathfinder(&mut pathfinder);

        assert_eq!(harness.tick(1.0, &mut senses), AiState::ChasingPath);
        assert_eq!(harness.path.waypoint_index(), 1);
        assert!((harness.body.velocity - Vec2::new(30.0, 40.0)).length() < 1e-3);
        assert_eq!(harness.body.refreshes, 1);
        assert_eq!(harness.animation.facing, Facing::Up);

        assert_eq!(pathfinder.requests.len(), 1);
        assert_eq!(pathfinder.requests[0].to, Vec2::new(60.0, 80.0));
        assert_eq!(pathfinder.requests[0].ticket.owner, ME);
    }

    #[test]
    fn unusable_path_falls_back_to_direct_steering() {
        let mut harness = Harness::new();
        let crowd = Crowd::new(vec![hero_at(0.0, -100.0)]);
        let mut pathfinder = ScriptedPathfinder::answering(PathReply::Ready(None));
        let mut senses = Senses::new(&crowd).with_pathfinder(&mut pathfinder);

        assert_eq!(harness.tick(1.0, &mut senses), AiState::ChasingDirect);
        assert!(!harness.path.has_path());
        assert_eq!(harness.body.velocity, Vec2::new(0.0, -SPEED));
        assert_eq!(harness.animation.facing, Facing::Down);
    }

    #[test]
    fn path_is_not_requested_again_before_the_update_interval() {
        let mut harness = Harness::new();
        let crowd = Crowd::new(vec![hero_at(150.0, 0.0)]);
        let points = vec![Vec2::ZERO, Vec2::new(100.0, 0.0), Vec2::new(150.0, 0.0)];
        let mut pathfinder = ScriptedPathfinder::answering(PathReply::Ready(Some(points)));
        let mut senses = Senses::new(&crowd).with_pathfinder(&mut pathfinder);

        harness.tick(1.0, &mut senses);
        harness.tick(1.6, &mut senses);
        harness.tick(2.2, &mut senses);

        assert_eq!(crowd.scans.get(), 3);
        assert_eq!(pathfinder.requests.len(), 2);
    }

    #[test]
    fn reaching_a_waypoint_advances_once_without_moving() {
        let mut harness =
            Harness::new().with_path(vec![Vec2::ZERO, Vec2::new(5.0, 0.0), Vec2::new(100.0, 0.0)]);

        assert_eq!(harness.path.waypoint_index(), 2);
        assert_eq!(harness.body.velocity, Vec2::ZERO);
        assert_eq!(harness.body.velocity_writes, 0);

        let crowd = Crowd::new(vec![hero_at(150.0, 0.0)]);
        let mut senses = Senses::new(&crowd);
        harness.tick(1.1, &mut senses);

        assert_eq!(harness.path.waypoint_index(), 2);
        assert_eq!(harness.body.velocity, Vec2::new(SPEED, 0.0));
    }

    #[test]
    fn exhausted_path_stops_all_movement() {
        let mut harness = Harness::new().with_path(vec![Vec2::ZERO, Vec2::new(4.0, 0.0)]);
        assert_eq!(harness.path.waypoint_index(), 2);
        assert!(harness.path.is_exhausted());

        let crowd = Crowd::new(vec![hero_at(150.0, 0.0)]);
        let mut senses = Senses::new(&crowd);
        harness.tick(1.1, &mut senses);
        harness.tick(1.2, &mut senses);
        harness.tick(1.3, &mut senses);

        assert!(!harness.path.has_path());
        assert_eq!(harness.body.velocity_writes, 0);
        assert_eq!(harness.body.velocity, Vec2::ZERO);
    }

    #[test]
    fn attacking_suspends_movement_and_path_advancement() {
        let mut harness =
            Harness::new().with_path(vec![Vec2::ZERO, Vec2::new(100.0, 0.0), Vec2::new(200.0, 0.0)]);
        let writes = harness.body.velocity_writes;
        let index = harness.path.waypoint_index();
        harness.flags.is_attacking = true;

        let crowd = Crowd::new(vec![hero_at(150.0, 0.0)]);
        let mut senses = Senses::new(&crowd);
        harness.tick(1.2, &mut senses);
        harness.tick(3.0, &mut senses);

        assert_eq!(crowd.scans.get(), 0);
        assert_eq!(harness.body.velocity_writes, writes);
        assert_eq!(harness.body.stops, 0);
        assert_eq!(harness.path.waypoint_index(), index);
        assert_eq!(harness.state, AiState::ChasingPath);
    }

    #[test]
    fn missing_body_skips_the_tick() {
        let mut harness = Harness::new();
        harness.body.absent = true;

        let crowd = Crowd::new(vec![hero_at(100.0, 0.0)]);
        let mut senses = Senses::new(&crowd);

        assert_eq!(harness.tick(1.0, &mut senses), AiState::Idle);
        assert_eq!(crowd.scans.get(), 0);
        assert_eq!(harness.perception.throttle.last(), 0.0);
    }

    #[test]
    fn deferred_path_after_target_loss_is_discarded() {
        let mut harness = Harness::new();
        let crowd = Crowd::new(vec![hero_at(150.0, 0.0)]);
        let mut pathfinder = ScriptedPathfinder::answering(PathReply::Pending);
        let mut senses = Senses::new(&crowd).with_pathfinder(&mut pathfinder);

        assert_eq!(harness.tick(1.0, &mut senses), AiState::ChasingDirect);
        assert!(harness.path.is_pending());
        let ticket = pathfinder.requests[0].ticket;

        let gone = Crowd::new(Vec::new());
        let mut senses = Senses::new(&gone);
        assert_eq!(harness.tick(2.0, &mut senses), AiState::Idle);

        let late = Some(vec![Vec2::ZERO, Vec2::new(50.0, 0.0)]);
        assert_eq!(harness.path.accept(ticket, late), PathAcceptance::Stale);
        assert!(!harness.path.has_path());
    }

    #[test]
    fn deferred_path_for_the_current_request_is_used() {
        let mut harness = Harness::new();
        let crowd = Crowd::new(vec![hero_at(150.0, 0.0)]);
        let mut pathfinder = ScriptedPathfinder::answering(PathReply::Pending);
        let mut senses = Senses::new(&crowd).with_pathfinder(&mut pathfinder);
        harness.tick(1.0, &mut senses);
        let ticket = pathfinder.requests[0].ticket;

        let points = Some(vec![Vec2::ZERO, Vec2::new(0.0, 90.0)]);
        assert_eq!(harness.path.accept(ticket, points), PathAcceptance::Assigned);

        let mut senses = Senses::new(&crowd);
        assert_eq!(harness.tick(1.1, &mut senses), AiState::ChasingPath);
        assert!((harness.body.velocity - Vec2::new(0.0, SPEED)).length() < 1e-3);
    }

    #[test]
    fn refresh_issued_before_exhaustion_is_still_accepted() {
        let mut harness = Harness::new().with_path(vec![Vec2::ZERO, Vec2::new(4.0, 0.0)]);
        assert!(harness.path.is_exhausted());

        // Next scan is due; the refresh goes out while the old path is still stored.
        let crowd = Crowd::new(vec![hero_at(150.0, 0.0)]);
        let mut pathfinder = ScriptedPathfinder::answering(PathReply::Pending);
        let mut senses = Senses::new(&crowd).with_pathfinder(&mut pathfinder);
        assert_eq!(harness.tick(2.1, &mut senses), AiState::ChasingDirect);
        let ticket = pathfinder.requests[0].ticket;

        assert!(!harness.path.has_path());
        assert!(harness.path.is_pending());
        let points = Some(vec![Vec2::ZERO, Vec2::new(60.0, 0.0)]);
        assert_eq!(harness.path.accept(ticket, points), PathAcceptance::Assigned);
    }
}
