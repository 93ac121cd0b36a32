//! Enemy AI systems.
//!
//! Adapts the Bevy world to the chase controller's collaborator traits and
//! runs the controller for every living enemy each frame.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::animation::{AnimationClip, SpriteAnimation};
use super::chase::Agent;
use super::components::{
    AiState, DeathTimer, Enemy, EnemyStats, EntityKind, PatternAttacks, Perception,
};
use super::pathing::{PathAcceptance, PathFollower, PathResolved};
use super::senses::{
    AnimationSink, CombatHook, LineOfSight, MovementSink, Pathfinder, Rig, Senses, Sighting,
    SpatialQuery,
};
use crate::combat::{CombatState, DamageEvent, Dead, HitZone, StatModifiers};
use crate::core::distance;

/// Sent when an enemy starts a melee attack.
#[derive(Event, Debug, Clone)]
pub struct EnemyAttackEvent {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: f32,
}

/// External route planner used by every enemy.
///
/// Without this resource enemies steer straight at their target.
#[derive(Resource)]
pub struct PathfindingService {
    backend: Box<dyn Pathfinder + Send + Sync>,
}

impl PathfindingService {
    pub fn new(backend: impl Pathfinder + Send + Sync + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    pub fn backend_mut(&mut self) -> &mut dyn Pathfinder {
        self.backend.as_mut()
    }
}

/// Last collider shape fitted to the sprite, to avoid rebuilding it every frame.
#[derive(Component, Debug, Default)]
pub struct BodyFit {
    size: Option<Vec2>,
    offset: Vec2,
}

/// Positions of every perceivable entity, captured once per frame.
pub struct SceneIndex {
    sightings: Vec<Sighting>,
}

impl SceneIndex {
    pub fn new(sightings: Vec<Sighting>) -> Self {
        Self { sightings }
    }
}

impl SpatialQuery for SceneIndex {
    fn within_radius(&self, center: Vec2, radius: f32) -> Vec<Sighting> {
        self.sightings
            .iter()
            .filter(|s| distance(center, s.position) <= radius)
            .copied()
            .collect()
    }
}

/// Line of sight through the physics world: fixed colliders block vision.
pub struct PhysicsSight<'a> {
    context: &'a RapierContext,
}

impl LineOfSight for PhysicsSight<'_> {
    fn is_visible(&self, from: Vec2, to: Vec2) -> bool {
        let delta = to - from;
        let length = delta.length();
        if length <= f32::EPSILON {
            return true;
        }

        self.context
            .cast_ray(from, delta / length, length, true, QueryFilter::only_fixed())
            .is_none()
    }
}

/// Rapier body of one enemy.
struct BodyDriver<'a> {
    position: Vec2,
    velocity: Option<Mut<'a, Velocity>>,
    collider: Option<Mut<'a, Collider>>,
    fit: Option<Mut<'a, BodyFit>>,
    sprite: Option<&'a Sprite>,
}

impl MovementSink for BodyDriver<'_> {
    fn has_body(&self) -> bool {
        self.velocity.is_some()
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        if let Some(body) = self.velocity.as_mut() {
            body.linvel = velocity;
        }
    }

    fn move_toward(&mut self, target: Vec2, speed: f32) -> Vec2 {
        let velocity = (target - self.position).normalize_or_zero() * speed;
        self.set_velocity(velocity);
        velocity
    }

    fn stop(&mut self) {
        if let Some(body) = self.velocity.as_mut() {
            body.linvel = Vec2::ZERO;
            body.angvel = 0.0;
        }
    }

    fn refresh_body(&mut self) {
        let (Some(sprite), Some(collider)) = (self.sprite, self.collider.as_mut()) else {
            return;
        };
        let Some(size) = sprite.custom_size else {
            return;
        };
        let offset = -sprite.anchor.as_vec() * size;

        if let Some(fit) = self.fit.as_mut() {
            if fit.size == Some(size) && fit.offset == offset {
                return;
            }
            fit.size = Some(size);
            fit.offset = offset;
        }

        **collider = Collider::compound(vec![(
            offset,
            0.0,
            Collider::cuboid(size.x * 0.5, size.y * 0.5),
        )]);
    }
}

/// Circle-overlap melee that reports attacks as events.
struct MeleeHook<'a, 'w> {
    attacker: Entity,
    position: Vec2,
    hit_radius: f32,
    damage: f32,
    attacks: &'a mut EventWriter<'w, EnemyAttackEvent>,
}

impl CombatHook for MeleeHook<'_, '_> {
    fn in_melee_range(&self, target: &Sighting) -> bool {
        distance(self.position, target.position) <= self.hit_radius + target.radius
    }

    fn attack(&mut self, target: &Sighting) {
        self.attacks.send(EnemyAttackEvent {
            attacker: self.attacker,
            target: target.entity,
            damage: self.damage,
        });
    }
}

/// Run the chase controller for every living enemy.
pub fn ai_chase(
    time: Res<Time>,
    rapier_context: Query<&RapierContext>,
    mut pathfinding: Option<ResMut<PathfindingService>>,
    mut attacks: EventWriter<EnemyAttackEvent>,
    perceivable: Query<(Entity, &Transform, &EntityKind, Option<&HitZone>), Without<Dead>>,
    mut enemies: Query<
        (
            (Entity, &Transform, &EnemyStats, &CombatState, Option<&StatModifiers>),
            (&mut Perception, &mut PathFollower, &mut AiState, &mut SpriteAnimation),
            (Option<&mut Velocity>, Option<&mut Collider>, Option<&mut BodyFit>, Option<&Sprite>),
        ),
        (With<Enemy>, Without<Dead>),
    >,
) {
    let now = time.elapsed_secs_f64();

    let scene = SceneIndex::new(
        perceivable
            .iter()
            .map(|(entity, transform, kind, hit_zone)| Sighting {
                entity,
                position: transform.translation.truncate(),
                kind: *kind,
                radius: hit_zone.map_or(0.0, |zone| zone.radius),
            })
            .collect(),
    );

    let sight = rapier_context
        .get_single()
        .ok()
        .map(|context| PhysicsSight { context });

    for (
        (entity, transform, stats, combat, modifiers),
        (mut perception, mut path, mut state, mut animation),
        (velocity, collider, fit, sprite),
    ) in enemies.iter_mut()
    {
        let position = transform.translation.truncate();
        let modifiers = modifiers.copied().unwrap_or_default();

        let mut body = BodyDriver {
            position,
            velocity,
            collider,
            fit,
            sprite,
        };
        let mut melee = MeleeHook {
            attacker: entity,
            position,
            hit_radius: stats.hit_radius,
            damage: stats.damage * modifiers.damage,
            attacks: &mut attacks,
        };

        let mut senses = Senses {
            spatial: &scene,
            line_of_sight: sight.as_ref().map(|s| s as &dyn LineOfSight),
            pathfinder: pathfinding.as_mut().map(|service| service.backend_mut()),
        };
        let mut rig = Rig {
            body: &mut body,
            animation: &mut *animation,
            combat: &mut melee,
        };

        let previous = *state;
        let mut agent = Agent {
            entity,
            speed: stats.move_speed * modifiers.speed,
            flags: combat,
            perception: &mut perception,
            path: &mut path,
            state: &mut state,
        };
        let next = agent.update(now, &mut senses, &mut rig);

        if next != previous {
            debug!("Enemy {} {:?} -> {:?}", entity, previous, next);
        }
    }
}

/// Hand deferred pathfinding answers to their enemies.
pub fn apply_path_results(
    mut results: EventReader<PathResolved>,
    mut followers: Query<&mut PathFollower, (With<Enemy>, Without<Dead>)>,
) {
    for result in results.read() {
        let Ok(mut follower) = followers.get_mut(result.ticket.owner) else {
            debug!("Dropping path for missing enemy {}", result.ticket.owner);
            continue;
        };

        match follower.accept(result.ticket, result.waypoints.clone()) {
            PathAcceptance::Assigned => {}
            PathAcceptance::Unusable => {
                debug!("No usable path for enemy {}", result.ticket.owner);
            }
            PathAcceptance::Stale => {
                debug!(
                    "Dropping stale path (generation {}, current {}) for enemy {}",
                    result.ticket.generation,
                    follower.generation(),
                    result.ticket.owner
                );
            }
        }
    }
}

/// Turn plain melee strikes into open attack windows and damage.
pub fn resolve_enemy_attacks(
    mut attacks: EventReader<EnemyAttackEvent>,
    mut attackers: Query<
        (&EnemyStats, &mut CombatState, &mut SpriteAnimation),
        (Without<Dead>, Without<PatternAttacks>),
    >,
    mut damage_events: EventWriter<DamageEvent>,
) {
    for attack in attacks.read() {
        let Ok((stats, mut combat, mut animation)) = attackers.get_mut(attack.attacker) else {
            continue;
        };
        if !combat.can_attack {
            continue;
        }

        combat.begin_attack(stats.attack_duration, stats.attack_cooldown);
        animation.play(AnimationClip::Attack, None);
        damage_events.send(DamageEvent {
            target: attack.target,
            source: attack.attacker,
            amount: attack.damage,
        });
    }
}

/// Handle enemy death transition.
pub fn handle_enemy_death(
    mut commands: Commands,
    mut enemy_query: Query<
        (
            Entity,
            &mut AiState,
            &mut PathFollower,
            &mut SpriteAnimation,
            Option<&mut Velocity>,
        ),
        (With<Enemy>, Added<Dead>),
    >,
) {
    for (entity, mut ai_state, mut path, mut animation, velocity) in enemy_query.iter_mut() {
        *ai_state = AiState::Idle;
        path.clear();
        animation.clip = AnimationClip::Death;
        if let Some(mut velocity) = velocity {
            *velocity = Velocity::zero();
        }
        commands.entity(entity).insert(DeathTimer::default());
    }
}

/// Despawn enemies after death animation completes.
pub fn despawn_dead_enemies(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut DeathTimer)>,
) {
    for (entity, mut death_timer) in query.iter_mut() {
        death_timer.0.tick(time.delta());

        if death_timer.0.finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}
