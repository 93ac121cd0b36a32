//! Boss systems: spawning, phase changes, and attack decisions.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::attacks::AttackPattern;
use super::components::BossBrain;
use super::data::BossRegistry;
use super::phase::{Mechanic, PhaseKind};
use crate::combat::{CombatState, DamageEvent, Dead, Health, HitZone, StatModifiers};
use crate::core::distance;
use crate::enemies::{
    spawn_enemy, AnimationClip, EnemyAttackEvent, EnemyRegistry, EntityKind, PatternAttacks,
    SpawnEnemy, SpriteAnimation,
};

/// Seconds a boss stays committed after the telegraph ends.
const STRIKE_TIME: f32 = 0.3;
/// Minions spawned by one summon attack.
const MINIONS_PER_SUMMON: usize = 2;
/// Distance from the boss at which minions appear.
const SUMMON_OFFSET: f32 = 48.0;

/// Random source for attack selection.
#[derive(Resource)]
pub struct BossRng(pub StdRng);

impl Default for BossRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

/// Request to spawn a boss from its definition name.
#[derive(Event, Debug, Clone)]
pub struct SpawnBoss {
    pub boss: String,
    pub position: Vec2,
}

/// Sent when a boss moves into a later phase.
#[derive(Event, Debug, Clone)]
pub struct BossPhaseChanged {
    pub boss: Entity,
    pub from: PhaseKind,
    pub to: PhaseKind,
    pub index: usize,
}

/// Sent when a boss commits to an attack.
#[derive(Event, Debug, Clone)]
pub struct BossAttackEvent {
    pub boss: Entity,
    pub target: Entity,
    pub pattern: AttackPattern,
    /// Base damage with the phase multiplier applied.
    pub damage: f32,
    pub range: f32,
    pub telegraph: f32,
}

/// Spawn requested bosses on top of their enemy bodies.
pub fn spawn_requested_bosses(
    mut commands: Commands,
    mut requests: EventReader<SpawnBoss>,
    bosses: Res<BossRegistry>,
    enemies: Res<EnemyRegistry>,
) {
    for request in requests.read() {
        let Some(boss) = bosses.get(&request.boss) else {
            warn!("No boss definition named '{}'", request.boss);
            continue;
        };
        let Some(body) = enemies.get(&boss.enemy) else {
            warn!("Boss '{}' uses unknown enemy '{}'", boss.name, boss.enemy);
            continue;
        };

        let brain = BossBrain::new(boss);
        let modifiers = brain
            .active_phase()
            .map(|phase| phase.modifiers())
            .unwrap_or_default();

        let entity = spawn_enemy(&mut commands, body, EntityKind::Boss, request.position);
        commands.entity(entity).insert((
            brain,
            PatternAttacks,
            modifiers,
            Health::new(boss.base_health),
            Name::new(boss.name.clone()),
        ));
        info!("Spawned boss {} as {}", boss.name, entity);
    }
}

/// Advance boss phases from current health.
pub fn update_boss_phases(
    mut query: Query<(Entity, &Health, &mut BossBrain, &mut StatModifiers), Without<Dead>>,
    mut phase_events: EventWriter<BossPhaseChanged>,
) {
    for (entity, health, mut brain, mut modifiers) in query.iter_mut() {
        let Some(transition) = brain.update_phase(health.percentage()) else {
            continue;
        };
        let (Some(from), Some(to)) = (brain.phase(transition.from), brain.phase(transition.to))
        else {
            continue;
        };

        info!(
            "Boss {} entered phase {} ({:?} -> {:?}) at {:.0}% health",
            entity,
            transition.to,
            from.kind,
            to.kind,
            health.percentage()
        );

        *modifiers = to.modifiers();
        phase_events.send(BossPhaseChanged {
            boss: entity,
            from: from.kind,
            to: to.kind,
            index: transition.to,
        });
    }
}

/// Pick a patterned attack whenever a boss's chase brings it into melee.
pub fn decide_boss_attacks(
    time: Res<Time>,
    mut rng: ResMut<BossRng>,
    mut engagements: EventReader<EnemyAttackEvent>,
    mut bosses: Query<
        (&mut BossBrain, &mut CombatState, &mut SpriteAnimation, &StatModifiers),
        Without<Dead>,
    >,
    mut attack_events: EventWriter<BossAttackEvent>,
) {
    let now = time.elapsed_secs_f64();

    for engagement in engagements.read() {
        let Ok((mut brain, mut combat, mut animation, modifiers)) =
            bosses.get_mut(engagement.attacker)
        else {
            continue;
        };
        if !combat.can_attack || !brain.ready_to_decide(now) {
            continue;
        }

        let Some(attack) = brain.choose_attack(now, &mut rng.0) else {
            debug!("Boss {} held back: attack cooling down", engagement.attacker);
            continue;
        };

        combat.begin_attack(attack.telegraph + STRIKE_TIME, 0.0);
        animation.clip = AnimationClip::Attack;
        attack_events.send(BossAttackEvent {
            boss: engagement.attacker,
            target: engagement.target,
            pattern: attack.pattern,
            damage: attack.base_damage * modifiers.damage,
            range: attack.range,
            telegraph: attack.telegraph,
        });
    }
}

/// Land boss attacks: damage in range, minions for summons.
pub fn resolve_boss_attacks(
    mut attacks: EventReader<BossAttackEvent>,
    bosses: Query<(&Transform, &BossBrain)>,
    targets: Query<(&Transform, Option<&HitZone>), Without<Dead>>,
    mut damage_events: EventWriter<DamageEvent>,
    mut spawn_events: EventWriter<SpawnEnemy>,
) {
    for attack in attacks.read() {
        let Ok((boss_transform, brain)) = bosses.get(attack.boss) else {
            continue;
        };
        let origin = boss_transform.translation.truncate();

        if attack.pattern == AttackPattern::Summon {
            let summons = brain
                .active_phase()
                .is_some_and(|phase| phase.has_mechanic(Mechanic::Summons));

            if let Some(config_id) = brain.minion().filter(|_| summons) {
                for slot in 0..MINIONS_PER_SUMMON {
                    let angle = TAU * slot as f32 / MINIONS_PER_SUMMON as f32;
                    spawn_events.send(SpawnEnemy {
                        config_id,
                        position: origin + Vec2::from_angle(angle) * SUMMON_OFFSET,
                    });
                }
            }
            continue;
        }

        let Ok((target_transform, hit_zone)) = targets.get(attack.target) else {
            continue;
        };
        let reach = attack.range + hit_zone.map_or(0.0, |zone| zone.radius);
        if distance(origin, target_transform.translation.truncate()) > reach {
            debug!("Boss {} {:?} missed", attack.boss, attack.pattern);
            continue;
        }

        if attack.damage > 0.0 {
            damage_events.send(DamageEvent {
                target: attack.target,
                source: attack.boss,
                amount: attack.damage,
            });
        }
    }
}
