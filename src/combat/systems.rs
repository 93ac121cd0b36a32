//! Combat systems - attack windows, damage, and deaths.

use bevy::prelude::*;

use super::components::*;
use crate::core::GameState;
use crate::player::Player;

/// System set ordering for combat.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CombatSet {
    /// Attack windows and cooldowns advance
    Timers,
    /// Attack events become damage events
    Resolve,
    /// Damage is applied and deaths are reported
    Damage,
}

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app.configure_sets(
        Update,
        (CombatSet::Timers, CombatSet::Resolve, CombatSet::Damage)
            .chain()
            .run_if(in_state(GameState::InGame)),
    )
    .add_systems(Update, tick_combat_states.in_set(CombatSet::Timers))
    .add_systems(Update, (apply_damage, check_deaths).chain().in_set(CombatSet::Damage));
}

/// Advance attack windows and cooldowns.
fn tick_combat_states(time: Res<Time>, mut query: Query<&mut CombatState, Without<Dead>>) {
    for mut combat in query.iter_mut() {
        combat.tick(time.delta_secs());
    }
}

/// Apply damage to entities.
fn apply_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageEvent>,
    mut health_query: Query<(&mut Health, Option<&StatModifiers>, Option<&Dead>)>,
    mut death_events: EventWriter<DeathEvent>,
) {
    // Track entities that died this frame to avoid duplicate death events
    let mut died_this_frame = std::collections::HashSet::new();

    for event in damage_events.read() {
        if died_this_frame.contains(&event.target) {
            continue;
        }

        let Ok((mut health, modifiers, dead)) = health_query.get_mut(event.target) else {
            continue;
        };

        // Skip if already dead (from previous frames)
        if dead.is_some() {
            continue;
        }

        let amount = modifiers.map_or(event.amount, |m| m.mitigate(event.amount));
        health.take_damage(amount);

        if health.is_dead() {
            died_this_frame.insert(event.target);
            commands.entity(event.target).insert(Dead);
            death_events.send(DeathEvent {
                entity: event.target,
                killed_by: Some(event.source),
            });
        }
    }
}

/// End the run when the player dies.
fn check_deaths(
    mut death_events: EventReader<DeathEvent>,
    player_query: Query<Entity, With<Player>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for event in death_events.read() {
        if player_query.get(event.entity).is_ok() {
            info!("Player died! Transitioning to Game Over...");
            next_state.set(GameState::GameOver);
        }
    }
}
