//! Combat-related components.

use bevy::prelude::*;

// Re-export from core to avoid duplication
pub use crate::core::{DamageEvent, DeathEvent};

/// Component for entities that can take damage.
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: f32,
    pub maximum: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            maximum: max,
        }
    }

    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.max(0.0).min(self.current);
        self.current -= actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    /// Remaining health in the 0..=100 range used by boss phase thresholds.
    pub fn percentage(&self) -> f32 {
        if self.maximum <= 0.0 {
            return 0.0;
        }
        self.current * 100.0 / self.maximum
    }
}

/// Attack and movement flags for an entity (player or enemy).
///
/// `is_attacking` excludes movement: while it is set the chase controller
/// writes no velocity and does not advance its path.
#[derive(Component, Debug, Clone)]
pub struct CombatState {
    /// Attack cooldown has elapsed and no attack is in progress
    pub can_attack: bool,
    /// Currently inside an attack window
    pub is_attacking: bool,
    /// Movement allowed at all (stuns, cutscenes)
    pub can_move: bool,
    /// Seconds left in the current attack window
    pub attack_window: f32,
    /// Seconds left before another attack may start
    pub cooldown: f32,
}

impl Default for CombatState {
    fn default() -> Self {
        Self {
            can_attack: true,
            is_attacking: false,
            can_move: true,
            attack_window: 0.0,
            cooldown: 0.0,
        }
    }
}

impl CombatState {
    /// Open an attack window lasting `window` seconds, followed by `cooldown`
    /// seconds (counted from now) before the next attack.
    pub fn begin_attack(&mut self, window: f32, cooldown: f32) {
        self.is_attacking = true;
        self.can_attack = false;
        self.attack_window = window.max(0.0);
        self.cooldown = cooldown.max(self.attack_window);
    }

    /// Advance timers, closing the attack window and re-arming the attack.
    pub fn tick(&mut self, delta: f32) {
        if self.is_attacking {
            self.attack_window -= delta;
            if self.attack_window <= 0.0 {
                self.attack_window = 0.0;
                self.is_attacking = false;
            }
        }

        if self.cooldown > 0.0 {
            self.cooldown = (self.cooldown - delta).max(0.0);
        }

        self.can_attack = !self.is_attacking && self.cooldown <= 0.0;
    }
}

/// Circular melee hit zone around an entity's position.
#[derive(Component, Debug, Clone, Copy)]
pub struct HitZone {
    pub radius: f32,
}

/// Multipliers applied on top of base stats (boss phases write these).
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct StatModifiers {
    pub speed: f32,
    pub defense: f32,
    pub damage: f32,
}

impl Default for StatModifiers {
    fn default() -> Self {
        Self {
            speed: 1.0,
            defense: 1.0,
            damage: 1.0,
        }
    }
}

impl StatModifiers {
    /// Damage actually taken after the defense multiplier.
    pub fn mitigate(&self, amount: f32) -> f32 {
        if self.defense <= 0.0 {
            return amount;
        }
        amount / self.defense
    }
}

/// Marker component for entities that have died (prevents multiple death events).
#[derive(Component)]
pub struct Dead;
