//! Timestamp bookkeeping for throttles and cooldowns.
//!
//! Both helpers compare against the engine's elapsed time in seconds; there is
//! no scheduler behind them.

use std::collections::HashMap;
use std::hash::Hash;

/// Fires when strictly more than `interval` seconds have passed since the last fire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Throttle {
    interval: f64,
    last: f64,
}

impl Throttle {
    pub fn new(interval: f64) -> Self {
        Self { interval, last: 0.0 }
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Timestamp of the last fire (0 until the first one).
    pub fn last(&self) -> f64 {
        self.last
    }

    pub fn elapsed(&self, now: f64) -> bool {
        now - self.last > self.interval
    }

    /// Record a fire at `now` if the interval has elapsed.
    pub fn try_fire(&mut self, now: f64) -> bool {
        if self.elapsed(now) {
            self.last = now;
            true
        } else {
            false
        }
    }

    /// Record a fire at `now` unconditionally.
    pub fn mark(&mut self, now: f64) {
        self.last = now;
    }
}

/// Independent per-key cooldowns.
#[derive(Debug, Clone)]
pub struct Cooldowns<K> {
    last_used: HashMap<K, f64>,
}

impl<K> Default for Cooldowns<K> {
    fn default() -> Self {
        Self {
            last_used: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> Cooldowns<K> {
    /// A key that was never used is always ready.
    pub fn is_ready(&self, key: &K, cooldown: f64, now: f64) -> bool {
        self.last_used
            .get(key)
            .map_or(true, |last| now - last >= cooldown)
    }

    pub fn mark_used(&mut self, key: K, now: f64) {
        self.last_used.insert(key, now);
    }

    pub fn last_used(&self, key: &K) -> Option<f64> {
        self.last_used.get(key).copied()
    }
}
