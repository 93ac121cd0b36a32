//! Authoring errors for boss definitions.

use thiserror::Error;

/// A rule a boss definition breaks. Validation reports every one it finds.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BossDataError {
    #[error("boss has no phases")]
    NoPhases,

    #[error("first phase threshold is {0}, expected 100")]
    FirstThreshold(f32),

    #[error("phase {index} threshold {threshold} is above the previous threshold {previous}")]
    ThresholdIncreases {
        index: usize,
        threshold: f32,
        previous: f32,
    },

    #[error("phase {0} has no attacks")]
    NoAttacks(usize),

    #[error("base health must be positive, got {0}")]
    NonPositiveHealth(f32),

    #[error("{field} must not be negative, got {value}")]
    Negative { field: String, value: f32 },
}
