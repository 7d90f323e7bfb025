//! Configuration error types.

use thiserror::Error;

/// Errors raised while loading or validating a [`SimConfig`](crate::SimConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Radius range is empty or includes non-positive radii.
    #[error("invalid radius range: {min}..={max}")]
    InvalidRadiusRange { min: i32, max: i32 },

    /// Collision math divides by the combined mass.
    #[error("particle mass must be positive, got {0}")]
    NonPositiveMass(f32),

    /// Opacity step must be in (0, 1].
    #[error("opacity step must be in (0, 1], got {0}")]
    InvalidOpacityStep(f32),

    /// More particles than a frame can afford.
    #[error("particle count {count} exceeds the limit of {max}")]
    TooManyParticles { count: usize, max: usize },

    /// Initial speed must not be negative.
    #[error("max initial speed must not be negative, got {0}")]
    NegativeSpeed(i32),

    /// Stored config is not valid JSON.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
