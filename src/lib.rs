//! Bouncing Particles - elastic circles on a 2D canvas
//!
//! Core modules:
//! - `sim`: Particle physics (collisions, pointer highlight, world seeding)
//! - `renderer`: Drawing surface abstraction (HTML canvas, recording)
//! - `config`: Simulation constants, loadable from LocalStorage
//! - `error`: Configuration errors

pub mod config;
pub mod error;
pub mod renderer;
pub mod sim;

pub use config::SimConfig;
pub use error::ConfigError;

use glam::Vec2;
use rand::Rng;

/// Default simulation constants
pub mod consts {
    /// Particles seeded per (re)initialization
    pub const PARTICLE_COUNT: usize = 100;
    /// Upper bound accepted from a stored config
    pub const MAX_PARTICLE_COUNT: usize = 2000;
    /// Particle radius range (inclusive, whole pixels)
    pub const RADIUS_MIN: i32 = 20;
    pub const RADIUS_MAX: i32 = 50;
    /// Initial velocity components are whole numbers in [-MAX, MAX]
    pub const MAX_INITIAL_SPEED: i32 = 1;
    /// Every particle has the same mass
    pub const PARTICLE_MASS: f32 = 1.0;
    /// Opacity change per frame while the pointer is (or isn't) over a particle
    pub const OPACITY_STEP: f32 = 0.5;
    /// Position draws per particle before seeding gives up
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    let d = b - a;
    (d.x * d.x + d.y * d.y).sqrt()
}

/// Rotate a vector counter-clockwise by `angle` radians
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Uniform integer in `[min, max]` (inclusive). Returns `min` for an empty range.
pub fn random_int_in_range<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    if max < min {
        return min;
    }
    rng.random_range(min..=max)
}
