//! Particle simulation module
//!
//! Everything here is independent of the browser:
//! - Seeded RNG only
//! - Stable iteration order (collection order)
//! - Drawing goes through the `Surface` trait

pub mod collision;
pub mod particle;
pub mod world;

pub use collision::{elastic_velocities, overlaps, resolve_collision};
pub use particle::{FrameContext, Particle, ParticleStep};
pub use world::{FrameStats, World};
