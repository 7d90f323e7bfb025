//! Particle-particle collision detection and elastic response
//!
//! Collisions are resolved in a frame rotated so the x-axis runs through both
//! centres. Along that axis the problem is a 1D elastic collision; the
//! tangential components pass through untouched.

use glam::Vec2;

use super::particle::Particle;
use crate::{distance, rotate};

/// True if the two circles interpenetrate (touching does not count)
#[inline]
pub fn overlaps(a: &Particle, b: &Particle) -> bool {
    distance(a.pos, b.pos) - a.radius() - b.radius() < 0.0
}

/// Post-collision velocities for two bodies, or `None` if they are already
/// moving apart along the line between their centres.
pub fn elastic_velocities(
    p1: Vec2,
    u1: Vec2,
    m1: f32,
    p2: Vec2,
    u2: Vec2,
    m2: f32,
) -> Option<(Vec2, Vec2)> {
    let offset = p2 - p1;
    if (u1 - u2).dot(offset) < 0.0 {
        return None;
    }

    let angle = -offset.y.atan2(offset.x);
    let r1 = rotate(u1, angle);
    let r2 = rotate(u2, angle);

    let total = m1 + m2;
    let v1 = Vec2::new(r1.x * (m1 - m2) / total + r2.x * 2.0 * m2 / total, r1.y);
    let v2 = Vec2::new(r2.x * (m2 - m1) / total + r1.x * 2.0 * m2 / total, r2.y);

    Some((rotate(v1, -angle), rotate(v2, -angle)))
}

/// Resolve a collision in place. Returns false (and leaves both velocities
/// alone) when the particles are separating.
pub fn resolve_collision(a: &mut Particle, b: &mut Particle) -> bool {
    match elastic_velocities(a.pos, a.vel, a.mass(), b.pos, b.vel, b.mass()) {
        Some((va, vb)) => {
            a.vel = va;
            b.vel = vb;
            true
        }
        None => false,
    }
}
