//! The particle entity and its per-frame update

use glam::Vec2;
use serde::Serialize;

use super::collision::{overlaps, resolve_collision};
use crate::distance;
use crate::renderer::{Rgba, Surface};

/// Read-only inputs shared by every particle during one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    /// Pointer position in surface coordinates
    pub pointer: Vec2,
    /// Surface size
    pub width: f32,
    pub height: f32,
    /// Opacity change per frame
    pub opacity_step: f32,
}

/// What happened to one particle during its update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParticleStep {
    /// Peers whose collision with this particle was resolved
    pub resolved: u32,
    /// Pointer was over the particle
    pub highlighted: bool,
}

/// A bouncing circle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Fill opacity, 0 (outline only) to 1
    pub opacity: f32,
    pub color: Rgba,
    radius: f32,
    mass: f32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, mass: f32, color: Rgba) -> Self {
        Self {
            pos,
            vel,
            opacity: 0.0,
            color,
            radius,
            mass,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Outline the particle. Filling only happens in [`Particle::update`].
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.stroke_circle(self.pos, self.radius, self.color);
    }

    /// Advance one frame: draw, collide with every peer, react to the
    /// pointer, move, then bounce off the surface edges.
    ///
    /// `peers` is every other particle in collection order.
    pub fn update<'a, S, I>(&mut self, peers: I, ctx: &FrameContext, surface: &mut S) -> ParticleStep
    where
        S: Surface + ?Sized,
        I: IntoIterator<Item = &'a mut Particle>,
    {
        self.draw(surface);

        let mut resolved = 0;
        for peer in peers {
            if overlaps(self, peer) && resolve_collision(self, peer) {
                resolved += 1;
            }
        }

        let highlighted = self.track_pointer(ctx.pointer, ctx.opacity_step);
        surface.fill_circle(self.pos, self.radius, self.color.with_alpha(self.opacity));

        self.pos += self.vel;
        self.bounce(ctx.width, ctx.height);

        ParticleStep {
            resolved,
            highlighted,
        }
    }

    /// Fade in while the pointer is inside the circle, fade out otherwise.
    /// Returns whether the pointer is inside.
    pub fn track_pointer(&mut self, pointer: Vec2, step: f32) -> bool {
        let inside = distance(self.pos, pointer) - self.radius < 0.0;
        self.opacity = if inside {
            (self.opacity + step).min(1.0)
        } else {
            (self.opacity - step).max(0.0)
        };
        inside
    }

    /// Reverse velocity components whose edge the circle has crossed
    pub fn bounce(&mut self, width: f32, height: f32) {
        if self.pos.x + self.radius > width || self.pos.x - self.radius < 0.0 {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y + self.radius > height || self.pos.y - self.radius < 0.0 {
            self.vel.y = -self.vel.y;
        }
    }
}
