//! Simulation world: owns the particles, seeds them, drives each frame

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::particle::{FrameContext, Particle};
use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::renderer::{Rgba, Surface};
use crate::{distance, random_int_in_range};

/// Counters for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    /// Collision resolutions applied (a pair can count twice)
    pub resolved: u32,
    /// Particles under the pointer
    pub highlighted: u32,
}

/// All simulation state. Created once at startup, re-seeded on resize.
#[derive(Debug, Clone)]
pub struct World {
    pub config: SimConfig,
    pub width: f32,
    pub height: f32,
    /// Last known pointer position
    pub pointer: Vec2,
    /// Stable iteration order; replaced wholesale by [`World::initialize`]
    pub particles: Vec<Particle>,
    /// Frames run since creation
    pub frame_count: u64,
    rng: Pcg32,
}

impl World {
    /// Validate `config`, then seed a world of the given size.
    pub fn new(config: SimConfig, width: f32, height: f32, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut world = Self {
            config,
            width,
            height,
            pointer: Vec2::new(width / 2.0, height / 2.0),
            particles: Vec::new(),
            frame_count: 0,
            rng: Pcg32::seed_from_u64(seed),
        };
        world.initialize();
        Ok(world)
    }

    /// Replace every particle with a fresh, non-overlapping set.
    ///
    /// Returns how many were placed. That is fewer than
    /// `config.particle_count` when the surface is too crowded or too small.
    pub fn initialize(&mut self) -> usize {
        self.particles.clear();
        let target = self.config.particle_count;
        self.particles.reserve(target);

        for _ in 0..target {
            let radius = random_int_in_range(&mut self.rng, self.config.radius_min, self.config.radius_max);
            let color = self.random_color();
            let Some(pos) = self.place(radius) else {
                log::warn!(
                    "Could not place particle {} of {} (radius {}) on {}x{} surface; continuing with fewer",
                    self.particles.len() + 1,
                    target,
                    radius,
                    self.width,
                    self.height
                );
                break;
            };
            let speed = self.config.max_initial_speed;
            let vel = Vec2::new(
                random_int_in_range(&mut self.rng, -speed, speed) as f32,
                random_int_in_range(&mut self.rng, -speed, speed) as f32,
            );
            self.particles
                .push(Particle::new(pos, vel, radius as f32, self.config.mass, color));
        }

        log::info!(
            "Seeded {} particles on {}x{} surface",
            self.particles.len(),
            self.width,
            self.height
        );
        self.particles.len()
    }

    /// Surface changed size: everything is re-seeded.
    pub fn on_resize(&mut self, width: f32, height: f32) {
        log::debug!("Resize {}x{} -> {}x{}", self.width, self.height, width, height);
        self.width = width;
        self.height = height;
        self.initialize();
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
    }

    /// Clear the surface and update every particle in collection order.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> FrameStats {
        surface.clear(self.width, self.height);

        let ctx = FrameContext {
            pointer: self.pointer,
            width: self.width,
            height: self.height,
            opacity_step: self.config.opacity_step,
        };

        let mut stats = FrameStats::default();
        for i in 0..self.particles.len() {
            let (before, rest) = self.particles.split_at_mut(i);
            let Some((particle, after)) = rest.split_first_mut() else {
                break;
            };
            let step = particle.update(before.iter_mut().chain(after.iter_mut()), &ctx, surface);
            stats.resolved += step.resolved;
            stats.highlighted += u32::from(step.highlighted);
        }

        self.frame_count += 1;
        log::trace!("Frame {}: {:?}", self.frame_count, stats);
        stats
    }

    /// Draw positions until one is clear of every placed particle, giving up
    /// after `config.max_placement_attempts` draws.
    fn place(&mut self, radius: i32) -> Option<Vec2> {
        let r = radius as f32;
        for _ in 0..self.config.max_placement_attempts {
            let pos = self.random_position(radius)?;
            let clear = self
                .particles
                .iter()
                .all(|p| distance(pos, p.pos) - r - p.radius() >= 0.0);
            if clear {
                return Some(pos);
            }
        }
        None
    }

    /// Whole-pixel position keeping the full circle on the surface, or
    /// `None` if the circle is wider or taller than the surface.
    fn random_position(&mut self, radius: i32) -> Option<Vec2> {
        let max_x = self.width.floor() as i32 - radius;
        let max_y = self.height.floor() as i32 - radius;
        if max_x < radius || max_y < radius {
            return None;
        }
        Some(Vec2::new(
            random_int_in_range(&mut self.rng, radius, max_x) as f32,
            random_int_in_range(&mut self.rng, radius, max_y) as f32,
        ))
    }

    fn random_color(&mut self) -> Rgba {
        if self.config.palette.is_empty() {
            Rgba::opaque(self.rng.random(), self.rng.random(), self.rng.random())
        } else {
            let i = self.rng.random_range(0..self.config.palette.len());
            self.config.palette[i].with_alpha(1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, RecordingSurface};
    use crate::sim::collision::overlaps;

    fn empty_world(width: f32, height: f32) -> World {
        let config = SimConfig {
            particle_count: 0,
            ..Default::default()
        };
        World::new(config, width, height, 1).unwrap()
    }

    fn assert_valid_layout(world: &World) {
        for (i, a) in world.particles.iter().enumerate() {
            assert!(a.pos.x - a.radius() >= 0.0 && a.pos.x + a.radius() <= world.width);
            assert!(a.pos.y - a.radius() >= 0.0 && a.pos.y + a.radius() <= world.height);
            for b in &world.particles[i + 1..] {
                assert!(!overlaps(a, b), "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_initialize_places_all_without_overlap() {
        let world = World::new(SimConfig::default(), 1920.0, 1080.0, 42).unwrap();
        assert_eq!(world.particles.len(), 100);
        assert_valid_layout(&world);

        for p in &world.particles {
            assert!((20.0..=50.0).contains(&p.radius()));
            assert_eq!(p.radius().fract(), 0.0);
            assert_eq!(p.mass(), 1.0);
            assert_eq!(p.opacity, 0.0);
            assert_eq!(p.color.a, 1.0);
            assert!(p.vel.x.abs() <= 1.0 && p.vel.y.abs() <= 1.0);
        }
    }

    #[test]
    fn test_pointer_starts_centred() {
        let world = empty_world(800.0, 600.0);
        assert_eq!(world.pointer, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_same_seed_same_world() {
        let a = World::new(SimConfig::default(), 1920.0, 1080.0, 7).unwrap();
        let b = World::new(SimConfig::default(), 1920.0, 1080.0, 7).unwrap();
        assert_eq!(a.particles, b.particles);
    }

    #[test]
    fn test_resize_reseeds_within_new_bounds() {
        let mut world = World::new(SimConfig::default(), 1920.0, 1080.0, 3).unwrap();
        world.on_resize(1600.0, 1000.0);
        assert_eq!((world.width, world.height), (1600.0, 1000.0));
        assert_eq!(world.particles.len(), 100);
        assert_valid_layout(&world);
    }

    #[test]
    fn test_crowded_surface_degrades() {
        let config = SimConfig {
            max_placement_attempts: 50,
            ..Default::default()
        };
        let world = World::new(config, 100.0, 100.0, 5).unwrap();
        assert!(!world.particles.is_empty());
        assert!(world.particles.len() < 100);
        assert_valid_layout(&world);
    }

    #[test]
    fn test_surface_smaller_than_particle() {
        let world = World::new(SimConfig::default(), 30.0, 30.0, 5).unwrap();
        assert!(world.particles.is_empty());
    }

    #[test]
    fn test_palette_colours_used() {
        let config = SimConfig {
            particle_count: 20,
            ..Default::default()
        }
        .with_default_palette();
        let palette = config.palette.clone();
        let world = World::new(config, 1920.0, 1080.0, 9).unwrap();
        assert!(world.particles.iter().all(|p| palette.contains(&p.color)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimConfig {
            mass: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            World::new(config, 800.0, 600.0, 1),
            Err(ConfigError::NonPositiveMass(_))
        ));
    }

    #[test]
    fn test_frame_clears_then_draws_each_particle() {
        let mut world = World::new(SimConfig::default(), 1920.0, 1080.0, 11).unwrap();
        let mut surface = RecordingSurface::new();
        world.frame(&mut surface);

        assert_eq!(
            surface.commands[0],
            DrawCommand::Clear {
                width: 1920.0,
                height: 1080.0
            }
        );
        assert_eq!(surface.strokes().count(), world.particles.len());
        assert_eq!(surface.fills().count(), world.particles.len());
        assert_eq!(world.frame_count, 1);
    }

    #[test]
    fn test_frame_resolves_approaching_pair_once() {
        let mut world = empty_world(400.0, 300.0);
        let white = Rgba::opaque(255, 255, 255);
        world.particles.push(Particle::new(
            Vec2::new(100.0, 100.0),
            Vec2::new(1.0, 0.0),
            10.0,
            1.0,
            white,
        ));
        world.particles.push(Particle::new(
            Vec2::new(115.0, 100.0),
            Vec2::new(-1.0, 0.0),
            10.0,
            1.0,
            white,
        ));

        let stats = world.frame(&mut RecordingSurface::new());
        // Second particle sees the pair already separating
        assert_eq!(stats.resolved, 1);
        assert_eq!(world.particles[0].vel, Vec2::new(-1.0, 0.0));
        assert_eq!(world.particles[1].vel, Vec2::new(1.0, 0.0));
        assert_eq!(world.particles[0].pos, Vec2::new(99.0, 100.0));
        assert_eq!(world.particles[1].pos, Vec2::new(116.0, 100.0));
    }

    #[test]
    fn test_frame_resolves_pair_from_both_sides() {
        let mut world = empty_world(400.0, 300.0);
        let white = Rgba::opaque(255, 255, 255);
        // Glancing contact: the second particle's tangential speed makes the
        // pair approach again once the first has moved
        world.particles.push(Particle::new(
            Vec2::new(100.0, 100.0),
            Vec2::new(1.0, 8.0),
            10.0,
            1.0,
            white,
        ));
        world.particles.push(Particle::new(
            Vec2::new(115.0, 100.0),
            Vec2::new(-1.0, 16.0),
            10.0,
            1.0,
            white,
        ));

        let stats = world.frame(&mut RecordingSurface::new());
        assert_eq!(stats.resolved, 2);
    }

    #[test]
    fn test_oversized_particle_count_rejected() {
        let config = SimConfig {
            particle_count: usize::MAX,
            ..Default::default()
        };
        assert!(matches!(
            World::new(config, 800.0, 600.0, 1),
            Err(ConfigError::TooManyParticles { .. })
        ));
    }

    #[test]
    fn test_pointer_highlight_through_frames() {
        let mut world = empty_world(400.0, 300.0);
        world.particles.push(Particle::new(
            Vec2::new(200.0, 200.0),
            Vec2::ZERO,
            25.0,
            1.0,
            Rgba::opaque(10, 20, 30),
        ));
        world.on_pointer_move(200.0, 200.0);

        let stats = world.frame(&mut RecordingSurface::new());
        assert_eq!(stats.highlighted, 1);
        assert_eq!(world.particles[0].opacity, 0.5);

        let mut surface = RecordingSurface::new();
        world.frame(&mut surface);
        assert_eq!(world.particles[0].opacity, 1.0);
        assert_eq!(surface.fills().next().unwrap().2.a, 1.0);

        world.on_pointer_move(0.0, 0.0);
        let stats = world.frame(&mut RecordingSurface::new());
        assert_eq!(stats.highlighted, 0);
        assert_eq!(world.particles[0].opacity, 0.5);
    }

    #[test]
    fn test_frames_conserve_kinetic_energy() {
        let mut world = World::new(SimConfig::default(), 1920.0, 1080.0, 13).unwrap();
        let energy = |w: &World| -> f32 { w.particles.iter().map(|p| p.vel.length_squared()).sum() };
        let before = energy(&world);

        let mut surface = RecordingSurface::new();
        for _ in 0..300 {
            world.frame(&mut surface);
        }
        let after = energy(&world);
        assert!((before - after).abs() <= 1e-3 * before.max(1.0), "{} -> {}", before, after);
    }
}
