//! Simulation configuration
//!
//! Defaults reproduce the classic demo. In the browser an override can be
//! stored as JSON in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::renderer::Rgba;

/// Colours of the classic palette
pub const DEFAULT_PALETTE: [&str; 4] = ["#2185C5", "#7ECEFD", "#FFF6E5", "#FF7F66"];

/// Simulation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Particles seeded on every (re)initialization
    pub particle_count: usize,
    /// Smallest radius (pixels)
    pub radius_min: i32,
    /// Largest radius (pixels)
    pub radius_max: i32,
    /// Velocity components start as whole numbers in [-n, n]
    pub max_initial_speed: i32,
    /// Mass shared by every particle
    pub mass: f32,
    /// Opacity change per frame under / away from the pointer
    pub opacity_step: f32,
    /// Position draws per particle before seeding stops early
    pub max_placement_attempts: u32,
    /// Pick colours from this list; random RGB when empty
    pub palette: Vec<Rgba>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            radius_min: RADIUS_MIN,
            radius_max: RADIUS_MAX,
            max_initial_speed: MAX_INITIAL_SPEED,
            mass: PARTICLE_MASS,
            opacity_step: OPACITY_STEP,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
            palette: Vec::new(),
        }
    }
}

impl SimConfig {
    /// Use the classic four-colour palette instead of random colours
    pub fn with_default_palette(mut self) -> Self {
        self.palette = DEFAULT_PALETTE
            .iter()
            .filter_map(|hex| Rgba::from_hex(hex))
            .collect();
        self
    }

    /// Check the values the physics relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count > MAX_PARTICLE_COUNT {
            return Err(ConfigError::TooManyParticles {
                count: self.particle_count,
                max: MAX_PARTICLE_COUNT,
            });
        }
        if self.radius_min <= 0 || self.radius_max < self.radius_min {
            return Err(ConfigError::InvalidRadiusRange {
                min: self.radius_min,
                max: self.radius_max,
            });
        }
        if self.mass.is_nan() || self.mass <= 0.0 {
            return Err(ConfigError::NonPositiveMass(self.mass));
        }
        let step = self.opacity_step;
        if step.is_nan() || step <= 0.0 || step > 1.0 {
            return Err(ConfigError::InvalidOpacityStep(self.opacity_step));
        }
        if self.max_initial_speed < 0 {
            return Err(ConfigError::NegativeSpeed(self.max_initial_speed));
        }
        Ok(())
    }

    /// Parse and validate a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "bouncing_particles_config";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
