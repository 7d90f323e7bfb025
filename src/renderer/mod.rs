//! Drawing surface abstraction
//!
//! The simulation only ever clears the surface and strokes or fills circles,
//! so any backend that can do those three things can host it.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 8-bit RGB colour with a floating point alpha channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same colour, different alpha
    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Parse `#RRGGBB` (leading `#` optional) into an opaque colour
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::opaque(channel(0)?, channel(2)?, channel(4)?))
    }

    /// CSS `rgba(...)` string for canvas fill/stroke styles
    pub fn to_css(&self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

/// A 2D target the simulation draws into each frame
pub trait Surface {
    /// Clear the rectangle from the origin to `(width, height)`
    fn clear(&mut self, width: f32, height: f32);
    /// Outline a circle
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    /// Fill a circle
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
}
