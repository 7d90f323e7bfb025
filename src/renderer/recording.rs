//! Headless surface that records draw calls

use glam::Vec2;
use serde::Serialize;

use super::{Rgba, Surface};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear { width: f32, height: f32 },
    Stroke { center: Vec2, radius: f32, color: Rgba },
    Fill { center: Vec2, radius: f32, color: Rgba },
}

/// Keeps the draw calls issued since the last clear
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill calls recorded since the last clear
    pub fn fills(&self) -> impl Iterator<Item = (Vec2, f32, Rgba)> + '_ {
        self.commands.iter().filter_map(|c| match *c {
            DrawCommand::Fill { center, radius, color } => Some((center, radius, color)),
            _ => None,
        })
    }

    /// Stroke calls recorded since the last clear
    pub fn strokes(&self) -> impl Iterator<Item = (Vec2, f32, Rgba)> + '_ {
        self.commands.iter().filter_map(|c| match *c {
            DrawCommand::Stroke { center, radius, color } => Some((center, radius, color)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, width: f32, height: f32) {
        // Anything drawn before a full clear is gone from the canvas too
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Stroke { center, radius, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Fill { center, radius, color });
    }
}
