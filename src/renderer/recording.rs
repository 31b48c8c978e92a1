//! Surface that records draw calls instead of drawing

use glam::Vec2;
use serde::Serialize;

use super::{Color, Surface};

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    Clear,
    Circle {
        center: Vec2,
        radius: f32,
        color: String,
    },
    Rect {
        pos: Vec2,
        size: Vec2,
        color: String,
    },
    Text {
        text: String,
        pos: Vec2,
        font: String,
        color: String,
    },
}

/// Collects draw calls for inspection
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
    /// Number of `clear` calls seen, one per rendered frame
    frames: u64,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            frames: 0,
        }
    }

    /// Commands issued since the most recent `clear`
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self) {
        // Only the current frame is worth keeping
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        self.frames += 1;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color<'_>) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color: color.css().to_string(),
        });
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color<'_>) {
        self.commands.push(DrawCommand::Rect {
            pos,
            size,
            color: color.css().to_string(),
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, color: Color<'_>) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            font: font.to_string(),
            color: color.css().to_string(),
        });
    }
}
