//! Brick Breaker - A canvas arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, per-frame step)
//! - `input`: Keyboard/pointer mapping onto the paddle
//! - `renderer`: Drawing onto a 2D surface (HTML canvas or recording)
//! - `game`: Session lifecycle driving the frame loop
//! - `config`: Data-driven game layout and tuning

pub mod autopilot;
pub mod config;
pub mod game;
pub mod input;
pub mod renderer;
pub mod sim;

pub use config::GameConfig;
pub use game::{FrameScheduler, GameOverHandler, GameSession};

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Gap between paddle bottom and canvas bottom
    pub const PADDLE_BOTTOM_MARGIN: f32 = 30.0;
    pub const PADDLE_SPEED: f32 = 5.0;

    /// Ball defaults (size is the radius)
    pub const BALL_SIZE: f32 = 10.0;
    pub const BALL_SPEED: f32 = 4.0;

    /// Brick grid layout
    pub const BRICK_WIDTH: f32 = 70.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_OFFSET_X: f32 = 45.0;
    pub const BRICK_OFFSET_Y: f32 = 60.0;
    pub const BRICK_ROW_COUNT: usize = 9;
    pub const BRICK_COLUMN_COUNT: usize = 5;
    /// Largest grid a config may ask for
    pub const MAX_BRICKS: usize = 10_000;

    pub const STARTING_LIVES: u32 = 3;

    /// Palette
    pub const DARK_PURPLE: &str = "#301934";
    pub const BUMBLEBEE_YELLOW: &str = "#FFD700";

    /// HUD text
    pub const HUD_FONT: &str = "20px Arial";
    /// Score anchor is measured back from the right edge
    pub const HUD_SCORE_INSET_X: f32 = 100.0;
    pub const HUD_LIVES_X: f32 = 20.0;
    pub const HUD_BASELINE_Y: f32 = 30.0;
}
