//! Game layout and tuning
//!
//! Every field has a default matching the classic layout, so a JSON file only
//! needs to list the values it overrides.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Drawing surface dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleConfig {
    pub width: f32,
    pub height: f32,
    /// Distance from the paddle's bottom edge to the canvas bottom
    pub bottom_margin: f32,
    /// Horizontal pixels per frame while a movement key is held
    pub speed: f32,
    pub color: String,
}

impl Default for PaddleConfig {
    fn default() -> Self {
        Self {
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            bottom_margin: PADDLE_BOTTOM_MARGIN,
            speed: PADDLE_SPEED,
            color: DARK_PURPLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    /// Radius, also used as the half-extent of the ball's bounding box
    pub size: f32,
    /// Per-axis speed in pixels per frame
    pub speed: f32,
    pub color: String,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            size: BALL_SIZE,
            speed: BALL_SPEED,
            color: DARK_PURPLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickConfig {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    /// Row index drives horizontal placement
    pub rows: usize,
    /// Column index drives vertical placement
    pub columns: usize,
    pub color: String,
}

impl Default for BrickConfig {
    fn default() -> Self {
        Self {
            width: BRICK_WIDTH,
            height: BRICK_HEIGHT,
            padding: BRICK_PADDING,
            offset_x: BRICK_OFFSET_X,
            offset_y: BRICK_OFFSET_Y,
            rows: BRICK_ROW_COUNT,
            columns: BRICK_COLUMN_COUNT,
            color: BUMBLEBEE_YELLOW.to_string(),
        }
    }
}

impl BrickConfig {
    /// Right edge of the last row of bricks
    pub fn layout_right(&self) -> f32 {
        self.offset_x + self.rows as f32 * (self.width + self.padding) - self.padding
    }

    /// Bottom edge of the last column of bricks
    pub fn layout_bottom(&self) -> f32 {
        self.offset_y + self.columns as f32 * (self.height + self.padding) - self.padding
    }
}

/// HUD text styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    pub font: String,
    pub color: String,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            font: HUD_FONT.to_string(),
            color: DARK_PURPLE.to_string(),
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas: CanvasConfig,
    pub paddle: PaddleConfig,
    pub ball: BallConfig,
    pub bricks: BrickConfig,
    pub hud: HudConfig,
    pub starting_lives: u32,
    /// Start a new match as soon as the session is (re)launched
    pub auto_start: bool,
    /// Accept "ArrowLeft"/"ArrowRight" on key press, not only on release
    pub arrow_keys_on_press: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            paddle: PaddleConfig::default(),
            ball: BallConfig::default(),
            bricks: BrickConfig::default(),
            hud: HudConfig::default(),
            starting_lives: STARTING_LIVES,
            auto_start: true,
            arrow_keys_on_press: false,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("parse JSON: {e}"))
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        Self::from_json_str(&data)
    }

    /// Falls back to defaults when the file is missing or malformed,
    /// returning the reason alongside.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Total number of bricks in the grid, `None` if it overflows `usize`
    pub fn brick_count(&self) -> Option<usize> {
        self.bricks.rows.checked_mul(self.bricks.columns)
    }

    /// Validate the configuration returning human-readable warnings.
    /// None of these are fatal; callers log them with `warn!`.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        let canvas = &self.canvas;
        if canvas.width <= 0.0 || canvas.height <= 0.0 {
            w.push("canvas dimensions must be > 0".into());
        }

        if self.paddle.width <= 0.0 || self.paddle.height <= 0.0 {
            w.push("paddle dimensions must be > 0".into());
        }
        if self.paddle.width > canvas.width {
            w.push(format!(
                "paddle.width {} wider than canvas {}; clamping pins it to x=0",
                self.paddle.width, canvas.width
            ));
        }
        if self.paddle.speed <= 0.0 {
            w.push(format!("paddle.speed {} must be > 0", self.paddle.speed));
        }
        if self.paddle.bottom_margin + self.paddle.height > canvas.height {
            w.push("paddle sits above the top of the canvas".into());
        }

        if self.ball.size <= 0.0 {
            w.push(format!("ball.size {} must be > 0", self.ball.size));
        }
        if self.ball.speed <= 0.0 {
            w.push(format!("ball.speed {} must be > 0", self.ball.speed));
        }
        if self.ball.speed >= self.ball.size * 2.0 {
            w.push(format!(
                "ball.speed {} >= ball diameter {}; the ball may tunnel through bricks",
                self.ball.speed,
                self.ball.size * 2.0
            ));
        }

        let bricks = &self.bricks;
        match self.brick_count() {
            Some(n) if n > MAX_BRICKS => w.push(format!(
                "brick grid {}x{} has {} bricks, more than {}",
                bricks.rows, bricks.columns, n, MAX_BRICKS
            )),
            None => w.push(format!(
                "brick grid {}x{} overflows the brick count",
                bricks.rows, bricks.columns
            )),
            _ => {}
        }
        if bricks.rows == 0 || bricks.columns == 0 {
            w.push("brick grid is empty; rollover never triggers".into());
        } else {
            if bricks.layout_right() > canvas.width {
                w.push(format!(
                    "brick grid right edge {} exceeds canvas width {}",
                    bricks.layout_right(),
                    canvas.width
                ));
            }
            if bricks.layout_bottom() > canvas.height - self.paddle.bottom_margin {
                w.push(format!(
                    "brick grid bottom edge {} overlaps the paddle lane",
                    bricks.layout_bottom()
                ));
            }
        }
        if bricks.width <= self.ball.size * 2.0 {
            w.push(format!(
                "bricks.width {} not wider than the ball; bricks can never be struck",
                bricks.width
            ));
        }

        if self.starting_lives == 0 {
            w.push("starting_lives is 0; the first miss ends the game".into());
        }

        for (name, color) in [
            ("paddle.color", &self.paddle.color),
            ("ball.color", &self.ball.color),
            ("bricks.color", &self.bricks.color),
            ("hud.color", &self.hud.color),
        ] {
            if color.trim().is_empty() {
                w.push(format!("{name} is empty"));
            }
        }
        w
    }
}
