//! Game state and core simulation types
//!
//! Everything a running match mutates lives in [`GameState`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::{BallConfig, BrickConfig, CanvasConfig, GameConfig, PaddleConfig};
use crate::consts::MAX_BRICKS;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Loaded, waiting for the start action
    Idle,
    /// Frame loop active
    Running,
    /// Lives exhausted; the session reinitializes from here
    GameOver,
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Horizontal velocity (pixels per frame)
    pub dx: f32,
    pub speed: f32,
    pub color: String,
}

impl Paddle {
    /// Paddle centered horizontally, resting `bottom_margin` above the floor
    pub fn new(cfg: &PaddleConfig, canvas: &CanvasConfig) -> Self {
        Self {
            pos: Vec2::new(
                canvas.width / 2.0 - cfg.width / 2.0,
                canvas.height - cfg.height - cfg.bottom_margin,
            ),
            width: cfg.width,
            height: cfg.height,
            dx: 0.0,
            speed: cfg.speed,
            color: cfg.color.clone(),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    /// Back to the horizontal center, at rest
    pub fn recenter(&mut self, canvas_width: f32) {
        self.pos.x = canvas_width / 2.0 - self.width / 2.0;
        self.dx = 0.0;
    }

    /// Apply velocity and keep the paddle fully on the canvas
    pub fn advance(&mut self, canvas_width: f32) {
        self.pos.x += self.dx;
        if self.pos.x + self.width > canvas_width {
            self.pos.x = canvas_width - self.width;
        }
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
        }
    }
}

/// The ball. `size` is its radius and the half-extent of its bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center
    pub pos: Vec2,
    pub size: f32,
    pub vel: Vec2,
    pub speed: f32,
    pub color: String,
}

impl Ball {
    pub fn new(cfg: &BallConfig, canvas: &CanvasConfig, rng: &mut Pcg32) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            size: cfg.size,
            vel: Vec2::ZERO,
            speed: cfg.speed,
            color: cfg.color.clone(),
        };
        ball.reset(canvas, rng);
        ball
    }

    /// Recenter and serve upward with a coin-flip horizontal direction
    pub fn reset(&mut self, canvas: &CanvasConfig, rng: &mut Pcg32) {
        self.pos = Vec2::new(canvas.width / 2.0, canvas.height / 2.0);
        let dir = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.vel = Vec2::new(self.speed * dir, -self.speed);
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.size
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.size
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size
    }
}

/// A single brick. Dimensions and color are shared grid-wide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    /// Top-left corner
    pub pos: Vec2,
    pub visible: bool,
}

/// Fixed grid of bricks; only visibility changes after construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickGrid {
    pub width: f32,
    pub height: f32,
    pub color: String,
    rows: usize,
    columns: usize,
    /// Row-major: `bricks[row * columns + col]`
    bricks: Vec<Brick>,
}

impl BrickGrid {
    /// Lay out the grid. The row index steps horizontally and the column
    /// index steps vertically.
    pub fn new(cfg: &BrickConfig) -> Self {
        let mut bricks = Vec::with_capacity(cfg.rows.saturating_mul(cfg.columns).min(MAX_BRICKS));
        for row in 0..cfg.rows {
            for col in 0..cfg.columns {
                let x = row as f32 * (cfg.width + cfg.padding) + cfg.offset_x;
                let y = col as f32 * (cfg.height + cfg.padding) + cfg.offset_y;
                bricks.push(Brick {
                    pos: Vec2::new(x, y),
                    visible: true,
                });
            }
        }
        Self {
            width: cfg.width,
            height: cfg.height,
            color: cfg.color.clone(),
            rows: cfg.rows,
            columns: cfg.columns,
            bricks,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of bricks in the grid, visible or not
    pub fn total(&self) -> usize {
        self.bricks.len()
    }

    pub fn visible_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.visible).count()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Brick> {
        if row >= self.rows || col >= self.columns {
            return None;
        }
        self.bricks.get(row * self.columns + col)
    }

    /// Brick at a row-major index
    pub fn by_index(&self, idx: usize) -> Option<Brick> {
        self.bricks.get(idx).copied()
    }

    pub fn hide(&mut self, idx: usize) {
        if let Some(brick) = self.bricks.get_mut(idx) {
            brick.visible = false;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    /// Make every brick visible again
    pub fn reset(&mut self) {
        for brick in &mut self.bricks {
            brick.visible = true;
        }
    }
}

/// Complete game state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Drives the ball's serve direction
    pub rng: Pcg32,
    pub canvas: CanvasConfig,
    pub phase: GamePhase,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: BrickGrid,
    pub score: u64,
    pub lives: u32,
    /// Lives granted by `start`
    pub starting_lives: u32,
    /// Simulation steps run since the state was created
    pub frame_count: u64,
    /// Number of times the grid refilled after a full clear
    pub rollovers: u32,
}

impl GameState {
    /// Create a fresh, idle game state with the given seed
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let ball = Ball::new(&config.ball, &config.canvas, &mut rng);
        Self {
            seed,
            rng,
            canvas: config.canvas.clone(),
            phase: GamePhase::Idle,
            paddle: Paddle::new(&config.paddle, &config.canvas),
            ball,
            bricks: BrickGrid::new(&config.bricks),
            score: 0,
            lives: config.starting_lives,
            starting_lives: config.starting_lives,
            frame_count: 0,
            rollovers: 0,
        }
    }

    /// Reset counters, grid, paddle and ball for a new match and mark it
    /// running
    pub fn start(&mut self) {
        self.bricks.reset();
        self.paddle.recenter(self.canvas.width);
        self.reset_ball();
        self.score = 0;
        self.lives = self.starting_lives;
        self.rollovers = 0;
        self.phase = GamePhase::Running;
    }

    pub fn reset_ball(&mut self) {
        self.ball.reset(&self.canvas, &mut self.rng);
    }

    /// Award one point and refill the grid whenever the score lands on a
    /// multiple of the grid size. Returns true on rollover.
    pub fn increase_score(&mut self) -> bool {
        self.score += 1;
        let total = self.bricks.total() as u64;
        if total > 0 && self.score % total == 0 {
            self.bricks.reset();
            self.rollovers += 1;
            return true;
        }
        false
    }

    /// Seed for the state that replaces this one after a game over
    pub fn next_seed(&mut self) -> u64 {
        self.rng.random()
    }
}
