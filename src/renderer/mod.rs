//! 2D rendering module
//!
//! Draws the game through the [`Surface`] trait: an HTML canvas in the
//! browser, or a [`RecordingSurface`] for tests and headless runs.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};

use glam::Vec2;

use crate::config::HudConfig;
use crate::consts::{HUD_BASELINE_Y, HUD_LIVES_X, HUD_SCORE_INSET_X};
use crate::sim::GameState;

/// Fill color for a draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color<'a> {
    /// Any CSS color string, e.g. `"#FFD700"`
    Solid(&'a str),
    Transparent,
}

impl Color<'_> {
    pub fn css(&self) -> &str {
        match self {
            Color::Solid(css) => *css,
            Color::Transparent => "transparent",
        }
    }
}

/// A 2D drawing target with fixed dimensions
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    /// Erase the whole surface
    fn clear(&mut self);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color<'_>);
    /// `pos` is the top-left corner
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color<'_>);
    /// `pos` is the left end of the text baseline
    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, color: Color<'_>);
}

/// Draw one frame. Reads the state only.
///
/// Order: clear, ball, paddle, every brick, score, lives. Hidden bricks are
/// still drawn, with a transparent fill, so every frame issues the same
/// number of draw calls.
pub fn draw<S: Surface + ?Sized>(state: &GameState, hud: &HudConfig, surface: &mut S) {
    surface.clear();

    let ball = &state.ball;
    surface.fill_circle(ball.pos, ball.size, Color::Solid(&ball.color));

    let paddle = &state.paddle;
    surface.fill_rect(
        paddle.pos,
        Vec2::new(paddle.width, paddle.height),
        Color::Solid(&paddle.color),
    );

    let grid = &state.bricks;
    let brick_size = Vec2::new(grid.width, grid.height);
    for brick in grid.iter() {
        let color = if brick.visible {
            Color::Solid(&grid.color)
        } else {
            Color::Transparent
        };
        surface.fill_rect(brick.pos, brick_size, color);
    }

    let text_color = Color::Solid(&hud.color);
    surface.fill_text(
        &format!("Score: {}", state.score),
        Vec2::new(state.canvas.width - HUD_SCORE_INSET_X, HUD_BASELINE_Y),
        &hud.font,
        text_color,
    );
    surface.fill_text(
        &format!("Lives: {}", state.lives),
        Vec2::new(HUD_LIVES_X, HUD_BASELINE_Y),
        &hud.font,
        text_color,
    );
}
