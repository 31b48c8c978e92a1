//! Demo controller that plays the game
//!
//! Produces the same inputs a player would (pointer positions or key
//! presses), so headless runs exercise the real input path.

use crate::input::Direction;
use crate::sim::GameState;

/// How the autopilot drives the paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(not(target_arch = "wasm32"), derive(clap::ValueEnum))]
pub enum PilotMode {
    /// Keep the pointer over the ball; never misses
    #[default]
    #[cfg_attr(not(target_arch = "wasm32"), value(alias = "mouse"))]
    Pointer,
    /// Hold A/D toward the ball, like a keyboard player
    #[cfg_attr(not(target_arch = "wasm32"), value(alias = "keyboard"))]
    Keys,
}

impl PilotMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PilotMode::Pointer => "pointer",
            PilotMode::Keys => "keys",
        }
    }
}

/// Input the autopilot wants delivered this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PilotInput {
    PointerMove(f32),
    KeyDown(&'static str),
    KeyUp(&'static str),
    None,
}

#[derive(Debug, Clone)]
pub struct Autopilot {
    mode: PilotMode,
    /// Paddle-center distance from the ball tolerated before moving
    dead_zone: f32,
    held: Option<Direction>,
}

impl Autopilot {
    pub fn new(mode: PilotMode) -> Self {
        Self {
            mode,
            dead_zone: 8.0,
            held: None,
        }
    }

    pub fn mode(&self) -> PilotMode {
        self.mode
    }

    /// Decide the input for the upcoming frame
    pub fn decide(&mut self, state: &GameState) -> PilotInput {
        let target = state.ball.pos.x;
        match self.mode {
            PilotMode::Pointer => {
                // The input layer drops positions on or past the edges
                let x = target.clamp(1.0, state.canvas.width - 1.0);
                PilotInput::PointerMove(x)
            }
            PilotMode::Keys => {
                let paddle = &state.paddle;
                let center = paddle.pos.x + paddle.width / 2.0;
                let want = if target > center + self.dead_zone {
                    Some(Direction::Right)
                } else if target < center - self.dead_zone {
                    Some(Direction::Left)
                } else {
                    None
                };

                if want == self.held {
                    return PilotInput::None;
                }
                let previous = self.held;
                self.held = want;
                match (want, previous) {
                    (Some(Direction::Right), _) => PilotInput::KeyDown("d"),
                    (Some(Direction::Left), _) => PilotInput::KeyDown("a"),
                    (None, Some(Direction::Right)) => PilotInput::KeyUp("d"),
                    (None, Some(Direction::Left)) => PilotInput::KeyUp("a"),
                    (None, None) => PilotInput::None,
                }
            }
        }
    }
}
