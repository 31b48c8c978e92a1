//! Keyboard and pointer mapping onto the paddle
//!
//! Key identifiers are `KeyboardEvent.key` strings. Press accepts the legacy
//! "Left"/"Right" names plus A/D; release additionally accepts the
//! "ArrowLeft"/"ArrowRight" names. Hosts that want arrows on press too can
//! opt in with [`KeyMap::arrow_keys_on_press`].

use crate::sim::Paddle;

/// Horizontal direction requested by a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// Key name tables for press and release
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyMap {
    pub arrow_keys_on_press: bool,
}

impl KeyMap {
    /// Direction for a key press, `None` for keys that do nothing
    pub fn pressed(&self, key: &str) -> Option<Direction> {
        match key {
            "Right" | "d" | "D" => Some(Direction::Right),
            "Left" | "a" | "A" => Some(Direction::Left),
            "ArrowRight" if self.arrow_keys_on_press => Some(Direction::Right),
            "ArrowLeft" if self.arrow_keys_on_press => Some(Direction::Left),
            _ => None,
        }
    }

    /// Whether releasing this key stops the paddle
    pub fn releases(&self, key: &str) -> bool {
        matches!(
            key,
            "Right" | "ArrowRight" | "d" | "D" | "Left" | "ArrowLeft" | "a" | "A"
        )
    }
}

pub fn on_key_down(paddle: &mut Paddle, keys: &KeyMap, key: &str) {
    if let Some(dir) = keys.pressed(key) {
        paddle.dx = dir.sign() * paddle.speed;
    }
}

/// Releasing any movement key stops the paddle, even if the other
/// direction is still held
pub fn on_key_up(paddle: &mut Paddle, keys: &KeyMap, key: &str) {
    if keys.releases(key) {
        paddle.dx = 0.0;
    }
}

/// Center the paddle under the pointer. `pointer_x` is relative to the
/// canvas origin; positions off the canvas are ignored. The result is not
/// clamped here, the next step does that.
pub fn on_pointer_move(paddle: &mut Paddle, canvas_width: f32, pointer_x: f32) {
    if pointer_x > 0.0 && pointer_x < canvas_width {
        paddle.pos.x = pointer_x - paddle.width / 2.0;
    }
}
