//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame, velocities in pixels per frame
//! - Seeded RNG only
//! - Stable iteration order (row-major brick scan)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{WallContact, ball_hits_brick, ball_hits_paddle, ball_wall_contact};
pub use state::{Ball, Brick, BrickGrid, GamePhase, GameState, Paddle};
pub use tick::{StepOutcome, step};
