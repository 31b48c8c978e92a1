//! Axis-aligned bounding box collision tests
//!
//! The ball is treated as a square of half-extent `size` around its center.
//! All comparisons are strict, so touching edges never count as contact.

use super::state::{Ball, Brick, Paddle};

/// Which canvas walls the ball's box currently pokes through
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    /// Left or right wall
    pub side: bool,
    pub top: bool,
    /// Bottom edge; this is a life lost, never a bounce
    pub floor: bool,
}

pub fn ball_wall_contact(ball: &Ball, width: f32, height: f32) -> WallContact {
    WallContact {
        side: ball.right() > width || ball.left() < 0.0,
        top: ball.top() < 0.0,
        floor: ball.bottom() > height,
    }
}

/// Ball box overlaps the paddle from above and the ball's center lies
/// strictly over the paddle's span
pub fn ball_hits_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    let overlaps =
        ball.right() > paddle.left() && ball.left() < paddle.right() && ball.bottom() > paddle.top();
    overlaps && ball.pos.x > paddle.left() && ball.pos.x < paddle.right()
}

/// Ball box lies strictly inside the brick's horizontal span and overlaps it
/// vertically. A ball straddling a brick's side edge does not count.
pub fn ball_hits_brick(ball: &Ball, brick: &Brick, width: f32, height: f32) -> bool {
    ball.left() > brick.pos.x
        && ball.right() < brick.pos.x + width
        && ball.bottom() > brick.pos.y
        && ball.top() < brick.pos.y + height
}
