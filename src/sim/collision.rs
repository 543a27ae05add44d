//! Ball/paddle collision response
//!
//! Overlap is a plain AABB test (`Bounded::collides_with`). The interesting
//! part is the return angle: it depends only on where along the paddle the
//! ball struck, not on the incoming angle.

use super::state::{Ball, Bounded, Paddle, Side};
use crate::consts::*;

/// Whether the ball is travelling toward the face of a paddle on `side`
#[inline]
pub fn approaching(ball: &Ball, side: Side) -> bool {
    match side {
        Side::Left => ball.vel.x < 0.0,
        Side::Right => ball.vel.x > 0.0,
    }
}

/// Normalised hit offset: 0 at the paddle centre, ±1 at its top/bottom edge,
/// beyond ±1 when the ball only clips a corner.
pub fn hit_offset(ball: &Ball, paddle: &Paddle) -> f32 {
    let half_height = paddle.size().y / 2.0;
    (ball.center().y - paddle.center().y) / half_height
}

/// Send the ball back with a speed boost and an angle set by the hit offset
pub fn bounce_from_paddle(ball: &mut Ball, paddle: &Paddle) {
    ball.vel.x = -ball.vel.x * PADDLE_BOOST;
    ball.vel.y = (hit_offset(ball, paddle) * BALL_SPEED).clamp(-BALL_SPEED, BALL_SPEED);
}

/// Test the ball against both paddles and bounce off any it is hitting.
/// An overlap only counts while the ball moves toward that paddle, so a ball
/// still inside a paddle after bouncing is not sent back into it.
/// Returns the sides whose paddle was hit this tick.
pub fn resolve_paddle_hits(ball: &mut Ball, paddles: &[Paddle; 2]) -> Vec<Side> {
    let mut hits = Vec::new();
    for paddle in paddles {
        if approaching(ball, paddle.side) && ball.collides_with(paddle) {
            bounce_from_paddle(ball, paddle);
            hits.push(paddle.side);
        }
    }
    hits
}
