//! Computer opponent for single-player games

use super::state::{Ball, Bounded, Paddle};
use crate::consts::AI_DEADZONE;

/// What the AI wants its paddle to do this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiMove {
    Up,
    Down,
    Hold,
}

/// Chase the ball's vertical centre, ignoring small offsets
pub fn decide(ball: &Ball, paddle: &Paddle) -> AiMove {
    let ball_y = ball.center().y;
    let paddle_y = paddle.center().y;

    if ball_y < paddle_y - AI_DEADZONE {
        AiMove::Up
    } else if ball_y > paddle_y + AI_DEADZONE {
        AiMove::Down
    } else {
        AiMove::Hold
    }
}

/// Run the policy and move the paddle through its normal controls
pub fn control(ball: &Ball, paddle: &mut Paddle) {
    match decide(ball, paddle) {
        AiMove::Up => paddle.move_up(),
        AiMove::Down => paddle.move_down(),
        AiMove::Hold => {}
    }
}
