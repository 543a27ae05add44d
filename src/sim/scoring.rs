//! Points, flash feedback and win detection

use super::state::{Flash, Match, Side};
use crate::consts::FLASH_TICKS;

/// Award a point for a ball that left through `exit`. The opposite player
/// scores, their paddle flashes, and the field is reset for the next serve.
/// Returns the scoring side.
pub fn award_point(state: &mut Match, exit: Side) -> Side {
    let scorer = exit.opponent();

    for paddle in &mut state.paddles {
        paddle.clear_flash();
    }
    let paddle = state.paddle_mut(scorer);
    paddle.increment_score();
    paddle.flash(FLASH_TICKS);
    state.board.flash = Some(Flash {
        owner: scorer,
        remaining: FLASH_TICKS,
    });

    state.reset_positions();
    scorer
}

/// First side at or past the win threshold. Left is checked first, and only
/// one side is ever reported.
pub fn check_winner(state: &Match) -> Option<Side> {
    let (left, right) = state.scores();
    if left >= state.board.win_score {
        Some(Side::Left)
    } else if right >= state.board.win_score {
        Some(Side::Right)
    } else {
        None
    }
}

/// Count down the pending flash; clear both highlights when it runs out
pub fn update_flash(state: &mut Match) {
    let Some(mut flash) = state.board.flash else {
        return;
    };

    flash.remaining = flash.remaining.saturating_sub(1);
    if flash.remaining == 0 {
        for paddle in &mut state.paddles {
            paddle.clear_flash();
        }
        state.board.flash = None;
    } else {
        state.paddle_mut(flash.owner).flash(flash.remaining);
        state.board.flash = Some(flash);
    }
}
