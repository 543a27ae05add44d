//! Fixed timestep simulation tick
//!
//! One call advances a match in play by exactly one frame. Ordering within a
//! tick: paddles (human, then AI), ball, collisions, scoring, win check,
//! flash countdown.

use super::ai;
use super::collision::resolve_paddle_hits;
use super::scoring::{award_point, check_winner, update_flash};
use super::state::{Match, Side};

/// Held-key state for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left_up: bool,
    pub left_down: bool,
    pub right_up: bool,
    pub right_down: bool,
}

/// One-shot signals for the audio/render sinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ball bounced off a paddle
    PaddleHit(Side),
    /// Ball bounced off the top or bottom wall
    WallBounce,
    /// A side scored a point
    Scored(Side),
    /// A side reached the win threshold
    Won(Side),
}

/// Result of a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub events: Vec<GameEvent>,
    pub winner: Option<Side>,
}

/// Advance the match by one tick
pub fn tick(state: &mut Match, input: &TickInput) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    state.time_ticks += 1;

    // Paddles
    let left = state.paddle_mut(Side::Left);
    if input.left_up {
        left.move_up();
    }
    if input.left_down {
        left.move_down();
    }
    if state.vs_computer {
        ai::control(&state.ball, &mut state.paddles[Side::Right.index()]);
    } else {
        let right = state.paddle_mut(Side::Right);
        if input.right_up {
            right.move_up();
        }
        if input.right_down {
            right.move_down();
        }
    }

    // Ball
    if state.ball.update() {
        outcome.events.push(GameEvent::WallBounce);
    }
    for side in resolve_paddle_hits(&mut state.ball, &state.paddles) {
        outcome.events.push(GameEvent::PaddleHit(side));
    }

    // Scoring
    if let Some(exit) = state.ball.exit_side() {
        let scorer = award_point(state, exit);
        log::debug!("{:?} scored, now {:?}", scorer, state.scores());
        outcome.events.push(GameEvent::Scored(scorer));

        if let Some(winner) = check_winner(state) {
            outcome.events.push(GameEvent::Won(winner));
            outcome.winner = Some(winner);
        }
    }

    update_flash(state);
    outcome
}
