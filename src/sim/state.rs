//! Entities and match state
//!
//! Positions are the top-left corner of each entity's bounding box, in field
//! units with y growing downwards.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// Which end of the field a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Index into `[left, right]` arrays
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Anything with an axis-aligned bounding box
pub trait Bounded {
    fn position(&self) -> Vec2;
    fn size(&self) -> Vec2;

    fn center(&self) -> Vec2 {
        self.position() + self.size() / 2.0
    }

    /// Strict overlap on both axes; touching edges do not collide.
    fn collides_with(&self, other: &impl Bounded) -> bool {
        let (a, a_size) = (self.position(), self.size());
        let (b, b_size) = (other.position(), other.size());
        a.x < b.x + b_size.x && a.x + a_size.x > b.x && a.y < b.y + b_size.y && a.y + a_size.y > b.y
    }
}

/// A player's paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    pub side: Side,
    pub pos: Vec2,
    pub score: u32,
    /// Remaining highlight ticks (0 = not highlighted)
    pub flash_ticks: u32,
}

impl Paddle {
    pub fn new(side: Side) -> Self {
        let mut paddle = Self {
            side,
            pos: Vec2::ZERO,
            score: 0,
            flash_ticks: 0,
        };
        paddle.reset_position();
        paddle
    }

    /// Default top-left corner for a side
    pub fn home(side: Side) -> Vec2 {
        let x = match side {
            Side::Left => PADDLE_MARGIN,
            Side::Right => FIELD_WIDTH - PADDLE_MARGIN - PADDLE_WIDTH,
        };
        Vec2::new(x, FIELD_HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0)
    }

    pub fn reset_position(&mut self) {
        self.pos = Self::home(self.side);
    }

    pub fn move_up(&mut self) {
        self.pos.y = (self.pos.y - PADDLE_SPEED).max(0.0);
    }

    pub fn move_down(&mut self) {
        self.pos.y = (self.pos.y + PADDLE_SPEED).min(FIELD_HEIGHT - PADDLE_HEIGHT);
    }

    pub fn increment_score(&mut self) {
        self.score += 1;
    }

    pub fn flash(&mut self, duration: u32) {
        self.flash_ticks = duration;
    }

    pub fn clear_flash(&mut self) {
        self.flash_ticks = 0;
    }

    pub fn is_highlighted(&self) -> bool {
        self.flash_ticks > 0
    }
}

impl Bounded for Paddle {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT)
    }
}

/// The ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub active: bool,
}

impl Ball {
    /// A ball resting at the centre spot, not yet served
    pub fn new() -> Self {
        Self {
            pos: Self::center_spot(),
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            active: true,
        }
    }

    fn center_spot() -> Vec2 {
        Vec2::new(FIELD_WIDTH / 2.0 - BALL_RADIUS, FIELD_HEIGHT / 2.0 - BALL_RADIUS)
    }

    /// Recentre and serve in a random direction
    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.pos = Self::center_spot();
        let dir_x = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let dir_y = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let steep: u32 = rng.random_range(1..=3);
        self.vel = Vec2::new(
            BALL_SPEED * dir_x,
            BALL_SPEED * steep as f32 * 0.5 * dir_y,
        );
        self.active = true;
    }

    /// Integrate one tick. Returns true if the ball bounced off the top or
    /// bottom wall.
    pub fn update(&mut self) -> bool {
        if !self.active {
            return false;
        }

        self.pos += self.vel;

        let height = self.size().y;
        let mut bounced = false;
        if self.pos.y <= 0.0 {
            self.vel.y = -self.vel.y;
            self.pos.y = 0.0;
            bounced = true;
        }
        if self.pos.y + height >= FIELD_HEIGHT {
            self.vel.y = -self.vel.y;
            self.pos.y = FIELD_HEIGHT - height;
            bounced = true;
        }
        bounced
    }

    pub fn is_out_of_bounds(&self) -> bool {
        self.exit_side().is_some()
    }

    /// The side of the field the ball has left through, if any
    pub fn exit_side(&self) -> Option<Side> {
        if self.pos.x < 0.0 {
            Some(Side::Left)
        } else if self.pos.x > FIELD_WIDTH {
            Some(Side::Right)
        } else {
            None
        }
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}

impl Bounded for Ball {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        Vec2::splat(self.radius * 2.0)
    }
}

/// Pending paddle highlight after a point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flash {
    pub owner: Side,
    pub remaining: u32,
}

/// Win threshold and flash feedback. Scores themselves live on the paddles.
#[derive(Debug, Clone)]
pub struct ScoreBoard {
    pub win_score: u32,
    pub flash: Option<Flash>,
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self {
            win_score: WIN_SCORE,
            flash: None,
        }
    }
}

/// Everything that moves during play
#[derive(Debug, Clone)]
pub struct Match {
    pub paddles: [Paddle; 2],
    pub ball: Ball,
    pub board: ScoreBoard,
    /// Right paddle is driven by the AI
    pub vs_computer: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Serve RNG, seeded once per session
    rng: Pcg32,
}

impl Match {
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            paddles: [Paddle::new(Side::Left), Paddle::new(Side::Right)],
            ball: Ball::new(),
            board: ScoreBoard::default(),
            vs_computer: false,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.ball.reset(&mut state.rng);
        state
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        &self.paddles[side.index()]
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        &mut self.paddles[side.index()]
    }

    /// Scores as `(left, right)`
    pub fn scores(&self) -> (u32, u32) {
        (self.paddles[0].score, self.paddles[1].score)
    }

    /// Serve a fresh ball and send both paddles home. Scores untouched.
    pub fn reset_positions(&mut self) {
        self.ball.reset(&mut self.rng);
        for paddle in &mut self.paddles {
            paddle.reset_position();
        }
    }

    /// Zero both scores, drop any flash, and reset positions
    pub fn reset_round(&mut self) {
        for paddle in &mut self.paddles {
            paddle.score = 0;
            paddle.clear_flash();
        }
        self.board.flash = None;
        self.reset_positions();
    }

    /// Overwrite scores (used when restoring a snapshot)
    pub fn set_scores(&mut self, left: u32, right: u32) {
        self.paddles[0].score = left;
        self.paddles[1].score = right;
    }
}
