//! Simulation module
//!
//! All gameplay logic lives here. No rendering, audio or file access:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Paddles, ball and score board owned directly by `Match`

pub mod ai;
pub mod collision;
pub mod scoring;
pub mod state;
pub mod tick;

pub use collision::{bounce_from_paddle, resolve_paddle_hits};
pub use scoring::{award_point, check_winner, update_flash};
pub use state::{Ball, Bounded, Flash, Match, Paddle, ScoreBoard, Side};
pub use tick::{GameEvent, TickInput, TickOutcome, tick};
