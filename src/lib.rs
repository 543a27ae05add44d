//! Ping Pong - a two-paddle ball game
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, AI, scoring)
//! - `session`: Screen/mode state machine and key dispatch
//! - `highscores`: Ranked leaderboard persisted to a text file
//! - `persistence`: Single-slot save/restore of a session
//! - `renderer` / `audio`: Best-effort output sinks
//! - `platform`: Key events and held-key input from the window layer

pub mod audio;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::PersistenceError;
pub use highscores::HighScores;
pub use session::{Mode, NameStage, Session};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playing field dimensions
    pub const FIELD_WIDTH: f32 = 1000.0;
    pub const FIELD_HEIGHT: f32 = 700.0;

    /// First player to reach this score wins the round
    pub const WIN_SCORE: u32 = 10;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 20.0;
    pub const PADDLE_HEIGHT: f32 = 120.0;
    /// Distance of each paddle from its side wall
    pub const PADDLE_MARGIN: f32 = 50.0;
    /// Vertical step per tick while a move key is held
    pub const PADDLE_SPEED: f32 = 8.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 15.0;
    pub const BALL_SPEED: f32 = 6.0;
    /// Horizontal speed boost when the ball hits a paddle (multiplicative)
    pub const PADDLE_BOOST: f32 = 1.05;

    /// AI holds still while the ball is this close to its paddle centre
    pub const AI_DEADZONE: f32 = 20.0;

    /// Ticks a scoring paddle stays highlighted
    pub const FLASH_TICKS: u32 = 30;

    /// Reference frame rate of the driver loop
    pub const TICK_RATE_HZ: u32 = 60;

    /// Name entry limits
    pub const MAX_NAME_LEN: usize = 10;
    /// Cursor blink half-period in milliseconds
    pub const CURSOR_BLINK_MS: u64 = 500;

    /// Default display names
    pub const DEFAULT_PLAYER1_NAME: &str = "Player 1";
    pub const DEFAULT_PLAYER2_NAME: &str = "Player 2";
    pub const COMPUTER_NAME: &str = "Computer";
}
