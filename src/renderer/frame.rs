//! Per-frame view of the session handed to a renderer

use glam::Vec2;

use crate::consts::{DEFAULT_PLAYER1_NAME, DEFAULT_PLAYER2_NAME};
use crate::highscores::HighScoreEntry;
use crate::session::{Mode, NameStage, Notice, Session};
use crate::sim::{Bounded, Paddle, Side};

/// RGBA colour
pub type Rgba = [u8; 4];

pub const BACKGROUND_COLOR: Rgba = [10, 20, 40, 255];
pub const PLAYER1_COLOR: Rgba = [0, 0, 255, 255];
pub const PLAYER2_COLOR: Rgba = [255, 0, 255, 255];
pub const FLASH_COLOR: Rgba = [255, 255, 0, 255];
pub const BALL_COLOR: Rgba = [255, 0, 0, 255];

/// A filled rectangle in field coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectView {
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Rgba,
}

/// What the field looks like this frame
#[derive(Debug, Clone, PartialEq)]
pub struct FieldView {
    pub paddles: [RectView; 2],
    /// `None` while the ball is inactive
    pub ball: Option<RectView>,
    pub scores: (u32, u32),
    pub names: (String, String),
    pub two_player: bool,
}

/// Screen-specific content
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Menu {
        top_score: Option<HighScoreEntry>,
    },
    NameEntry {
        stage: NameStage,
        text: String,
        cursor_visible: bool,
        /// Name that will be used if Enter is pressed now
        preview: String,
    },
    Playing,
    Paused,
    GameOver {
        winner: String,
        winner_color: Rgba,
        /// Ledger rank earned by the winning score
        rank: Option<usize>,
    },
    HighScores {
        entries: Vec<HighScoreEntry>,
    },
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub screen: Screen,
    pub field: FieldView,
    pub notice: Option<Notice>,
}

fn paddle_view(paddle: &Paddle) -> RectView {
    let color = if paddle.is_highlighted() {
        FLASH_COLOR
    } else {
        match paddle.side {
            Side::Left => PLAYER1_COLOR,
            Side::Right => PLAYER2_COLOR,
        }
    };
    RectView {
        pos: paddle.position(),
        size: paddle.size(),
        color,
    }
}

impl Frame {
    pub fn capture(session: &Session) -> Self {
        let game = &session.game;
        let ball = game.ball.active.then(|| RectView {
            pos: game.ball.position(),
            size: game.ball.size(),
            color: BALL_COLOR,
        });
        let field = FieldView {
            paddles: [paddle_view(&game.paddles[0]), paddle_view(&game.paddles[1])],
            ball,
            scores: game.scores(),
            names: (
                session.player1_name.clone(),
                session.right_name().to_string(),
            ),
            two_player: session.two_player,
        };

        let screen = match session.mode {
            Mode::Menu => Screen::Menu {
                top_score: session.high_scores.top().cloned(),
            },
            Mode::NameEntry(stage) => {
                let text = session.name_entry.text().to_string();
                let preview = if text.trim().is_empty() {
                    match stage {
                        NameStage::Player1 => DEFAULT_PLAYER1_NAME.to_string(),
                        NameStage::Player2 => DEFAULT_PLAYER2_NAME.to_string(),
                    }
                } else {
                    text.trim().to_string()
                };
                Screen::NameEntry {
                    stage,
                    text,
                    cursor_visible: session.name_entry.cursor_visible(),
                    preview,
                }
            }
            Mode::Playing => Screen::Playing,
            Mode::Paused => Screen::Paused,
            Mode::GameOver(side) => Screen::GameOver {
                winner: session.name_of(side).to_string(),
                winner_color: match side {
                    Side::Left => PLAYER1_COLOR,
                    Side::Right => PLAYER2_COLOR,
                },
                rank: session.last_rank,
            },
            Mode::HighScoreView => Screen::HighScores {
                entries: session.high_scores.entries.clone(),
            },
        };

        Self {
            screen,
            field,
            notice: session.notice,
        }
    }
}
