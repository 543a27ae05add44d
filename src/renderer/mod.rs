//! Rendering module
//!
//! The session is turned into a `Frame` each tick; a `Renderer` draws it.
//! Renderers are best effort: a missing font or surface degrades to drawing
//! nothing, never to an error.

pub mod frame;

pub use frame::{FieldView, Frame, RectView, Rgba, Screen};

use crate::session::Notice;

/// Anything that can draw a frame
pub trait Renderer {
    fn draw(&mut self, frame: &Frame);
}

/// Text-only renderer for headless runs. Logs a line whenever the visible
/// screen or score changes.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    font_loaded: bool,
    last_line: Option<String>,
    frames_drawn: u64,
}

impl HeadlessRenderer {
    pub fn new(font_loaded: bool) -> Self {
        if !font_loaded {
            log::warn!("Could not load font - text will not be displayed");
        }
        Self {
            font_loaded,
            last_line: None,
            frames_drawn: 0,
        }
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Last status line produced, if any
    pub fn last_line(&self) -> Option<&str> {
        self.last_line.as_deref()
    }

    /// One-line summary of a frame
    pub fn describe(frame: &Frame) -> String {
        let (left, right) = &frame.field.names;
        let (s1, s2) = frame.field.scores;
        let mut line = match &frame.screen {
            Screen::Menu { top_score } => match top_score {
                Some(top) => format!("MENU  high score: {} - {}", top.name, top.score),
                None => "MENU".to_string(),
            },
            Screen::NameEntry { stage, preview, .. } => {
                format!("ENTER NAME ({:?}): {}", stage, preview)
            }
            Screen::Playing => format!("{} {}   :   {} {}", left, s1, s2, right),
            Screen::Paused => format!("PAUSED  current score: {} - {}", s1, s2),
            Screen::GameOver { winner, rank, .. } => {
                let mut text = format!("{} WINS!  final score: {} - {}", winner, s1, s2);
                if let Some(rank) = rank {
                    text.push_str(&format!("  NEW HIGH SCORE #{}", rank));
                }
                text
            }
            Screen::HighScores { entries } => {
                let list: Vec<String> = entries
                    .iter()
                    .enumerate()
                    .map(|(i, e)| format!("{}. {} - {}", i + 1, e.name, e.score))
                    .collect();
                format!("HIGH SCORES  {}", list.join("  "))
            }
        };
        if let Some(notice) = frame.notice {
            let text = match notice {
                Notice::Saved => "game saved",
                Notice::SaveFailed => "could not save game",
                Notice::Loaded => "game loaded, Enter resumes",
                Notice::NoSavedGame => "no saved game found",
                Notice::LoadFailed => "saved game is unreadable",
            };
            line.push_str(&format!("  [{}]", text));
        }
        line
    }
}

impl Renderer for HeadlessRenderer {
    fn draw(&mut self, frame: &Frame) {
        if !self.font_loaded {
            return;
        }
        self.frames_drawn += 1;
        let line = Self::describe(frame);
        if self.last_line.as_deref() != Some(line.as_str()) {
            log::info!("{}", line);
            self.last_line = Some(line);
        }
    }
}
