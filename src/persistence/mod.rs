//! Single-slot save/load of a session
//!
//! Plain text, one field per line, in order:
//! score1, score2, two-player flag (0|1), mode code, player 1 name,
//! player 2 name.
//!
//! Loading validates every field before anything is handed back, so a
//! truncated or corrupted file never half-applies.

use std::fs;
use std::path::Path;

use crate::consts::{MAX_NAME_LEN, WIN_SCORE};
use crate::error::PersistenceError;

/// Number of lines in a snapshot
const FIELD_COUNT: usize = 6;

/// Everything a save slot remembers about a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSnapshot {
    pub score1: u32,
    pub score2: u32,
    pub two_player: bool,
    /// Numeric mode code at the time of saving
    pub mode_code: u8,
    pub player1_name: String,
    pub player2_name: String,
}

/// Highest mode code a snapshot may carry
pub const MAX_MODE_CODE: u8 = 4;

impl SaveSnapshot {
    pub fn to_text(&self) -> String {
        format!(
            "{}\n{}\n{}\n{}\n{}\n{}\n",
            self.score1,
            self.score2,
            u8::from(self.two_player),
            self.mode_code,
            self.player1_name,
            self.player2_name,
        )
    }

    pub fn parse(text: &str) -> Result<Self, PersistenceError> {
        let lines: Vec<&str> = text.lines().collect();
        if lines.len() < FIELD_COUNT {
            return Err(PersistenceError::malformed(
                lines.len() + 1,
                format!("expected {} fields, found {}", FIELD_COUNT, lines.len()),
            ));
        }
        if lines[FIELD_COUNT..].iter().any(|l| !l.trim().is_empty()) {
            return Err(PersistenceError::malformed(FIELD_COUNT + 1, "trailing data"));
        }

        let score1 = parse_score(lines[0], 1)?;
        let score2 = parse_score(lines[1], 2)?;
        let two_player = match lines[2].trim() {
            "0" => false,
            "1" => true,
            other => {
                return Err(PersistenceError::malformed(
                    3,
                    format!("two-player flag must be 0 or 1, got {other:?}"),
                ));
            }
        };
        let mode_code = lines[3]
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|code| *code <= MAX_MODE_CODE)
            .ok_or_else(|| PersistenceError::malformed(4, "unknown mode code"))?;
        let player1_name = parse_name(lines[4], 5)?;
        let player2_name = parse_name(lines[5], 6)?;

        Ok(Self {
            score1,
            score2,
            two_player,
            mode_code,
            player1_name,
            player2_name,
        })
    }

    /// Write the snapshot, replacing any previous save
    pub fn write(&self, path: &Path) -> Result<(), PersistenceError> {
        fs::write(path, self.to_text()).map_err(|e| PersistenceError::from_io(path, e))?;
        log::info!("Game saved to {}", path.display());
        Ok(())
    }

    /// Read and validate a snapshot
    pub fn read(path: &Path) -> Result<Self, PersistenceError> {
        let text = fs::read_to_string(path).map_err(|e| PersistenceError::from_io(path, e))?;
        let snapshot = Self::parse(&text)?;
        log::info!("Game loaded from {}", path.display());
        Ok(snapshot)
    }
}

fn parse_score(line: &str, line_no: usize) -> Result<u32, PersistenceError> {
    let score = line
        .trim()
        .parse::<u32>()
        .map_err(|e| PersistenceError::malformed(line_no, format!("bad score: {e}")))?;
    // A finished round is never saved
    if score >= WIN_SCORE {
        return Err(PersistenceError::malformed(
            line_no,
            format!("score {score} is past the win threshold"),
        ));
    }
    Ok(score)
}

fn parse_name(line: &str, line_no: usize) -> Result<String, PersistenceError> {
    let name = line.trim();
    if name.is_empty() {
        return Err(PersistenceError::malformed(line_no, "empty name"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(PersistenceError::malformed(line_no, "name too long"));
    }
    Ok(name.to_string())
}
