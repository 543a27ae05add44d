//! High score leaderboard system
//!
//! Persisted to a plain text file, tracks top 10 scores. One `<name> <score>`
//! record per line.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PersistenceError;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreEntry {
    /// Player's display name
    pub name: String,
    /// Winning score
    pub score: u32,
}

/// High score leaderboard
#[derive(Debug, Clone, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
    /// Where to persist after every insertion (`None` keeps it in memory)
    path: Option<PathBuf>,
}

impl HighScores {
    /// Create empty in-memory leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            path: None,
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies) and persist it.
    /// Ties rank below earlier entries with the same score.
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, name: &str, score: u32) -> Option<usize> {
        let rank = self.insert(name, score)?;
        self.save();
        Some(rank)
    }

    fn insert(&mut self, name: &str, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            name: name.to_string(),
            score,
        };

        // Find insertion point (sorted descending by score)
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top entry (if any)
    pub fn top(&self) -> Option<&HighScoreEntry> {
        self.entries.first()
    }

    /// Parse ledger text. Reads records greedily up to the capacity, then
    /// orders them. Blank lines are skipped; anything else malformed fails
    /// the whole parse.
    pub fn parse(text: &str) -> Result<Vec<HighScoreEntry>, PersistenceError> {
        let mut entries = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            if entries.len() == MAX_HIGH_SCORES {
                break;
            }
            let line_no = idx + 1;
            let mut fields = line.split_whitespace();
            let Some(name) = fields.next() else {
                continue;
            };
            let score = fields
                .next()
                .ok_or_else(|| PersistenceError::malformed(line_no, "missing score"))?;
            if fields.next().is_some() {
                return Err(PersistenceError::malformed(line_no, "trailing fields"));
            }
            let score = score
                .parse::<u32>()
                .map_err(|e| PersistenceError::malformed(line_no, format!("bad score: {e}")))?;
            entries.push(HighScoreEntry {
                name: name.to_string(),
                score,
            });
        }
        // Stable: equal scores keep file order
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(entries)
    }

    /// Render the ledger file contents
    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{} {}\n", file_safe_name(&e.name), e.score))
            .collect()
    }

    /// Read a ledger file
    pub fn read(path: &Path) -> Result<Self, PersistenceError> {
        let text = fs::read_to_string(path).map_err(|e| PersistenceError::from_io(path, e))?;
        Ok(Self {
            entries: Self::parse(&text)?,
            path: Some(path.to_path_buf()),
        })
    }

    /// Write the ledger file
    pub fn write(&self, path: &Path) -> Result<(), PersistenceError> {
        fs::write(path, self.to_text()).map_err(|e| PersistenceError::from_io(path, e))
    }

    /// Load high scores from disk. A missing or unreadable file gives an
    /// empty ledger that will still persist to `path`.
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(scores) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(PersistenceError::Missing(_)) => {
                log::info!("No high scores found, starting fresh");
                Self::empty_at(path)
            }
            Err(e) => {
                log::warn!("Ignoring high score file {}: {}", path.display(), e);
                Self::empty_at(path)
            }
        }
    }

    fn empty_at(path: &Path) -> Self {
        Self {
            entries: Vec::new(),
            path: Some(path.to_path_buf()),
        }
    }

    /// Save high scores to the backing file, if any
    pub fn save(&self) {
        let Some(path) = &self.path else {
            return;
        };
        match self.write(path) {
            Ok(()) => log::info!("High scores saved ({} entries)", self.entries.len()),
            Err(e) => log::warn!("Could not save high scores: {}", e),
        }
    }
}

/// Names go on disk as a single whitespace-free token
fn file_safe_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("_")
}
