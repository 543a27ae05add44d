//! Text buffer for typing a player name

use std::time::Duration;

use crate::consts::{CURSOR_BLINK_MS, MAX_NAME_LEN};

#[derive(Debug, Clone)]
pub struct NameBuffer {
    text: String,
    cursor_visible: bool,
    blink_elapsed: Duration,
}

impl Default for NameBuffer {
    fn default() -> Self {
        Self {
            text: String::new(),
            cursor_visible: true,
            blink_elapsed: Duration::ZERO,
        }
    }
}

impl NameBuffer {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Empty the buffer and restart the cursor blink
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Append a character. Letters are uppercased; a space is only accepted
    /// after a non-space character. Returns whether it was accepted.
    pub fn push(&mut self, c: char) -> bool {
        if self.text.chars().count() >= MAX_NAME_LEN {
            return false;
        }
        let accepted = match c {
            ' ' => self.text.chars().last().is_some_and(|last| last != ' '),
            c => c.is_ascii_alphanumeric(),
        };
        if accepted {
            self.text.push(c.to_ascii_uppercase());
        }
        accepted
    }

    pub fn pop(&mut self) {
        self.text.pop();
    }

    /// Take the typed name, trimmed, leaving the buffer empty.
    /// `None` if nothing but spaces was typed.
    pub fn take(&mut self) -> Option<String> {
        let name = self.text.trim().to_string();
        self.clear();
        (!name.is_empty()).then_some(name)
    }

    /// Advance the blink clock by wall-clock time
    pub fn advance(&mut self, elapsed: Duration) {
        self.blink_elapsed += elapsed;
        if self.blink_elapsed >= Duration::from_millis(CURSOR_BLINK_MS) {
            self.cursor_visible = !self.cursor_visible;
            self.blink_elapsed = Duration::ZERO;
        }
    }
}
