//! Key events and default bindings

use crate::sim::TickInput;

/// A discrete key press delivered by the window layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// `A`-`Z`, stored uppercase
    Letter(char),
    /// `0`-`9`
    Digit(u8),
    Enter,
    Escape,
    Space,
    Backspace,
    Up,
    Down,
}

impl Key {
    /// Build a key from a typed character, if it maps to one
    pub fn from_char(c: char) -> Option<Key> {
        match c {
            'a'..='z' | 'A'..='Z' => Some(Key::Letter(c.to_ascii_uppercase())),
            '0'..='9' => c.to_digit(10).map(|d| Key::Digit(d as u8)),
            ' ' => Some(Key::Space),
            '\n' | '\r' => Some(Key::Enter),
            '\u{8}' => Some(Key::Backspace),
            '\u{1b}' => Some(Key::Escape),
            _ => None,
        }
    }

    /// Same key with any letter folded to uppercase
    pub fn normalized(self) -> Key {
        match self {
            Key::Letter(c) => Key::Letter(c.to_ascii_uppercase()),
            other => other,
        }
    }

    /// Character this key contributes to a typed name
    pub fn name_char(self) -> Option<char> {
        match self {
            Key::Letter(c) => Some(c.to_ascii_uppercase()),
            Key::Digit(d) => char::from_digit(u32::from(d), 10),
            Key::Space => Some(' '),
            _ => None,
        }
    }
}

/// Keys currently held down, as reported by the window layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub w: bool,
    pub d: bool,
    pub up: bool,
    pub down: bool,
}

impl HeldKeys {
    /// Default bindings: player 1 on W (up) / D (down), player 2 on the
    /// arrow keys. S is taken by save.
    pub fn to_tick_input(self) -> TickInput {
        TickInput {
            left_up: self.w,
            left_down: self.d,
            right_up: self.up,
            right_down: self.down,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_char() {
        assert_eq!(Key::from_char('p'), Some(Key::Letter('P')));
        assert_eq!(Key::from_char('7'), Some(Key::Digit(7)));
        assert_eq!(Key::from_char('\n'), Some(Key::Enter));
        assert_eq!(Key::from_char('!'), None);
    }

    #[test]
    fn test_normalized_folds_letters_only() {
        assert_eq!(Key::Letter('p').normalized(), Key::Letter('P'));
        assert_eq!(Key::Letter('R').normalized(), Key::Letter('R'));
        assert_eq!(Key::Digit(4).normalized(), Key::Digit(4));
    }

    #[test]
    fn test_name_char() {
        assert_eq!(Key::Letter('q').name_char(), Some('Q'));
        assert_eq!(Key::Digit(3).name_char(), Some('3'));
        assert_eq!(Key::Space.name_char(), Some(' '));
        assert_eq!(Key::Enter.name_char(), None);
    }

    #[test]
    fn test_bindings() {
        let held = HeldKeys {
            w: true,
            down: true,
            ..Default::default()
        };
        let input = held.to_tick_input();
        assert!(input.left_up && !input.left_down);
        assert!(input.right_down && !input.right_up);
    }
}
