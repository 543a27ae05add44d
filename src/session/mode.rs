//! Session modes and the transition table
//!
//! `plan` is a pure function of (mode, event, session flags). It decides the
//! next mode and lists the side effects; `Session` applies them.

use crate::platform::Key;
use crate::sim::Side;

/// Which player's name is being typed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameStage {
    Player1,
    Player2,
}

/// Top-level screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Menu,
    NameEntry(NameStage),
    Playing,
    Paused,
    GameOver(Side),
    HighScoreView,
}

impl Mode {
    /// Numeric code stored in save files
    pub fn code(self) -> u8 {
        match self {
            Mode::Menu | Mode::NameEntry(_) => 0,
            Mode::Playing => 1,
            Mode::Paused => 2,
            Mode::GameOver(_) => 3,
            Mode::HighScoreView => 4,
        }
    }
}

/// Inputs to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Key(Key),
    /// The simulation reported a winner this tick
    RoundWon(Side),
}

/// Side effects of a transition, applied in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Set the player count and start a fresh name buffer
    SelectPlayers { two_player: bool },
    TypeChar(char),
    Backspace,
    /// Store the buffer (or the default) as this player's name
    CommitName(NameStage),
    CancelNameEntry,
    /// Zero scores, reset entities, begin play
    StartRound,
    /// Continue a restored round with its scores and names
    ResumeRound,
    /// Zero scores and reset entities without leaving play
    ResetRound,
    SaveGame,
    LoadGame,
    /// Offer the winner's score to the high-score ledger
    RecordHighScore(Side),
    Quit,
}

/// Session state the transition table depends on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub two_player: bool,
    /// A snapshot was restored and has not been played or discarded yet
    pub resume_ready: bool,
}

/// A planned move between modes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: Mode,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn to(next: Mode) -> Self {
        Self {
            next,
            effects: Vec::new(),
        }
    }

    fn with(next: Mode, effects: &[Effect]) -> Self {
        Self {
            next,
            effects: effects.to_vec(),
        }
    }
}

/// Decide what an event does in a mode. `None` means the event is ignored.
pub fn plan(mode: Mode, event: SessionEvent, flags: Flags) -> Option<Transition> {
    use Effect::*;

    let key = match event {
        SessionEvent::RoundWon(side) => {
            return match mode {
                Mode::Playing => Some(Transition::with(
                    Mode::GameOver(side),
                    &[RecordHighScore(side)],
                )),
                _ => None,
            };
        }
        SessionEvent::Key(key) => key.normalized(),
    };

    let stage1 = Mode::NameEntry(NameStage::Player1);
    match (mode, key) {
        (Mode::Menu, Key::Enter) if flags.resume_ready => {
            Some(Transition::with(Mode::Playing, &[ResumeRound]))
        }
        (Mode::Menu, Key::Digit(1) | Key::Enter) => Some(Transition::with(
            stage1,
            &[SelectPlayers { two_player: true }],
        )),
        (Mode::Menu, Key::Digit(2)) => Some(Transition::with(
            stage1,
            &[SelectPlayers { two_player: false }],
        )),
        (Mode::Menu, Key::Digit(3)) => Some(Transition::to(Mode::HighScoreView)),
        (Mode::Menu, Key::Digit(4)) => Some(Transition::with(Mode::Menu, &[LoadGame])),
        (Mode::Menu, Key::Escape) => Some(Transition::with(Mode::Menu, &[Quit])),

        (Mode::NameEntry(NameStage::Player1), Key::Enter) => Some(if flags.two_player {
            Transition::with(
                Mode::NameEntry(NameStage::Player2),
                &[CommitName(NameStage::Player1)],
            )
        } else {
            Transition::with(
                Mode::Playing,
                &[CommitName(NameStage::Player1), StartRound],
            )
        }),
        (Mode::NameEntry(NameStage::Player2), Key::Enter) => Some(Transition::with(
            Mode::Playing,
            &[CommitName(NameStage::Player2), StartRound],
        )),
        (Mode::NameEntry(_), Key::Escape) => {
            Some(Transition::with(Mode::Menu, &[CancelNameEntry]))
        }
        (Mode::NameEntry(_), Key::Backspace) => Some(Transition::with(mode, &[Backspace])),
        (Mode::NameEntry(_), key) => key
            .name_char()
            .map(|c| Transition::with(mode, &[TypeChar(c)])),

        (Mode::Playing, Key::Letter('P') | Key::Escape) => Some(Transition::to(Mode::Paused)),
        (Mode::Playing, Key::Letter('R')) => {
            Some(Transition::with(Mode::Playing, &[ResetRound]))
        }
        (Mode::Playing, Key::Letter('S')) => Some(Transition::with(Mode::Playing, &[SaveGame])),

        (Mode::Paused, Key::Letter('P') | Key::Escape) => Some(Transition::to(Mode::Playing)),

        (Mode::GameOver(_), Key::Enter | Key::Space) => Some(Transition::to(Mode::Menu)),
        (Mode::GameOver(_), Key::Letter('R')) => {
            Some(Transition::with(Mode::Playing, &[StartRound]))
        }

        (Mode::HighScoreView, Key::Space | Key::Escape) => Some(Transition::to(Mode::Menu)),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(two_player: bool) -> Flags {
        Flags {
            two_player,
            resume_ready: false,
        }
    }

    fn key(mode: Mode, key: Key, two_player: bool) -> Option<Transition> {
        plan(mode, SessionEvent::Key(key), flags(two_player))
    }

    fn next(mode: Mode, k: Key) -> Option<Mode> {
        key(mode, k, true).map(|t| t.next)
    }

    #[test]
    fn test_menu_choices() {
        let stage1 = Mode::NameEntry(NameStage::Player1);
        let t = key(Mode::Menu, Key::Digit(1), false).unwrap();
        assert_eq!(t.next, stage1);
        assert_eq!(t.effects, vec![Effect::SelectPlayers { two_player: true }]);

        let t = key(Mode::Menu, Key::Digit(2), true).unwrap();
        assert_eq!(t.effects, vec![Effect::SelectPlayers { two_player: false }]);

        assert_eq!(next(Mode::Menu, Key::Enter), Some(stage1));
        assert_eq!(next(Mode::Menu, Key::Digit(3)), Some(Mode::HighScoreView));

        let t = key(Mode::Menu, Key::Digit(4), true).unwrap();
        assert_eq!((t.next, t.effects), (Mode::Menu, vec![Effect::LoadGame]));

        let t = key(Mode::Menu, Key::Escape, true).unwrap();
        assert_eq!(t.effects, vec![Effect::Quit]);

        assert_eq!(next(Mode::Menu, Key::Letter('P')), None);
    }

    #[test]
    fn test_name_entry_flow() {
        let stage1 = Mode::NameEntry(NameStage::Player1);
        let stage2 = Mode::NameEntry(NameStage::Player2);

        let t = key(stage1, Key::Enter, true).unwrap();
        assert_eq!(t.next, stage2);
        assert_eq!(t.effects, vec![Effect::CommitName(NameStage::Player1)]);

        let t = key(stage1, Key::Enter, false).unwrap();
        assert_eq!(t.next, Mode::Playing);
        assert_eq!(
            t.effects,
            vec![Effect::CommitName(NameStage::Player1), Effect::StartRound]
        );

        let t = key(stage2, Key::Enter, true).unwrap();
        assert_eq!(t.next, Mode::Playing);

        assert_eq!(next(stage2, Key::Escape), Some(Mode::Menu));

        let t = key(stage1, Key::Letter('a'), true).unwrap();
        assert_eq!((t.next, t.effects), (stage1, vec![Effect::TypeChar('A')]));
        let t = key(stage1, Key::Digit(1), true).unwrap();
        assert_eq!(t.effects, vec![Effect::TypeChar('1')]);
        assert_eq!(key(stage1, Key::Up, true), None);
    }

    #[test]
    fn test_play_and_pause() {
        assert_eq!(next(Mode::Playing, Key::Letter('P')), Some(Mode::Paused));
        assert_eq!(next(Mode::Playing, Key::Escape), Some(Mode::Paused));
        assert_eq!(next(Mode::Paused, Key::Letter('P')), Some(Mode::Playing));
        assert_eq!(next(Mode::Paused, Key::Escape), Some(Mode::Playing));
        assert_eq!(next(Mode::Paused, Key::Letter('R')), None);

        let t = key(Mode::Playing, Key::Letter('R'), true).unwrap();
        assert_eq!((t.next, t.effects), (Mode::Playing, vec![Effect::ResetRound]));
        let t = key(Mode::Playing, Key::Letter('S'), true).unwrap();
        assert_eq!((t.next, t.effects), (Mode::Playing, vec![Effect::SaveGame]));
    }

    #[test]
    fn test_enter_resumes_restored_round() {
        let ready = Flags {
            two_player: true,
            resume_ready: true,
        };
        let t = plan(Mode::Menu, SessionEvent::Key(Key::Enter), ready).unwrap();
        assert_eq!((t.next, t.effects), (Mode::Playing, vec![Effect::ResumeRound]));

        // `1` still starts a fresh game
        let t = plan(Mode::Menu, SessionEvent::Key(Key::Digit(1)), ready).unwrap();
        assert_eq!(t.next, Mode::NameEntry(NameStage::Player1));
    }

    #[test]
    fn test_lowercase_letters_match_bindings() {
        assert_eq!(next(Mode::Playing, Key::Letter('p')), Some(Mode::Paused));
        assert_eq!(next(Mode::Paused, Key::Letter('p')), Some(Mode::Playing));
        let t = key(Mode::Playing, Key::Letter('s'), true).unwrap();
        assert_eq!(t.effects, vec![Effect::SaveGame]);
        let t = key(Mode::GameOver(Side::Left), Key::Letter('r'), true).unwrap();
        assert_eq!(t.effects, vec![Effect::StartRound]);
    }

    #[test]
    fn test_round_won() {
        let t = plan(Mode::Playing, SessionEvent::RoundWon(Side::Right), flags(true)).unwrap();
        assert_eq!(t.next, Mode::GameOver(Side::Right));
        assert_eq!(t.effects, vec![Effect::RecordHighScore(Side::Right)]);

        assert_eq!(
            plan(Mode::Paused, SessionEvent::RoundWon(Side::Left), flags(true)),
            None
        );
    }

    #[test]
    fn test_game_over_and_high_scores() {
        let over = Mode::GameOver(Side::Left);
        assert_eq!(next(over, Key::Enter), Some(Mode::Menu));
        assert_eq!(next(over, Key::Space), Some(Mode::Menu));
        let t = key(over, Key::Letter('R'), true).unwrap();
        assert_eq!((t.next, t.effects), (Mode::Playing, vec![Effect::StartRound]));

        assert_eq!(next(Mode::HighScoreView, Key::Space), Some(Mode::Menu));
        assert_eq!(next(Mode::HighScoreView, Key::Escape), Some(Mode::Menu));
        assert_eq!(next(Mode::HighScoreView, Key::Enter), None);
    }

    #[test]
    fn test_mode_codes() {
        assert_eq!(Mode::Menu.code(), 0);
        assert_eq!(Mode::Playing.code(), 1);
        assert_eq!(Mode::Paused.code(), 2);
        assert_eq!(Mode::GameOver(Side::Left).code(), 3);
        assert_eq!(Mode::HighScoreView.code(), 4);
    }
}
