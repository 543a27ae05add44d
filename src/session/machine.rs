//! The running session: mode, names, match and ledger
//!
//! Every key press and every simulation win goes through `mode::plan`; the
//! resulting effects are applied here.

use std::path::PathBuf;
use std::time::Duration;

use super::mode::{Effect, Flags, Mode, NameStage, SessionEvent, plan};
use super::name_entry::NameBuffer;
use crate::consts::{COMPUTER_NAME, DEFAULT_PLAYER1_NAME, DEFAULT_PLAYER2_NAME};
use crate::error::PersistenceError;
use crate::highscores::HighScores;
use crate::persistence::SaveSnapshot;
use crate::platform::Key;
use crate::settings::Settings;
use crate::sim::{GameEvent, Match, Side, TickInput, tick};

/// Outcome of the last save/load request, for on-screen feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Saved,
    SaveFailed,
    Loaded,
    NoSavedGame,
    LoadFailed,
}

/// Complete in-memory state of one running game
#[derive(Debug, Clone)]
pub struct Session {
    pub mode: Mode,
    pub two_player: bool,
    pub player1_name: String,
    pub player2_name: String,
    pub name_entry: NameBuffer,
    pub game: Match,
    pub high_scores: HighScores,
    /// Ledger rank earned by the last winner, if any
    pub last_rank: Option<usize>,
    /// Save/load feedback, cleared on the next mode change
    pub notice: Option<Notice>,
    /// Set by a successful load; Enter on the menu resumes that round
    pub resume_ready: bool,
    save_path: PathBuf,
    quit_requested: bool,
}

impl Session {
    pub fn new(seed: u64, high_scores: HighScores, save_path: impl Into<PathBuf>) -> Self {
        Self {
            mode: Mode::Menu,
            two_player: true,
            player1_name: DEFAULT_PLAYER1_NAME.to_string(),
            player2_name: DEFAULT_PLAYER2_NAME.to_string(),
            name_entry: NameBuffer::default(),
            game: Match::new(seed),
            high_scores,
            last_rank: None,
            notice: None,
            resume_ready: false,
            save_path: save_path.into(),
            quit_requested: false,
        }
    }

    /// Build a session from settings, loading the ledger from disk
    pub fn from_settings(settings: &Settings) -> Self {
        let seed = settings.resolve_seed();
        log::debug!("Session seed: {}", seed);
        let high_scores = HighScores::load(&settings.highscores_path);
        Self::new(seed, high_scores, settings.save_path.clone())
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Name shown for the right paddle
    pub fn right_name(&self) -> &str {
        if self.two_player {
            self.player2_name.as_str()
        } else {
            COMPUTER_NAME
        }
    }

    /// Display name of the player on `side`
    pub fn name_of(&self, side: Side) -> &str {
        match side {
            Side::Left => self.player1_name.as_str(),
            Side::Right => self.right_name(),
        }
    }

    /// Dispatch a key press
    pub fn handle_key(&mut self, key: Key) {
        self.handle_event(SessionEvent::Key(key));
    }

    /// Run an event through the transition table. Returns whether it was
    /// handled.
    pub fn handle_event(&mut self, event: SessionEvent) -> bool {
        let flags = Flags {
            two_player: self.two_player,
            resume_ready: self.resume_ready,
        };
        let Some(transition) = plan(self.mode, event, flags) else {
            return false;
        };

        let leaving = transition.next != self.mode;
        if leaving {
            self.notice = None;
        }
        for effect in &transition.effects {
            self.apply(*effect);
        }
        if leaving {
            log::debug!("Mode {:?} -> {:?}", self.mode, transition.next);
            self.mode = transition.next;
        }
        true
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::SelectPlayers { two_player } => {
                self.two_player = two_player;
                self.resume_ready = false;
                self.name_entry.clear();
            }
            Effect::TypeChar(c) => {
                self.name_entry.push(c);
            }
            Effect::Backspace => self.name_entry.pop(),
            Effect::CommitName(stage) => {
                let typed = self.name_entry.take();
                match stage {
                    NameStage::Player1 => {
                        self.player1_name =
                            typed.unwrap_or_else(|| DEFAULT_PLAYER1_NAME.to_string());
                    }
                    NameStage::Player2 => {
                        self.player2_name =
                            typed.unwrap_or_else(|| DEFAULT_PLAYER2_NAME.to_string());
                    }
                }
            }
            Effect::CancelNameEntry => self.name_entry.clear(),
            Effect::StartRound => {
                self.game.vs_computer = !self.two_player;
                self.game.reset_round();
                self.last_rank = None;
                self.resume_ready = false;
                log::info!(
                    "New round: {} vs {}",
                    self.player1_name,
                    self.right_name()
                );
            }
            Effect::ResumeRound => {
                self.game.vs_computer = !self.two_player;
                self.last_rank = None;
                self.resume_ready = false;
                log::info!(
                    "Resuming {} vs {} at {:?}",
                    self.player1_name,
                    self.right_name(),
                    self.game.scores()
                );
            }
            Effect::ResetRound => self.game.reset_round(),
            Effect::SaveGame => {
                self.notice = Some(match self.save_game() {
                    Ok(()) => Notice::Saved,
                    Err(e) => {
                        log::warn!("Could not save game: {}", e);
                        Notice::SaveFailed
                    }
                });
            }
            Effect::LoadGame => {
                self.notice = Some(match self.load_game() {
                    Ok(()) => {
                        self.resume_ready = true;
                        Notice::Loaded
                    }
                    Err(PersistenceError::Missing(_)) => {
                        log::warn!("No saved game found");
                        Notice::NoSavedGame
                    }
                    Err(e) => {
                        log::warn!("Could not load game: {}", e);
                        Notice::LoadFailed
                    }
                });
            }
            Effect::RecordHighScore(side) => self.record_high_score(side),
            Effect::Quit => {
                log::info!("Quit requested");
                self.quit_requested = true;
            }
        }
    }

    fn record_high_score(&mut self, side: Side) {
        let score = self.game.paddle(side).score;
        let name = self.name_of(side).to_string();
        log::info!("{} wins {:?}", name, self.game.scores());
        self.last_rank = self.high_scores.add_score(&name, score);
        if let Some(rank) = self.last_rank {
            log::info!("New high score for {}: {} (rank {})", name, score, rank);
        }
    }

    /// Current session as a save-slot snapshot
    pub fn snapshot(&self) -> SaveSnapshot {
        let (score1, score2) = self.game.scores();
        SaveSnapshot {
            score1,
            score2,
            two_player: self.two_player,
            mode_code: self.mode.code(),
            player1_name: self.player1_name.clone(),
            player2_name: self.player2_name.clone(),
        }
    }

    pub fn save_game(&self) -> Result<(), PersistenceError> {
        self.snapshot().write(&self.save_path)
    }

    /// Restore scores, player count and names from the save slot. Nothing
    /// changes unless the whole file validates. Entities go back to their
    /// default positions; the mode is left alone until the round is resumed.
    pub fn load_game(&mut self) -> Result<(), PersistenceError> {
        let snapshot = SaveSnapshot::read(&self.save_path)?;
        self.restore(&snapshot);
        Ok(())
    }

    pub fn restore(&mut self, snapshot: &SaveSnapshot) {
        self.game.set_scores(snapshot.score1, snapshot.score2);
        self.two_player = snapshot.two_player;
        self.game.vs_computer = !snapshot.two_player;
        self.player1_name = snapshot.player1_name.clone();
        self.player2_name = snapshot.player2_name.clone();
        self.game.board.flash = None;
        for paddle in &mut self.game.paddles {
            paddle.clear_flash();
        }
        self.game.reset_positions();
        log::debug!("Restored snapshot saved in mode {}", snapshot.mode_code);
    }

    /// Advance one frame: blink the name cursor, step the simulation while
    /// playing, and hand back the one-shot events for the sinks.
    pub fn update(&mut self, input: &TickInput, elapsed: Duration) -> Vec<GameEvent> {
        match self.mode {
            Mode::NameEntry(_) => {
                self.name_entry.advance(elapsed);
                Vec::new()
            }
            Mode::Playing => {
                let outcome = tick(&mut self.game, input);
                if let Some(winner) = outcome.winner {
                    self.handle_event(SessionEvent::RoundWon(winner));
                }
                outcome.events
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::{Ball, Paddle};
    use glam::Vec2;
    use tempfile::TempDir;

    fn session(dir: &TempDir) -> Session {
        let scores = HighScores::load(&dir.path().join("highscores.txt"));
        Session::new(12345, scores, dir.path().join("game_save.dat"))
    }

    fn type_str(session: &mut Session, s: &str) {
        for c in s.chars() {
            if let Some(key) = Key::from_char(c) {
                session.handle_key(key);
            }
        }
    }

    fn start_two_player(session: &mut Session, p1: &str, p2: &str) {
        session.handle_key(Key::Digit(1));
        type_str(session, p1);
        session.handle_key(Key::Enter);
        type_str(session, p2);
        session.handle_key(Key::Enter);
    }

    /// Put the ball one tick away from leaving through `exit`
    fn about_to_exit(session: &mut Session, exit: Side) {
        let ball = &mut session.game.ball;
        ball.pos = match exit {
            Side::Left => Vec2::new(1.0, 20.0),
            Side::Right => Vec2::new(FIELD_WIDTH - 1.0, 20.0),
        };
        ball.vel = match exit {
            Side::Left => Vec2::new(-BALL_SPEED, 0.0),
            Side::Right => Vec2::new(BALL_SPEED, 0.0),
        };
    }

    #[test]
    fn test_starts_in_menu_with_defaults() {
        let dir = TempDir::new().unwrap();
        let s = session(&dir);
        assert_eq!(s.mode, Mode::Menu);
        assert_eq!(s.player1_name, "Player 1");
        assert_eq!(s.player2_name, "Player 2");
        assert!(!s.quit_requested());
    }

    #[test]
    fn test_two_player_name_entry() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        s.handle_key(Key::Digit(1));
        assert_eq!(s.mode, Mode::NameEntry(NameStage::Player1));
        type_str(&mut s, "ada");
        s.handle_key(Key::Enter);
        assert_eq!(s.mode, Mode::NameEntry(NameStage::Player2));
        assert_eq!(s.player1_name, "ADA");
        assert_eq!(s.name_entry.text(), "");

        s.handle_key(Key::Enter);
        assert_eq!(s.mode, Mode::Playing);
        assert_eq!(s.player2_name, "Player 2");
        assert!(!s.game.vs_computer);
        assert_eq!(s.right_name(), "Player 2");
    }

    #[test]
    fn test_single_player_goes_straight_to_play() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        s.handle_key(Key::Digit(2));
        type_str(&mut s, "lin");
        s.handle_key(Key::Enter);
        assert_eq!(s.mode, Mode::Playing);
        assert!(s.game.vs_computer);
        assert_eq!(s.right_name(), "Computer");
    }

    #[test]
    fn test_cancel_name_entry() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        s.handle_key(Key::Digit(1));
        type_str(&mut s, "zed");
        s.handle_key(Key::Escape);
        assert_eq!(s.mode, Mode::Menu);
        assert_eq!(s.name_entry.text(), "");
        assert_eq!(s.player1_name, "Player 1");
        assert!(!s.quit_requested());
    }

    #[test]
    fn test_names_persist_until_overwritten() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        start_two_player(&mut s, "ada", "lin");
        s.handle_key(Key::Letter('P'));
        assert_eq!(s.mode, Mode::Paused);
        s.handle_key(Key::Letter('P'));
        assert_eq!(s.mode, Mode::Playing);
        assert_eq!((s.player1_name.as_str(), s.player2_name.as_str()), ("ADA", "LIN"));
    }

    #[test]
    fn test_paused_does_not_tick() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        start_two_player(&mut s, "a", "b");
        s.handle_key(Key::Escape);
        let before = s.game.ball.pos;
        assert!(s.update(&TickInput::default(), Duration::from_millis(16)).is_empty());
        assert_eq!(s.game.ball.pos, before);
        assert_eq!(s.game.time_ticks, 0);
    }

    #[test]
    fn test_reset_in_play() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        start_two_player(&mut s, "a", "b");
        s.game.set_scores(4, 2);
        s.handle_key(Key::Letter('R'));
        assert_eq!(s.mode, Mode::Playing);
        assert_eq!(s.game.scores(), (0, 0));
    }

    #[test]
    fn test_win_goes_to_game_over_and_records() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        start_two_player(&mut s, "ada", "lin");
        s.game.set_scores(3, WIN_SCORE - 1);
        about_to_exit(&mut s, Side::Left);

        let events = s.update(&TickInput::default(), Duration::from_millis(16));

        assert!(events.contains(&GameEvent::Won(Side::Right)));
        assert_eq!(s.mode, Mode::GameOver(Side::Right));
        assert_eq!(s.last_rank, Some(1));
        let top = s.high_scores.top().unwrap();
        assert_eq!((top.name.as_str(), top.score), ("LIN", WIN_SCORE));

        // Ledger was written to disk
        let reloaded = HighScores::load(&dir.path().join("highscores.txt"));
        assert_eq!(reloaded.entries.len(), 1);

        // No more ticks once the round is over
        let ticks = s.game.time_ticks;
        s.update(&TickInput::default(), Duration::from_millis(16));
        assert_eq!(s.game.time_ticks, ticks);
    }

    #[test]
    fn test_computer_win_recorded_as_computer() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        s.handle_key(Key::Digit(2));
        s.handle_key(Key::Enter);
        s.game.set_scores(0, WIN_SCORE - 1);
        about_to_exit(&mut s, Side::Left);

        s.update(&TickInput::default(), Duration::from_millis(16));
        assert_eq!(s.mode, Mode::GameOver(Side::Right));
        assert_eq!(s.high_scores.top().map(|e| e.name.as_str()), Some("Computer"));
    }

    #[test]
    fn test_game_over_restart_and_menu() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        start_two_player(&mut s, "a", "b");
        s.game.set_scores(WIN_SCORE - 1, 0);
        about_to_exit(&mut s, Side::Right);
        s.update(&TickInput::default(), Duration::from_millis(16));
        assert_eq!(s.mode, Mode::GameOver(Side::Left));

        s.handle_key(Key::Letter('R'));
        assert_eq!(s.mode, Mode::Playing);
        assert_eq!(s.game.scores(), (0, 0));
        assert_eq!(s.last_rank, None);

        s.game.set_scores(WIN_SCORE - 1, 0);
        about_to_exit(&mut s, Side::Right);
        s.update(&TickInput::default(), Duration::from_millis(16));
        s.handle_key(Key::Space);
        assert_eq!(s.mode, Mode::Menu);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        start_two_player(&mut s, "ada", "lin");
        s.game.set_scores(7, 3);
        s.handle_key(Key::Letter('S'));
        assert_eq!(s.notice, Some(Notice::Saved));

        let mut fresh = session(&dir);
        fresh.handle_key(Key::Digit(2));
        fresh.handle_key(Key::Escape);
        assert!(!fresh.two_player);
        fresh.game.paddles[0].pos.y = 0.0;
        fresh.game.ball.pos = Vec2::new(1.0, 1.0);

        fresh.handle_key(Key::Digit(4));

        assert_eq!(fresh.mode, Mode::Menu);
        assert_eq!(fresh.notice, Some(Notice::Loaded));
        assert_eq!(fresh.game.scores(), (7, 3));
        assert!(fresh.two_player);
        assert_eq!(fresh.player1_name, "ADA");
        assert_eq!(fresh.player2_name, "LIN");
        assert_eq!(fresh.game.paddles[0].pos, Paddle::home(Side::Left));
        assert_eq!(fresh.game.ball.pos, Ball::new().pos);
    }

    #[test]
    fn test_resume_after_load_keeps_scores_and_names() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("game_save.dat"), "7\n3\n1\n1\nADA\nLIN\n").unwrap();
        let mut s = session(&dir);

        s.handle_key(Key::Digit(4));
        assert_eq!(s.mode, Mode::Menu);
        assert!(s.resume_ready);

        s.handle_key(Key::Enter);
        assert_eq!(s.mode, Mode::Playing);
        assert_eq!(s.game.scores(), (7, 3));
        assert_eq!((s.player1_name.as_str(), s.player2_name.as_str()), ("ADA", "LIN"));
        assert!(!s.game.vs_computer);
        assert!(!s.resume_ready);

        // Play carries on from the restored score
        s.game.set_scores(7, WIN_SCORE - 1);
        about_to_exit(&mut s, Side::Left);
        s.update(&TickInput::default(), Duration::from_millis(16));
        assert_eq!(s.mode, Mode::GameOver(Side::Right));
        assert_eq!(s.high_scores.top().map(|e| e.name.as_str()), Some("LIN"));
    }

    #[test]
    fn test_new_game_discards_restored_round() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("game_save.dat"), "7\n3\n0\n1\nADA\nLIN\n").unwrap();
        let mut s = session(&dir);
        s.handle_key(Key::Digit(4));
        assert!(s.game.vs_computer);

        s.handle_key(Key::Digit(1));
        s.handle_key(Key::Escape);
        assert!(!s.resume_ready);

        // Enter is back to starting a two-player game
        s.handle_key(Key::Enter);
        assert_eq!(s.mode, Mode::NameEntry(NameStage::Player1));
    }

    #[test]
    fn test_notice_cleared_on_mode_change() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        start_two_player(&mut s, "ada", "lin");
        s.handle_key(Key::Letter('S'));
        assert_eq!(s.notice, Some(Notice::Saved));

        s.handle_key(Key::Letter('P'));
        assert_eq!(s.mode, Mode::Paused);
        assert_eq!(s.notice, None);
    }

    #[test]
    fn test_load_notice_survives_until_menu_is_left() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        s.handle_key(Key::Digit(4));
        assert_eq!(s.notice, Some(Notice::NoSavedGame));
        s.handle_key(Key::Digit(3));
        assert_eq!(s.notice, None);
    }

    #[test]
    fn test_load_without_save_is_recoverable() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        s.handle_key(Key::Digit(4));
        assert_eq!(s.mode, Mode::Menu);
        assert_eq!(s.notice, Some(Notice::NoSavedGame));
        assert!(!s.resume_ready);
        assert!(matches!(s.load_game(), Err(PersistenceError::Missing(_))));
    }

    #[test]
    fn test_corrupt_save_keeps_state() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("game_save.dat"), "5\n2\n1\n").unwrap();
        let mut s = session(&dir);
        s.game.set_scores(1, 1);
        s.player1_name = "KEEP".into();

        s.handle_key(Key::Digit(4));

        assert_eq!(s.notice, Some(Notice::LoadFailed));
        assert_eq!(s.game.scores(), (1, 1));
        assert_eq!(s.player1_name, "KEEP");
    }

    #[test]
    fn test_high_score_view_and_quit() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        s.handle_key(Key::Digit(3));
        assert_eq!(s.mode, Mode::HighScoreView);
        s.handle_key(Key::Escape);
        assert_eq!(s.mode, Mode::Menu);
        assert!(!s.quit_requested());
        s.handle_key(Key::Escape);
        assert!(s.quit_requested());
    }

    #[test]
    fn test_cursor_blinks_only_during_name_entry() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        s.update(&TickInput::default(), Duration::from_millis(600));
        assert!(s.name_entry.cursor_visible());

        s.handle_key(Key::Digit(1));
        s.update(&TickInput::default(), Duration::from_millis(600));
        assert!(!s.name_entry.cursor_visible());
    }
}
