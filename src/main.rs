//! Ping Pong entry point
//!
//! Native headless driver: runs the fixed-rate loop against a scripted
//! attract-mode key sequence, with the left paddle on autopilot. Pass
//! `--fast` to skip frame pacing.

use std::collections::VecDeque;
use std::path::Path;
use std::time::{Duration, Instant};

use ping_pong::audio::{AudioManager, AudioSink, SoundEffect};
use ping_pong::platform::{HeldKeys, Key};
use ping_pong::renderer::{Frame, HeadlessRenderer, Renderer};
use ping_pong::sim::ai::{AiMove, decide};
use ping_pong::{Mode, Session, Settings};

/// Give up on the demo after ten minutes of simulated play
const MAX_FRAMES: u64 = 60 * 60 * 10;

/// Keys the demo "presses", one per frame
fn attract_script() -> VecDeque<Key> {
    let mut keys = VecDeque::from([Key::Digit(2)]);
    keys.extend("DEMO".chars().filter_map(Key::from_char));
    keys.push_back(Key::Enter);
    keys
}

/// Hold the left paddle's keys the way the computer would
fn autopilot(session: &Session) -> HeldKeys {
    let game = &session.game;
    match decide(&game.ball, &game.paddles[0]) {
        AiMove::Up => HeldKeys {
            w: true,
            ..Default::default()
        },
        AiMove::Down => HeldKeys {
            d: true,
            ..Default::default()
        },
        AiMove::Hold => HeldKeys::default(),
    }
}

fn main() {
    env_logger::init();
    log::info!("Ping Pong (headless) starting...");

    let realtime = !std::env::args().any(|arg| arg == "--fast");
    let settings = Settings::load(Path::new(Settings::FILE_NAME));
    let frame_time = Duration::from_secs_f64(1.0 / f64::from(settings.tick_rate_hz.max(1)));

    let mut session = Session::from_settings(&settings);
    let mut audio = AudioManager::from_settings(&settings, false);
    let mut renderer = HeadlessRenderer::new(true);
    let mut script = attract_script();

    let mut last = Instant::now();
    let mut frames = 0u64;
    while !session.quit_requested() && frames < MAX_FRAMES {
        let now = Instant::now();
        let elapsed = now - last;
        last = now;

        if let Some(key) = script.pop_front() {
            session.handle_key(key);
        }

        let held = autopilot(&session);
        let events = session.update(&held.to_tick_input(), elapsed);
        for event in &events {
            audio.play(SoundEffect::for_event(event));
        }
        audio.drain();
        renderer.draw(&Frame::capture(&session));

        if matches!(session.mode, Mode::GameOver(_)) && script.is_empty() {
            // Back to the menu, peek at the high scores, then quit
            script.extend([Key::Space, Key::Digit(3), Key::Escape, Key::Escape]);
        }

        frames += 1;
        if realtime {
            std::thread::sleep(frame_time.saturating_sub(now.elapsed()));
        }
    }

    if !session.quit_requested() {
        log::warn!("Demo stopped after {} frames without a winner", frames);
    }
    log::info!("Game ended after {} frames", frames);
}
