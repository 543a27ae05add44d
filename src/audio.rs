//! Audio cues
//!
//! Procedurally described sound effects - no external files needed. The
//! manager turns cues into scheduled notes; the platform layer drains and
//! synthesizes them. Without an output device every cue is a no-op.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits top/bottom wall
    WallHit,
    /// A point was scored
    Score,
    /// A round was won
    Win,
}

impl SoundEffect {
    /// Cue for a simulation event
    pub fn for_event(event: &GameEvent) -> SoundEffect {
        match event {
            GameEvent::PaddleHit(_) => SoundEffect::PaddleHit,
            GameEvent::WallBounce => SoundEffect::WallHit,
            GameEvent::Scored(_) => SoundEffect::Score,
            GameEvent::Won(_) => SoundEffect::Win,
        }
    }
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
}

/// One oscillator burst, relative to the moment the cue fired
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub freq: f32,
    pub waveform: Waveform,
    /// Seconds after the cue
    pub delay: f32,
    /// Seconds of sound
    pub duration: f32,
    /// Peak gain, already scaled by volume
    pub gain: f32,
}

/// Anything that can receive sound cues
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Audio manager for the game
#[derive(Debug)]
pub struct AudioManager {
    available: bool,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    pending: Vec<Note>,
}

impl AudioManager {
    /// `available` reports whether the platform found an output device
    pub fn new(available: bool) -> Self {
        if !available {
            log::warn!("No audio output device - audio disabled");
        }
        Self {
            available,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            pending: Vec::new(),
        }
    }

    pub fn from_settings(settings: &Settings, available: bool) -> Self {
        let mut audio = Self::new(available);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Notes scheduled since the last drain
    pub fn drain(&mut self) -> Vec<Note> {
        std::mem::take(&mut self.pending)
    }

    // === Sound generators ===

    fn notes(effect: SoundEffect) -> Vec<Note> {
        let note = |freq, waveform, delay, duration, gain| Note {
            freq,
            waveform,
            delay,
            duration,
            gain,
        };
        match effect {
            // Solid thump
            SoundEffect::PaddleHit => vec![note(150.0, Waveform::Sine, 0.0, 0.15, 0.6)],
            // Higher ping
            SoundEffect::WallHit => vec![note(400.0, Waveform::Sine, 0.0, 0.1, 0.3)],
            // Rising two-tone
            SoundEffect::Score => vec![
                note(500.0, Waveform::Square, 0.0, 0.12, 0.25),
                note(750.0, Waveform::Square, 0.1, 0.2, 0.25),
            ],
            // Fanfare
            SoundEffect::Win => [400.0, 500.0, 600.0, 800.0]
                .iter()
                .enumerate()
                .map(|(i, freq)| note(*freq, Waveform::Triangle, i as f32 * 0.1, 0.5, 0.3))
                .collect(),
        }
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if !self.available || vol <= 0.0 {
            return;
        }
        log::trace!("Sound cue {:?}", effect);
        self.pending.extend(Self::notes(effect).into_iter().map(|mut n| {
            n.gain *= vol;
            n
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Side;

    #[test]
    fn test_event_mapping() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PaddleHit(Side::Left)),
            SoundEffect::PaddleHit
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::WallBounce), SoundEffect::WallHit);
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Scored(Side::Right)),
            SoundEffect::Score
        );
    }

    #[test]
    fn test_unavailable_device_is_silent() {
        let mut audio = AudioManager::new(false);
        audio.play(SoundEffect::PaddleHit);
        assert!(audio.drain().is_empty());
    }

    #[test]
    fn test_volume_scales_notes() {
        let mut audio = AudioManager::new(true);
        audio.set_master_volume(0.5);
        audio.play(SoundEffect::PaddleHit);
        let notes = audio.drain();
        assert_eq!(notes.len(), 1);
        assert!((notes[0].gain - 0.3).abs() < 1e-6);
        assert!(audio.drain().is_empty());
    }

    #[test]
    fn test_muted_is_silent() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        let mut audio = AudioManager::from_settings(&settings, true);
        audio.play(SoundEffect::Win);
        assert!(audio.drain().is_empty());
    }
}
