//! Sound identities and the music ducking rules.
//!
//! Playback itself belongs to an [`AudioBackend`]; the web crate drives
//! WebAudio, tests use a recorder.

use crate::constants::{CLICK_VOLUME, MUSIC_DUCKED_VOLUME, MUSIC_VOLUME, PIANO_KEY_VOLUME};
use crate::registry::PianoKey;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundId {
    /// Looping background track.
    Music,
    /// UI click used by buttons and toggles.
    Click,
    Piano(PianoKey),
}

impl SoundId {
    pub fn base_volume(self) -> f32 {
        match self {
            SoundId::Music => MUSIC_VOLUME,
            SoundId::Click => CLICK_VOLUME,
            SoundId::Piano(_) => PIANO_KEY_VOLUME,
        }
    }

    pub fn looping(self) -> bool {
        matches!(self, SoundId::Music)
    }
}

pub trait AudioBackend {
    fn play(&mut self, sound: SoundId);
    fn volume(&self, sound: SoundId) -> f32;
    fn set_volume(&mut self, sound: SoundId, volume: f32);
    fn fade(&mut self, sound: SoundId, from: f32, to: f32, duration_ms: f64);
    /// Silence a sound without touching its volume.
    fn set_muted(&mut self, sound: SoundId, muted: bool);
}

/// Mute and ducking flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AudioState {
    pub muted: bool,
    pub music_ducked: bool,
}

impl AudioState {
    /// Fade the music out under a foreground sound. No-op when muted or
    /// already ducked.
    pub fn duck(&mut self, audio: &mut dyn AudioBackend, fade_ms: f64) {
        if self.muted || self.music_ducked {
            return;
        }
        self.music_ducked = true;
        let from = audio.volume(SoundId::Music);
        audio.fade(SoundId::Music, from, MUSIC_DUCKED_VOLUME, fade_ms);
    }

    /// Bring the music back up. While muted only the flag is cleared; the
    /// volume is restored by unmuting.
    pub fn unduck(&mut self, audio: &mut dyn AudioBackend, fade_ms: f64) {
        if self.muted {
            self.music_ducked = false;
            return;
        }
        if !self.music_ducked {
            return;
        }
        self.music_ducked = false;
        audio.fade(SoundId::Music, MUSIC_DUCKED_VOLUME, MUSIC_VOLUME, fade_ms);
    }

    /// Apply the mute flag to every sound. Music is set outright, so any
    /// duck in progress is over.
    pub fn apply_mute(&mut self, audio: &mut dyn AudioBackend) {
        self.music_ducked = false;
        let music = if self.muted { 0.0 } else { MUSIC_VOLUME };
        audio.set_volume(SoundId::Music, music);
        audio.set_muted(SoundId::Click, self.muted);
        for key in PianoKey::all() {
            audio.set_muted(SoundId::Piano(key), self.muted);
        }
    }
}
