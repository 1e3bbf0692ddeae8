//! Procedural audio
//!
//! `synth` renders samples and is platform independent. `web` plays them
//! through the Web Audio API and only exists on wasm32.

pub mod synth;

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

use crate::sim::GameEvent;

/// What the audio side should do for a simulation event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    CoinSound,
    CrashSound,
    MusicOn,
    MusicOff,
}

impl From<GameEvent> for AudioCue {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::CoinCollected => AudioCue::CoinSound,
            GameEvent::Crash => AudioCue::CrashSound,
            GameEvent::MusicStart => AudioCue::MusicOn,
            GameEvent::MusicStop => AudioCue::MusicOff,
        }
    }
}

/// Tracks whether the music loop is running so start/stop stay idempotent
#[derive(Debug, Clone, Copy, Default)]
pub struct MusicGate {
    playing: bool,
}

impl MusicGate {
    /// True if the loop should actually be started now
    pub fn start(&mut self) -> bool {
        !std::mem::replace(&mut self.playing, true)
    }

    /// True if a running loop should actually be stopped now
    pub fn stop(&mut self) -> bool {
        std::mem::replace(&mut self.playing, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_mapping() {
        assert_eq!(AudioCue::from(GameEvent::CoinCollected), AudioCue::CoinSound);
        assert_eq!(AudioCue::from(GameEvent::Crash), AudioCue::CrashSound);
        assert_eq!(AudioCue::from(GameEvent::MusicStart), AudioCue::MusicOn);
        assert_eq!(AudioCue::from(GameEvent::MusicStop), AudioCue::MusicOff);
    }

    #[test]
    fn test_music_gate_is_idempotent() {
        let mut gate = MusicGate::default();
        assert!(!gate.stop());
        assert!(gate.start());
        assert!(!gate.start());
        assert!(gate.stop());
        assert!(!gate.stop());
        assert!(gate.start());
    }
}
