//! Game state and lifecycle
//!
//! `GameState` is the whole simulation context: no statics, no globals.
//! The frame loop owns one and passes it to `tick` every step.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{EntityStore, Player};
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start command
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Frozen mid-run, resumable
    Paused,
    /// Crashed; only restart leaves this phase
    GameOver,
}

/// Discrete side effects for the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    CoinCollected,
    Crash,
    MusicStart,
    MusicStop,
}

/// Values the HUD displays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub speed: u32,
    pub distance: u32,
    pub paused: bool,
    pub game_over: bool,
    /// Set once the run has ended
    pub final_score: Option<u64>,
    pub music_enabled: bool,
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    /// Forward speed, always within [0, max_speed]
    pub speed: f32,
    pub distance: f32,
    pub music_enabled: bool,
    /// Simulation ticks since the last restart
    pub tick_count: u64,
    pub player: Player,
    pub entities: EntityStore,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(Tuning::default(), seed)
    }

    /// Create an idle game with custom tuning
    pub fn with_tuning(tuning: Tuning, seed: u64) -> Self {
        Self {
            player: Player::new(&tuning),
            entities: EntityStore::new(&tuning),
            phase: GamePhase::Idle,
            score: 0,
            speed: 0.0,
            distance: 0.0,
            music_enabled: true,
            tick_count: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            tuning,
        }
    }

    /// A run is in progress (running or paused)
    pub fn is_running(&self) -> bool {
        matches!(self.phase, GamePhase::Running | GamePhase::Paused)
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Pending events, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Hand pending events to the caller
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Idle -> Running
    pub fn start(&mut self) {
        if self.phase != GamePhase::Idle {
            log::debug!("start ignored in {:?}", self.phase);
            return;
        }
        self.phase = GamePhase::Running;
        if self.music_enabled {
            self.emit(GameEvent::MusicStart);
        }
        log::info!("Run started");
    }

    /// Running <-> Paused
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Running => {
                self.phase = GamePhase::Paused;
                self.emit(GameEvent::MusicStop);
                log::info!("Paused at score {}", self.score);
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Running;
                if self.music_enabled {
                    self.emit(GameEvent::MusicStart);
                }
                log::info!("Resumed");
            }
            GamePhase::Idle | GamePhase::GameOver => {
                log::debug!("pause ignored in {:?}", self.phase);
            }
        }
    }

    /// Reset the run and wait for a fresh start command
    pub fn restart(&mut self) {
        self.phase = GamePhase::Idle;
        self.score = 0;
        self.speed = 0.0;
        self.distance = 0.0;
        self.tick_count = 0;
        self.player = Player::new(&self.tuning);
        self.entities.reset(&self.tuning);
        self.emit(GameEvent::MusicStop);
        log::info!("Game reset");
    }

    /// Flip background music without touching the run phase
    pub fn toggle_music(&mut self) {
        self.music_enabled = !self.music_enabled;
        if self.music_enabled && self.phase == GamePhase::Running {
            self.emit(GameEvent::MusicStart);
        } else {
            self.emit(GameEvent::MusicStop);
        }
    }

    /// Running -> GameOver
    pub(crate) fn crash(&mut self) {
        self.phase = GamePhase::GameOver;
        self.emit(GameEvent::MusicStop);
        self.emit(GameEvent::Crash);
        log::info!(
            "Game over: score {}, distance {}",
            self.score,
            self.distance.round()
        );
    }

    /// Current display values
    pub fn hud(&self) -> Hud {
        let game_over = self.is_game_over();
        Hud {
            score: self.score,
            speed: self.speed.round() as u32,
            distance: self.distance.round() as u32,
            paused: self.is_paused(),
            game_over,
            final_score: game_over.then_some(self.score),
            music_enabled: self.music_enabled,
        }
    }
}
