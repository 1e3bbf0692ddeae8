//! Kart Dash - an endless-runner kart game
//!
//! Core modules:
//! - `sim`: Simulation (input, entities, spawning, collisions, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Procedural music and sound effects
//! - `platform`: Browser input translation
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{QualityPreset, Settings};
pub use tuning::{Tuning, TuningError};

/// Game loop constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Largest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
