//! Data-driven game balance
//!
//! Every gameplay number lives here so a run can be re-tuned from JSON
//! without touching the simulation. All rates are per tick.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a [`Tuning`]
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("canvas must have a positive size (got {width}x{height})")]
    Canvas { width: f32, height: f32 },
    #[error("road [{left}, {right}] is narrower than the player ({player_width})")]
    Road {
        left: f32,
        right: f32,
        player_width: f32,
    },
    #[error("at least one lane is required")]
    NoLanes,
    #[error("max speed must be positive (got {0})")]
    MaxSpeed(f32),
    #[error("{name} must be within [0, 1] (got {value})")]
    Probability { name: &'static str, value: f32 },
    #[error("{name} must not be negative (got {value})")]
    Negative { name: &'static str, value: f32 },
    #[error("{name} must be a finite number (got {value})")]
    NonFinite { name: &'static str, value: f32 },
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Leftmost x the player may occupy
    pub road_left: f32,
    /// Rightmost x the player's right edge may reach
    pub road_right: f32,
    /// Lane centres obstacles and coins spawn on
    pub lanes: Vec<f32>,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Distance from the bottom of the canvas to the player's top edge
    pub player_bottom_offset: f32,
    /// Horizontal pixels per tick while steering
    pub lateral_speed: f32,
    pub max_speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,

    // === Scrolling ===
    pub base_scroll: f32,
    pub scroll_factor: f32,
    pub distance_factor: f32,

    // === Spawning ===
    pub obstacle_base_rate: f32,
    pub obstacle_speed_factor: f32,
    pub coin_rate: f32,

    // === Scoring ===
    pub pass_bonus: u64,
    pub coin_bonus: u64,

    // === Entity sizes ===
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    pub coin_size: f32,
    /// Coin spin per tick (radians, cosmetic)
    pub coin_spin: f32,

    // === Road lines ===
    pub road_line_count: usize,
    pub road_line_width: f32,
    pub road_line_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            road_left: 100.0,
            road_right: 700.0,
            lanes: vec![150.0, 250.0, 350.0, 450.0, 550.0],

            player_width: 50.0,
            player_height: 80.0,
            player_bottom_offset: 100.0,
            lateral_speed: 5.0,
            max_speed: 200.0,
            acceleration: 2.0,
            deceleration: 1.0,

            base_scroll: 3.0,
            scroll_factor: 0.1,
            distance_factor: 0.1,

            obstacle_base_rate: 0.02,
            obstacle_speed_factor: 0.0001,
            coin_rate: 0.01,

            pass_bonus: 10,
            coin_bonus: 50,

            obstacle_width: 50.0,
            obstacle_height: 80.0,
            coin_size: 20.0,
            coin_spin: 0.1,

            road_line_count: 10,
            road_line_width: 10.0,
            road_line_height: 40.0,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        // serde_json reads out-of-range numbers such as 1e39 as infinity
        for (name, value) in self.float_fields() {
            if !value.is_finite() {
                return Err(TuningError::NonFinite { name, value });
            }
        }
        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return Err(TuningError::Canvas {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        if self.road_right - self.road_left < self.player_width {
            return Err(TuningError::Road {
                left: self.road_left,
                right: self.road_right,
                player_width: self.player_width,
            });
        }
        if self.lanes.is_empty() {
            return Err(TuningError::NoLanes);
        }
        if self.max_speed <= 0.0 {
            return Err(TuningError::MaxSpeed(self.max_speed));
        }
        for (name, value) in [
            ("obstacle_base_rate", self.obstacle_base_rate),
            ("coin_rate", self.coin_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::Probability { name, value });
            }
        }
        for (name, value) in [
            ("lateral_speed", self.lateral_speed),
            ("acceleration", self.acceleration),
            ("deceleration", self.deceleration),
            ("base_scroll", self.base_scroll),
            ("scroll_factor", self.scroll_factor),
            ("distance_factor", self.distance_factor),
            ("obstacle_speed_factor", self.obstacle_speed_factor),
            ("road_line_height", self.road_line_height),
        ] {
            if value < 0.0 {
                return Err(TuningError::Negative { name, value });
            }
        }
        // Finite inputs can still overflow once combined
        for (name, value) in [
            ("player_max_x", self.player_max_x()),
            ("road_line_period", self.road_line_period()),
            ("scroll_step at max_speed", self.scroll_step(self.max_speed)),
        ] {
            if !value.is_finite() {
                return Err(TuningError::NonFinite { name, value });
            }
        }
        Ok(())
    }

    fn float_fields(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("road_left", self.road_left),
            ("road_right", self.road_right),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_bottom_offset", self.player_bottom_offset),
            ("lateral_speed", self.lateral_speed),
            ("max_speed", self.max_speed),
            ("acceleration", self.acceleration),
            ("deceleration", self.deceleration),
            ("base_scroll", self.base_scroll),
            ("scroll_factor", self.scroll_factor),
            ("distance_factor", self.distance_factor),
            ("obstacle_base_rate", self.obstacle_base_rate),
            ("obstacle_speed_factor", self.obstacle_speed_factor),
            ("coin_rate", self.coin_rate),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("coin_size", self.coin_size),
            ("coin_spin", self.coin_spin),
            ("road_line_width", self.road_line_width),
            ("road_line_height", self.road_line_height),
        ]
        .into_iter()
        .chain(self.lanes.iter().map(|&lane| ("lanes", lane)))
    }

    /// Player's right-most allowed x (left edge)
    pub fn player_max_x(&self) -> f32 {
        self.road_right - self.player_width
    }

    /// Player spawn position (horizontally centred, near the bottom)
    pub fn player_start(&self) -> (f32, f32) {
        (
            self.canvas_width / 2.0 - self.player_width / 2.0,
            self.canvas_height - self.player_bottom_offset,
        )
    }

    /// Pixels everything scrolls per tick at a given forward speed
    pub fn scroll_step(&self, speed: f32) -> f32 {
        self.base_scroll + speed * self.scroll_factor
    }

    /// Vertical period after which a road line reappears at the top
    pub fn road_line_period(&self) -> f32 {
        self.canvas_height + self.road_line_height
    }
}
