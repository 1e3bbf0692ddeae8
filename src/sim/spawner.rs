//! Procedural obstacle and coin spawning
//!
//! One independent Bernoulli trial per entity kind per tick. Inter-arrival
//! times are therefore geometric, never periodic.

use glam::Vec2;
use rand::Rng;

use super::entities::{Coin, EntityStore, OBSTACLE_COLORS, Obstacle};
use crate::tuning::Tuning;

/// What a single spawn pass produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Spawned {
    pub obstacle: bool,
    pub coin: bool,
}

/// Chance of an obstacle this tick; grows linearly with speed
pub fn obstacle_probability(tuning: &Tuning, speed: f32) -> f32 {
    (tuning.obstacle_base_rate + speed * tuning.obstacle_speed_factor).clamp(0.0, 1.0)
}

/// Chance of a coin this tick; independent of speed
pub fn coin_probability(tuning: &Tuning) -> f32 {
    tuning.coin_rate.clamp(0.0, 1.0)
}

/// Pick a lane centre uniformly
fn pick_lane<R: Rng>(tuning: &Tuning, rng: &mut R) -> f32 {
    match tuning.lanes.len() {
        0 => tuning.canvas_width / 2.0,
        n => tuning.lanes[rng.random_range(0..n)],
    }
}

/// Run both spawn trials and push whatever they produce
pub fn spawn<R: Rng>(
    tuning: &Tuning,
    speed: f32,
    rng: &mut R,
    entities: &mut EntityStore,
) -> Spawned {
    let mut spawned = Spawned::default();

    if rng.random::<f32>() < obstacle_probability(tuning, speed) {
        let lane = pick_lane(tuning, rng);
        entities.obstacles.push(Obstacle {
            pos: Vec2::new(lane - tuning.obstacle_width / 2.0, -tuning.obstacle_height),
            size: Vec2::new(tuning.obstacle_width, tuning.obstacle_height),
            color: rng.random_range(0..OBSTACLE_COLORS),
        });
        spawned.obstacle = true;
    }

    if rng.random::<f32>() < coin_probability(tuning) {
        let lane = pick_lane(tuning, rng);
        entities.coins.push(Coin {
            pos: Vec2::new(lane - tuning.coin_size / 2.0, -tuning.coin_size),
            size: Vec2::splat(tuning.coin_size),
            rotation: 0.0,
        });
        spawned.coin = true;
    }

    if spawned.obstacle || spawned.coin {
        log::trace!("spawned {:?} at speed {:.1}", spawned, speed);
    }

    spawned
}
