//! Scene assembly
//!
//! Turns a read-only `GameState` into one triangle list, back to front.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::settings::Settings;
use crate::sim::GameState;

/// Cloud anchors (x, y, size) in canvas pixels
const CLOUDS: [(f32, f32, f32); 3] = [(150.0, 80.0, 60.0), (450.0, 60.0, 80.0), (650.0, 100.0, 50.0)];

/// Cloud drift speed (px/s)
const CLOUD_DRIFT: f32 = 8.0;

/// Build every vertex for the current frame. `time` is wall-clock seconds
/// and only drives cosmetic motion.
pub fn build_scene(state: &GameState, settings: &Settings, time: f32) -> Vec<Vertex> {
    let tuning = &state.tuning;
    let segments = settings.quality.circle_segments();
    let canvas = Vec2::new(tuning.canvas_width, tuning.canvas_height);
    let mut v = Vec::with_capacity(4096);

    background(&mut v, canvas);
    if settings.quality.scenery_enabled() {
        let drift = if settings.reduced_motion { 0.0 } else { time * CLOUD_DRIFT };
        scenery(&mut v, canvas, drift, segments);
    }
    road(&mut v, state);

    for line in &state.entities.road_lines {
        v.extend(shapes::gradient_rect_v(
            line.pos,
            line.size,
            colors::ROAD_LINE,
            colors::STRIPE,
        ));
    }

    let player = &state.player;
    v.extend(shapes::car(player.pos, player.size, colors::PLAYER, true, segments));

    for obstacle in &state.entities.obstacles {
        let body = colors::OBSTACLES[obstacle.color as usize % colors::OBSTACLES.len()];
        v.extend(shapes::car(obstacle.pos, obstacle.size, body, false, segments));
    }

    for coin in &state.entities.coins {
        let rotation = if settings.effective_coin_spin() {
            coin.rotation
        } else {
            0.0
        };
        v.extend(shapes::coin(
            coin.pos + coin.size / 2.0,
            coin.size.x / 2.0,
            rotation,
            segments,
        ));
    }

    if state.is_paused() {
        v.extend(shapes::rect(Vec2::ZERO, canvas, colors::PAUSE_DIM));
    }

    v
}

/// Sky fading into meadow
fn background(v: &mut Vec<Vertex>, canvas: Vec2) {
    let bands = [
        (0.0, colors::SKY_TOP),
        (0.3, colors::SKY_HAZE),
        (0.7, colors::MEADOW),
        (1.0, colors::FOREST),
    ];
    for pair in bands.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        v.extend(shapes::gradient_rect_v(
            Vec2::new(0.0, canvas.y * t0),
            Vec2::new(canvas.x, canvas.y * (t1 - t0)),
            c0,
            c1,
        ));
    }
}

/// Mountains, clouds and roadside trees
fn scenery(v: &mut Vec<Vertex>, canvas: Vec2, drift: f32, segments: u32) {
    let ridge = [
        Vec2::new(0.0, canvas.y * 0.4),
        Vec2::new(canvas.x * 0.25, canvas.y * 0.2),
        Vec2::new(canvas.x * 0.5, canvas.y * 0.3),
        Vec2::new(canvas.x * 0.75, canvas.y * 0.15),
        Vec2::new(canvas.x, canvas.y * 0.25),
    ];
    v.extend(shapes::ridge(&ridge, canvas.y * 0.5, colors::MOUNTAIN));

    for (x, y, size) in CLOUDS {
        let x = (x + drift).rem_euclid(canvas.x + size) - size * 0.3;
        for (dx, dy, r) in [
            (0.0, 0.0, 0.5),
            (0.3, 0.0, 0.4),
            (0.6, 0.0, 0.5),
            (0.2, -0.3, 0.3),
            (0.4, -0.3, 0.4),
        ] {
            v.extend(shapes::circle(
                Vec2::new(x + size * dx, y + size * dy),
                size * r,
                colors::CLOUD,
                segments,
            ));
        }
    }

    for i in 0..3 {
        let scale = 0.8 - i as f32 * 0.1;
        let y = canvas.y * 0.6 + i as f32 * 20.0;
        for x in [20.0 + i as f32 * 15.0, canvas.x - 50.0 - i as f32 * 15.0] {
            tree(v, Vec2::new(x, y), scale, segments);
        }
    }
}

fn tree(v: &mut Vec<Vertex>, base: Vec2, scale: f32, segments: u32) {
    v.extend(shapes::rect(
        Vec2::new(base.x - 3.0 * scale, base.y),
        Vec2::new(6.0 * scale, 30.0 * scale),
        colors::TRUNK,
    ));
    v.extend(shapes::circle(
        Vec2::new(base.x, base.y - 10.0 * scale),
        15.0 * scale,
        colors::LEAVES,
        segments,
    ));
    v.extend(shapes::circle(
        Vec2::new(base.x, base.y - 15.0 * scale),
        12.0 * scale,
        colors::LEAVES_LIGHT,
        segments,
    ));
}

/// Asphalt, yellow borders, dirt shoulders and dashed lane dividers
fn road(v: &mut Vec<Vertex>, state: &GameState) {
    let tuning = &state.tuning;
    let left = tuning.road_left;
    let right = tuning.road_right;
    let h = tuning.canvas_height;
    let mid = (left + right) / 2.0;

    v.extend(shapes::gradient_rect_h(
        Vec2::new(left, 0.0),
        Vec2::new(mid - left, h),
        colors::ROAD_EDGE,
        colors::ROAD_CENTER,
    ));
    v.extend(shapes::gradient_rect_h(
        Vec2::new(mid, 0.0),
        Vec2::new(right - mid, h),
        colors::ROAD_CENTER,
        colors::ROAD_EDGE,
    ));

    for x in [left - 15.0, right + 5.0] {
        v.extend(shapes::rect(Vec2::new(x, 0.0), Vec2::new(10.0, h), colors::SHOULDER));
    }
    for x in [left - 5.0, right - 5.0] {
        v.extend(shapes::rect(Vec2::new(x, 0.0), Vec2::new(10.0, h), colors::ROAD_BORDER));
    }

    // Dividers halfway between the centre line and each edge
    for x in [(left + mid) / 2.0, (mid + right) / 2.0] {
        v.extend(shapes::dashed_line(x, 2.0, h, 20.0, 20.0, colors::LANE_DASH));
    }
}
