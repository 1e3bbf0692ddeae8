//! Demo-mode driver
//!
//! Produces the same held flags a player would, from nothing but the
//! current state. Used by the headless runner and the web idle mode.

use super::input::InputState;
use super::state::GameState;

/// Distance from the player's nose to the nearest obstacle ahead in `lane`.
/// Obstacles already alongside give a negative gap; empty lanes are infinite.
fn lane_gap(state: &GameState, lane: f32) -> f32 {
    let player_top = state.player.pos.y;
    let player_bottom = player_top + state.player.size.y;
    state
        .entities
        .obstacles
        .iter()
        .filter(|o| {
            let centre = o.pos.x + o.size.x / 2.0;
            (centre - lane).abs() < o.size.x / 2.0 && o.pos.y < player_bottom
        })
        .map(|o| player_top - (o.pos.y + o.size.y))
        .fold(f32::INFINITY, f32::min)
}

/// Pick the safest lane and steer toward it, accelerating all the way
pub fn steer(state: &GameState) -> InputState {
    let tuning = &state.tuning;
    let player_centre = state.player.pos.x + state.player.size.x / 2.0;

    let target = tuning
        .lanes
        .iter()
        .map(|&lane| (lane, lane_gap(state, lane)))
        .max_by(|(lane_a, gap_a), (lane_b, gap_b)| {
            gap_a.total_cmp(gap_b).then_with(|| {
                // Tie: prefer the lane closest to where we already are
                (player_centre - lane_b)
                    .abs()
                    .total_cmp(&(player_centre - lane_a).abs())
            })
        })
        .map(|(lane, _)| lane)
        .unwrap_or(player_centre);

    let target_x = (target - state.player.size.x / 2.0).clamp(tuning.road_left, tuning.player_max_x());
    let dead_zone = tuning.lateral_speed / 2.0;
    let dx = target_x - state.player.pos.x;

    InputState {
        steer_left: dx < -dead_zone,
        steer_right: dx > dead_zone,
        accelerate: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::Obstacle;
    use glam::Vec2;

    fn obstacle_in_lane(lane: f32, y: f32) -> Obstacle {
        Obstacle {
            pos: Vec2::new(lane - 25.0, y),
            size: Vec2::new(50.0, 80.0),
            color: 0,
        }
    }

    #[test]
    fn test_empty_road_holds_nearest_lane() {
        let mut state = GameState::new(1);
        // Centre at 430: every lane is clear, 450 is nearest
        state.player.pos.x = 430.0 - 25.0;
        let input = steer(&state);
        assert!(input.accelerate);
        assert!(input.steer_right);
        assert!(!input.steer_left);
    }

    #[test]
    fn test_dodges_obstacle_in_own_lane() {
        let mut state = GameState::new(1);
        state.player.pos.x = 350.0 - 25.0;
        for lane in [150.0, 250.0, 450.0, 550.0] {
            state.entities.obstacles.push(obstacle_in_lane(lane, 100.0));
        }
        // Own lane has the closest threat
        state.entities.obstacles.push(obstacle_in_lane(350.0, 380.0));
        let input = steer(&state);
        assert!(input.steer_left || input.steer_right);

        // Clear one lane completely: that's where we go
        let mut state = GameState::new(1);
        state.player.pos.x = 350.0 - 25.0;
        for lane in [150.0, 250.0, 350.0, 550.0] {
            state.entities.obstacles.push(obstacle_in_lane(lane, 300.0));
        }
        let input = steer(&state);
        assert!(input.steer_right);
    }

    #[test]
    fn test_stays_put_when_on_target() {
        let mut state = GameState::new(1);
        state.player.pos.x = 350.0 - 25.0;
        let input = steer(&state);
        assert!(!input.steer_left && !input.steer_right);
    }

    #[test]
    fn test_obstacles_behind_are_ignored() {
        let mut state = GameState::new(1);
        state.player.pos.x = 350.0 - 25.0;
        // Already passed below the player
        state.entities.obstacles.push(obstacle_in_lane(350.0, 590.0));
        let input = steer(&state);
        assert!(!input.steer_left && !input.steer_right);
    }
}
