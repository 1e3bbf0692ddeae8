//! Fixed timestep simulation tick
//!
//! Core game loop that advances the run by one frame. Step order matters:
//! scoring of passed obstacles happens before the crash check, and a crash
//! freezes everything for the game-over screen.

use super::autopilot;
use super::input::InputState;
use super::spawner;
use super::state::{GameEvent, GamePhase, GameState};

/// Input for a single tick: held controls plus one-shot commands
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held steering / throttle flags
    pub controls: InputState,
    /// Start button
    pub start: bool,
    /// Pause toggle
    pub pause: bool,
    /// Restart button
    pub restart: bool,
    /// Music toggle
    pub toggle_music: bool,
    /// Idle/demo mode - autopilot drives
    pub autopilot: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.restart {
        state.restart();
    }
    if input.start {
        state.start();
    }
    if input.pause {
        state.toggle_pause();
    }
    if input.toggle_music {
        state.toggle_music();
    }

    // Don't tick unless a run is live
    if state.phase != GamePhase::Running {
        return;
    }

    let controls = if input.autopilot {
        autopilot::steer(state)
    } else {
        input.controls
    };

    state.tick_count += 1;

    update_player(state, &controls);
    scroll_world(state);
    score_passed_obstacles(state);
    drop_missed_coins(state);

    if check_crash(state) {
        state.crash();
        return;
    }

    collect_coins(state);
    spawner::spawn(&state.tuning, state.speed, &mut state.rng, &mut state.entities);
    state.distance += state.speed * state.tuning.distance_factor;
}

/// Throttle and steering
fn update_player(state: &mut GameState, controls: &InputState) {
    let tuning = &state.tuning;

    state.speed = if controls.accelerate {
        (state.speed + tuning.acceleration).min(tuning.max_speed)
    } else {
        (state.speed - tuning.deceleration).max(0.0)
    };
    state.speed = state.speed.clamp(0.0, tuning.max_speed);

    state.player.pos.x += controls.steer_axis() * tuning.lateral_speed;
    state.player.clamp_to_road(tuning);
}

/// Move everything down the screen by this tick's scroll distance
fn scroll_world(state: &mut GameState) {
    let tuning = &state.tuning;
    let dy = tuning.scroll_step(state.speed);

    for obstacle in state.entities.obstacles.iter_mut() {
        obstacle.pos.y += dy;
    }
    for coin in state.entities.coins.iter_mut() {
        coin.pos.y += dy;
        coin.rotation = (coin.rotation + tuning.coin_spin) % std::f32::consts::TAU;
    }
    for line in &mut state.entities.road_lines {
        line.advance(dy, tuning);
    }
}

/// Obstacles that made it past the bottom edge are worth a bonus each
fn score_passed_obstacles(state: &mut GameState) {
    let bottom = state.tuning.canvas_height;
    let passed = state.entities.obstacles.remove_if(|o| o.pos.y > bottom);
    state.score += passed.len() as u64 * state.tuning.pass_bonus;
}

/// Coins that scrolled away are simply lost
fn drop_missed_coins(state: &mut GameState) {
    let bottom = state.tuning.canvas_height;
    state.entities.coins.remove_if(|c| c.pos.y > bottom);
}

/// First obstacle overlapping the player ends the run
fn check_crash(state: &GameState) -> bool {
    let player = state.player.rect();
    state
        .entities
        .obstacles
        .iter()
        .any(|o| player.overlaps(&o.rect()))
}

/// Every coin touching the player is collected independently
fn collect_coins(state: &mut GameState) {
    let player = state.player.rect();
    let collected = state
        .entities
        .coins
        .remove_if(|c| player.overlaps(&c.rect()));

    for _ in &collected {
        state.score += state.tuning.coin_bonus;
        state.emit(GameEvent::CoinCollected);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::{Coin, Obstacle};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    /// Tuning with spawning switched off so scenarios stay exact
    fn quiet_tuning() -> Tuning {
        Tuning {
            obstacle_base_rate: 0.0,
            obstacle_speed_factor: 0.0,
            coin_rate: 0.0,
            ..Tuning::default()
        }
    }

    fn running(tuning: Tuning) -> GameState {
        let mut state = GameState::with_tuning(tuning, 12345);
        state.start();
        state.drain_events();
        state
    }

    fn held(accelerate: bool, left: bool, right: bool) -> TickInput {
        TickInput {
            controls: InputState {
                steer_left: left,
                steer_right: right,
                accelerate,
            },
            ..Default::default()
        }
    }

    fn crash_count(events: &[GameEvent]) -> usize {
        events.iter().filter(|e| **e == GameEvent::Crash).count()
    }

    #[test]
    fn test_idle_does_not_advance() {
        let mut state = GameState::new(1);
        tick(&mut state, &held(true, false, false));
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.speed, 0.0);
        assert_eq!(state.tick_count, 0);
    }

    #[test]
    fn test_start_command_via_tick_input() {
        let mut state = GameState::new(1);
        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.tick_count, 1);
        assert_eq!(state.events(), &[GameEvent::MusicStart]);
    }

    #[test]
    fn test_acceleration_and_deceleration_rates() {
        let mut state = running(quiet_tuning());
        for _ in 0..10 {
            tick(&mut state, &held(true, false, false));
        }
        assert_eq!(state.speed, 20.0);
        for _ in 0..5 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.speed, 15.0);
    }

    #[test]
    fn test_speed_saturates() {
        let mut state = running(quiet_tuning());
        for _ in 0..500 {
            tick(&mut state, &held(true, false, false));
            assert!(state.speed <= state.tuning.max_speed);
        }
        assert_eq!(state.speed, state.tuning.max_speed);
        for _ in 0..500 {
            tick(&mut state, &TickInput::default());
            assert!(state.speed >= 0.0);
        }
        assert_eq!(state.speed, 0.0);
    }

    #[test]
    fn test_steering_clamps_to_road() {
        let mut state = running(quiet_tuning());
        for _ in 0..200 {
            tick(&mut state, &held(false, true, false));
        }
        assert_eq!(state.player.pos.x, state.tuning.road_left);
        for _ in 0..200 {
            tick(&mut state, &held(false, false, true));
        }
        assert_eq!(state.player.pos.x, state.tuning.player_max_x());

        // Out-of-range positions get pulled back in on the next tick
        state.player.pos.x = -1000.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.pos.x, state.tuning.road_left);
    }

    #[test]
    fn test_head_on_collision_ends_run_once() {
        let tuning = Tuning {
            canvas_height: 800.0,
            ..quiet_tuning()
        };
        let mut state = running(tuning);
        state.player.pos = Vec2::new(150.0, 620.0);
        state.entities.obstacles.push(Obstacle {
            pos: Vec2::new(150.0, 600.0),
            size: Vec2::new(50.0, 80.0),
            color: 0,
        });

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(crash_count(state.events()), 1);
        assert!(state.events().contains(&GameEvent::MusicStop));

        // Further ticks are inert
        let score = state.score;
        for _ in 0..10 {
            tick(&mut state, &held(true, true, false));
        }
        assert_eq!(crash_count(state.events()), 1);
        assert_eq!(state.score, score);
        assert_eq!(state.player.pos, Vec2::new(150.0, 620.0));
    }

    #[test]
    fn test_touching_obstacle_does_not_crash() {
        let mut state = running(quiet_tuning());
        let player = state.player.rect();
        // After one tick (scroll 3) its bottom edge lands exactly on the player's top
        state.entities.obstacles.push(Obstacle {
            pos: Vec2::new(player.left(), player.top() - 80.0 - 3.0),
            size: Vec2::new(50.0, 80.0),
            color: 1,
        });
        // Side by side, edges equal
        state.entities.obstacles.push(Obstacle {
            pos: Vec2::new(player.right(), player.top() - 3.0),
            size: Vec2::new(50.0, 80.0),
            color: 2,
        });
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(crash_count(state.events()), 0);
    }

    #[test]
    fn test_pass_bonus_then_coin_bonus() {
        let mut state = running(quiet_tuning());
        assert_eq!(state.score, 0);

        // Far lane, about to leave the screen
        state.entities.obstacles.push(Obstacle {
            pos: Vec2::new(125.0, 598.0),
            size: Vec2::new(50.0, 80.0),
            color: 0,
        });
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 10);
        assert!(state.entities.obstacles.is_empty());

        let player = state.player.rect();
        state.entities.coins.push(Coin {
            pos: player.pos + Vec2::new(15.0, 30.0),
            size: Vec2::splat(20.0),
            rotation: 0.0,
        });
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 60);
        assert!(state.entities.coins.is_empty());
        assert_eq!(
            state
                .events()
                .iter()
                .filter(|e| **e == GameEvent::CoinCollected)
                .count(),
            1
        );
    }

    #[test]
    fn test_simultaneous_coins_each_count() {
        let mut state = running(quiet_tuning());
        let player = state.player.rect();
        for dx in [0.0, 15.0, 30.0] {
            state.entities.coins.push(Coin {
                pos: player.pos + Vec2::new(dx, 10.0),
                size: Vec2::splat(20.0),
                rotation: 0.0,
            });
        }
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 150);
        assert_eq!(state.drain_events(), vec![GameEvent::CoinCollected; 3]);
    }

    #[test]
    fn test_missed_coin_scores_nothing() {
        let mut state = running(quiet_tuning());
        state.entities.coins.push(Coin {
            pos: Vec2::new(140.0, 599.0),
            size: Vec2::splat(20.0),
            rotation: 0.0,
        });
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 0);
        assert!(state.entities.coins.is_empty());
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_passed_obstacles_scored_and_removed_together() {
        let mut state = running(quiet_tuning());
        // Adjacent off-screen obstacles would trip up splice-while-iterating
        for y in [598.0, 599.0, 650.0, 100.0, 597.5] {
            state.entities.obstacles.push(Obstacle {
                pos: Vec2::new(125.0, y),
                size: Vec2::new(50.0, 80.0),
                color: 0,
            });
        }
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 40);
        assert_eq!(state.entities.obstacles.len(), 1);
        assert!(
            state
                .entities
                .obstacles
                .iter()
                .all(|o| o.pos.y <= state.tuning.canvas_height)
        );
    }

    #[test]
    fn test_crash_freezes_same_tick_progress() {
        let mut state = running(quiet_tuning());
        state.speed = 50.0;
        let player = state.player.rect();
        state.entities.obstacles.push(Obstacle {
            pos: player.pos,
            size: Vec2::new(50.0, 80.0),
            color: 0,
        });
        state.entities.coins.push(Coin {
            pos: player.pos + Vec2::new(10.0, 10.0),
            size: Vec2::splat(20.0),
            rotation: 0.0,
        });
        tick(&mut state, &TickInput::default());
        assert!(state.is_game_over());
        // Coin left in place and distance untouched
        assert_eq!(state.entities.coins.len(), 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.distance, 0.0);
    }

    #[test]
    fn test_distance_accumulates() {
        let mut state = running(quiet_tuning());
        for _ in 0..10 {
            tick(&mut state, &held(true, false, false));
        }
        // speeds 2, 4, ..., 20 -> sum 110, times 0.1
        assert!((state.distance - 11.0).abs() < 1e-3);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut state = running(quiet_tuning());
        for _ in 0..20 {
            tick(&mut state, &held(true, false, false));
        }
        // Well clear of the player, so nothing can end the run
        state.entities.obstacles.push(Obstacle {
            pos: Vec2::new(525.0, 100.0),
            size: Vec2::new(50.0, 80.0),
            color: 1,
        });
        state.entities.coins.push(Coin {
            pos: Vec2::new(140.0, 50.0),
            size: Vec2::splat(20.0),
            rotation: 0.0,
        });
        tick(&mut state, &held(true, false, false));
        assert!(!state.is_game_over());
        assert_eq!(state.entities.obstacles.len(), 1);
        assert_eq!(state.entities.coins.len(), 1);

        tick(
            &mut state,
            &TickInput {
                pause: true,
                ..Default::default()
            },
        );
        assert!(state.is_paused());

        let snapshot = |s: &GameState| {
            (
                s.score,
                s.speed,
                s.distance,
                s.player.pos,
                s.entities.obstacles.iter().map(|o| o.pos).collect::<Vec<_>>(),
                s.entities.coins.iter().map(|c| (c.pos, c.rotation)).collect::<Vec<_>>(),
                s.entities.road_lines.iter().map(|l| l.pos).collect::<Vec<_>>(),
            )
        };
        let before = snapshot(&state);
        for _ in 0..100 {
            tick(&mut state, &held(true, true, false));
        }
        assert_eq!(snapshot(&state), before);

        // Second toggle resumes
        tick(
            &mut state,
            &TickInput {
                pause: true,
                ..Default::default()
            },
        );
        assert!(!state.is_paused());
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = running(Tuning::default());
        for _ in 0..30 {
            tick(&mut state, &held(true, false, false));
        }
        state.score = 120;
        state.entities.coins.push(Coin {
            pos: Vec2::new(140.0, 10.0),
            size: Vec2::splat(20.0),
            rotation: 0.0,
        });
        let player = state.player.rect();
        state.entities.obstacles.push(Obstacle {
            pos: player.pos,
            size: Vec2::new(50.0, 80.0),
            color: 3,
        });
        tick(&mut state, &TickInput::default());
        assert!(state.is_game_over());

        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, 0.0);
        assert_eq!(state.distance, 0.0);
        assert!(state.entities.obstacles.is_empty());
        assert!(state.entities.coins.is_empty());
        assert_eq!(state.player.pos, Vec2::from(state.tuning.player_start()));

        state.start();
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        state1.start();
        state2.start();

        for i in 0..600 {
            let input = held(i % 7 != 0, i % 50 < 10, i % 50 > 40);
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.entities.obstacles.len(), state2.entities.obstacles.len());
        assert_eq!(state1.entities.coins.len(), state2.entities.coins.len());
        assert_eq!(state1.player.pos, state2.player.pos);
    }

    #[test]
    fn test_autopilot_survives_a_while() {
        let mut state = GameState::new(2024);
        state.start();
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..300 {
            tick(&mut state, &input);
        }
        assert!(state.tick_count > 0);
        assert!(state.speed > 0.0);
    }

    proptest! {
        #[test]
        fn prop_player_and_speed_stay_in_bounds(
            seed in any::<u64>(),
            inputs in prop::collection::vec(any::<(bool, bool, bool)>(), 1..400),
        ) {
            let mut state = GameState::new(seed);
            state.start();
            for (accelerate, left, right) in inputs {
                tick(&mut state, &held(accelerate, left, right));
                let tuning = &state.tuning;
                prop_assert!(state.player.pos.x >= tuning.road_left);
                prop_assert!(state.player.pos.x <= tuning.player_max_x());
                prop_assert!(state.speed >= 0.0);
                prop_assert!(state.speed <= tuning.max_speed);
                prop_assert!(state.distance >= 0.0);
            }
        }

        #[test]
        fn prop_obstacles_never_linger_offscreen(
            seed in any::<u64>(),
            ticks in 1usize..600,
        ) {
            let mut state = GameState::new(seed);
            state.start();
            let input = held(true, false, false);
            for _ in 0..ticks {
                tick(&mut state, &input);
                if state.is_game_over() {
                    break;
                }
                let bottom = state.tuning.canvas_height;
                prop_assert!(state.entities.obstacles.iter().all(|o| o.pos.y <= bottom));
                prop_assert!(state.entities.coins.iter().all(|c| c.pos.y <= bottom));
            }
        }
    }
}
