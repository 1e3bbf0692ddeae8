//! Entity types and the store that owns them

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::tuning::Tuning;

/// The player's kart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner; y never changes during a run
    pub pos: Vec2,
    pub size: Vec2,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        let (x, y) = tuning.player_start();
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(tuning.player_width, tuning.player_height),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Keep the kart on the road
    pub fn clamp_to_road(&mut self, tuning: &Tuning) {
        self.pos.x = self.pos.x.clamp(tuning.road_left, tuning.player_max_x());
    }
}

/// Number of obstacle paint colors the renderer knows about
pub const OBSTACLE_COLORS: u8 = 4;

/// An oncoming car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    /// Index into the renderer's car palette
    pub color: u8,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// A collectible coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    pub size: Vec2,
    /// Spin phase in radians
    pub rotation: f32,
}

impl Coin {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Centre-line dash that scrolls and wraps forever
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadLine {
    pub pos: Vec2,
    pub size: Vec2,
}

impl RoadLine {
    /// Evenly spaced dashes covering one full wrap period
    pub fn initial_set(tuning: &Tuning) -> Vec<RoadLine> {
        let count = tuning.road_line_count;
        let spacing = if count == 0 {
            0.0
        } else {
            tuning.road_line_period() / count as f32
        };
        let x = tuning.canvas_width / 2.0 - tuning.road_line_width / 2.0;
        (0..count)
            .map(|i| RoadLine {
                pos: Vec2::new(x, i as f32 * spacing),
                size: Vec2::new(tuning.road_line_width, tuning.road_line_height),
            })
            .collect()
    }

    /// Scroll down by `dy`, reappearing above the canvas once past the bottom
    pub fn advance(&mut self, dy: f32, tuning: &Tuning) {
        self.pos.y += dy;
        let overshoot = self.pos.y - tuning.canvas_height;
        if overshoot > 0.0 {
            let period = tuning.road_line_period();
            self.pos.y -= (overshoot / period).ceil() * period;
        }
    }
}

/// Insertion-ordered entity collection.
///
/// Removal rebuilds the list in one pass, so no entity is skipped or seen
/// twice and every removed entity is handed back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityList<T> {
    items: Vec<T>,
}

impl<T> Default for EntityList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> EntityList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Remove every entity matching `pred`, returning them in order
    pub fn remove_if<F>(&mut self, mut pred: F) -> Vec<T>
    where
        F: FnMut(&T) -> bool,
    {
        let (removed, kept): (Vec<T>, Vec<T>) =
            std::mem::take(&mut self.items).into_iter().partition(|e| pred(e));
        self.items = kept;
        removed
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<'a, T> IntoIterator for &'a EntityList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// All transient and decorative entities of a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityStore {
    pub obstacles: EntityList<Obstacle>,
    pub coins: EntityList<Coin>,
    pub road_lines: Vec<RoadLine>,
}

impl EntityStore {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            obstacles: EntityList::new(),
            coins: EntityList::new(),
            road_lines: RoadLine::initial_set(tuning),
        }
    }

    /// Drop every obstacle and coin and re-lay the road lines
    pub fn reset(&mut self, tuning: &Tuning) {
        self.obstacles.clear();
        self.coins.clear();
        self.road_lines = RoadLine::initial_set(tuning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_if_adjacent_matches() {
        // Splicing while iterating forward would skip the second of two
        // adjacent matches; the rebuild must not.
        let mut list = EntityList::new();
        for y in [700.0, 650.0, 100.0, 620.0] {
            list.push(y);
        }
        let removed = list.remove_if(|y| *y > 600.0);
        assert_eq!(removed, vec![700.0, 650.0, 620.0]);
        assert_eq!(list.as_slice(), &[100.0]);
    }

    #[test]
    fn test_remove_if_partitions_exactly() {
        let mut list = EntityList::new();
        for i in 0..10 {
            list.push(i);
        }
        let removed = list.remove_if(|i| i % 3 == 0);
        assert_eq!(removed.len() + list.len(), 10);
        for r in &removed {
            assert!(!list.iter().any(|k| k == r));
        }
    }

    #[test]
    fn test_player_clamp() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.pos.x = -50.0;
        player.clamp_to_road(&tuning);
        assert_eq!(player.pos.x, tuning.road_left);
        player.pos.x = 10_000.0;
        player.clamp_to_road(&tuning);
        assert_eq!(player.pos.x, tuning.player_max_x());
    }

    #[test]
    fn test_road_lines_stay_evenly_spaced() {
        let tuning = Tuning::default();
        let mut lines = RoadLine::initial_set(&tuning);
        let spacing = tuning.road_line_period() / tuning.road_line_count as f32;

        for step in [3.0, 7.5, 23.0, 11.0, 19.3] {
            for _ in 0..250 {
                for line in &mut lines {
                    line.advance(step, &tuning);
                }
            }
            let mut ys: Vec<f32> = lines.iter().map(|l| l.pos.y).collect();
            ys.sort_by(|a, b| a.partial_cmp(b).unwrap());
            for pair in ys.windows(2) {
                assert!((pair[1] - pair[0] - spacing).abs() < 0.05, "gap drifted: {ys:?}");
            }
            for y in &ys {
                assert!(*y <= tuning.canvas_height);
                assert!(*y > tuning.canvas_height - tuning.road_line_period());
            }
        }
    }

    #[test]
    fn test_road_line_wraps_several_periods_in_one_step() {
        let tuning = Tuning::default();
        let period = tuning.road_line_period();
        let mut line = RoadLine::initial_set(&tuning).remove(0);
        line.pos.y = 0.0;
        line.advance(601.0, &tuning);
        assert_eq!(line.pos.y, 601.0 - period);

        line.pos.y = 0.0;
        line.advance(3.0 * period + 10.0, &tuning);
        assert!((line.pos.y - 10.0).abs() < 1e-3);
        assert!(line.pos.y <= tuning.canvas_height);
    }
}
