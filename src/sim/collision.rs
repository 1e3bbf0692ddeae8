//! Axis-aligned rectangle collision
//!
//! Everything in the game is a screen-space box: no rotation, no graze
//! distinction, touching edges never count as a hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in canvas pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict AABB overlap test
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        aabb_overlap(self, other)
    }
}

/// True iff `a` and `b` share interior area.
///
/// `a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y`
#[inline]
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}
