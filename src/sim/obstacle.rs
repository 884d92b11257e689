//! Pipe pairs
//!
//! An obstacle is a full-height column with one passable gap. Geometry is
//! fixed at spawn; only `x` and the `scored` flag change afterwards.

use serde::{Deserialize, Serialize};

use super::physics::Actor;

/// Extra reach added to the actor's leading edge for the horizontal test
pub const LEAD_MARGIN: f32 = 10.0;
/// Actor top is pushed down by `size * TOP_MARGIN_SCALE` before comparing to the gap top
pub const TOP_MARGIN_SCALE: f32 = 1.5;
/// Actor bottom is pushed down by `size / BOTTOM_MARGIN_DIVISOR`
pub const BOTTOM_MARGIN_DIVISOR: f32 = 1.5;
/// Gap bottom is raised by this much
pub const GAP_BOTTOM_BUFFER: f32 = 5.0;

/// One pipe pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Vertical middle of the gap
    pub gap_center: f32,
    pub gap_height: f32,
    pub width: f32,
    /// Set once the actor has passed this pipe
    pub scored: bool,
}

impl Obstacle {
    pub fn new(x: f32, gap_center: f32, gap_height: f32, width: f32) -> Self {
        Self {
            x,
            gap_center,
            gap_height,
            width,
            scored: false,
        }
    }

    /// Trailing (right) edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn gap_top(&self) -> f32 {
        self.gap_center - self.gap_height / 2.0
    }

    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_center + self.gap_height / 2.0
    }

    /// Move left by `dx`
    #[inline]
    pub fn scroll(&mut self, dx: f32) {
        self.x -= dx;
    }

    /// Whether the trailing edge is already left of `actor_x`
    #[inline]
    pub fn passed(&self, actor_x: f32) -> bool {
        self.right() < actor_x
    }

    /// Set the scored flag. Returns true only the first time.
    pub fn mark_scored(&mut self) -> bool {
        if self.scored {
            return false;
        }
        self.scored = true;
        true
    }

    /// Collision predicate against the actor's square hitbox
    ///
    /// Not a plain AABB test. The leading edge reaches `LEAD_MARGIN` further
    /// than the trailing edge, and both vertical extents are shifted by
    /// size-scaled margins: the top test compares `top + 1.5 * size` with the
    /// gap top, the bottom test compares `bottom + size / 1.5` with the gap
    /// bottom less `GAP_BOTTOM_BUFFER`. These are tuning values.
    pub fn collides_with(&self, actor: &Actor) -> bool {
        let horizontal = actor.right() + LEAD_MARGIN > self.x && actor.left() < self.right();
        if !horizontal {
            return false;
        }

        actor.top() + actor.size * TOP_MARGIN_SCALE < self.gap_top()
            || actor.bottom() + actor.size / BOTTOM_MARGIN_DIVISOR
                > self.gap_bottom() - GAP_BOTTOM_BUFFER
    }
}
