//! Actor physics
//!
//! The actor only moves vertically. Screen space: y grows downward, so
//! gravity is positive and a jump is a negative velocity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The player-controlled body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Center of the hitbox; `x` never changes
    pub pos: Vec2,
    /// Vertical velocity (units per tick)
    pub vel: f32,
    /// Side of the square hitbox
    pub size: f32,
}

impl Actor {
    pub fn new(x: f32, y: f32, size: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: 0.0,
            size,
        }
    }

    /// Put the actor back at rest at height `y`
    pub fn reset(&mut self, y: f32) {
        self.pos.y = y;
        self.vel = 0.0;
    }

    #[inline]
    pub fn apply_gravity(&mut self, gravity: f32) {
        self.vel += gravity;
    }

    #[inline]
    pub fn integrate(&mut self) {
        self.pos.y += self.vel;
    }

    /// Replace the current velocity with the jump impulse
    #[inline]
    pub fn jump(&mut self, strength: f32) {
        self.vel = strength;
    }

    /// One physics step: move with the current velocity, then accelerate
    pub fn step(&mut self, gravity: f32) {
        self.integrate();
        self.apply_gravity(gravity);
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.size / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.size / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size / 2.0
    }
}
