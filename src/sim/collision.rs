//! Collision detection
//!
//! Tests the actor against every live pipe, then against the bottom of the
//! play area. Pure: the same inputs always give the same verdict.

use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;
use super::physics::Actor;

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verdict {
    /// Nothing hit
    #[default]
    None,
    /// Hit a pipe
    Pipe,
    /// Fell below the play area
    OutOfBounds,
}

impl Verdict {
    pub fn is_hit(&self) -> bool {
        *self != Verdict::None
    }
}

/// Check the actor against the live obstacles and the world bounds
///
/// Pipes are tested first, in slice order, and the first hit wins. The actor
/// may fly above the top edge freely; only falling past `play_height` loses.
pub fn check(actor: &Actor, obstacles: &[Obstacle], play_height: f32) -> Verdict {
    if obstacles.iter().any(|pipe| pipe.collides_with(actor)) {
        return Verdict::Pipe;
    }

    if actor_out_of_bounds(actor, play_height) {
        return Verdict::OutOfBounds;
    }

    Verdict::None
}

/// Check if the actor's center dropped below the play area
#[inline]
pub fn actor_out_of_bounds(actor: &Actor, play_height: f32) -> bool {
    actor.pos.y > play_height
}
