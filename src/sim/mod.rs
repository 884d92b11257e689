//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Virtual millisecond clock, fixed update interval
//! - Seeded RNG only
//! - One mutation path (the scheduler's events, in time order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod generator;
pub mod obstacle;
pub mod physics;
pub mod schedule;
pub mod state;
pub mod tick;

pub use collision::{Verdict, check};
pub use generator::{GeneratorState, ObstacleGenerator};
pub use obstacle::Obstacle;
pub use physics::Actor;
pub use schedule::{Scheduler, TimerKind};
pub use state::{GameEvent, GamePhase, GameSimulation, Snapshot};
pub use tick::FrameInput;
