//! Flappy Sim - simulation core for a one-button arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, run state machine)
//! - `highscores`: Best-score commit performed when a run ends
//! - `persistence`: Storage boundary for the best score
//! - `config`: Data-driven tuning loaded from JSON

pub mod config;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod sim;

pub use config::SimConfig;
pub use error::{ConfigError, PersistenceError};
pub use highscores::{CommitOutcome, HighScoreRecord};
pub use persistence::{MemoryGateway, PersistenceGateway};
pub use sim::{FrameInput, GameEvent, GamePhase, GameSimulation, Snapshot};

/// Game configuration constants (defaults for [`SimConfig`])
pub mod consts {
    /// Update tick interval (40 Hz)
    pub const TICK_INTERVAL_MS: u64 = 25;
    /// Obstacle spawn interval
    pub const SPAWN_INTERVAL_MS: u64 = 2000;
    /// Countdown step interval
    pub const COUNTDOWN_INTERVAL_MS: u64 = 1000;
    /// Delay before a restarted run begins on its own
    pub const RESTART_DELAY_MS: u64 = 500;
    /// First value shown by the opening countdown
    pub const COUNTDOWN_START: u8 = 3;

    /// Play area dimensions (world units)
    pub const PLAY_WIDTH: f32 = 400.0;
    pub const PLAY_HEIGHT: f32 = 1040.0;

    /// Actor defaults
    pub const ACTOR_X: f32 = 100.0;
    pub const ACTOR_SIZE: f32 = 40.0;
    pub const GRAVITY: f32 = 0.8;
    pub const JUMP_STRENGTH: f32 = -12.0;

    /// Obstacle defaults
    pub const PIPE_WIDTH: f32 = 50.0;
    pub const PIPE_SPEED: f32 = 3.0;
    pub const GAP_HEIGHT: f32 = 220.0;
    pub const MAX_GAP_SHIFT: f32 = 100.0;
    pub const MIN_GAP_SPACING: f32 = 180.0;
    pub const MIN_PIPE_SPACING: f32 = 200.0;
    /// How far past the right edge new pipes appear
    pub const SPAWN_OFFSET: f32 = 200.0;
    /// Pipes left of this x are dropped
    pub const REMOVAL_X: f32 = -100.0;
    /// Reference gap center the generator starts each run from
    pub const INITIAL_GAP_CENTER: f32 = 300.0;
}
