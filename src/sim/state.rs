//! Game state and core simulation types
//!
//! Everything the presentation layer may observe lives here. Mutation happens
//! in `tick.rs`.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::collision::Verdict;
use super::generator::ObstacleGenerator;
use super::obstacle::Obstacle;
use super::physics::Actor;
use super::schedule::Scheduler;
use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::highscores::CommitOutcome;
use crate::persistence::{MemoryGateway, PersistenceGateway};

/// Undrained notifications kept before the oldest are dropped
pub const MAX_PENDING_EVENTS: usize = 256;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting: before the first run, or during the restart delay
    #[default]
    Idle,
    /// Opening countdown, input ignored
    Countdown,
    /// Active gameplay
    Playing,
    /// Run ended; next jump restarts
    GameOver,
}

/// Change notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A run was reset
    RunReset { first_run: bool },
    /// Countdown display changed (`None` hides it)
    CountdownChanged(Option<u8>),
    /// Obstacles and physics are live
    RunStarted,
    /// Jump impulse applied
    Jumped,
    /// A pipe was passed
    Scored { score: u32 },
    /// A new pipe entered the live set
    ObstacleSpawned(Obstacle),
    /// The run ended
    GameOver {
        score: u32,
        verdict: Verdict,
        outcome: CommitOutcome,
    },
}

/// Read-only view of the simulation for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Virtual time (ms)
    pub time_ms: u64,
    pub phase: GamePhase,
    pub actor: Actor,
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub countdown: Option<u8>,
    /// Best score as of the last commit or [`GameSimulation::load_best`]
    pub best_score: Option<u32>,
    /// Whether jump input is accepted
    pub jump_enabled: bool,
}

/// The simulation core: one run at a time, driven by [`GameSimulation::advance`]
#[derive(Debug)]
pub struct GameSimulation<G: PersistenceGateway = MemoryGateway> {
    pub(super) config: SimConfig,
    pub(super) scheduler: Scheduler,
    pub(super) generator: ObstacleGenerator,
    pub(super) actor: Actor,
    /// Live pipes, oldest (leftmost) first
    pub(super) obstacles: Vec<Obstacle>,
    pub(super) score: u32,
    pub(super) phase: GamePhase,
    pub(super) countdown: Option<u8>,
    /// Off until the opening countdown finishes, then stays on
    pub(super) jump_enabled: bool,
    /// Update ticks in the current run
    pub(super) run_ticks: u64,
    pub(super) best_score: Option<u32>,
    pub(super) last_verdict: Verdict,
    pub(super) last_commit: Option<CommitOutcome>,
    /// Bounded by [`MAX_PENDING_EVENTS`]
    pub(super) events: VecDeque<GameEvent>,
    pub(super) gateway: G,
}

impl<G: PersistenceGateway> GameSimulation<G> {
    /// Create an idle simulation. Call `reset_run(true)` to begin.
    pub fn new(config: SimConfig, seed: u64, gateway: G) -> Result<Self, ConfigError> {
        config.validate()?;

        let actor = Actor::new(config.actor_x, config.play_height / 2.0, config.actor_size);
        Ok(Self {
            generator: ObstacleGenerator::new(config.clone(), seed)?,
            scheduler: Scheduler::new(),
            actor,
            obstacles: Vec::new(),
            score: 0,
            phase: GamePhase::Idle,
            countdown: None,
            jump_enabled: false,
            run_ticks: 0,
            best_score: None,
            last_verdict: Verdict::None,
            last_commit: None,
            events: VecDeque::new(),
            gateway,
            config,
        })
    }

    /// Read the stored best score for display (e.g. on a title screen)
    pub fn load_best(&mut self) -> Option<u32> {
        match self.gateway.fetch_best() {
            Ok(best) => self.best_score = best,
            Err(e) => log::warn!("Could not read best score: {e}"),
        }
        self.best_score
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn countdown(&self) -> Option<u8> {
        self.countdown
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn best_score(&self) -> Option<u32> {
        self.best_score
    }

    pub fn jump_enabled(&self) -> bool {
        self.jump_enabled
    }

    /// Virtual time (ms)
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    pub fn run_ticks(&self) -> u64 {
        self.run_ticks
    }

    /// What ended the last run (`Verdict::None` while a run is alive)
    pub fn last_verdict(&self) -> Verdict {
        self.last_verdict
    }

    /// Result of the best-score commit for the last finished run
    pub fn last_commit(&self) -> Option<CommitOutcome> {
        self.last_commit
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }

    /// Take the notifications emitted since the last call
    ///
    /// Call once per frame. Only the newest [`MAX_PENDING_EVENTS`] are kept
    /// between calls; state itself is always readable via [`Self::snapshot`].
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    pub(super) fn push_event(&mut self, event: GameEvent) {
        if self.events.len() == MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Copy out everything the renderer needs
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            time_ms: self.scheduler.now(),
            phase: self.phase,
            actor: self.actor,
            obstacles: self.obstacles.clone(),
            score: self.score,
            countdown: self.countdown,
            best_score: self.best_score,
            jump_enabled: self.jump_enabled,
        }
    }
}
