//! Fixed timestep simulation
//!
//! Every state change funnels through here: timer events popped from the
//! scheduler, the per-tick update, jump input and run resets.

use super::collision::{self, Verdict};
use super::schedule::TimerKind;
use super::state::{GameEvent, GamePhase, GameSimulation};
use crate::highscores::commit_best_score;
use crate::persistence::PersistenceGateway;

/// Input gathered by the presentation layer since the last frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Jump trigger (tap/click/space)
    pub jump: bool,
}

impl FrameInput {
    pub const JUMP: FrameInput = FrameInput { jump: true };
}

impl<G: PersistenceGateway> GameSimulation<G> {
    /// Advance virtual time by `elapsed_ms`
    ///
    /// Input is applied first, so a jump that arrived since the last frame is
    /// seen by the very next update tick. Then every timer due in the window
    /// fires in time order.
    pub fn advance(&mut self, elapsed_ms: u64, input: &FrameInput) {
        if input.jump {
            self.jump();
        }

        let until = self.scheduler.now() + elapsed_ms;
        while let Some(kind) = self.scheduler.pop_due(until) {
            self.fire(kind);
        }
        self.scheduler.advance_to(until);
    }

    fn fire(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::Update => self.update(),
            TimerKind::Spawn => self.spawn_obstacles(),
            TimerKind::Countdown => self.step_countdown(),
            TimerKind::StartDelay => {
                if self.phase == GamePhase::Idle {
                    self.start_game();
                }
            }
        }
    }

    /// Clear the board for a new run
    ///
    /// The first run opens with the countdown; later runs start on their own
    /// after the restart delay (or earlier, on the next jump).
    pub fn reset_run(&mut self, first_run: bool) {
        let now = self.scheduler.now();
        self.scheduler.cancel_all();

        self.obstacles.clear();
        self.score = 0;
        self.run_ticks = 0;
        self.countdown = None;
        self.last_verdict = Verdict::None;
        self.last_commit = None;
        self.actor.reset(self.config.play_height / 2.0);
        self.generator.reset(now);
        self.push_event(GameEvent::RunReset { first_run });

        if first_run {
            self.phase = GamePhase::Countdown;
            self.countdown = Some(self.config.countdown_start);
            self.push_event(GameEvent::CountdownChanged(self.countdown));
            self.scheduler
                .start_repeating(TimerKind::Countdown, self.config.countdown_interval_ms);
            log::info!("First run: countdown from {}", self.config.countdown_start);
        } else {
            self.phase = GamePhase::Idle;
            self.scheduler
                .start_once(TimerKind::StartDelay, self.config.restart_delay_ms);
            log::debug!("Run reset, starting in {} ms", self.config.restart_delay_ms);
        }
    }

    /// Handle the jump trigger
    ///
    /// Ignored until the opening countdown has finished. After a game over
    /// it restarts; before the run has started it starts the run and jumps.
    pub fn jump(&mut self) {
        if !self.jump_enabled {
            log::trace!("Jump ignored in {:?}", self.phase);
            return;
        }

        match self.phase {
            GamePhase::GameOver => self.reset_run(false),
            GamePhase::Idle => {
                self.start_game();
                self.apply_jump();
            }
            GamePhase::Playing => self.apply_jump(),
            GamePhase::Countdown => {}
        }
    }

    fn apply_jump(&mut self) {
        self.actor.jump(self.config.jump_strength);
        self.push_event(GameEvent::Jumped);
    }

    fn step_countdown(&mut self) {
        if self.phase != GamePhase::Countdown {
            self.scheduler.cancel(TimerKind::Countdown);
            return;
        }

        match self.countdown {
            Some(n) if n > 0 => {
                self.countdown = Some(n - 1);
                self.push_event(GameEvent::CountdownChanged(self.countdown));
            }
            _ => {
                self.scheduler.cancel(TimerKind::Countdown);
                self.countdown = None;
                self.push_event(GameEvent::CountdownChanged(None));
                self.jump_enabled = true;
                self.start_game();
            }
        }
    }

    /// Go live: physics and spawning start now
    fn start_game(&mut self) {
        let now = self.scheduler.now();
        self.scheduler.cancel(TimerKind::StartDelay);

        self.phase = GamePhase::Playing;
        self.obstacles.clear();
        self.generator.reset(now);

        self.scheduler
            .start_repeating(TimerKind::Update, self.config.tick_interval_ms);
        self.scheduler
            .start_repeating(TimerKind::Spawn, self.config.spawn_interval_ms);

        self.push_event(GameEvent::RunStarted);
        log::info!("Run started at t={now}ms");
    }

    fn spawn_obstacles(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        if let Some(obstacle) = self.generator.spawn_if_due(self.scheduler.now()) {
            self.obstacles.push(obstacle);
            self.push_event(GameEvent::ObstacleSpawned(obstacle));
        }
    }

    /// One fixed update tick. Does nothing outside `Playing`.
    pub fn update(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.run_ticks += 1;

        self.actor.step(self.config.gravity);

        let actor_x = self.actor.pos.x;
        let mut passed = 0;
        for pipe in self.obstacles.iter_mut() {
            pipe.scroll(self.config.pipe_speed);

            if pipe.passed(actor_x) && pipe.mark_scored() {
                passed += 1;
            }
        }
        for _ in 0..passed {
            self.score += 1;
            self.push_event(GameEvent::Scored { score: self.score });
        }

        let verdict = collision::check(&self.actor, &self.obstacles, self.config.play_height);
        if verdict.is_hit() {
            self.end_run(verdict);
        }

        let removal_x = self.config.removal_x;
        self.obstacles.retain(|pipe| pipe.x >= removal_x);
    }

    /// Enter GameOver once and commit the best score
    fn end_run(&mut self, verdict: Verdict) {
        if self.phase == GamePhase::GameOver {
            return;
        }

        self.phase = GamePhase::GameOver;
        self.last_verdict = verdict;
        self.scheduler.cancel(TimerKind::Update);
        self.scheduler.cancel(TimerKind::Spawn);

        let outcome = commit_best_score(&mut self.gateway, self.score);
        if let Some(best) = outcome.best() {
            self.best_score = Some(best);
        }
        self.last_commit = Some(outcome);

        log::info!(
            "Game over ({:?}) after {} ticks, score {}",
            verdict,
            self.run_ticks,
            self.score
        );
        self.push_event(GameEvent::GameOver {
            score: self.score,
            verdict,
            outcome,
        });
    }
}
