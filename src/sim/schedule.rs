//! Virtual-clock timer queue
//!
//! The update tick, the spawn timer, the countdown and the restart delay are
//! all entries here. The simulation pops due entries one at a time and handles
//! each on the same thread, so no two timers ever touch state concurrently.

use serde::{Deserialize, Serialize};

/// The timers the simulation runs. Declaration order breaks ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// Physics/collision update
    Update,
    /// Obstacle spawn
    Spawn,
    /// Countdown step
    Countdown,
    /// One-shot delayed start after a restart
    StartDelay,
}

impl TimerKind {
    pub const ALL: [TimerKind; 4] = [
        TimerKind::Update,
        TimerKind::Spawn,
        TimerKind::Countdown,
        TimerKind::StartDelay,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct Timer {
    due_at: u64,
    /// `None` for one-shot timers
    period: Option<u64>,
}

/// Single-threaded timer queue over a millisecond clock
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    now: u64,
    timers: [Option<Timer>; 4],
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time (ms)
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Start (or restart) a repeating timer firing every `period` ms from now
    pub fn start_repeating(&mut self, kind: TimerKind, period: u64) {
        self.timers[kind.index()] = Some(Timer {
            due_at: self.now + period,
            period: Some(period),
        });
    }

    /// Start (or restart) a timer that fires once after `delay` ms
    pub fn start_once(&mut self, kind: TimerKind, delay: u64) {
        self.timers[kind.index()] = Some(Timer {
            due_at: self.now + delay,
            period: None,
        });
    }

    /// Stop a timer. Stopping an inactive timer does nothing.
    pub fn cancel(&mut self, kind: TimerKind) {
        self.timers[kind.index()] = None;
    }

    pub fn cancel_all(&mut self) {
        self.timers = [None; 4];
    }

    pub fn is_active(&self, kind: TimerKind) -> bool {
        self.timers[kind.index()].is_some()
    }

    /// Next firing time of a timer, if active
    pub fn due_at(&self, kind: TimerKind) -> Option<u64> {
        self.timers[kind.index()].map(|t| t.due_at)
    }

    /// Pop the earliest timer due at or before `until`
    ///
    /// Moves the clock to the firing time and reschedules repeating timers.
    /// Returns `None` once nothing else is due, leaving the clock untouched.
    pub fn pop_due(&mut self, until: u64) -> Option<TimerKind> {
        let kind = TimerKind::ALL
            .into_iter()
            .filter_map(|kind| self.timers[kind.index()].map(|t| (t.due_at, kind)))
            .filter(|&(due_at, _)| due_at <= until)
            .min()
            .map(|(_, kind)| kind)?;

        if let Some(timer) = self.timers[kind.index()] {
            self.now = self.now.max(timer.due_at);
            self.timers[kind.index()] = timer.period.map(|period| Timer {
                due_at: timer.due_at + period,
                period: Some(period),
            });
        }
        Some(kind)
    }

    /// Move the clock forward to `until` (never backward)
    pub fn advance_to(&mut self, until: u64) {
        self.now = self.now.max(until);
    }
}
