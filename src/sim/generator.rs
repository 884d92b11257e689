//! Procedural obstacle generation
//!
//! Gap centers drift randomly from one pipe to the next but never repeat too
//! closely, and never leave the vertical band where the whole gap fits on
//! screen. Spawn positions are spaced by at least `min_pipe_spacing`.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;
use crate::config::SimConfig;
use crate::error::ConfigError;

/// Generator bookkeeping that persists between spawns within a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneratorState {
    pub last_gap_center: f32,
    pub last_spawn_x: f32,
    /// Virtual time (ms) at which the next pipe is due
    pub next_spawn_at: u64,
}

/// Emits obstacles on its own fixed interval
#[derive(Debug, Clone)]
pub struct ObstacleGenerator {
    config: SimConfig,
    rng: Pcg32,
    state: GeneratorState,
}

impl ObstacleGenerator {
    /// Build a generator for a validated config
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut generator = Self {
            rng: Pcg32::seed_from_u64(seed),
            state: GeneratorState {
                last_gap_center: 0.0,
                last_spawn_x: 0.0,
                next_spawn_at: 0,
            },
            config,
        };
        generator.reset(0);
        Ok(generator)
    }

    pub fn state(&self) -> &GeneratorState {
        &self.state
    }

    /// Start a fresh sequence; the first pipe is due one interval after `now`
    ///
    /// The RNG stream is not reseeded, so consecutive runs differ.
    pub fn reset(&mut self, now: u64) {
        self.state = GeneratorState {
            last_gap_center: self
                .config
                .initial_gap_center
                .clamp(self.config.min_gap_center(), self.config.max_gap_center()),
            last_spawn_x: self.config.play_width,
            next_spawn_at: now + self.config.spawn_interval_ms,
        };
    }

    /// Emit one obstacle if the spawn interval has elapsed at `now`
    pub fn spawn_if_due(&mut self, now: u64) -> Option<Obstacle> {
        if now < self.state.next_spawn_at {
            return None;
        }
        self.state.next_spawn_at += self.config.spawn_interval_ms;
        // Fell far behind (e.g. a long stall): don't burst-spawn to catch up
        if self.state.next_spawn_at <= now {
            self.state.next_spawn_at = now + self.config.spawn_interval_ms;
        }
        Some(self.next_obstacle())
    }

    /// Generate the next obstacle unconditionally
    pub fn next_obstacle(&mut self) -> Obstacle {
        let gap_center = self.next_gap_center();
        let spawn_x = self.next_spawn_x();

        self.state.last_gap_center = gap_center;
        self.state.last_spawn_x = spawn_x;

        log::debug!("Spawned pipe at x={spawn_x:.1}, gap center {gap_center:.1}");
        Obstacle::new(spawn_x, gap_center, self.config.gap_height, self.config.pipe_width)
    }

    fn next_gap_center(&mut self) -> f32 {
        let cfg = &self.config;
        let last = self.state.last_gap_center;
        let (lo, hi) = (cfg.min_gap_center(), cfg.max_gap_center());

        let shift = if cfg.max_gap_shift > 0.0 {
            self.rng.random_range(-cfg.max_gap_shift..=cfg.max_gap_shift)
        } else {
            0.0
        };
        let mut candidate = last + shift;

        // Too close to the previous gap: push it out to the minimum in the drawn direction
        if (candidate - last).abs() < cfg.min_gap_spacing {
            candidate = if candidate > last {
                last + cfg.min_gap_spacing
            } else {
                last - cfg.min_gap_spacing
            };
        }

        let clamped = candidate.clamp(lo, hi);

        // The band edge ate the spacing; step the other way instead.
        // Validation guarantees the band is at least twice the spacing.
        if (clamped - last).abs() < cfg.min_gap_spacing {
            let flipped = if candidate > last {
                last - cfg.min_gap_spacing
            } else {
                last + cfg.min_gap_spacing
            };
            return flipped.clamp(lo, hi);
        }

        clamped
    }

    fn next_spawn_x(&self) -> f32 {
        (self.state.last_spawn_x + self.config.min_pipe_spacing)
            .max(self.config.play_width + self.config.spawn_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Float slack for deltas computed from sums
    const EPS: f32 = 1e-3;

    fn generator(seed: u64) -> ObstacleGenerator {
        ObstacleGenerator::new(SimConfig::default(), seed).expect("valid config")
    }

    #[test]
    fn test_spawn_waits_for_interval() {
        let mut generator = generator(1);
        assert!(generator.spawn_if_due(0).is_none());
        assert!(generator.spawn_if_due(1999).is_none());
        assert!(generator.spawn_if_due(2000).is_some());
        // Second call at the same instant is a no-op
        assert!(generator.spawn_if_due(2000).is_none());
        assert!(generator.spawn_if_due(4000).is_some());
    }

    #[test]
    fn test_stall_does_not_burst() {
        let mut generator = generator(1);
        assert!(generator.spawn_if_due(60_000).is_some());
        assert!(generator.spawn_if_due(60_000).is_none());
        assert_eq!(generator.state().next_spawn_at, 62_000);
    }

    #[test]
    fn test_first_spawn_just_past_right_edge() {
        let mut generator = generator(7);
        let cfg = SimConfig::default();
        let first = generator.next_obstacle();
        assert_eq!(first.x, cfg.play_width + cfg.spawn_offset);
        let second = generator.next_obstacle();
        assert_eq!(second.x, first.x + cfg.min_pipe_spacing);
        assert_eq!(first.gap_height, cfg.gap_height);
        assert_eq!(first.width, cfg.pipe_width);
        assert!(!first.scored);
    }

    #[test]
    fn test_reset_reanchors_spawn_x() {
        let mut generator = generator(7);
        for _ in 0..10 {
            generator.next_obstacle();
        }
        generator.reset(5000);
        let cfg = SimConfig::default();
        assert_eq!(generator.state().last_spawn_x, cfg.play_width);
        assert_eq!(generator.state().next_spawn_at, 7000);
        assert_eq!(generator.next_obstacle().x, cfg.play_width + cfg.spawn_offset);
    }

    #[test]
    fn test_zero_shift_still_moves() {
        let cfg = SimConfig {
            max_gap_shift: 0.0,
            ..Default::default()
        };
        let mut generator = ObstacleGenerator::new(cfg.clone(), 3).expect("valid config");
        let mut last = generator.state().last_gap_center;
        for _ in 0..50 {
            let pipe = generator.next_obstacle();
            assert!((pipe.gap_center - last).abs() >= cfg.min_gap_spacing - EPS);
            last = pipe.gap_center;
        }
    }

    #[test]
    fn test_narrow_band_rejected() {
        // 600 is below 3 * gap_height, so the legal band is inverted
        let cfg = SimConfig {
            play_height: 600.0,
            ..Default::default()
        };
        assert!(matches!(
            ObstacleGenerator::new(cfg, 1),
            Err(ConfigError::GapBandTooNarrow { .. })
        ));
    }

    #[test]
    fn test_nan_gap_center_rejected() {
        let cfg = SimConfig {
            initial_gap_center: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            ObstacleGenerator::new(cfg, 1),
            Err(ConfigError::NotFinite { field: "initial_gap_center", .. })
        ));
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = generator(42);
        let mut b = generator(42);
        for _ in 0..100 {
            assert_eq!(a.next_obstacle(), b.next_obstacle());
        }
    }

    proptest! {
        #[test]
        fn prop_spacing_invariants(seed in any::<u64>(), count in 2usize..400) {
            let cfg = SimConfig::default();
            let mut generator = ObstacleGenerator::new(cfg.clone(), seed).expect("valid config");
            let pipes: Vec<Obstacle> = (0..count).map(|_| generator.next_obstacle()).collect();

            for pipe in &pipes {
                prop_assert!(pipe.gap_center >= cfg.min_gap_center() - EPS);
                prop_assert!(pipe.gap_center <= cfg.max_gap_center() + EPS);
                prop_assert!(pipe.gap_top() >= 0.0);
                prop_assert!(pipe.gap_bottom() <= cfg.play_height);
            }
            for pair in pipes.windows(2) {
                prop_assert!(pair[1].x - pair[0].x >= cfg.min_pipe_spacing - EPS);
                let dy = (pair[1].gap_center - pair[0].gap_center).abs();
                prop_assert!(dy >= cfg.min_gap_spacing - EPS);
            }
        }

        #[test]
        fn prop_invariants_hold_for_wide_drift(
            seed in any::<u64>(),
            max_gap_shift in 0.0f32..600.0,
            play_height in 1020.0f32..2000.0,
        ) {
            let cfg = SimConfig { max_gap_shift, play_height, ..Default::default() };
            prop_assume!(cfg.validate().is_ok());
            let mut generator = ObstacleGenerator::new(cfg.clone(), seed).expect("valid config");
            let mut last = generator.next_obstacle();
            for _ in 0..200 {
                let next = generator.next_obstacle();
                prop_assert!(next.gap_center >= cfg.min_gap_center() - EPS);
                prop_assert!(next.gap_center <= cfg.max_gap_center() + EPS);
                let dy = (next.gap_center - last.gap_center).abs();
                prop_assert!(dy >= cfg.min_gap_spacing - EPS);
                last = next;
            }
        }
    }
}
