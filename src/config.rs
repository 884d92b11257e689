//! Simulation tuning
//!
//! Every gameplay constant lives here so embedders can load a tuned profile
//! from JSON. Missing fields fall back to the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Tunable parameters for one simulation instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Timers (milliseconds) ===
    /// Fixed update tick
    pub tick_interval_ms: u64,
    /// Obstacle spawn cadence
    pub spawn_interval_ms: u64,
    /// Countdown step
    pub countdown_interval_ms: u64,
    /// Delay before a restarted run starts by itself
    pub restart_delay_ms: u64,
    /// First countdown value shown
    pub countdown_start: u8,

    // === Play area ===
    pub play_width: f32,
    pub play_height: f32,

    // === Actor ===
    /// Fixed horizontal position of the actor's center
    pub actor_x: f32,
    /// Side of the actor's square hitbox
    pub actor_size: f32,
    /// Added to velocity every tick
    pub gravity: f32,
    /// Velocity set by a jump (negative is up)
    pub jump_strength: f32,

    // === Obstacles ===
    pub pipe_width: f32,
    /// Leftward scroll per tick
    pub pipe_speed: f32,
    pub gap_height: f32,
    /// Largest random drift between consecutive gap centers
    pub max_gap_shift: f32,
    /// Smallest allowed vertical distance between consecutive gap centers
    pub min_gap_spacing: f32,
    /// Smallest allowed horizontal distance between consecutive spawns
    pub min_pipe_spacing: f32,
    pub spawn_offset: f32,
    pub removal_x: f32,
    pub initial_gap_center: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            countdown_interval_ms: COUNTDOWN_INTERVAL_MS,
            restart_delay_ms: RESTART_DELAY_MS,
            countdown_start: COUNTDOWN_START,

            play_width: PLAY_WIDTH,
            play_height: PLAY_HEIGHT,

            actor_x: ACTOR_X,
            actor_size: ACTOR_SIZE,
            gravity: GRAVITY,
            jump_strength: JUMP_STRENGTH,

            pipe_width: PIPE_WIDTH,
            pipe_speed: PIPE_SPEED,
            gap_height: GAP_HEIGHT,
            max_gap_shift: MAX_GAP_SHIFT,
            min_gap_spacing: MIN_GAP_SPACING,
            min_pipe_spacing: MIN_PIPE_SPACING,
            spawn_offset: SPAWN_OFFSET,
            removal_x: REMOVAL_X,
            initial_gap_center: INITIAL_GAP_CENTER,
        }
    }
}

impl SimConfig {
    /// Parse a config from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded sim config: {}x{} play area, gap {}",
            config.play_width,
            config.play_height,
            config.gap_height
        );
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Lowest legal gap center (keeps the whole gap plus margin on screen)
    pub fn min_gap_center(&self) -> f32 {
        self.gap_height + self.gap_height / 2.0
    }

    /// Highest legal gap center
    pub fn max_gap_center(&self) -> f32 {
        self.play_height - self.gap_height - self.gap_height / 2.0
    }

    /// Reject configs the simulation cannot run fairly with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let timers = [
            ("tick_interval_ms", self.tick_interval_ms),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("countdown_interval_ms", self.countdown_interval_ms),
        ];
        for (field, value) in timers {
            if value == 0 {
                return Err(ConfigError::NotPositive { field, value: 0.0 });
            }
        }

        let floats = [
            ("play_width", self.play_width),
            ("play_height", self.play_height),
            ("actor_x", self.actor_x),
            ("actor_size", self.actor_size),
            ("gravity", self.gravity),
            ("jump_strength", self.jump_strength),
            ("pipe_width", self.pipe_width),
            ("pipe_speed", self.pipe_speed),
            ("gap_height", self.gap_height),
            ("max_gap_shift", self.max_gap_shift),
            ("min_gap_spacing", self.min_gap_spacing),
            ("min_pipe_spacing", self.min_pipe_spacing),
            ("spawn_offset", self.spawn_offset),
            ("removal_x", self.removal_x),
            ("initial_gap_center", self.initial_gap_center),
        ];
        // NaN slips through every comparison below, so reject it up front
        for (field, value) in floats {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        let lengths = [
            ("play_width", self.play_width),
            ("play_height", self.play_height),
            ("actor_size", self.actor_size),
            ("pipe_width", self.pipe_width),
            ("pipe_speed", self.pipe_speed),
            ("gap_height", self.gap_height),
            ("min_gap_spacing", self.min_gap_spacing),
            ("min_pipe_spacing", self.min_pipe_spacing),
        ];
        for (field, value) in lengths {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive {
                    field,
                    value: value as f64,
                });
            }
        }
        if self.max_gap_shift < 0.0 {
            return Err(ConfigError::NotPositive {
                field: "max_gap_shift",
                value: self.max_gap_shift as f64,
            });
        }

        if self.removal_x >= 0.0 {
            return Err(ConfigError::RemovalInsideView(self.removal_x));
        }

        // Either a step up or a step down must always fit inside the band
        let band = self.max_gap_center() - self.min_gap_center();
        let required = 2.0 * self.min_gap_spacing;
        if band < required {
            return Err(ConfigError::GapBandTooNarrow {
                play_height: self.play_height,
                band,
                required,
                min_gap_spacing: self.min_gap_spacing,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_gap_center(), 330.0);
        assert_eq!(config.max_gap_center(), 710.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimConfig::from_json(r#"{ "gravity": 1.0, "play_height": 1200.0 }"#)
            .expect("valid config");
        assert_eq!(config.gravity, 1.0);
        assert_eq!(config.play_height, 1200.0);
        assert_eq!(config.jump_strength, JUMP_STRENGTH);
        assert_eq!(config.tick_interval_ms, TICK_INTERVAL_MS);
    }

    #[test]
    fn test_json_round_trip() {
        let config = SimConfig::default();
        let json = config.to_json().expect("serializes");
        let parsed = SimConfig::from_json(&json).expect("parses");
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_phone_height_rejected() {
        // 852 is too short to keep 220-high gaps 180 apart
        let config = SimConfig {
            play_height: 852.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GapBandTooNarrow { .. })
        ));
    }

    #[test]
    fn test_zero_tick_rejected() {
        let config = SimConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "tick_interval_ms",
                ..
            })
        ));
    }

    #[test]
    fn test_nan_fields_rejected() {
        let configs = [
            SimConfig {
                initial_gap_center: f32::NAN,
                ..Default::default()
            },
            SimConfig {
                gravity: f32::NAN,
                ..Default::default()
            },
            SimConfig {
                jump_strength: f32::NAN,
                ..Default::default()
            },
            SimConfig {
                max_gap_shift: f32::NAN,
                ..Default::default()
            },
        ];
        for config in configs {
            assert!(matches!(
                config.validate(),
                Err(ConfigError::NotFinite { .. })
            ));
        }
    }

    #[test]
    fn test_infinite_fields_rejected() {
        let configs = [
            SimConfig {
                play_height: f32::INFINITY,
                ..Default::default()
            },
            SimConfig {
                spawn_offset: f32::INFINITY,
                ..Default::default()
            },
            SimConfig {
                actor_x: f32::NEG_INFINITY,
                ..Default::default()
            },
        ];
        for config in configs {
            assert!(matches!(
                config.validate(),
                Err(ConfigError::NotFinite { .. })
            ));
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            SimConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
