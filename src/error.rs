//! Error types for configuration and best-score storage.

use thiserror::Error;

/// Errors reported by a [`PersistenceGateway`](crate::PersistenceGateway).
///
/// These are never fatal to a run: the simulation logs them and moves on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// The backing store could not be reached.
    #[error("best-score storage unavailable")]
    Unavailable,

    /// The backing store reported a failure.
    #[error("best-score storage error: {0}")]
    Backend(String),
}

/// Errors produced while loading or validating a [`SimConfig`](crate::SimConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field that must be strictly positive was zero or negative.
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f64 },

    /// A float field was NaN or infinite.
    #[error("{field} must be finite (got {value})")]
    NotFinite { field: &'static str, value: f32 },

    /// The band of legal gap centers cannot keep consecutive gaps apart.
    #[error(
        "play height {play_height} leaves a gap band of {band}, need at least {required} \
         to keep gaps {min_gap_spacing} apart"
    )]
    GapBandTooNarrow {
        play_height: f32,
        band: f32,
        required: f32,
        min_gap_spacing: f32,
    },

    /// The removal threshold must lie left of the visible area.
    #[error("removal x {0} must be negative")]
    RemovalInsideView(f32),

    /// The JSON document could not be parsed.
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}
