//! Error types for session setup and per-tick input

use thiserror::Error;

/// Invalid initialization parameters. Fatal: no simulation is built.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config JSON is malformed or has out-of-range types (e.g. a negative count)
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// World width and height must both be positive
    #[error("World dimensions must be positive, got {width}x{height}")]
    NonPositiveWorld { width: f32, height: f32 },

    /// A numeric field is NaN or infinite
    #[error("Config value `{field}` must be finite")]
    NonFiniteValue { field: &'static str },

    /// A numeric field that must be >= 0 is negative
    #[error("Config value `{field}` must not be negative")]
    NegativeValue { field: &'static str },

    /// A platform has non-positive or non-finite extents
    #[error("Platform {index} is ill-formed")]
    IllFormedPlatform { index: usize },

    /// Two platforms share interior area
    #[error("Platforms {a} and {b} overlap")]
    OverlappingPlatforms { a: usize, b: usize },

    /// A dynamic body has non-positive or non-finite size
    #[error("Body size for {entity} is ill-formed")]
    IllFormedBody { entity: &'static str },

    /// A body starts outside the world rectangle
    #[error("{entity} starts outside the world")]
    EntityOutOfWorld { entity: String },
}

/// Rejected tick input. State is left untouched.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum TickError {
    /// Elapsed time must be finite and non-negative
    #[error("Invalid tick delta: {0}")]
    InvalidDelta(f32),
}

/// Result type for configuration loading
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
