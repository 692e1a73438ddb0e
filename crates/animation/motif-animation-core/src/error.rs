//! Error types for the animation engine.
//!
//! Every failure is local and recoverable: a failed call leaves the store it was
//! made against untouched and reports which rule it broke.

use serde::{Deserialize, Serialize};

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AnimationError>;

/// Which half of the edit history an undo/redo request looked at.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryDirection {
    Undo,
    Redo,
}

impl std::fmt::Display for HistoryDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryDirection::Undo => f.write_str("undo"),
            HistoryDirection::Redo => f.write_str("redo"),
        }
    }
}

/// Comprehensive error type for animation operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AnimationError {
    /// A shape with this key is already declared
    #[error("Shape '{key}' already exists")]
    DuplicateKey { key: String },

    /// Empty key, or one containing whitespace or `#`
    #[error("Invalid shape name '{key}'")]
    InvalidKey { key: String },

    /// No shape is declared under this key
    #[error("Shape '{key}' doesn't exist")]
    UnknownKey { key: String },

    /// No keyframe exists at the requested time
    #[error("Key frame at time {time} doesn't exist for shape '{key}'")]
    NotFound { key: String, time: f64 },

    /// A keyframe already exists at this time
    #[error("Key frame at time {time} already exists for shape '{key}'")]
    TimeConflict { key: String, time: f64 },

    /// Start time lies after end time
    #[error("Initial time {start} must not be greater than final time {end}")]
    InvalidRange { start: f64, end: f64 },

    /// Canvas with non-positive extent
    #[error("Canvas width and height must be greater than zero (got {width}x{height})")]
    InvalidBounds { width: i32, height: i32 },

    /// Color channel outside [0, 255]
    #[error("Invalid {channel} color {value}, not within [0,255]")]
    InvalidColor { channel: String, value: f64 },

    /// Negative size or non-finite coordinate
    #[error("Invalid {field}: {value}")]
    InvalidGeometry { field: String, value: f64 },

    /// Negative or non-finite keyframe time
    #[error("Key frame time must be finite and non-negative (got {time})")]
    InvalidTime { time: f64 },

    /// Query time outside [0, end time]
    #[error("Time {time} is out of range [0, {end}]")]
    OutOfRange { time: f64, end: f64 },

    /// Undo or redo with an empty stack
    #[error("No {direction} history")]
    NoHistory { direction: HistoryDirection },

    /// Unrecognized shape variant name
    #[error("Unsupported shape type '{name}'")]
    UnsupportedVariant { name: String },

    /// Keyframe shape doesn't belong to the timeline it is inserted into
    #[error("Key frame shape '{found}' doesn't match shape '{key}'")]
    ShapeMismatch { key: String, found: String },

    /// Playback speed of zero ticks per second
    #[error("Speed must be positive (got {ticks_per_second} ticks per second)")]
    InvalidSpeed { ticks_per_second: u32 },

    /// Malformed animation text
    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// JSON (de)serialization failure
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl AnimationError {
    /// Get error category for grouping messages in a presentation layer
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::DuplicateKey { .. }
            | Self::UnknownKey { .. }
            | Self::NotFound { .. }
            | Self::TimeConflict { .. }
            | Self::ShapeMismatch { .. } => "data",
            Self::InvalidRange { .. }
            | Self::InvalidBounds { .. }
            | Self::InvalidColor { .. }
            | Self::InvalidGeometry { .. }
            | Self::InvalidTime { .. }
            | Self::InvalidKey { .. }
            | Self::UnsupportedVariant { .. } => "validation",
            Self::OutOfRange { .. } => "query",
            Self::NoHistory { .. } => "history",
            Self::InvalidSpeed { .. } => "playback",
            Self::Parse { .. } | Self::Serialization { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for AnimationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}
