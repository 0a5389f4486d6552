//! Error types for the non-simulation edges of the crate.
//!
//! The simulation itself is total and never fails. Errors only arise when
//! loading settings or writing the persisted high score.

use std::fmt;

/// Top-level error enum for brickfall.
#[derive(Debug)]
pub enum GameError {
    /// Reading or writing a file failed.
    Io {
        /// What was being accessed (path or storage key).
        context: String,
        source: std::io::Error,
    },

    /// Settings JSON could not be parsed.
    Parse {
        context: String,
        source: serde_json::Error,
    },

    /// A settings value is outside its usable range.
    InvalidSetting {
        /// Name of the field (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Io { context, source } => write!(f, "I/O error on '{}': {}", context, source),
            GameError::Parse { context, source } => {
                write!(f, "could not parse '{}': {}", context, source)
            }
            GameError::InvalidSetting {
                name,
                value,
                expected,
            } => write!(
                f,
                "setting '{}' = {} is outside accepted range {}",
                name, value, expected
            ),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io { source, .. } => Some(source),
            GameError::Parse { source, .. } => Some(source),
            GameError::InvalidSetting { .. } => None,
        }
    }
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;
