//! Crate-level error types.

use std::fmt;

/// Errors produced by the fruitpano crate.
///
/// Only construction and configuration can fail; the interaction core
/// itself treats malformed input as a no-op.
#[derive(Debug)]
pub enum PanoramaError {
    /// Options violate an invariant the interaction core relies on.
    InvalidOptions(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for PanoramaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOptions(msg) => write!(f, "invalid options: {msg}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for PanoramaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PanoramaError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
