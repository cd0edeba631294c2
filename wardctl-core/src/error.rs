//! Structured error types for wardctl-core.
//!
//! Uses `thiserror` for the library surface. The CLI wraps these in `anyhow`
//! for context, while controllers collapse storage failures into `bool` /
//! `Option` sentinels after logging them.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for wardctl-core operations
#[derive(Error, Debug)]
pub enum WardError {
    /// SQLite rejected a statement (constraint violation, I/O failure, ...)
    #[error("Storage error: {source}")]
    Storage {
        #[from]
        source: rusqlite::Error,
    },

    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// A stored column could not be mapped back onto a domain value
    #[error("Invalid value '{value}' in column {column}")]
    Decode { column: &'static str, value: String },

    /// Configuration file could not be read or parsed
    #[error("Configuration error in {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },
}

/// Result type alias for wardctl-core operations
pub type Result<T> = std::result::Result<T, WardError>;

impl WardError {
    /// Create a decode error for a stored column
    pub fn decode(column: &'static str, value: impl Into<String>) -> Self {
        Self::Decode {
            column,
            value: value.into(),
        }
    }

    /// Create a config error
    pub fn config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WardError::decode("room_type", "Suite");
        assert_eq!(
            err.to_string(),
            "Invalid value 'Suite' in column room_type"
        );

        let err = WardError::config("/tmp/config.toml", "expected a table");
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("/tmp/config.toml"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
        let ward_err: WardError = io_err.into();

        assert!(matches!(ward_err, WardError::Io { .. }));
    }
}
