//! Typed errors raised at the library seams.
//!
//! Validation problems are not errors here: they are returned as data by
//! [`crate::core::validator::validate`].

use std::io;
use std::path::PathBuf;

/// The configured deadline could not be turned into an instant.
///
/// Callers treat the deadline as unset when they see this.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("invalid deadline_datetime '{value}' (expected YYYY-MM-DD HH:MM): {source}")]
    InvalidDeadline {
        value: String,
        source: chrono::ParseError,
    },

    #[error("unknown timezone '{0}'")]
    UnknownTimezone(String),

    /// The local wall-clock time falls into a DST gap in the configured zone.
    #[error("deadline '{value}' does not exist in timezone '{timezone}'")]
    NonexistentLocalTime { value: String, timezone: String },

    /// The deadline sits so close to the calendar limits that its windows overflow.
    #[error("deadline '{value}' is out of range")]
    DeadlineOutOfRange { value: String },

    #[error("{field} must be between 0 and {max}, got {value}")]
    WindowOutOfRange {
        field: &'static str,
        value: i64,
        max: i64,
    },
}

/// Failure while reading or rewriting the record table.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        source: io::Error,
    },

    #[error("{action} {}: {source}", path.display())]
    Csv {
        action: &'static str,
        path: PathBuf,
        source: csv::Error,
    },
}

impl StorageError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(action: &'static str, path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            action,
            path: path.into(),
            source,
        }
    }
}
