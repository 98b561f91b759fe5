//! Telemetry error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while setting up logging.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The level or a directive is not a valid filter.
    #[error("invalid log filter '{directive}': {message}")]
    InvalidFilter {
        /// The offending level or directive.
        directive: String,
        /// Parser message.
        message: String,
    },

    /// Unknown log format name.
    #[error("unknown log format '{0}'; expected pretty, compact, json, or full")]
    UnknownFormat(String),

    /// The log directory could not be created.
    #[error("failed to create log directory {path}: {source}")]
    LogDirectory {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A global subscriber is already installed.
    #[error("logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
