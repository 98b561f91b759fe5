//! Storage error types.

use std::path::PathBuf;

/// Errors from storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A storage operation failed.
    #[error("storage error: {0}")]
    Internal(String),

    /// Reading or writing a domain file failed.
    #[error("io error at {}: {source}", path.display())]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The domain or key is invalid.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// A raw name does not match any known storage key.
    #[error("unknown storage key: {0}")]
    UnknownKey(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
