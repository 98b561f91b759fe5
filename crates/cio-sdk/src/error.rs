//! SDK error types.

use cio_core::CoreError;
use cio_storage::StorageError;
use thiserror::Error;

/// Errors from building or driving the SDK facade.
#[derive(Debug, Error)]
pub enum SdkError {
    /// No site id was configured.
    #[error("no site id configured; set sdk.site_id or CIO_SITE_ID")]
    MissingSiteId,

    /// An argument was rejected before touching storage.
    #[error("invalid {field}: {message}")]
    InvalidArgument {
        /// Name of the rejected argument.
        field: &'static str,
        /// Why it was rejected.
        message: String,
    },

    /// Core type validation failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Opening the storage backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Preparing the home directory failed.
    #[error("home directory error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for SDK operations.
pub type SdkResult<T> = Result<T, SdkError>;
