//! Core error types.

use thiserror::Error;

/// Errors raised while constructing core values.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A site identifier failed validation.
    #[error("invalid site id '{site_id}': {reason}")]
    InvalidSiteId {
        /// The rejected value.
        site_id: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
