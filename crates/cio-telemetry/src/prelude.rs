//! Prelude module - commonly used types for convenient import.
//!
//! Use `use cio_telemetry::prelude::*;` to import all essential types.
//!
//! # Example
//!
//! ```rust,no_run
//! use cio_telemetry::prelude::*;
//!
//! # fn main() -> TelemetryResult<()> {
//! let config = LogConfig::new("info")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("cio_storage=debug");
//!
//! setup_logging(&config)?;
//! tracing::info!(target: FORCE_TARGET, "always printed");
//! # Ok(())
//! # }
//! ```

// Errors
pub use crate::{TelemetryError, TelemetryResult};

// Logging configuration
pub use crate::{LogConfig, LogFormat, LogTarget};

// Setup functions
pub use crate::{FORCE_TARGET, build_subscriber, setup_logging};
