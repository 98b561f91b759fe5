//! cio Telemetry - Logging for the cio client SDK.
//!
//! This crate provides:
//! - Configurable `tracing` subscriber setup with multiple formats
//! - Output to stderr or daily rolling files
//! - A forced target ([`FORCE_TARGET`]) that is printed at `info` whatever
//!   the configured level
//!
//! # Example
//!
//! ```rust,no_run
//! use cio_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), cio_telemetry::TelemetryError> {
//! let config = LogConfig::new("warn")
//!     .with_format(LogFormat::Pretty)
//!     .with_directive("cio_storage=debug");
//!
//! setup_logging(&config)?;
//! tracing::warn!("storage directory missing");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{FORCE_TARGET, LogConfig, LogFormat, LogTarget, build_subscriber, setup_logging};
