//! cio SDK - stored SDK state and setup diagnostics.
//!
//! This crate provides:
//! - [`Sdk`], which keeps the identified profile, push device token, and HTTP
//!   pause deadline in site-scoped and global storage handles
//! - [`SetupChecklist`], which reports deep link setup progress on the forced
//!   log target
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use cio_core::{AppDeviceMetrics, SiteId};
//! use cio_sdk::Sdk;
//! use cio_storage::MemoryKvStore;
//!
//! # fn main() -> cio_sdk::SdkResult<()> {
//! let sdk = Sdk::new(
//!     SiteId::new("485895958")?,
//!     Arc::new(MemoryKvStore::new()),
//!     Arc::new(AppDeviceMetrics::new("com.foo.bar")),
//! );
//! sdk.identify("profile-1")?;
//! assert_eq!(sdk.identified_profile_id().as_deref(), Some("profile-1"));
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod checklist;
pub mod error;
pub mod sdk;

pub use checklist::{
    DeepLinkStep, SetupChecklist, TracingSetupChecklist, no_steps_report, progress_report,
};
pub use error::{SdkError, SdkResult};
pub use sdk::{Sdk, device_metrics, open_store};
