//! cio Core - Foundation types shared by the cio client SDK crates.
//!
//! This crate provides:
//! - [`SiteId`], the validated tenant key that scopes stored SDK state
//! - The [`DeviceMetrics`] collaborator that supplies the app bundle id
//! - Date helpers ([`DateTimeExt`]) used for pause deadlines and timestamps
//! - [`CioHome`], the on-disk home directory layout

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod prelude;

pub mod device;
pub mod dirs;
pub mod error;
pub mod site;
pub mod time;

pub use device::{AppDeviceMetrics, DeviceMetrics, UNKNOWN_BUNDLE_ID};
pub use dirs::{CIO_HOME_ENV, CioHome};
pub use error::{CoreError, CoreResult};
pub use site::{RESERVED_SITE_ID, SiteId};
pub use time::{DateTimeExt, TimeUnit, from_seconds_since_epoch};
