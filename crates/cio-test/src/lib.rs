//! cio Test - Shared test utilities for the cio client SDK.
//!
//! This crate provides hand-written doubles and fixtures that can be used
//! across the cio crates as a dev-dependency.
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! cio-test.workspace = true
//! ```
//!
//! Then use in your tests:
//!
//! ```rust,ignore
//! use cio_test::{DeviceMetricsMock, memory_store, test_site_id};
//! use cio_storage::{KeyValueStorage, SiteKeyValueStorage, StorageKey};
//!
//! #[test]
//! fn test_bundle_id_is_read_per_call() {
//!     let metrics = Arc::new(DeviceMetricsMock::new("com.foo.bar"));
//!     let storage = SiteKeyValueStorage::new(memory_store(), metrics.clone(), test_site_id());
//!     storage.set_string("token", StorageKey::PushDeviceToken);
//!     assert_eq!(metrics.app_bundle_id_calls(), 1);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod prelude;

pub mod fixtures;
pub mod logs;
pub mod mocks;

pub use fixtures::*;
pub use logs::*;
pub use mocks::*;
