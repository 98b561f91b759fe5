//! cio Storage - site-scoped key-value persistence.
//!
//! Provides two layers:
//!
//! # Port: [`KvStore`]
//!
//! Fallible typed `get`/`set`/`delete` addressed by a domain name and a raw
//! key. Injected into every handle; never reached through a global.
//!
//! | Backend | Use |
//! |---------|-----|
//! | [`MemoryKvStore`] | tests, ephemeral state |
//! | [`FileKvStore`] | one JSON document per domain under a directory |
//!
//! # Capability: [`KeyValueStorage`]
//!
//! Typed get/set/delete under enumerated [`StorageKey`]s, confined to the
//! domain of one site. [`SiteKeyValueStorage`] computes the domain name
//! `io.customer.sdk.<bundleId>.<siteId>` (or `...<bundleId>.shared` once
//! switched to the global store) and swallows port failures after logging
//! them.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod domain;
pub mod error;
pub mod file;
pub mod key;
pub mod kv;
pub mod site;
pub mod value;

pub use domain::{DOMAIN_PREFIX, DomainScope, GLOBAL_SUFFIX, StorageDomain};
pub use error::{StorageError, StorageResult};
pub use file::FileKvStore;
pub use key::StorageKey;
pub use kv::{KvStore, MemoryKvStore};
pub use site::{KeyValueStorage, SiteKeyValueStorage};
pub use value::{StoredValue, ValueKind};
