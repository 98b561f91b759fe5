//! Site-scoped typed storage.
//!
//! [`KeyValueStorage`] is the capability SDK components depend on.
//! [`SiteKeyValueStorage`] implements it over an injected [`KvStore`], placing
//! every value in the domain of one site, or in the global domain after
//! [`switch_to_global_data_store`](KeyValueStorage::switch_to_global_data_store).
//!
//! Reads return `None` on a miss. Failures of the underlying store are logged
//! and otherwise swallowed: a failed read looks like a miss, a failed write or
//! delete returns normally.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use cio_core::{DeviceMetrics, SiteId};
use tracing::{debug, warn};

use crate::domain::{DomainScope, StorageDomain};
use crate::key::StorageKey;
use crate::kv::KvStore;
use crate::value::StoredValue;

/// Typed get/set/delete confined to one storage domain.
pub trait KeyValueStorage: Send + Sync {
    /// Stored string for `key`.
    fn string(&self, key: StorageKey) -> Option<String>;

    /// Store a string under `key`.
    fn set_string(&self, value: &str, key: StorageKey);

    /// Stored integer for `key`.
    fn integer(&self, key: StorageKey) -> Option<i64>;

    /// Store an integer under `key`.
    fn set_int(&self, value: i64, key: StorageKey);

    /// Stored number for `key`; integers are widened.
    fn double(&self, key: StorageKey) -> Option<f64>;

    /// Store a double under `key`.
    fn set_double(&self, value: f64, key: StorageKey);

    /// Stored timestamp for `key`, exact to at least the second.
    fn date(&self, key: StorageKey) -> Option<DateTime<Utc>>;

    /// Store a timestamp under `key`.
    fn set_date(&self, value: DateTime<Utc>, key: StorageKey);

    /// Remove `key` from the current domain.
    fn delete(&self, key: StorageKey);

    /// Remove every key in the current domain. Other domains are untouched.
    fn delete_all(&self);

    /// Point this handle at the global domain from now on.
    fn switch_to_global_data_store(&mut self);
}

/// [`KeyValueStorage`] backed by a [`KvStore`] and scoped by site id.
#[derive(Clone)]
pub struct SiteKeyValueStorage {
    store: Arc<dyn KvStore>,
    device_metrics: Arc<dyn DeviceMetrics>,
    site_id: SiteId,
    global: bool,
}

impl fmt::Debug for SiteKeyValueStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteKeyValueStorage")
            .field("site_id", &self.site_id)
            .field("global", &self.global)
            .finish_non_exhaustive()
    }
}

impl SiteKeyValueStorage {
    /// Handle on the domain of `site_id`.
    #[must_use]
    pub fn new(
        store: Arc<dyn KvStore>,
        device_metrics: Arc<dyn DeviceMetrics>,
        site_id: SiteId,
    ) -> Self {
        Self {
            store,
            device_metrics,
            site_id,
            global: false,
        }
    }

    /// Handle that starts on the global domain.
    #[must_use]
    pub fn global(
        store: Arc<dyn KvStore>,
        device_metrics: Arc<dyn DeviceMetrics>,
        site_id: SiteId,
    ) -> Self {
        let mut storage = Self::new(store, device_metrics, site_id);
        storage.switch_to_global_data_store();
        storage
    }

    /// The site this handle was created for.
    #[must_use]
    pub fn site_id(&self) -> &SiteId {
        &self.site_id
    }

    /// `true` once switched to the global domain.
    #[must_use]
    pub fn is_global(&self) -> bool {
        self.global
    }

    /// Which domain the handle currently addresses.
    #[must_use]
    pub fn scope(&self) -> DomainScope {
        if self.global {
            DomainScope::Global
        } else {
            DomainScope::Site(self.site_id.clone())
        }
    }

    /// Current domain name.
    ///
    /// Asks [`DeviceMetrics`] for the bundle id on every call.
    #[must_use]
    pub fn get_file_name(&self) -> String {
        self.domain().into()
    }

    /// Every key currently present in the domain.
    #[must_use]
    pub fn keys(&self) -> Vec<StorageKey> {
        let domain = self.domain();
        match self.store.list_keys(domain.as_str()) {
            Ok(raw) => raw.iter().filter_map(|k| k.parse().ok()).collect(),
            Err(e) => {
                warn!(domain = %domain, error = %e, "failed to list stored keys");
                Vec::new()
            },
        }
    }

    /// Raw stored value for `key`, whatever its kind.
    #[must_use]
    pub fn value(&self, key: StorageKey) -> Option<StoredValue> {
        let domain = self.domain();
        match self.store.get(domain.as_str(), key.as_str()) {
            Ok(value) => value,
            Err(e) => {
                warn!(domain = %domain, key = %key, error = %e, "failed to read stored value");
                None
            },
        }
    }

    /// Store a raw value under `key`.
    pub fn set_value(&self, value: StoredValue, key: StorageKey) {
        let domain = self.domain();
        match self.store.set(domain.as_str(), key.as_str(), value) {
            Ok(()) => debug!(domain = %domain, key = %key, "stored value"),
            Err(e) => {
                warn!(domain = %domain, key = %key, error = %e, "failed to store value");
            },
        }
    }

    fn domain(&self) -> StorageDomain {
        StorageDomain::new(&self.device_metrics.app_bundle_id(), &self.scope())
    }
}

impl KeyValueStorage for SiteKeyValueStorage {
    fn string(&self, key: StorageKey) -> Option<String> {
        match self.value(key)? {
            StoredValue::String(s) => Some(s),
            _ => None,
        }
    }

    fn set_string(&self, value: &str, key: StorageKey) {
        self.set_value(StoredValue::String(value.to_owned()), key);
    }

    fn integer(&self, key: StorageKey) -> Option<i64> {
        self.value(key)?.as_integer()
    }

    fn set_int(&self, value: i64, key: StorageKey) {
        self.set_value(StoredValue::Integer(value), key);
    }

    fn double(&self, key: StorageKey) -> Option<f64> {
        self.value(key)?.as_double()
    }

    fn set_double(&self, value: f64, key: StorageKey) {
        self.set_value(StoredValue::Double(value), key);
    }

    fn date(&self, key: StorageKey) -> Option<DateTime<Utc>> {
        self.value(key)?.as_date()
    }

    fn set_date(&self, value: DateTime<Utc>, key: StorageKey) {
        self.set_value(StoredValue::from_date(value), key);
    }

    fn delete(&self, key: StorageKey) {
        let domain = self.domain();
        match self.store.delete(domain.as_str(), key.as_str()) {
            Ok(existed) => debug!(domain = %domain, key = %key, existed, "deleted value"),
            Err(e) => {
                warn!(domain = %domain, key = %key, error = %e, "failed to delete value");
            },
        }
    }

    fn delete_all(&self) {
        let domain = self.domain();
        match self.store.clear_domain(domain.as_str()) {
            Ok(count) => debug!(domain = %domain, count, "cleared domain"),
            Err(e) => warn!(domain = %domain, error = %e, "failed to clear domain"),
        }
    }

    fn switch_to_global_data_store(&mut self) {
        if !self.global {
            debug!(site_id = %self.site_id, "switching to global data store");
        }
        self.global = true;
    }
}
