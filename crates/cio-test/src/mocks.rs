//! Hand-written doubles for the SDK's collaborator traits.
//!
//! Each double records how it was called in plain counters and vectors so
//! tests can assert on interactions directly.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use chrono::{DateTime, Utc};
use cio_core::DeviceMetrics;
use cio_sdk::{DeepLinkStep, SetupChecklist};
use cio_storage::{KeyValueStorage, StorageKey, StoredValue};
use url::Url;

// ---------------------------------------------------------------------------
// DeviceMetricsMock
// ---------------------------------------------------------------------------

/// [`DeviceMetrics`] returning a settable bundle id and counting reads.
#[derive(Debug)]
pub struct DeviceMetricsMock {
    underlying_app_bundle_id: Mutex<String>,
    app_bundle_id_calls: AtomicUsize,
}

impl DeviceMetricsMock {
    /// Mock that reports `bundle_id`.
    #[must_use]
    pub fn new(bundle_id: impl Into<String>) -> Self {
        Self {
            underlying_app_bundle_id: Mutex::new(bundle_id.into()),
            app_bundle_id_calls: AtomicUsize::new(0),
        }
    }

    /// Change the bundle id returned from now on.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_app_bundle_id(&self, bundle_id: impl Into<String>) {
        *self
            .underlying_app_bundle_id
            .lock()
            .expect("lock poisoned") = bundle_id.into();
    }

    /// How many times the bundle id was read.
    #[must_use]
    pub fn app_bundle_id_calls(&self) -> usize {
        self.app_bundle_id_calls.load(Ordering::SeqCst)
    }

    /// `true` if the bundle id was read at least once.
    #[must_use]
    pub fn app_bundle_id_called(&self) -> bool {
        self.app_bundle_id_calls() > 0
    }
}

impl DeviceMetrics for DeviceMetricsMock {
    fn app_bundle_id(&self) -> String {
        self.app_bundle_id_calls.fetch_add(1, Ordering::SeqCst);
        self.underlying_app_bundle_id
            .lock()
            .expect("lock poisoned")
            .clone()
    }
}

// ---------------------------------------------------------------------------
// KeyValueStorageMock
// ---------------------------------------------------------------------------

/// In-memory [`KeyValueStorage`] that records every mutation.
///
/// Reads are served from the values written so far, or pre-seeded with
/// [`with_value`](Self::with_value). Kind handling matches the real handle:
/// a mismatched read is `None`, and `double` widens integers.
#[derive(Debug, Default)]
pub struct KeyValueStorageMock {
    values: Mutex<HashMap<StorageKey, StoredValue>>,
    set_calls: Mutex<Vec<(StorageKey, StoredValue)>>,
    delete_calls: Mutex<Vec<StorageKey>>,
    delete_all_calls: AtomicUsize,
    switch_to_global_calls: AtomicUsize,
    global: AtomicBool,
}

impl KeyValueStorageMock {
    /// Empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed `key` with `value` without recording a set call.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_value(self, key: StorageKey, value: StoredValue) -> Self {
        self.values
            .lock()
            .expect("lock poisoned")
            .insert(key, value);
        self
    }

    /// Every set call in order, as `(key, value)`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn set_calls(&self) -> Vec<(StorageKey, StoredValue)> {
        self.set_calls.lock().expect("lock poisoned").clone()
    }

    /// Value passed to the most recent set call for `key`.
    #[must_use]
    pub fn last_set(&self, key: StorageKey) -> Option<StoredValue> {
        self.set_calls()
            .into_iter()
            .rev()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    /// Every key passed to `delete`, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn delete_calls(&self) -> Vec<StorageKey> {
        self.delete_calls.lock().expect("lock poisoned").clone()
    }

    /// How many times `delete_all` ran.
    #[must_use]
    pub fn delete_all_calls(&self) -> usize {
        self.delete_all_calls.load(Ordering::SeqCst)
    }

    /// How many times `switch_to_global_data_store` ran.
    #[must_use]
    pub fn switch_to_global_data_store_calls(&self) -> usize {
        self.switch_to_global_calls.load(Ordering::SeqCst)
    }

    /// `true` once switched to the global store.
    #[must_use]
    pub fn is_global(&self) -> bool {
        self.global.load(Ordering::SeqCst)
    }

    fn get(&self, key: StorageKey) -> Option<StoredValue> {
        self.values
            .lock()
            .expect("lock poisoned")
            .get(&key)
            .cloned()
    }

    fn record_set(&self, key: StorageKey, value: StoredValue) {
        self.set_calls
            .lock()
            .expect("lock poisoned")
            .push((key, value.clone()));
        self.values
            .lock()
            .expect("lock poisoned")
            .insert(key, value);
    }
}

impl KeyValueStorage for KeyValueStorageMock {
    fn string(&self, key: StorageKey) -> Option<String> {
        self.get(key)?.as_string().map(str::to_owned)
    }

    fn set_string(&self, value: &str, key: StorageKey) {
        self.record_set(key, StoredValue::String(value.to_owned()));
    }

    fn integer(&self, key: StorageKey) -> Option<i64> {
        self.get(key)?.as_integer()
    }

    fn set_int(&self, value: i64, key: StorageKey) {
        self.record_set(key, StoredValue::Integer(value));
    }

    fn double(&self, key: StorageKey) -> Option<f64> {
        self.get(key)?.as_double()
    }

    fn set_double(&self, value: f64, key: StorageKey) {
        self.record_set(key, StoredValue::Double(value));
    }

    fn date(&self, key: StorageKey) -> Option<DateTime<Utc>> {
        self.get(key)?.as_date()
    }

    fn set_date(&self, value: DateTime<Utc>, key: StorageKey) {
        self.record_set(key, StoredValue::from_date(value));
    }

    fn delete(&self, key: StorageKey) {
        self.delete_calls.lock().expect("lock poisoned").push(key);
        self.values.lock().expect("lock poisoned").remove(&key);
    }

    fn delete_all(&self) {
        self.delete_all_calls.fetch_add(1, Ordering::SeqCst);
        self.values.lock().expect("lock poisoned").clear();
    }

    fn switch_to_global_data_store(&mut self) {
        self.switch_to_global_calls.fetch_add(1, Ordering::SeqCst);
        self.global.store(true, Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// SetupChecklistMock
// ---------------------------------------------------------------------------

/// [`SetupChecklist`] that records reported steps.
#[derive(Debug, Default)]
pub struct SetupChecklistMock {
    no_steps_calls: AtomicUsize,
    completed_steps: Mutex<Vec<(DeepLinkStep, Url)>>,
}

impl SetupChecklistMock {
    /// Mock with no recorded calls.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times no progress was reported.
    #[must_use]
    pub fn no_steps_complete_deep_links_calls(&self) -> usize {
        self.no_steps_calls.load(Ordering::SeqCst)
    }

    /// Every completed step reported, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn completed_steps(&self) -> Vec<(DeepLinkStep, Url)> {
        self.completed_steps.lock().expect("lock poisoned").clone()
    }
}

impl SetupChecklist for SetupChecklistMock {
    fn no_steps_complete_deep_links(&self) {
        self.no_steps_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn completed_deep_link_step(&self, step: DeepLinkStep, deep_link: &Url) {
        self.completed_steps
            .lock()
            .expect("lock poisoned")
            .push((step, deep_link.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_metrics_mock_counts_reads() {
        let mock = DeviceMetricsMock::new("com.foo.bar");
        assert!(!mock.app_bundle_id_called());
        assert_eq!(mock.app_bundle_id(), "com.foo.bar");
        mock.set_app_bundle_id("com.other");
        assert_eq!(mock.app_bundle_id(), "com.other");
        assert_eq!(mock.app_bundle_id_calls(), 2);
    }

    #[test]
    fn test_storage_mock_records_sets_and_serves_reads() {
        let mock = KeyValueStorageMock::new();
        mock.set_string("p1", StorageKey::IdentifiedProfileId);
        mock.set_int(7, StorageKey::HttpRequestsPauseEnds);

        assert_eq!(mock.string(StorageKey::IdentifiedProfileId).as_deref(), Some("p1"));
        assert_eq!(mock.double(StorageKey::HttpRequestsPauseEnds), Some(7.0));
        assert!(mock.string(StorageKey::HttpRequestsPauseEnds).is_none());
        assert_eq!(mock.set_calls().len(), 2);
        assert_eq!(
            mock.last_set(StorageKey::IdentifiedProfileId),
            Some(StoredValue::String("p1".to_owned()))
        );
    }

    #[test]
    fn test_storage_mock_seeded_value_is_not_a_set_call() {
        let mock = KeyValueStorageMock::new()
            .with_value(StorageKey::PushDeviceToken, StoredValue::String("t".into()));
        assert_eq!(mock.string(StorageKey::PushDeviceToken).as_deref(), Some("t"));
        assert!(mock.set_calls().is_empty());
    }

    #[test]
    fn test_storage_mock_delete_and_switch() {
        let mut mock = KeyValueStorageMock::new();
        mock.set_string("p1", StorageKey::IdentifiedProfileId);
        mock.delete(StorageKey::IdentifiedProfileId);
        mock.delete_all();
        mock.switch_to_global_data_store();

        assert!(mock.string(StorageKey::IdentifiedProfileId).is_none());
        assert_eq!(mock.delete_calls(), vec![StorageKey::IdentifiedProfileId]);
        assert_eq!(mock.delete_all_calls(), 1);
        assert_eq!(mock.switch_to_global_data_store_calls(), 1);
        assert!(mock.is_global());
    }

    #[test]
    fn test_checklist_mock_records_steps() {
        let mock = SetupChecklistMock::new();
        let url = Url::parse("myapp://screen").unwrap();
        mock.no_steps_complete_deep_links();
        mock.completed_deep_link_step(DeepLinkStep::PushOpened, &url);
        assert_eq!(mock.no_steps_complete_deep_links_calls(), 1);
        assert_eq!(mock.completed_steps(), vec![(DeepLinkStep::PushOpened, url)]);
    }
}
