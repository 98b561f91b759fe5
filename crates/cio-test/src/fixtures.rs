//! Test fixtures for common types.

use std::sync::Arc;

use cio_core::{AppDeviceMetrics, SiteId};
use cio_storage::{FileKvStore, KvStore, MemoryKvStore, SiteKeyValueStorage};
use uuid::Uuid;

/// Bundle id used by the fixtures.
pub const TEST_BUNDLE_ID: &str = "com.foo.bar";

/// A fixed, valid site id.
///
/// # Panics
///
/// Never; the literal is a valid site id.
#[must_use]
pub fn test_site_id() -> SiteId {
    SiteId::new("485895958").expect("literal site id is valid")
}

/// A fresh site id that no other test uses.
///
/// # Panics
///
/// Never; UUIDs are valid site ids.
#[must_use]
pub fn random_site_id() -> SiteId {
    SiteId::new(Uuid::new_v4().simple().to_string()).expect("uuid is a valid site id")
}

/// An empty in-memory store.
#[must_use]
pub fn memory_store() -> Arc<dyn KvStore> {
    Arc::new(MemoryKvStore::new())
}

/// A file store in a fresh temporary directory.
///
/// Keep the returned [`tempfile::TempDir`] alive for as long as the store is
/// used.
///
/// # Panics
///
/// Panics if the temporary directory cannot be created.
#[must_use]
pub fn file_store() -> (Arc<FileKvStore>, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let store = FileKvStore::open(dir.path().join("preferences")).expect("open file store");
    (Arc::new(store), dir)
}

/// Site handle for `site_id` over `store`, using [`TEST_BUNDLE_ID`].
#[must_use]
pub fn site_storage(store: &Arc<dyn KvStore>, site_id: &SiteId) -> SiteKeyValueStorage {
    SiteKeyValueStorage::new(
        Arc::clone(store),
        Arc::new(AppDeviceMetrics::new(TEST_BUNDLE_ID)),
        site_id.clone(),
    )
}

/// Global handle over `store`, using [`TEST_BUNDLE_ID`].
#[must_use]
pub fn global_storage(store: &Arc<dyn KvStore>) -> SiteKeyValueStorage {
    SiteKeyValueStorage::global(
        Arc::clone(store),
        Arc::new(AppDeviceMetrics::new(TEST_BUNDLE_ID)),
        test_site_id(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_site_ids_differ() {
        assert_ne!(random_site_id(), random_site_id());
    }

    #[test]
    fn test_fixture_file_names() {
        let store = memory_store();
        assert_eq!(
            site_storage(&store, &test_site_id()).get_file_name(),
            "io.customer.sdk.com.foo.bar.485895958"
        );
        assert_eq!(
            global_storage(&store).get_file_name(),
            "io.customer.sdk.com.foo.bar.shared"
        );
    }
}
