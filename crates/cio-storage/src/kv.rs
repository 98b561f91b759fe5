//! Storage port and the in-memory backend.
//!
//! The [`KvStore`] trait is the physical store: typed values addressed by a
//! domain name and a raw key. It stands in for a per-domain preferences store
//! and is injected into every handle rather than reached through a global.
//!
//! Implementations:
//!
//! - [`MemoryKvStore`]: for tests and ephemeral state
//! - [`FileKvStore`](crate::FileKvStore): one JSON document per domain on disk

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{StorageError, StorageResult};
use crate::value::StoredValue;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that a domain name is safe to use as a key prefix and a file
/// name.
///
/// Domains must be non-empty, must not contain the null byte (the internal
/// domain/key separator) or path separators, and must not be `.` or `..`.
pub(crate) fn validate_domain(domain: &str) -> StorageResult<()> {
    if domain.is_empty() {
        return Err(StorageError::InvalidKey("domain must not be empty".into()));
    }
    if domain.contains('\0') {
        return Err(StorageError::InvalidKey(
            "domain must not contain null bytes".into(),
        ));
    }
    if domain.contains(['/', '\\']) {
        return Err(StorageError::InvalidKey(format!(
            "domain '{domain}' must not contain path separators"
        )));
    }
    if domain == "." || domain == ".." {
        return Err(StorageError::InvalidKey(format!(
            "domain '{domain}' is not a valid name"
        )));
    }
    Ok(())
}

/// Validate that a key is safe for storage.
///
/// Keys must be non-empty and must not contain the null byte.
pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("key must not be empty".into()));
    }
    if key.contains('\0') {
        return Err(StorageError::InvalidKey(
            "key must not contain null bytes".into(),
        ));
    }
    Ok(())
}

/// Validate that a value can be persisted and read back.
///
/// Doubles and dates must be finite; JSON has no encoding for NaN or the
/// infinities.
pub(crate) fn validate_value(value: &StoredValue) -> StorageResult<()> {
    match value {
        StoredValue::Double(n) | StoredValue::Date(n) if !n.is_finite() => {
            Err(StorageError::Serialization(format!(
                "{} value {n} is not finite",
                value.kind()
            )))
        },
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Physical key-value store partitioned into domains.
///
/// All calls are synchronous and local. Different domains never observe each
/// other's keys.
pub trait KvStore: Send + Sync {
    /// Get a value by domain and key.
    ///
    /// Returns `None` if the key does not exist.
    fn get(&self, domain: &str, key: &str) -> StorageResult<Option<StoredValue>>;

    /// Set a value for a domain and key.
    ///
    /// Overwrites any existing value.
    fn set(&self, domain: &str, key: &str, value: StoredValue) -> StorageResult<()>;

    /// Delete a key from a domain.
    ///
    /// Returns `true` if the key existed and was deleted.
    fn delete(&self, domain: &str, key: &str) -> StorageResult<bool>;

    /// Check if a key exists in a domain.
    fn exists(&self, domain: &str, key: &str) -> StorageResult<bool> {
        Ok(self.get(domain, key)?.is_some())
    }

    /// List all keys in a domain.
    fn list_keys(&self, domain: &str) -> StorageResult<Vec<String>>;

    /// Delete all keys in a domain. Returns how many were removed.
    fn clear_domain(&self, domain: &str) -> StorageResult<u64>;
}

// ---------------------------------------------------------------------------
// In-memory implementation
// ---------------------------------------------------------------------------

/// In-memory key-value store for tests and ephemeral data.
///
/// Keys are stored as `"{domain}\0{key}"` in a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    data: RwLock<HashMap<String, StoredValue>>,
}

impl MemoryKvStore {
    /// Create a new empty in-memory KV store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn full_key(domain: &str, key: &str) -> String {
        format!("{domain}\0{key}")
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, domain: &str, key: &str) -> StorageResult<Option<StoredValue>> {
        validate_domain(domain)?;
        validate_key(key)?;
        let data = self
            .data
            .read()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        Ok(data.get(&Self::full_key(domain, key)).cloned())
    }

    fn set(&self, domain: &str, key: &str, value: StoredValue) -> StorageResult<()> {
        validate_domain(domain)?;
        validate_key(key)?;
        validate_value(&value)?;
        let mut data = self
            .data
            .write()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        data.insert(Self::full_key(domain, key), value);
        Ok(())
    }

    fn delete(&self, domain: &str, key: &str) -> StorageResult<bool> {
        validate_domain(domain)?;
        validate_key(key)?;
        let mut data = self
            .data
            .write()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        Ok(data.remove(&Self::full_key(domain, key)).is_some())
    }

    fn exists(&self, domain: &str, key: &str) -> StorageResult<bool> {
        validate_domain(domain)?;
        validate_key(key)?;
        let data = self
            .data
            .read()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        Ok(data.contains_key(&Self::full_key(domain, key)))
    }

    fn list_keys(&self, domain: &str) -> StorageResult<Vec<String>> {
        validate_domain(domain)?;
        let data = self
            .data
            .read()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        let prefix = format!("{domain}\0");
        Ok(data
            .keys()
            .filter_map(|k| k.strip_prefix(&prefix).map(String::from))
            .collect())
    }

    fn clear_domain(&self, domain: &str) -> StorageResult<u64> {
        validate_domain(domain)?;
        let mut data = self
            .data
            .write()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        let prefix = format!("{domain}\0");
        let before = data.len();
        data.retain(|k, _| !k.starts_with(&prefix));
        Ok(before.saturating_sub(data.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> StoredValue {
        StoredValue::String(s.to_owned())
    }

    #[test]
    fn test_memory_get_set() {
        let store = MemoryKvStore::new();
        store.set("d1", "key1", text("hello")).unwrap();
        assert_eq!(store.get("d1", "key1").unwrap(), Some(text("hello")));
    }

    #[test]
    fn test_memory_get_missing() {
        let store = MemoryKvStore::new();
        assert!(store.get("d1", "missing").unwrap().is_none());
    }

    #[test]
    fn test_memory_overwrite_changes_kind() {
        let store = MemoryKvStore::new();
        store.set("d1", "k", text("v1")).unwrap();
        store.set("d1", "k", StoredValue::Integer(2)).unwrap();
        assert_eq!(store.get("d1", "k").unwrap(), Some(StoredValue::Integer(2)));
    }

    #[test]
    fn test_memory_delete() {
        let store = MemoryKvStore::new();
        store.set("d1", "k", text("v")).unwrap();
        assert!(store.delete("d1", "k").unwrap());
        assert!(!store.delete("d1", "k").unwrap());
        assert!(store.get("d1", "k").unwrap().is_none());
    }

    #[test]
    fn test_memory_exists() {
        let store = MemoryKvStore::new();
        assert!(!store.exists("d1", "k").unwrap());
        store.set("d1", "k", text("v")).unwrap();
        assert!(store.exists("d1", "k").unwrap());
    }

    #[test]
    fn test_memory_domain_isolation() {
        let store = MemoryKvStore::new();
        store.set("d1", "k", text("v1")).unwrap();
        store.set("d2", "k", text("v2")).unwrap();
        assert_eq!(store.get("d1", "k").unwrap(), Some(text("v1")));
        assert_eq!(store.get("d2", "k").unwrap(), Some(text("v2")));
    }

    #[test]
    fn test_memory_prefix_domain_is_not_shared() {
        // "a.b" must not see keys of "a.b.c" and vice versa.
        let store = MemoryKvStore::new();
        store.set("a.b.c", "k", text("inner")).unwrap();
        assert!(store.get("a.b", "k").unwrap().is_none());
        assert!(store.list_keys("a.b").unwrap().is_empty());
        assert_eq!(store.clear_domain("a.b").unwrap(), 0);
        assert!(store.exists("a.b.c", "k").unwrap());
    }

    #[test]
    fn test_memory_list_keys() {
        let store = MemoryKvStore::new();
        store.set("d1", "a", text("1")).unwrap();
        store.set("d1", "b", text("2")).unwrap();
        store.set("d2", "c", text("3")).unwrap();
        let mut keys = store.list_keys("d1").unwrap();
        keys.sort();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_memory_clear_domain() {
        let store = MemoryKvStore::new();
        store.set("d1", "a", text("1")).unwrap();
        store.set("d1", "b", text("2")).unwrap();
        store.set("d2", "c", text("3")).unwrap();
        assert_eq!(store.clear_domain("d1").unwrap(), 2);
        assert!(store.list_keys("d1").unwrap().is_empty());
        assert_eq!(store.list_keys("d2").unwrap().len(), 1);
    }

    #[test]
    fn test_memory_clear_empty_domain() {
        let store = MemoryKvStore::new();
        assert_eq!(store.clear_domain("nothing-here").unwrap(), 0);
    }

    // -- Validation tests --

    #[test]
    fn test_validate_domain_rejects_empty() {
        assert!(validate_domain("").is_err());
    }

    #[test]
    fn test_validate_domain_rejects_null_byte() {
        assert!(validate_domain("d\0bad").is_err());
    }

    #[test]
    fn test_validate_domain_rejects_path_components() {
        assert!(validate_domain("../escape").is_err());
        assert!(validate_domain("a\\b").is_err());
        assert!(validate_domain("..").is_err());
        assert!(validate_domain("io.customer.sdk.com.foo.bar.shared").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_empty() {
        assert!(validate_key("").is_err());
    }

    #[test]
    fn test_validate_key_rejects_null_byte() {
        assert!(validate_key("k\0bad").is_err());
    }

    #[test]
    fn test_validate_value_rejects_non_finite() {
        for n in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(validate_value(&StoredValue::Double(n)).is_err());
            assert!(validate_value(&StoredValue::Date(n)).is_err());
        }
        assert!(validate_value(&StoredValue::Double(-0.0)).is_ok());
        assert!(validate_value(&StoredValue::Double(f64::MAX)).is_ok());
        assert!(validate_value(&text("NaN")).is_ok());
    }

    #[test]
    fn test_memory_rejects_non_finite_double() {
        let store = MemoryKvStore::new();
        store.set("d1", "k", StoredValue::Double(1.5)).unwrap();
        assert!(matches!(
            store.set("d1", "k", StoredValue::Double(f64::NAN)),
            Err(StorageError::Serialization(_))
        ));
        assert_eq!(store.get("d1", "k").unwrap(), Some(StoredValue::Double(1.5)));
    }

    #[test]
    fn test_memory_rejects_invalid_domain() {
        let store = MemoryKvStore::new();
        assert!(matches!(
            store.set("", "k", text("v")),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
