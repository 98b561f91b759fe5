//! Prelude module - commonly used types for convenient import.
//!
//! Use `use cio_storage::prelude::*;` to import all essential types.

// Errors
pub use crate::{StorageError, StorageResult};

// Port and backends
pub use crate::{FileKvStore, KvStore, MemoryKvStore};

// Capability
pub use crate::{KeyValueStorage, SiteKeyValueStorage, StorageKey};

// Values
pub use crate::{StoredValue, ValueKind};
