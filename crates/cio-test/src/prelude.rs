//! Prelude module - commonly used test helpers for convenient import.
//!
//! Use `use cio_test::prelude::*;` in test modules.

// Doubles
pub use crate::{DeviceMetricsMock, KeyValueStorageMock, SetupChecklistMock};

// Fixtures
pub use crate::{
    TEST_BUNDLE_ID, file_store, global_storage, memory_store, random_site_id, site_storage,
    test_site_id,
};

// Log capture
pub use crate::{LogCapture, capture_logs};
