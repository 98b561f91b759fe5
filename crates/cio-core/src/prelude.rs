//! Prelude module - commonly used types for convenient import.
//!
//! Use `use cio_core::prelude::*;` to import all essential types.

// Errors
pub use crate::{CoreError, CoreResult};

// Site scoping
pub use crate::SiteId;

// Collaborators
pub use crate::{AppDeviceMetrics, DeviceMetrics};

// Time helpers
pub use crate::{DateTimeExt, TimeUnit};
