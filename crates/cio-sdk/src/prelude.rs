//! Prelude module - commonly used types for convenient import.
//!
//! Use `use cio_sdk::prelude::*;` to import all essential types.

// Errors
pub use crate::{SdkError, SdkResult};

// Facade
pub use crate::Sdk;

// Setup checklist
pub use crate::{DeepLinkStep, SetupChecklist, TracingSetupChecklist};
