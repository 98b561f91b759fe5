//! Site identifiers.
//!
//! A site id is the tenant key that separates one customer's stored SDK state
//! from another's on a shared device. It ends up verbatim as the last segment
//! of a storage domain name, so it must be usable as part of a file name.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Suffix of the shared (global) storage domain.
///
/// A site with this id would map onto the global domain, so it is rejected.
pub const RESERVED_SITE_ID: &str = "shared";

/// Validated site identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SiteId(String);

impl SiteId {
    /// Validate and wrap a site identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSiteId`] if the value is empty, contains a
    /// path separator or NUL byte, is `.`/`..`, or equals
    /// [`RESERVED_SITE_ID`].
    pub fn new(site_id: impl Into<String>) -> CoreResult<Self> {
        let site_id = site_id.into();
        if let Some(reason) = rejection_reason(&site_id) {
            return Err(CoreError::InvalidSiteId { site_id, reason });
        }
        Ok(Self(site_id))
    }

    /// The raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn rejection_reason(site_id: &str) -> Option<&'static str> {
    if site_id.is_empty() {
        return Some("must not be empty");
    }
    if site_id.contains(['/', '\\']) {
        return Some("must not contain path separators");
    }
    if site_id.contains('\0') {
        return Some("must not contain null bytes");
    }
    if site_id == "." || site_id == ".." {
        return Some("must not be a relative path component");
    }
    if site_id == RESERVED_SITE_ID {
        return Some("is reserved for the shared data store");
    }
    None
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SiteId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SiteId {
    type Error = CoreError;

    fn try_from(value: String) -> CoreResult<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for SiteId {
    type Error = CoreError;

    fn try_from(value: &str) -> CoreResult<Self> {
        Self::new(value)
    }
}

impl std::str::FromStr for SiteId {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Self::new(s)
    }
}

impl From<SiteId> for String {
    fn from(value: SiteId) -> Self {
        value.0
    }
}
