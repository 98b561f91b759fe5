//! Storage domain naming.
//!
//! A domain name is `io.customer.sdk.<bundleId>.<suffix>`, where the suffix is
//! the raw site id for per-site data or `shared` for the global store. The
//! format is persisted state layout: existing installs find their data by it.

use std::fmt;

use cio_core::{RESERVED_SITE_ID, SiteId};

/// Prefix of every domain name.
pub const DOMAIN_PREFIX: &str = "io.customer.sdk";

/// Suffix of the global domain.
pub const GLOBAL_SUFFIX: &str = RESERVED_SITE_ID;

/// Which domain a handle addresses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DomainScope {
    /// Data belonging to one site.
    Site(SiteId),
    /// Data shared by every site on the device.
    Global,
}

impl DomainScope {
    fn suffix(&self) -> &str {
        match self {
            Self::Site(site_id) => site_id.as_str(),
            Self::Global => GLOBAL_SUFFIX,
        }
    }
}

/// A computed domain name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageDomain(String);

impl StorageDomain {
    /// Domain for `scope` in the app identified by `bundle_id`.
    #[must_use]
    pub fn new(bundle_id: &str, scope: &DomainScope) -> Self {
        Self(format!("{DOMAIN_PREFIX}.{bundle_id}.{}", scope.suffix()))
    }

    /// Per-site domain.
    #[must_use]
    pub fn for_site(bundle_id: &str, site_id: &SiteId) -> Self {
        Self::new(bundle_id, &DomainScope::Site(site_id.clone()))
    }

    /// The global domain.
    #[must_use]
    pub fn global(bundle_id: &str) -> Self {
        Self::new(bundle_id, &DomainScope::Global)
    }

    /// The domain name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<StorageDomain> for String {
    fn from(value: StorageDomain) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_domain_name() {
        let site = SiteId::new("485895958").unwrap();
        assert_eq!(
            StorageDomain::for_site("com.foo.bar", &site).as_str(),
            "io.customer.sdk.com.foo.bar.485895958"
        );
    }

    #[test]
    fn test_global_domain_name() {
        assert_eq!(
            StorageDomain::global("com.foo.bar").as_str(),
            "io.customer.sdk.com.foo.bar.shared"
        );
    }

    #[test]
    fn test_distinct_sites_distinct_domains() {
        let a = SiteId::new("a").unwrap();
        let b = SiteId::new("b").unwrap();
        assert_ne!(
            StorageDomain::for_site("app", &a),
            StorageDomain::for_site("app", &b)
        );
        assert_ne!(StorageDomain::for_site("app", &a), StorageDomain::global("app"));
    }
}
