//! SDK state facade.
//!
//! [`Sdk`] owns two storage handles for one site: the site handle for data
//! that belongs to the workspace (identified profile, HTTP pause deadline)
//! and the global handle for data that must survive a site switch (push
//! device token).

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use cio_config::{Config, StorageBackend};
use cio_core::{AppDeviceMetrics, CioHome, DateTimeExt, DeviceMetrics, SiteId};
use cio_storage::{
    FileKvStore, KeyValueStorage, KvStore, MemoryKvStore, SiteKeyValueStorage, StorageKey,
};
use tracing::{debug, info};

use crate::error::{SdkError, SdkResult};

/// Open the store backend named by `config`.
///
/// The file backend uses `storage.directory`, or `<home>/preferences` after
/// creating the home layout.
///
/// # Errors
///
/// Returns [`SdkError::Io`] if the home layout cannot be created and
/// [`SdkError::Storage`] if the directory cannot be opened.
pub fn open_store(config: &Config, home: &CioHome) -> SdkResult<Arc<dyn KvStore>> {
    match config.storage.backend {
        StorageBackend::Memory => {
            debug!("using in-memory store");
            Ok(Arc::new(MemoryKvStore::new()))
        },
        StorageBackend::File => {
            if config.storage.directory.is_none() {
                home.ensure()?;
            }
            let dir = config.storage_directory(home);
            debug!(dir = %dir.display(), "opening file store");
            Ok(Arc::new(FileKvStore::open(dir)?))
        },
    }
}

/// Device metrics for `config`: the configured bundle id, or the executable
/// name when none is set.
#[must_use]
pub fn device_metrics(config: &Config) -> Arc<dyn DeviceMetrics> {
    Arc::new(AppDeviceMetrics::from_optional(
        config.app.bundle_id.as_deref(),
    ))
}

/// Stored SDK state for one site.
pub struct Sdk {
    site_id: SiteId,
    site: Arc<dyn KeyValueStorage>,
    global: Arc<dyn KeyValueStorage>,
}

impl fmt::Debug for Sdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sdk")
            .field("site_id", &self.site_id)
            .finish_non_exhaustive()
    }
}

impl Sdk {
    /// Build the site and global handles over `kv_store`.
    #[must_use]
    pub fn new(
        site_id: SiteId,
        kv_store: Arc<dyn KvStore>,
        device_metrics: Arc<dyn DeviceMetrics>,
    ) -> Self {
        let site = SiteKeyValueStorage::new(
            Arc::clone(&kv_store),
            Arc::clone(&device_metrics),
            site_id.clone(),
        );
        let mut global = SiteKeyValueStorage::new(kv_store, device_metrics, site_id.clone());
        global.switch_to_global_data_store();
        Self::with_storage(site_id, Arc::new(site), Arc::new(global))
    }

    /// Build from handles the caller already owns.
    #[must_use]
    pub fn with_storage(
        site_id: SiteId,
        site: Arc<dyn KeyValueStorage>,
        global: Arc<dyn KeyValueStorage>,
    ) -> Self {
        Self {
            site_id,
            site,
            global,
        }
    }

    /// Build from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::MissingSiteId`] if no site id is configured, a
    /// [`SdkError::Core`] if it is invalid, or any error from
    /// [`open_store`].
    pub fn from_config(config: &Config, home: &CioHome) -> SdkResult<Self> {
        let site_id = config
            .sdk
            .site_id
            .as_deref()
            .ok_or(SdkError::MissingSiteId)?;
        let site_id = SiteId::new(site_id)?;
        let store = open_store(config, home)?;
        info!(site_id = %site_id, backend = ?config.storage.backend, "sdk storage ready");
        Ok(Self::new(site_id, store, device_metrics(config)))
    }

    /// The site this instance stores data for.
    #[must_use]
    pub fn site_id(&self) -> &SiteId {
        &self.site_id
    }

    /// Remember `profile_id` as the identified profile of this site.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::InvalidArgument`] if `profile_id` is blank.
    pub fn identify(&self, profile_id: &str) -> SdkResult<()> {
        require_non_blank("profile_id", profile_id)?;
        self.site
            .set_string(profile_id, StorageKey::IdentifiedProfileId);
        debug!(site_id = %self.site_id, "profile identified");
        Ok(())
    }

    /// Profile id from the last [`identify`](Self::identify) on this site.
    #[must_use]
    pub fn identified_profile_id(&self) -> Option<String> {
        self.site.string(StorageKey::IdentifiedProfileId)
    }

    /// Forget the identified profile of this site.
    pub fn clear_identify(&self) {
        self.site.delete(StorageKey::IdentifiedProfileId);
    }

    /// Store the push device token for the whole device.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::InvalidArgument`] if `token` is blank.
    pub fn register_device_token(&self, token: &str) -> SdkResult<()> {
        require_non_blank("device_token", token)?;
        self.global.set_string(token, StorageKey::PushDeviceToken);
        Ok(())
    }

    /// The registered push device token, shared by every site.
    #[must_use]
    pub fn device_token(&self) -> Option<String> {
        self.global.string(StorageKey::PushDeviceToken)
    }

    /// Forget the push device token.
    pub fn delete_device_token(&self) {
        self.global.delete(StorageKey::PushDeviceToken);
    }

    /// Pause outbound HTTP requests for this site until `until`.
    pub fn pause_http_requests_until(&self, until: DateTime<Utc>) {
        self.site.set_date(until, StorageKey::HttpRequestsPauseEnds);
        info!(site_id = %self.site_id, until = %until, "http requests paused");
    }

    /// Stored pause deadline, whether or not it has passed.
    #[must_use]
    pub fn http_requests_pause_ends(&self) -> Option<DateTime<Utc>> {
        self.site.date(StorageKey::HttpRequestsPauseEnds)
    }

    /// `true` while a stored pause deadline lies in the future.
    #[must_use]
    pub fn http_requests_paused(&self) -> bool {
        self.http_requests_pause_ends()
            .is_some_and(|ends| !ends.has_passed())
    }

    /// Delete all data of this site. Global data is kept.
    pub fn reset(&self) {
        self.site.delete_all();
        info!(site_id = %self.site_id, "site data reset");
    }
}

fn require_non_blank(field: &'static str, value: &str) -> SdkResult<()> {
    if value.trim().is_empty() {
        return Err(SdkError::InvalidArgument {
            field,
            message: "must not be blank".to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use cio_core::TimeUnit;

    use super::*;

    fn sdk_on(store: &Arc<dyn KvStore>, site: &str) -> Sdk {
        Sdk::new(
            SiteId::new(site).unwrap(),
            Arc::clone(store),
            Arc::new(AppDeviceMetrics::new("com.foo.bar")),
        )
    }

    fn memory() -> Arc<dyn KvStore> {
        Arc::new(MemoryKvStore::new())
    }

    #[test]
    fn test_identify_round_trip() {
        let sdk = sdk_on(&memory(), "site-a");
        assert!(sdk.identified_profile_id().is_none());
        sdk.identify("profile-1").unwrap();
        assert_eq!(sdk.identified_profile_id().as_deref(), Some("profile-1"));
        sdk.clear_identify();
        assert!(sdk.identified_profile_id().is_none());
    }

    #[test]
    fn test_blank_arguments_rejected() {
        let sdk = sdk_on(&memory(), "site-a");
        assert!(matches!(
            sdk.identify("  "),
            Err(SdkError::InvalidArgument { field: "profile_id", .. })
        ));
        assert!(sdk.register_device_token("").is_err());
        assert!(sdk.identified_profile_id().is_none());
    }

    #[test]
    fn test_identify_is_per_site() {
        let store = memory();
        let a = sdk_on(&store, "site-a");
        let b = sdk_on(&store, "site-b");
        a.identify("profile-a").unwrap();
        assert!(b.identified_profile_id().is_none());
    }

    #[test]
    fn test_device_token_shared_across_sites() {
        let store = memory();
        let a = sdk_on(&store, "site-a");
        let b = sdk_on(&store, "site-b");
        a.register_device_token("token-123").unwrap();
        assert_eq!(b.device_token().as_deref(), Some("token-123"));
        b.delete_device_token();
        assert!(a.device_token().is_none());
    }

    #[test]
    fn test_reset_keeps_global_data() {
        let store = memory();
        let sdk = sdk_on(&store, "site-a");
        sdk.identify("profile-1").unwrap();
        sdk.register_device_token("token-123").unwrap();
        sdk.pause_http_requests_until(Utc::now().add(1, TimeUnit::Hour));

        sdk.reset();

        assert!(sdk.identified_profile_id().is_none());
        assert!(sdk.http_requests_pause_ends().is_none());
        assert_eq!(sdk.device_token().as_deref(), Some("token-123"));
    }

    #[test]
    fn test_http_pause_deadline() {
        let sdk = sdk_on(&memory(), "site-a");
        assert!(!sdk.http_requests_paused());

        sdk.pause_http_requests_until(Utc::now().add(10, TimeUnit::Minute));
        assert!(sdk.http_requests_paused());

        sdk.pause_http_requests_until(Utc::now().subtract(1, TimeUnit::Second));
        assert!(!sdk.http_requests_paused());
    }

    #[test]
    fn test_pause_deadline_kept_to_the_second() {
        let sdk = sdk_on(&memory(), "site-a");
        let until = Utc::now().add(2, TimeUnit::Day);
        sdk.pause_http_requests_until(until);
        let stored = sdk.http_requests_pause_ends().unwrap();
        assert_eq!(stored.timestamp(), until.timestamp());
    }

    #[test]
    fn test_from_config_requires_site_id() {
        let home = CioHome::from_path("/nonexistent");
        let mut config = Config::default();
        config.storage.backend = StorageBackend::Memory;
        assert!(matches!(
            Sdk::from_config(&config, &home),
            Err(SdkError::MissingSiteId)
        ));

        config.sdk.site_id = Some("shared".to_owned());
        assert!(matches!(
            Sdk::from_config(&config, &home),
            Err(SdkError::Core(_))
        ));
    }

    #[test]
    fn test_from_config_file_backend_under_home() {
        let dir = tempfile::tempdir().unwrap();
        let home = CioHome::from_path(dir.path());
        let mut config = Config::default();
        config.sdk.site_id = Some("485895958".to_owned());
        config.app.bundle_id = Some("com.foo.bar".to_owned());

        let sdk = Sdk::from_config(&config, &home).unwrap();
        sdk.identify("profile-1").unwrap();

        let expected = home
            .preferences_dir()
            .join("io.customer.sdk.com.foo.bar.485895958.json");
        assert!(expected.is_file());
        assert_eq!(sdk.site_id().as_str(), "485895958");
    }

    #[test]
    fn test_debug_hides_handles() {
        let sdk = sdk_on(&memory(), "site-a");
        assert!(format!("{sdk:?}").contains("site-a"));
    }
}
