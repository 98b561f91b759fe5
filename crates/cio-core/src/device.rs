//! Device and application metrics.
//!
//! The storage layer only needs the application bundle id, which namespaces
//! every storage domain on the device.

/// Bundle id used when the host application cannot be identified.
pub const UNKNOWN_BUNDLE_ID: &str = "unknown";

/// Supplies facts about the host application and device.
pub trait DeviceMetrics: Send + Sync {
    /// Bundle identifier of the host application (e.g. `com.foo.bar`).
    fn app_bundle_id(&self) -> String;
}

/// [`DeviceMetrics`] backed by a fixed bundle id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDeviceMetrics {
    bundle_id: String,
}

impl AppDeviceMetrics {
    /// Use an explicit bundle id.
    #[must_use]
    pub fn new(bundle_id: impl Into<String>) -> Self {
        Self {
            bundle_id: bundle_id.into(),
        }
    }

    /// Derive the bundle id from the running executable's file stem.
    ///
    /// Falls back to [`UNKNOWN_BUNDLE_ID`] when the executable path is not
    /// available.
    #[must_use]
    pub fn from_current_exe() -> Self {
        let bundle_id = std::env::current_exe()
            .ok()
            .and_then(|path| {
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(str::to_owned)
            })
            .filter(|stem| !stem.is_empty())
            .unwrap_or_else(|| UNKNOWN_BUNDLE_ID.to_owned());
        Self { bundle_id }
    }

    /// Use `bundle_id` if given, otherwise [`Self::from_current_exe`].
    #[must_use]
    pub fn from_optional(bundle_id: Option<&str>) -> Self {
        match bundle_id {
            Some(id) if !id.is_empty() => Self::new(id),
            _ => Self::from_current_exe(),
        }
    }
}

impl DeviceMetrics for AppDeviceMetrics {
    fn app_bundle_id(&self) -> String {
        self.bundle_id.clone()
    }
}
