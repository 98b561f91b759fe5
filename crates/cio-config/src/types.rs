use std::fmt;
use std::path::{Path, PathBuf};

use cio_core::CioHome;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Every section defaults independently, so a file only needs the fields it
/// wants to change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Workspace credentials and data center.
    pub sdk: SdkSection,
    /// Identity of the host application.
    pub app: AppSection,
    /// Where stored SDK state lives.
    pub storage: StorageSection,
    /// Logging level, format, and per-crate directives.
    pub logging: LoggingSection,
}

impl Config {
    /// Directory holding the domain files for the file backend.
    ///
    /// `storage.directory` when set, otherwise `<cio home>/preferences`.
    #[must_use]
    pub fn storage_directory(&self, home: &CioHome) -> PathBuf {
        self.storage
            .directory
            .clone()
            .unwrap_or_else(|| home.preferences_dir())
    }
}

// ---------------------------------------------------------------------------
// SdkSection
// ---------------------------------------------------------------------------

/// Workspace the SDK reports to.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct SdkSection {
    /// Site id scoping stored state. Required to open site storage.
    pub site_id: Option<String>,
    /// API key. Prefer environment variables over storing this in a file.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Data center the workspace lives in.
    pub region: Region,
}

impl fmt::Debug for SdkSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SdkSection")
            .field("site_id", &self.site_id)
            .field("has_api_key", &self.api_key.is_some())
            .field("region", &self.region)
            .finish()
    }
}

impl Serialize for SdkSection {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SdkSection", 2)?;
        state.serialize_field("site_id", &self.site_id)?;
        // api_key is never written out.
        state.serialize_field("region", &self.region)?;
        state.end()
    }
}

/// Data center of a workspace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// United States.
    #[default]
    Us,
    /// European Union.
    Eu,
}

impl Region {
    /// Lowercase name as written in config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Us => "us",
            Self::Eu => "eu",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AppSection
// ---------------------------------------------------------------------------

/// Host application identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSection {
    /// Bundle id namespacing storage domains. Falls back to the executable
    /// name when unset.
    pub bundle_id: Option<String>,
}

// ---------------------------------------------------------------------------
// StorageSection
// ---------------------------------------------------------------------------

/// Storage backend selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// Which backend holds stored state.
    pub backend: StorageBackend,
    /// Directory for the file backend.
    pub directory: Option<PathBuf>,
}

impl StorageSection {
    /// Explicit directory, if one was configured.
    #[must_use]
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }
}

/// Physical store behind the storage handles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON document per domain on disk.
    #[default]
    File,
    /// Process memory; nothing survives exit.
    Memory,
}

// ---------------------------------------------------------------------------
// LoggingSection
// ---------------------------------------------------------------------------

/// Logging and tracing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global log level filter (`"trace"`, `"debug"`, `"info"`, `"warn"`,
    /// `"error"`).
    pub level: String,
    /// Output format: `"pretty"` (human-friendly), `"compact"` (one-line),
    /// `"json"` (structured), or `"full"` (verbose).
    pub format: String,
    /// Per-crate tracing directives (e.g. `["cio_storage=debug"]`).
    pub directives: Vec<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            format: "compact".to_owned(),
            directives: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sdk_section_debug_redacts_api_key() {
        let section = SdkSection {
            site_id: Some("485895958".to_owned()),
            api_key: Some("secret-key-123".to_owned()),
            region: Region::Eu,
        };
        let debug = format!("{section:?}");
        assert!(!debug.contains("secret-key-123"));
        assert!(debug.contains("has_api_key: true"));
        assert!(debug.contains("485895958"));
    }

    #[test]
    fn test_sdk_section_serialize_omits_api_key() {
        let section = SdkSection {
            site_id: None,
            api_key: Some("secret-key-123".to_owned()),
            region: Region::Us,
        };
        let json = serde_json::to_string(&section).unwrap();
        assert!(!json.contains("secret-key-123"));
        assert!(!json.contains("api_key"));
        assert!(json.contains(r#""region":"us""#));
    }

    #[test]
    fn test_storage_directory_defaults_under_home() {
        let home = CioHome::from_path("/tmp/cio-home");
        let config = Config::default();
        assert_eq!(
            config.storage_directory(&home),
            PathBuf::from("/tmp/cio-home/preferences")
        );

        let mut config = Config::default();
        config.storage.directory = Some(PathBuf::from("/var/lib/cio"));
        assert_eq!(config.storage_directory(&home), PathBuf::from("/var/lib/cio"));
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: Config = toml::from_str("[logging]\nlevel = \"debug\"").unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "compact");
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.sdk.region, Region::Us);
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let result: Result<Config, _> = toml::from_str("[storage]\nbackend = \"sqlite\"");
        assert!(result.is_err());
    }
}
