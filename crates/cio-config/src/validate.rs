//! Post-merge configuration validation.
//!
//! Validates that deserialized [`Config`](crate::Config) values are usable
//! before any storage is opened.

use cio_core::SiteId;

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Validate a fully-merged and deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_sdk(config)?;
    validate_app(config)?;
    validate_storage(config)?;
    validate_logging(config)?;
    Ok(())
}

fn validate_sdk(config: &Config) -> ConfigResult<()> {
    if let Some(site_id) = &config.sdk.site_id {
        SiteId::new(site_id.as_str()).map_err(|e| ConfigError::ValidationError {
            field: "sdk.site_id".to_owned(),
            message: e.to_string(),
        })?;
    }

    if config.sdk.api_key.as_deref().is_some_and(str::is_empty) {
        return Err(ConfigError::ValidationError {
            field: "sdk.api_key".to_owned(),
            message: "api_key must not be empty when set".to_owned(),
        });
    }

    Ok(())
}

fn validate_app(config: &Config) -> ConfigResult<()> {
    let Some(bundle_id) = &config.app.bundle_id else {
        return Ok(());
    };

    if bundle_id.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "app.bundle_id".to_owned(),
            message: "bundle_id must not be empty when set".to_owned(),
        });
    }

    if bundle_id.contains(['/', '\\', '\0']) {
        return Err(ConfigError::ValidationError {
            field: "app.bundle_id".to_owned(),
            message: format!("bundle_id '{bundle_id}' must not contain path separators"),
        });
    }

    Ok(())
}

fn validate_storage(config: &Config) -> ConfigResult<()> {
    if let Some(dir) = config.storage.directory()
        && !dir.is_absolute()
    {
        return Err(ConfigError::ValidationError {
            field: "storage.directory".to_owned(),
            message: format!("directory '{}' must be an absolute path", dir.display()),
        });
    }
    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.logging.level.as_str()) {
        return Err(ConfigError::ValidationError {
            field: "logging.level".to_owned(),
            message: format!(
                "unsupported log level '{}'; expected one of: {}",
                config.logging.level,
                valid_levels.join(", ")
            ),
        });
    }

    let valid_formats = ["pretty", "compact", "json", "full"];
    if !valid_formats.contains(&config.logging.format.as_str()) {
        return Err(ConfigError::ValidationError {
            field: "logging.format".to_owned(),
            message: format!(
                "unsupported log format '{}'; expected one of: {}",
                config.logging.format,
                valid_formats.join(", ")
            ),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn field_of(result: ConfigResult<()>) -> String {
        match result {
            Err(ConfigError::ValidationError { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_reserved_site_id_rejected() {
        let mut config = Config::default();
        config.sdk.site_id = Some("shared".to_owned());
        assert_eq!(field_of(validate(&config)), "sdk.site_id");
    }

    #[test]
    fn test_site_id_with_separator_rejected() {
        let mut config = Config::default();
        config.sdk.site_id = Some("a/b".to_owned());
        assert_eq!(field_of(validate(&config)), "sdk.site_id");
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let mut config = Config::default();
        config.sdk.api_key = Some(String::new());
        assert_eq!(field_of(validate(&config)), "sdk.api_key");
    }

    #[test]
    fn test_bundle_id_rules() {
        let mut config = Config::default();
        config.app.bundle_id = Some("com.foo.bar".to_owned());
        assert!(validate(&config).is_ok());

        config.app.bundle_id = Some("com/foo".to_owned());
        assert_eq!(field_of(validate(&config)), "app.bundle_id");

        config.app.bundle_id = Some(String::new());
        assert_eq!(field_of(validate(&config)), "app.bundle_id");
    }

    #[test]
    fn test_relative_storage_directory_rejected() {
        let mut config = Config::default();
        config.storage.directory = Some(PathBuf::from("relative/prefs"));
        assert_eq!(field_of(validate(&config)), "storage.directory");
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_owned();
        assert_eq!(field_of(validate(&config)), "logging.level");
    }

    #[test]
    fn test_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_owned();
        assert_eq!(field_of(validate(&config)), "logging.format");
    }
}
