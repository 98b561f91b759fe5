//! Source-annotated display for `config show`.
//!
//! Prints the resolved configuration with annotations showing which layer
//! (defaults, user, file, environment) set each value.

use std::fmt::{self, Write as _};

use cio_core::CioHome;

use crate::merge::FieldSources;
use crate::types::Config;

/// A resolved configuration together with source annotations.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The final merged configuration.
    pub config: Config,
    /// Dotted field path → which layer set the value.
    pub field_sources: FieldSources,
    /// Config file paths that were loaded (in precedence order).
    pub loaded_files: Vec<String>,
    /// Home directory used for discovery and default paths.
    pub home: CioHome,
}

/// Output format for `config show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowFormat {
    /// TOML with inline comments showing source.
    Toml,
    /// JSON (for programmatic consumption).
    Json,
}

impl ResolvedConfig {
    /// Render the resolved config, optionally limited to one section.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or `section` does not exist.
    pub fn show(&self, format: ShowFormat, section: Option<&str>) -> Result<String, fmt::Error> {
        match format {
            ShowFormat::Toml => self.show_toml(section),
            ShowFormat::Json => self.show_json(section),
        }
    }

    fn show_toml(&self, section: Option<&str>) -> Result<String, fmt::Error> {
        let toml_str = if let Some(section_name) = section {
            toml::to_string_pretty(&self.section_value(section_name)?).map_err(|_| fmt::Error)?
        } else {
            toml::to_string_pretty(&self.config).map_err(|_| fmt::Error)?
        };

        let mut output = String::new();
        output.push_str("# Resolved cio configuration\n");
        output.push_str("# Source annotations: [defaults] [user] [file] [env]\n");
        writeln!(output, "# Home: {}", self.home.root().display())?;

        if !self.loaded_files.is_empty() {
            output.push_str("#\n# Loaded files (in precedence order):\n");
            for (i, path) in self.loaded_files.iter().enumerate() {
                writeln!(output, "#   {}. {path}", i.saturating_add(1))?;
            }
        }

        output.push('\n');

        let mut current_section = section.unwrap_or("").to_owned();
        for line in toml_str.lines() {
            let trimmed = line.trim();
            if let Some(name) = trimmed.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
                current_section = name.to_owned();
            }
            if let Some(annotation) = self.annotate_line(trimmed, &current_section) {
                writeln!(output, "{line}  # {annotation}")?;
            } else {
                output.push_str(line);
                output.push('\n');
            }
        }

        Ok(output)
    }

    fn show_json(&self, section: Option<&str>) -> Result<String, fmt::Error> {
        if let Some(section_name) = section {
            serde_json::to_string_pretty(&self.section_value(section_name)?)
                .map_err(|_| fmt::Error)
        } else {
            serde_json::to_string_pretty(&self.config).map_err(|_| fmt::Error)
        }
    }

    fn section_value(&self, name: &str) -> Result<toml::Value, fmt::Error> {
        let val = toml::Value::try_from(&self.config).map_err(|_| fmt::Error)?;
        val.as_table()
            .and_then(|t| t.get(name))
            .cloned()
            .ok_or(fmt::Error)
    }

    /// Source annotation for a `key = value` line.
    fn annotate_line(&self, trimmed: &str, section: &str) -> Option<String> {
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('[') {
            return None;
        }

        let key = trimmed.split('=').next()?.trim();
        let field_path = if section.is_empty() {
            key.to_owned()
        } else {
            format!("{section}.{key}")
        };

        self.field_sources
            .get(&field_path)
            .map(|layer| format!("[{layer}]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::ConfigLayer;

    fn resolved() -> ResolvedConfig {
        let mut config = Config::default();
        config.sdk.site_id = Some("485895958".to_owned());
        config.sdk.api_key = Some("secret-key-123".to_owned());
        let mut field_sources = FieldSources::new();
        field_sources.insert("sdk.site_id".to_owned(), ConfigLayer::Environment);
        field_sources.insert("logging.level".to_owned(), ConfigLayer::Defaults);
        ResolvedConfig {
            config,
            field_sources,
            loaded_files: vec!["/home/user/.cio/config.toml".to_owned()],
            home: CioHome::from_path("/home/user/.cio"),
        }
    }

    #[test]
    fn test_show_toml_annotates_sources() {
        let output = resolved().show(ShowFormat::Toml, None).unwrap();
        assert!(output.contains("Resolved cio configuration"));
        assert!(output.contains("1. /home/user/.cio/config.toml"));
        assert!(output.contains("site_id = \"485895958\"  # [environment variable]"));
        assert!(output.contains("level = \"warn\"  # [defaults]"));
    }

    #[test]
    fn test_show_never_prints_api_key() {
        let toml = resolved().show(ShowFormat::Toml, None).unwrap();
        let json = resolved().show(ShowFormat::Json, None).unwrap();
        assert!(!toml.contains("secret-key-123"));
        assert!(!json.contains("secret-key-123"));
    }

    #[test]
    fn test_show_json_default() {
        let output = resolved().show(ShowFormat::Json, None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["sdk"]["site_id"], "485895958");
    }

    #[test]
    fn test_show_section() {
        let output = resolved().show(ShowFormat::Toml, Some("logging")).unwrap();
        assert!(output.contains("compact"));
        assert!(!output.contains("site_id"));
    }

    #[test]
    fn test_show_unknown_section_fails() {
        assert!(resolved().show(ShowFormat::Json, Some("nope")).is_err());
    }
}
