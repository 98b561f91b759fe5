//! Environment variable fallbacks.
//!
//! Env vars are **fallback**, not override: they only fill fields that no
//! config file set. Values from the embedded defaults do not count as set.

use std::collections::HashMap;

use tracing::debug;

use crate::merge::{ConfigLayer, FieldSources};

/// Mapping from environment variable name to config field path.
struct EnvMapping {
    var_name: &'static str,
    field_path: &'static str,
}

/// All supported `CIO_*` env var mappings.
const ENV_MAPPINGS: &[EnvMapping] = &[
    EnvMapping {
        var_name: "CIO_SITE_ID",
        field_path: "sdk.site_id",
    },
    EnvMapping {
        var_name: "CIO_API_KEY",
        field_path: "sdk.api_key",
    },
    EnvMapping {
        var_name: "CIO_REGION",
        field_path: "sdk.region",
    },
    EnvMapping {
        var_name: "CIO_BUNDLE_ID",
        field_path: "app.bundle_id",
    },
    EnvMapping {
        var_name: "CIO_STORAGE_DIR",
        field_path: "storage.directory",
    },
    EnvMapping {
        var_name: "CIO_LOG_LEVEL",
        field_path: "logging.level",
    },
];

/// Names of every environment variable consulted as a fallback.
pub fn env_var_names() -> impl Iterator<Item = &'static str> {
    ENV_MAPPINGS.iter().map(|m| m.var_name)
}

/// Apply environment variable fallbacks to fields that no config file set.
///
/// Returns the number of env vars applied.
pub fn apply_env_fallbacks<S: ::std::hash::BuildHasher>(
    merged: &mut toml::Value,
    sources: &mut FieldSources,
    env_vars: &HashMap<String, String, S>,
) -> usize {
    let mut count: usize = 0;

    for mapping in ENV_MAPPINGS {
        let set_by_file = sources
            .get(mapping.field_path)
            .is_some_and(|layer| *layer != ConfigLayer::Defaults);
        if set_by_file {
            continue;
        }

        if let Some(val) = env_vars.get(mapping.var_name) {
            debug!(
                var = mapping.var_name,
                field = mapping.field_path,
                "applying env var fallback"
            );

            set_field(merged, mapping.field_path, toml::Value::String(val.clone()));
            sources.insert(mapping.field_path.to_owned(), ConfigLayer::Environment);
            count = count.saturating_add(1);
        }
    }

    count
}

/// Set a dotted field in the TOML tree, creating intermediate tables.
fn set_field(root: &mut toml::Value, path: &str, val: toml::Value) {
    let Some((parents, leaf)) = path.rsplit_once('.') else {
        if let Some(table) = root.as_table_mut() {
            table.insert(path.to_owned(), val);
        }
        return;
    };

    let mut current = root;
    for segment in parents.split('.') {
        let Some(table) = current.as_table_mut() else {
            return;
        };
        current = table
            .entry(segment.to_owned())
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }

    if let Some(table) = current.as_table_mut() {
        table.insert(leaf.to_owned(), val);
    }
}

/// Collect all current environment variables into a map.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars().collect()
}
