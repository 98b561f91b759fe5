//! Storage commands: read and edit one domain.

use anyhow::{Context, Result};
use cio_config::ResolvedConfig;
use cio_core::SiteId;
use cio_sdk::{device_metrics, open_store};
use cio_storage::{KeyValueStorage, SiteKeyValueStorage, StorageKey, StoredValue, ValueKind};
use clap::ValueEnum;
use tracing::debug;

/// Value kind as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum KindArg {
    /// UTF-8 text
    String,
    /// Signed 64-bit integer
    Integer,
    /// Finite floating point number
    Double,
    /// RFC 3339 timestamp or epoch seconds
    Date,
}

impl From<KindArg> for ValueKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::String => Self::String,
            KindArg::Integer => Self::Integer,
            KindArg::Double => Self::Double,
            KindArg::Date => Self::Date,
        }
    }
}

/// Open the handle selected by `--site` / `--global` over the configured
/// backend.
pub(crate) fn open_handle(
    resolved: &ResolvedConfig,
    site: Option<&str>,
    global: bool,
) -> Result<SiteKeyValueStorage> {
    let config = &resolved.config;
    let site_id = site
        .or(config.sdk.site_id.as_deref())
        .context("no site id: pass --site or set sdk.site_id")?;
    let site_id = SiteId::new(site_id)?;
    let store = open_store(config, &resolved.home)?;
    let metrics = device_metrics(config);

    let handle = if global {
        SiteKeyValueStorage::global(store, metrics, site_id)
    } else {
        SiteKeyValueStorage::new(store, metrics, site_id)
    };
    debug!(domain = %handle.get_file_name(), "opened storage handle");
    Ok(handle)
}

/// Print the current domain name.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn file_name(handle: &SiteKeyValueStorage) -> Result<()> {
    println!("{}", handle.get_file_name());
    Ok(())
}

/// Print the keys present in the domain, one per line.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn keys(handle: &SiteKeyValueStorage) -> Result<()> {
    for key in handle.keys() {
        println!("{key}");
    }
    Ok(())
}

/// Print the value of `key`, exiting with status 1 when it is absent.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn get(
    handle: &SiteKeyValueStorage,
    key: StorageKey,
    kind: Option<KindArg>,
) -> Result<()> {
    if let Some(value) = read_value(handle, key, kind.map(ValueKind::from)) {
        println!("{value}");
        Ok(())
    } else {
        eprintln!("{key} is not set");
        std::process::exit(1);
    }
}

/// Store `raw` under `key` as `kind`.
pub(crate) fn set(
    handle: &SiteKeyValueStorage,
    key: StorageKey,
    raw: &str,
    kind: KindArg,
) -> Result<()> {
    let value = StoredValue::parse(kind.into(), raw)?;
    write_value(handle, key, value);
    Ok(())
}

/// Remove `key` from the domain.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn delete(handle: &SiteKeyValueStorage, key: StorageKey) -> Result<()> {
    handle.delete(key);
    Ok(())
}

/// Remove every key from the domain.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn clear(handle: &SiteKeyValueStorage) -> Result<()> {
    handle.delete_all();
    Ok(())
}

/// Read `key` through the typed getters, or raw when no kind is given.
fn read_value(
    handle: &SiteKeyValueStorage,
    key: StorageKey,
    kind: Option<ValueKind>,
) -> Option<StoredValue> {
    match kind {
        None => handle.value(key),
        Some(ValueKind::String) => handle.string(key).map(StoredValue::String),
        Some(ValueKind::Integer) => handle.integer(key).map(StoredValue::Integer),
        Some(ValueKind::Double) => handle.double(key).map(StoredValue::Double),
        Some(ValueKind::Date) => handle.date(key).map(StoredValue::from_date),
    }
}

/// Write through the typed setter matching the value's kind.
fn write_value(handle: &SiteKeyValueStorage, key: StorageKey, value: StoredValue) {
    match value {
        StoredValue::String(s) => handle.set_string(&s, key),
        StoredValue::Integer(i) => handle.set_int(i, key),
        StoredValue::Double(d) => handle.set_double(d, key),
        date @ StoredValue::Date(_) => handle.set_value(date, key),
    }
}
