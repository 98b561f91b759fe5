//! cio CLI - inspect and edit stored SDK state.
//!
//! Every storage command addresses one domain: the domain of the site given
//! by `--site` (or `sdk.site_id` in the configuration), or the shared domain
//! with `--global`.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;

use anyhow::Result;
use cio_config::Config;
use cio_storage::{SiteKeyValueStorage, StorageKey};
use clap::{Parser, Subcommand};

mod commands;
mod config_bridge;

use commands::storage::KindArg;
use commands::{config, storage};

/// cio - Customer.io SDK storage tool
#[derive(Parser)]
#[command(name = "cio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to an explicit configuration file
    #[arg(short, long, global = true, env = "CIO_CONFIG")]
    config: Option<PathBuf>,

    /// Site whose domain to use (overrides `sdk.site_id`)
    #[arg(long, global = true, conflicts_with = "global")]
    site: Option<String>,

    /// Use the domain shared by every site
    #[arg(long, global = true)]
    global: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write logs to daily files under `<cio home>/logs` instead of stderr
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Storage(StorageCommands),

    /// View configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum StorageCommands {
    /// Print the domain name of the selected store
    FileName,

    /// List keys present in the selected store
    Keys,

    /// Print a stored value
    Get {
        /// Key name (e.g. identifiedProfileId)
        key: StorageKey,
        /// Read as this kind; a value of another kind reads as absent
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Store a value
    Set {
        /// Key name (e.g. pushDeviceToken)
        key: StorageKey,
        /// Value; dates accept RFC 3339 or epoch seconds
        value: String,
        /// Kind to store the value as
        #[arg(short, long, value_enum, default_value = "string")]
        kind: KindArg,
    },

    /// Remove one key
    Delete {
        /// Key name
        key: StorageKey,
    },

    /// Remove every key in the selected store
    Clear,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show resolved configuration with source annotations
    Show {
        /// Print JSON instead of annotated TOML
        #[arg(long)]
        json: bool,
        /// Show only a specific section (e.g. sdk, storage, logging)
        #[arg(short, long)]
        section: Option<String>,
    },
    /// Validate the current configuration
    Validate,
    /// Show the paths cio reads and writes
    Paths,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let resolved = Config::load(cli.config.as_deref());

    // Set up logging from config, with --verbose override.
    let log_config = match &resolved {
        Ok(r) => {
            let lc = config_bridge::to_log_config(&r.config, cli.verbose);
            if cli.log_file {
                config_bridge::with_log_files(lc, &r.home)
            } else {
                lc
            }
        },
        Err(_) => config_bridge::fallback_log_config(cli.verbose),
    };
    if let Err(e) = cio_telemetry::setup_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match cli.command {
        Commands::Storage(command) => {
            let resolved = resolved?;
            let handle = storage::open_handle(&resolved, cli.site.as_deref(), cli.global)?;
            handle_storage(command, &handle)
        },
        Commands::Config { command } => handle_config(command, resolved),
    }
}

fn handle_storage(command: StorageCommands, handle: &SiteKeyValueStorage) -> Result<()> {
    match command {
        StorageCommands::FileName => storage::file_name(handle),
        StorageCommands::Keys => storage::keys(handle),
        StorageCommands::Get { key, kind } => storage::get(handle, key, kind),
        StorageCommands::Set { key, value, kind } => storage::set(handle, key, &value, kind),
        StorageCommands::Delete { key } => storage::delete(handle, key),
        StorageCommands::Clear => storage::clear(handle),
    }
}

fn handle_config(
    command: ConfigCommands,
    resolved: cio_config::ConfigResult<cio_config::ResolvedConfig>,
) -> Result<()> {
    match command {
        ConfigCommands::Show { json, section } => {
            config::show_config(&resolved?, json, section.as_deref())
        },
        ConfigCommands::Validate => config::validate_config(&resolved),
        ConfigCommands::Paths => config::show_paths(&resolved?),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_site_and_global_conflict() {
        let parsed = Cli::try_parse_from(["cio", "--site", "a", "--global", "file-name"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_get_parses_key_and_kind() {
        let cli = Cli::try_parse_from(["cio", "get", "httpRequestsPauseEnds", "--kind", "date"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Storage(StorageCommands::Get {
                key: StorageKey::HttpRequestsPauseEnds,
                kind: Some(KindArg::Date),
            })
        ));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Cli::try_parse_from(["cio", "get", "notAKey"]).is_err());
    }

    #[test]
    fn test_set_defaults_to_string() {
        let cli = Cli::try_parse_from(["cio", "--global", "set", "pushDeviceToken", "abc"])
            .unwrap();
        assert!(cli.global);
        assert!(matches!(
            cli.command,
            Commands::Storage(StorageCommands::Set {
                key: StorageKey::PushDeviceToken,
                kind: KindArg::String,
                ..
            })
        ));
    }
}
