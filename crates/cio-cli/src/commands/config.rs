//! Configuration commands.

use anyhow::Result;
use cio_config::{ConfigResult, ResolvedConfig, ShowFormat};

/// Show the resolved configuration.
pub(crate) fn show_config(
    resolved: &ResolvedConfig,
    json: bool,
    section: Option<&str>,
) -> Result<()> {
    let format = if json { ShowFormat::Json } else { ShowFormat::Toml };
    let output = resolved
        .show(format, section)
        .map_err(|e| anyhow::anyhow!("failed to format config: {e}"))?;

    println!("{output}");
    Ok(())
}

/// Validate the current configuration.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn validate_config(resolved: &ConfigResult<ResolvedConfig>) -> Result<()> {
    match resolved {
        Ok(resolved) => {
            println!("Configuration is valid.");
            if !resolved.loaded_files.is_empty() {
                println!("\nLoaded files:");
                for path in &resolved.loaded_files {
                    println!("  - {path}");
                }
            }
            Ok(())
        },
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        },
    }
}

/// Show the paths cio reads and writes.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn show_paths(resolved: &ResolvedConfig) -> Result<()> {
    let home = &resolved.home;
    let config_path = home.config_path();
    let exists = if config_path.exists() { "found" } else { "not found" };

    println!("Home:        {}", home.root().display());
    println!("User config: {} ({exists})", config_path.display());
    println!(
        "Storage:     {}",
        resolved.config.storage_directory(home).display()
    );
    println!("Logs:        {}", home.logs_dir().display());
    Ok(())
}
