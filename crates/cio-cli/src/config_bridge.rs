//! Bridge from `cio_config::Config` to the logging configuration.

use cio_config::Config;
use cio_core::CioHome;
use cio_telemetry::{LogConfig, LogFormat};

/// Log configuration for the CLI: the `[logging]` section written to stderr,
/// raised to `debug` by `--verbose`.
pub(crate) fn to_log_config(cfg: &Config, verbose: bool) -> LogConfig {
    // Unknown formats are already reported by validation.
    let format = cfg.logging.format.parse().unwrap_or_default();

    let level = if verbose { "debug" } else { cfg.logging.level.as_str() };
    LogConfig::new(level)
        .with_format(format)
        .with_directives(&cfg.logging.directives)
}

/// Redirect `config` to daily rolling files in the home's `logs/` directory.
pub(crate) fn with_log_files(config: LogConfig, home: &CioHome) -> LogConfig {
    config.with_file_logging(home.logs_dir(), "cio")
}

/// Used when the configuration itself failed to load.
pub(crate) fn fallback_log_config(verbose: bool) -> LogConfig {
    let level = if verbose { "debug" } else { "warn" };
    LogConfig::new(level).with_format(LogFormat::Compact)
}

#[cfg(test)]
mod tests {
    use cio_telemetry::LogTarget;

    use super::*;

    #[test]
    fn test_logging_section_maps_over() {
        let mut cfg = Config::default();
        cfg.logging.level = "info".to_owned();
        cfg.logging.format = "json".to_owned();
        cfg.logging.directives = vec!["cio_storage=trace".to_owned()];

        let lc = to_log_config(&cfg, false);
        assert_eq!(lc.level, "info");
        assert_eq!(lc.format, LogFormat::Json);
        assert_eq!(lc.directives, vec!["cio_storage=trace".to_owned()]);
    }

    #[test]
    fn test_unknown_format_falls_back_to_compact() {
        let mut cfg = Config::default();
        cfg.logging.format = "xml".to_owned();
        assert_eq!(to_log_config(&cfg, false).format, LogFormat::Compact);
    }

    #[test]
    fn test_log_files_under_home() {
        let home = CioHome::from_path("/tmp/cio-home");
        let lc = with_log_files(LogConfig::default(), &home);
        assert_eq!(
            lc.target,
            LogTarget::File {
                directory: home.logs_dir(),
                prefix: "cio".to_owned(),
            }
        );
        assert!(!lc.ansi);
    }

    #[test]
    fn test_verbose_raises_level() {
        let lc = to_log_config(&Config::default(), true);
        assert_eq!(lc.level, "debug");
        assert_eq!(fallback_log_config(false).level, "warn");
    }
}
