//! Logging configuration and setup.
//!
//! A [`LogConfig`] describes one formatting layer: level and directives,
//! output format, and where lines go. [`setup_logging`] installs it globally;
//! [`build_subscriber`] builds the same subscriber over any writer.

use std::path::PathBuf;

use tracing::Subscriber;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, MakeWriter, writer::BoxMakeWriter},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

use crate::error::{TelemetryError, TelemetryResult};

/// Target whose events are printed at `info` and above regardless of the
/// configured level.
///
/// ```rust
/// tracing::info!(target: cio_telemetry::FORCE_TARGET, "shown even at level=error");
/// ```
pub const FORCE_TARGET: &str = "cio::force";

/// Line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line, for reading in a terminal.
    Pretty,
    /// Single line per event.
    #[default]
    Compact,
    /// One JSON object per line.
    Json,
    /// `tracing-subscriber`'s default layout.
    Full,
}

impl std::str::FromStr for LogFormat {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            "full" => Ok(Self::Full),
            other => Err(TelemetryError::UnknownFormat(other.to_owned())),
        }
    }
}

/// Where formatted lines are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error.
    #[default]
    Stderr,
    /// Daily rolling files `<directory>/<prefix>.<date>`.
    File {
        /// Directory holding the log files; created on setup.
        directory: PathBuf,
        /// File name prefix.
        prefix: String,
    },
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Base level filter (e.g. `warn`).
    pub level: String,
    /// Line format.
    pub format: LogFormat,
    /// Output destination.
    pub target: LogTarget,
    /// Prefix lines with a timestamp.
    pub timestamps: bool,
    /// Colorize output.
    pub ansi: bool,
    /// Extra `EnvFilter` directives (e.g. `cio_storage=debug`).
    pub directives: Vec<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new("warn")
    }
}

impl LogConfig {
    /// Compact output to stderr at `level`.
    #[must_use]
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            format: LogFormat::default(),
            target: LogTarget::default(),
            timestamps: true,
            ansi: true,
            directives: Vec::new(),
        }
    }

    /// Set the line format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Write to daily rolling files in `directory` instead of stderr.
    /// Colors are turned off.
    #[must_use]
    pub fn with_file_logging(
        mut self,
        directory: impl Into<PathBuf>,
        prefix: impl Into<String>,
    ) -> Self {
        self.target = LogTarget::File {
            directory: directory.into(),
            prefix: prefix.into(),
        };
        self.ansi = false;
        self
    }

    /// Add a directive.
    #[must_use]
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    /// Add several directives.
    #[must_use]
    pub fn with_directives<I, S>(mut self, directives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.directives.extend(directives.into_iter().map(Into::into));
        self
    }

    /// Drop timestamps from lines.
    #[must_use]
    pub fn without_timestamps(mut self) -> Self {
        self.timestamps = false;
        self
    }

    /// Drop ANSI colors.
    #[must_use]
    pub fn without_ansi(mut self) -> Self {
        self.ansi = false;
        self
    }

    /// Build the env filter from config.
    ///
    /// The forced target is appended last so no directive can silence it.
    fn build_filter(&self) -> TelemetryResult<EnvFilter> {
        let mut filter =
            EnvFilter::try_new(&self.level).map_err(|e| TelemetryError::InvalidFilter {
                directive: self.level.clone(),
                message: e.to_string(),
            })?;

        let forced = format!("{FORCE_TARGET}=info");
        for directive in self.directives.iter().chain(std::iter::once(&forced)) {
            filter = filter.add_directive(directive.parse().map_err(
                |e: tracing_subscriber::filter::ParseError| TelemetryError::InvalidFilter {
                    directive: directive.clone(),
                    message: e.to_string(),
                },
            )?);
        }

        Ok(filter)
    }

    fn make_writer(&self) -> TelemetryResult<BoxMakeWriter> {
        match &self.target {
            LogTarget::Stderr => Ok(BoxMakeWriter::new(std::io::stderr)),
            LogTarget::File { directory, prefix } => {
                std::fs::create_dir_all(directory).map_err(|source| {
                    TelemetryError::LogDirectory {
                        path: directory.clone(),
                        source,
                    }
                })?;
                let appender = RollingFileAppender::new(Rotation::DAILY, directory, prefix);
                Ok(BoxMakeWriter::new(appender))
            },
        }
    }
}

/// Formatting layer for `config`, boxed so every format shares one type.
fn fmt_layer<S, W>(config: &LogConfig, writer: W) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let layer = fmt::layer().with_writer(writer).with_ansi(config.ansi);

    match (config.format, config.timestamps) {
        (LogFormat::Json, true) => layer.json().boxed(),
        (LogFormat::Json, false) => layer.json().without_time().boxed(),
        (LogFormat::Pretty, true) => layer.pretty().boxed(),
        (LogFormat::Pretty, false) => layer.pretty().without_time().boxed(),
        (LogFormat::Compact, true) => layer.compact().boxed(),
        (LogFormat::Compact, false) => layer.compact().without_time().boxed(),
        (LogFormat::Full, true) => layer.boxed(),
        (LogFormat::Full, false) => layer.without_time().boxed(),
    }
}

/// Build a subscriber for `config` that writes to `writer` instead of the
/// configured target.
///
/// Useful with [`tracing::subscriber::with_default`] to capture output.
///
/// # Errors
///
/// Returns an error if the level or a directive does not parse.
pub fn build_subscriber<W>(
    config: &LogConfig,
    writer: W,
) -> TelemetryResult<impl Subscriber + Send + Sync + 'static>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter = config.build_filter()?;
    Ok(tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer(config, writer)))
}

/// Set up logging with the given configuration as the global default.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the log directory cannot
/// be created, or a global subscriber is already installed.
pub fn setup_logging(config: &LogConfig) -> TelemetryResult<()> {
    let writer = config.make_writer()?;
    build_subscriber(config, writer)?
        .try_init()
        .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))
}
