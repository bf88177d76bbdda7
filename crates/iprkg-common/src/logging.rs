//! Logging configuration and initialization
//!
//! Every IPRKG binary logs through `tracing`. This module wires up the global
//! subscriber from a [`LogConfig`], which can be built in code or read from
//! the environment:
//!
//! - Output to the console, a daily rolling file, or both
//! - Human-readable text or JSON lines
//! - A base level plus optional per-target directives (`LOG_FILTER`)
//!
//! Use structured fields rather than interpolated strings where a value is
//! worth filtering on:
//!
//! ```rust,ignore
//! info!(entries = entries.len(), path = %path.display(), "Loaded entry list");
//! ```
//!
//! # Example
//!
//! ```no_run
//! use iprkg_common::logging::{init_logging, LogConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = LogConfig::from_env()?;
//!     let _guard = init_logging(&config)?;
//!     tracing::info!("Application started");
//!     Ok(())
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Minimum level of emitted events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(anyhow::anyhow!("Invalid log level: {}", s)),
        }
    }
}

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Console,
    File,
    Both,
}

impl LogOutput {
    fn console(self) -> bool {
        matches!(self, LogOutput::Console | LogOutput::Both)
    }

    fn file(self) -> bool {
        matches!(self, LogOutput::File | LogOutput::Both)
    }
}

impl std::str::FromStr for LogOutput {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" | "stderr" => Ok(LogOutput::Console),
            "file" => Ok(LogOutput::File),
            "both" | "all" => Ok(LogOutput::Both),
            _ => Err(anyhow::anyhow!("Invalid log output: {}", s)),
        }
    }
}

/// Line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: LogLevel,
    pub output: LogOutput,
    pub format: LogFormat,

    /// Directory for rolling log files (only used when output includes file)
    pub log_dir: PathBuf,

    /// File name prefix, e.g. "iprkg-ingest" -> "iprkg-ingest.2024-01-18"
    pub log_file_prefix: String,

    /// Extra directives such as "reqwest=warn,iprkg_ingest=debug"
    pub filter_directives: Option<String>,

    pub include_location: bool,
    pub include_targets: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            output: LogOutput::Console,
            format: LogFormat::Text,
            log_dir: PathBuf::from("./logs"),
            log_file_prefix: "iprkg".to_string(),
            filter_directives: None,
            include_location: false,
            include_targets: true,
        }
    }
}

impl LogConfig {
    /// Load configuration from environment variables
    ///
    /// - `LOG_LEVEL`: trace, debug, info, warn, error
    /// - `LOG_OUTPUT`: console, file, both
    /// - `LOG_FORMAT`: text, json
    /// - `LOG_DIR`: directory for log files
    /// - `LOG_FILE_PREFIX`: prefix for log files
    /// - `LOG_FILTER`: additional filter directives
    /// - `LOG_INCLUDE_LOCATION`: include file/line (true/false)
    pub fn from_env() -> Result<Self> {
        Self::default().merge_env()
    }

    /// Override fields of `self` with whatever `LOG_*` variables are set
    pub fn merge_env(mut self) -> Result<Self> {
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            self.level = level.parse()?;
        }
        if let Ok(output) = std::env::var("LOG_OUTPUT") {
            self.output = output.parse()?;
        }
        if let Ok(format) = std::env::var("LOG_FORMAT") {
            self.format = format.parse()?;
        }
        if let Ok(dir) = std::env::var("LOG_DIR") {
            self.log_dir = PathBuf::from(dir);
        }
        if let Ok(prefix) = std::env::var("LOG_FILE_PREFIX") {
            self.log_file_prefix = prefix;
        }
        if let Ok(filter) = std::env::var("LOG_FILTER") {
            self.filter_directives = Some(filter);
        }
        if let Ok(val) = std::env::var("LOG_INCLUDE_LOCATION") {
            self.include_location = val.parse().unwrap_or(false);
        }
        Ok(self)
    }

    pub fn builder() -> LogConfigBuilder {
        LogConfigBuilder::default()
    }

    fn env_filter(&self) -> Result<EnvFilter> {
        let mut filter =
            EnvFilter::from_default_env().add_directive(self.level.to_tracing_level().into());

        if let Some(ref directives) = self.filter_directives {
            for directive in directives.split(',').filter(|d| !d.trim().is_empty()) {
                filter = filter.add_directive(
                    directive
                        .trim()
                        .parse()
                        .with_context(|| format!("Failed to parse filter directive '{}'", directive))?,
                );
            }
        }

        Ok(filter)
    }

    fn layer<W>(&self, writer: W, ansi: bool) -> BoxedLayer
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        match self.format {
            LogFormat::Text => fmt::layer()
                .with_writer(writer)
                .with_target(self.include_targets)
                .with_file(self.include_location)
                .with_line_number(self.include_location)
                .with_span_events(FmtSpan::CLOSE)
                .with_ansi(ansi)
                .boxed(),
            LogFormat::Json => fmt::layer()
                .json()
                .with_writer(writer)
                .with_target(self.include_targets)
                .with_file(self.include_location)
                .with_line_number(self.include_location)
                .with_span_events(FmtSpan::CLOSE)
                .boxed(),
        }
    }
}

#[derive(Default)]
pub struct LogConfigBuilder {
    config: LogConfig,
}

impl LogConfigBuilder {
    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    pub fn output(mut self, output: LogOutput) -> Self {
        self.config.output = output;
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.config.format = format;
        self
    }

    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.log_dir = dir.into();
        self
    }

    pub fn log_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.log_file_prefix = prefix.into();
        self
    }

    pub fn filter_directives(mut self, filter: impl Into<String>) -> Self {
        self.config.filter_directives = Some(filter.into());
        self
    }

    pub fn include_location(mut self, include: bool) -> Self {
        self.config.include_location = include;
        self
    }

    pub fn build(self) -> LogConfig {
        self.config
    }
}

/// Keeps the non-blocking file writer flushing; drop it at process exit
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Install the global subscriber. Call once, at startup.
pub fn init_logging(config: &LogConfig) -> Result<LoggingGuard> {
    let filter = config.env_filter()?;
    let mut layers: Vec<BoxedLayer> = Vec::new();
    let mut file_guard = None;

    if config.output.console() {
        layers.push(config.layer(std::io::stderr, true));
    }

    if config.output.file() {
        std::fs::create_dir_all(&config.log_dir).with_context(|| {
            format!("Failed to create log directory {}", config.log_dir.display())
        })?;
        let appender = tracing_appender::rolling::daily(&config.log_dir, &config.log_file_prefix);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        layers.push(config.layer(writer, false));
        file_guard = Some(guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(LoggingGuard { _file: file_guard })
}
