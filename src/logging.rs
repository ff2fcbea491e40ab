//! Optional tracing output for gitflow-graph.
//!
//! Logging is off unless a level is given with `--log-level` or
//! `GITFLOW_GRAPH_LOG_LEVEL`. Events go to stderr, or to `--log-file` when
//! set, so generated histories written to stdout stay clean.

use std::io;
use std::path::PathBuf;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Environment variable for the log level.
pub const LOG_LEVEL_ENV: &str = "GITFLOW_GRAPH_LOG_LEVEL";
/// Environment variable for the log file.
pub const LOG_FILE_ENV: &str = "GITFLOW_GRAPH_LOG_FILE";
/// Environment variable for the log format.
pub const LOG_FORMAT_ENV: &str = "GITFLOW_GRAPH_LOG_FORMAT";

/// Log level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse a log level from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Configuration for the logging system.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogConfig {
    /// Log level (None means logging is disabled).
    pub level: Option<LogLevel>,
    /// Output file path (None means stderr).
    pub file: Option<PathBuf>,
    pub format: LogFormat,
}

impl LogConfig {
    /// Filter directive limited to this crate's events.
    pub fn filter_directive(&self) -> Option<String> {
        self.level
            .map(|level| format!("gitflow_graph={}", level.as_filter_str()))
    }
}

/// Keeps the background writer alive; pending events are flushed on drop.
pub struct LogGuard {
    _guard: WorkerGuard,
}

/// Install the global subscriber described by `config`.
///
/// Returns `Ok(None)` when logging is disabled and an error when the log file
/// cannot be opened. Must be called at most once per process.
///
/// ```rust,no_run
/// use gitflow_graph::logging::{LogConfig, LogFormat, LogLevel, init_logging};
///
/// let config = LogConfig {
///     level: Some(LogLevel::Debug),
///     file: None,
///     format: LogFormat::Text,
/// };
/// let _guard = init_logging(&config).unwrap();
/// ```
#[must_use = "the returned guard must be held until application exit"]
pub fn init_logging(config: &LogConfig) -> io::Result<Option<LogGuard>> {
    let Some(directive) = config.filter_directive() else {
        return Ok(None);
    };
    let filter = EnvFilter::new(directive);

    let (writer, guard) = match &config.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_appender::non_blocking(file)
        }
        None => tracing_appender::non_blocking(io::stderr()),
    };
    let to_file = config.file.is_some();

    match config.format {
        LogFormat::Json => json_layer(writer, filter, to_file),
        LogFormat::Text => text_layer(writer, filter, to_file),
    }

    Ok(Some(LogGuard { _guard: guard }))
}

fn json_layer(writer: NonBlocking, filter: EnvFilter, to_file: bool) {
    let layer = fmt::layer()
        .with_writer(writer)
        .json()
        .with_span_events(FmtSpan::CLOSE)
        .with_file(to_file)
        .with_line_number(to_file);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .init();
}

fn text_layer(writer: NonBlocking, filter: EnvFilter, to_file: bool) {
    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(!to_file)
        .with_file(to_file)
        .with_line_number(to_file);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .init();
}

/// Read logging flags ahead of full argument parsing.
///
/// Precedence: CLI args > environment variables. Unknown level or format
/// strings are ignored.
#[must_use]
pub fn parse_early_log_config(args: &[String]) -> LogConfig {
    let level = extract_arg_value(args, "--log-level").or_else(|| std::env::var(LOG_LEVEL_ENV).ok());
    let file = extract_arg_value(args, "--log-file").or_else(|| std::env::var(LOG_FILE_ENV).ok());
    let format =
        extract_arg_value(args, "--log-format").or_else(|| std::env::var(LOG_FORMAT_ENV).ok());

    LogConfig {
        level: level.and_then(|s| LogLevel::parse(&s)),
        file: file.filter(|s| !s.is_empty()).map(PathBuf::from),
        format: format.and_then(|s| LogFormat::parse(&s)).unwrap_or_default(),
    }
}

/// Value of `flag` given either as `flag value` or `flag=value`.
fn extract_arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter().enumerate().find_map(|(i, arg)| {
        if arg == flag {
            args.get(i + 1).cloned()
        } else {
            arg.strip_prefix(flag)
                .and_then(|rest| rest.strip_prefix('='))
                .map(str::to_string)
        }
    })
}
