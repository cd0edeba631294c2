//! Tracing setup for the wardctl CLI
//!
//! Installs one subscriber with two layers:
//! - console (stderr): `warn` by default, `debug` with `--debug`
//! - log file: `debug` by default, plain text with timestamps and levels
//!
//! Usage:
//!   wardctl --debug ...                # Debug logging to console
//!   RUST_LOG=wardctl_core=trace wardctl ...  # Fine-grained console control
//!
//! Environment variables:
//!   RUST_LOG                           # Console filter (overrides config)
//!   WARDCTL_LOG_FILE                   # Log file path (overrides config)

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};
use wardctl_core::LoggingConfig;

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Enable debug logging on the console (unless RUST_LOG is set)
    pub debug: bool,
    pub console_level: String,
    /// Log file; `None` disables the file layer
    pub file: Option<PathBuf>,
    pub file_level: String,
}

impl TracingConfig {
    pub fn from_logging(logging: &LoggingConfig, debug: bool) -> Self {
        Self {
            debug,
            console_level: logging.console_level.clone(),
            file: Some(logging.file.clone()),
            file_level: logging.file_level.clone(),
        }
    }
}

fn filter_or(level: &str, fallback: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(fallback))
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
        }
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

/// Initialize tracing with console and file layers
///
/// A log file that cannot be opened is reported and skipped; the console
/// layer is always installed.
pub fn init(config: &TracingConfig) -> Result<()> {
    let console_filter = if config.debug {
        // Debug mode: set debug level unless RUST_LOG is explicitly set
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| filter_or(&config.console_level, "warn"))
    };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.debug)
        .compact()
        .with_filter(console_filter);

    let file_layer = match config.file.as_deref().map(open_log_file) {
        Some(Ok(file)) => Some(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .with_filter(filter_or(&config.file_level, "debug")),
        ),
        Some(Err(err)) => {
            eprintln!("warning: file logging disabled: {err:#}");
            None
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|err| anyhow!(err))
}
