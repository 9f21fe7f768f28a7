//! Rolling Logger
//!
//! Installs the global `tracing` subscriber: one layer to stderr, one layer
//! into a size-capped rolling file set. Records emitted through the `log`
//! crate are forwarded into the same subscriber.

mod rolling;

pub use rolling::{RollingFile, RollingHandle, RollingWriter};

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Default size of one log file before rotation (1 MiB)
pub const DEFAULT_MAX_BYTES: u64 = 1024 * 1024;
/// Default number of log files kept, including the active one
pub const DEFAULT_MAX_FILES: usize = 5;

static LOG_FILE: OnceLock<PathBuf> = OnceLock::new();

#[derive(Debug)]
pub enum LoggerError {
    Io(std::io::Error),
    AlreadyInitialized,
    NotInitialized,
}

impl fmt::Display for LoggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggerError::Io(e) => write!(f, "log file error: {}", e),
            LoggerError::AlreadyInitialized => write!(f, "logger already initialized"),
            LoggerError::NotInitialized => write!(f, "logger not initialized"),
        }
    }
}

impl std::error::Error for LoggerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoggerError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LoggerError {
    fn from(e: std::io::Error) -> Self {
        LoggerError::Io(e)
    }
}

/// Rotation and filtering knobs
#[derive(Debug, Clone)]
pub struct LoggerOptions {
    pub max_bytes: u64,
    pub max_files: usize,
    /// Used when `RUST_LOG` is unset or unparsable
    pub default_filter: String,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            max_files: DEFAULT_MAX_FILES,
            default_filter: "info".to_string(),
        }
    }
}

/// Local wall-clock timestamps for every line
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Initialize logging with default rotation settings.
///
/// Returns the path of the active log file.
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<PathBuf, LoggerError> {
    init_logger_with(log_dir, app_name, LoggerOptions::default())
}

/// Initialize logging with explicit rotation settings
pub fn init_logger_with(
    log_dir: impl AsRef<Path>,
    app_name: &str,
    options: LoggerOptions,
) -> Result<PathBuf, LoggerError> {
    if LOG_FILE.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }

    let file = RollingFile::open(log_dir.as_ref(), app_name, options.max_bytes, options.max_files)?;
    let path = file.path();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&options.default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_timer(LocalTime),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(RollingWriter::new(file))
                .with_ansi(false)
                .with_timer(LocalTime),
        )
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    let _ = LOG_FILE.set(path.clone());
    Ok(path)
}

/// Path of the active log file, once initialized
pub fn log_file() -> Option<&'static Path> {
    LOG_FILE.get().map(PathBuf::as_path)
}

fn ensure_initialized() -> Result<(), LoggerError> {
    if LOG_FILE.get().is_some() {
        Ok(())
    } else {
        Err(LoggerError::NotInitialized)
    }
}

/// Log an info line through the installed logger
pub fn info(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    log::info!(target: "rolling_logger", "{}", message);
    Ok(())
}

/// Log an error line through the installed logger
pub fn error(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    log::error!(target: "rolling_logger", "{}", message);
    Ok(())
}
