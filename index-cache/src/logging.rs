//! Logging setup.
//!
//! The library only emits `tracing` events; embedding applications decide
//! where they go. [`init_logging`] is a convenience for binaries and tools that
//! want the standard setup: an `EnvFilter` (overridable through `RUST_LOG`)
//! and either stderr output or a daily-rolling log file.
//!
//! # Example
//!
//! ```ignore
//! use index_cache::logging::{init_logging, LoggingConfig};
//!
//! // Keep the guard alive for the life of the process so buffered lines flush.
//! let _guard = init_logging(&LoggingConfig::default().with_directory("/var/log/search"))?;
//! ```

use std::path::PathBuf;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Default filter directive when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Default log file name prefix.
pub const DEFAULT_FILE_PREFIX: &str = "index-cache.log";

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The filter directive could not be parsed.
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    /// A global subscriber is already installed.
    #[error("Failed to install log subscriber: {0}")]
    Init(String),
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `"info"` or `"index_cache=debug"`.
    pub filter: String,

    /// Directory for rolling log files. Logs go to stderr when unset.
    pub directory: Option<PathBuf>,

    /// Log file name prefix.
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            directory: None,
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
        }
    }
}

impl LoggingConfig {
    /// Set the filter directive.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Write logs to a daily-rolling file in `directory`.
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }
}

/// Resolve the effective filter: `RUST_LOG` wins over the configured one.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.filter).map_err(|e| LoggingError::InvalidFilter {
        filter: config.filter.clone(),
        reason: e.to_string(),
    })
}

/// Install the global subscriber.
///
/// Returns the appender guard when logging to a file; dropping it flushes and
/// stops the background writer.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = build_filter(config)?;

    match &config.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, &config.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .try_init()
                .map_err(|e| LoggingError::Init(e.to_string()))?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| LoggingError::Init(e.to_string()))?;
            Ok(None)
        }
    }
}
