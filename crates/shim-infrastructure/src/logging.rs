//! Structured logging with tracing
//!
//! The subscriber is a [`Registry`] with an [`EnvFilter`] (`SHIM_LOG` wins
//! over the configured level), one console layer and, when configured, a
//! daily-rolling file layer. The console format is picked at runtime, so
//! layers are boxed.
//!
//! A host application that already installed a global subscriber keeps it:
//! [`init_logging`] reports that nothing was installed instead of failing.

use std::ffi::OsStr;
use std::path::Path;

use shim_domain::error::{Error, Result};
use tracing::{Level, Subscriber, debug, info, warn};
use tracing_appender::rolling::{self, RollingFileAppender};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

pub use crate::config::LoggingConfig;
use crate::constants::{DEFAULT_LOG_FILE_PREFIX, LOG_ENV_FILTER};

/// Install the global subscriber described by `config`
///
/// Returns `Ok(false)` when another global subscriber was already set; it
/// is left in place. An unknown level is always an error.
pub fn init_logging(config: &LoggingConfig) -> Result<bool> {
    match build_subscriber(config)?.try_init() {
        Ok(()) => {
            info!(level = %config.level, json = config.json_format, "Logging initialized");
            Ok(true)
        }
        Err(e) => {
            debug!(error = %e, "Global subscriber already installed; keeping it");
            Ok(false)
        }
    }
}

/// Build the subscriber for `config` without installing it
///
/// Useful with [`tracing::subscriber::with_default`] for scoped logging.
pub fn build_subscriber(
    config: &LoggingConfig,
) -> Result<impl Subscriber + for<'a> LookupSpan<'a> + Send + Sync + 'static> {
    let level = parse_log_level(&config.level)?;
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .with_env_var(LOG_ENV_FILTER)
        .from_env_lossy();

    let console = if config.json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .boxed()
    } else {
        fmt::layer().with_target(true).with_thread_ids(true).boxed()
    };

    let file = config
        .file_output
        .as_deref()
        .map(|path| fmt::layer().with_writer(file_appender(path)).with_ansi(false));

    Ok(Registry::default().with(filter).with(console).with(file))
}

fn file_appender(path: &Path) -> RollingFileAppender {
    let directory = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let prefix = path
        .file_stem()
        .unwrap_or_else(|| OsStr::new(DEFAULT_LOG_FILE_PREFIX));
    rolling::daily(directory, prefix)
}

/// Parse a level name (case-insensitive, `warning` accepted)
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::config(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}

/// Record where configuration came from
pub fn log_config_loaded(config_path: &Path, found: bool) {
    if found {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        warn!(path = %config_path.display(), "Configuration file not found");
    }
}
