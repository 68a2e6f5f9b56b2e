//! Logging setup for the tabprep binary.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the application. [`init`] builds the one the CLI uses:
//!
//! - a stderr layer, filtered by `RUST_LOG` or the configured level
//! - optionally a daily rotating file layer (10 files kept)
//!
//! ```no_run
//! use tabprep::config::LoggingConfig;
//!
//! tabprep::logging::init(&LoggingConfig::default()).expect("Failed to initialize logging");
//! tracing::info!("ready");
//! ```

use crate::config::LoggingConfig;
use crate::error::{PrepError, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

/// Resolves the log directory: the configured one, or `<data dir>/tabprep/logs`.
pub fn get_log_dir(config: &LoggingConfig) -> Result<PathBuf> {
    let log_dir = match &config.directory {
        Some(dir) => dir.clone(),
        None => dirs::data_dir()
            .ok_or_else(|| PrepError::Config("Failed to determine data directory".to_owned()))?
            .join("tabprep")
            .join("logs"),
    };

    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)?;
    }

    Ok(log_dir)
}

/// Initializes the global subscriber.
///
/// # Errors
///
/// Returns error if the filter directive is invalid, the log directory cannot
/// be created, or a subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| PrepError::Config(format!("Invalid log filter: {e}")))?;

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    let file_layer = if config.to_file {
        let log_dir = get_log_dir(config)?;
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .max_log_files(10)
            .filename_prefix("tabprep")
            .filename_suffix("log")
            .build(&log_dir)
            .map_err(|e| PrepError::Config(format!("Failed to create log file appender: {e}")))?;

        Some(
            fmt::layer()
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .with_ansi(false)
                .with_writer(appender)
                .boxed(),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| PrepError::Config(format!("Failed to install subscriber: {e}")))?;

    tracing::debug!("Logging initialized");

    Ok(())
}
