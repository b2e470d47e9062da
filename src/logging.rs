//! Logging setup for the tablescout binary.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the embedding application. The binary calls [`init`], which logs to
//! stderr (stdout carries command output) and, optionally, to a daily
//! rolling file in the platform data directory.
//!
//! ## Usage
//!
//! ```no_run
//! use tablescout::logging;
//!
//! logging::init(true).expect("Failed to initialize logging");
//! tracing::info!("Started");
//! ```

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

const LOG_FILE_PREFIX: &str = "tablescout";

/// Gets the log directory path based on platform conventions
///
/// Returns:
/// - Windows: `%APPDATA%/tablescout/logs`
/// - macOS: `~/Library/Application Support/tablescout/logs`
/// - Linux: `~/.local/share/tablescout/logs`
pub fn get_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;

    let log_dir = base_dir.join("tablescout").join("logs");

    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }

    Ok(log_dir)
}

/// Installs the global subscriber.
///
/// The filter defaults to `info` and can be overridden with `RUST_LOG`.
/// With `log_to_file`, events are also written to `tablescout.<date>.log`,
/// rotated daily with 10 files kept.
///
/// # Errors
///
/// Returns error if the log directory or file appender cannot be created,
/// or if a global subscriber is already installed.
pub fn init(log_to_file: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to create env filter")?;

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr);

    let file_layer = if log_to_file {
        let log_dir = get_log_dir()?;
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .max_log_files(10)
            .filename_prefix(LOG_FILE_PREFIX)
            .filename_suffix("log")
            .build(&log_dir)
            .context("Failed to create log file appender")?;

        Some(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_file(true)
                .with_ansi(false)
                .with_writer(appender),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

/// Gets the path to the current log file
pub fn get_current_log_path() -> Result<PathBuf> {
    let log_dir = get_log_dir()?;
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    Ok(log_dir.join(format!("{LOG_FILE_PREFIX}.{today}.log")))
}
