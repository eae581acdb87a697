//! Logging initialization for repopilot.
//!
//! Default: logs to stderr.
//! With `logging.to_file`: logs to `<state>/logs/repopilot-{datetime}.log`

use anyhow::Result;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Result of logging initialization
pub struct LoggingHandle {
    /// Guard that must be kept alive for the duration of the program.
    /// When dropped, ensures all buffered logs are flushed.
    pub _guard: Option<WorkerGuard>,

    /// Path to the log file (only set with file logging enabled)
    pub log_file_path: Option<PathBuf>,
}

/// Effective filter directive: `--debug` wins, then `RUST_LOG`, then config
pub fn filter_directive(config: &Config, debug_override: bool) -> String {
    resolve_directive(config, debug_override, std::env::var("RUST_LOG").ok())
}

fn resolve_directive(config: &Config, debug_override: bool, rust_log: Option<String>) -> String {
    if debug_override {
        return "debug".to_string();
    }
    rust_log.unwrap_or_else(|| config.logging.level.clone())
}

/// Log file name for a given start time
pub fn log_file_name(now: chrono::DateTime<chrono::Utc>) -> String {
    format!("repopilot-{}.log", now.format("%Y%m%dT%H%M%SZ"))
}

/// Initialize logging based on configuration.
///
/// # Returns
/// A `LoggingHandle` that must be kept alive for the duration of the program.
pub fn init_logging(config: &Config, debug_override: bool) -> Result<LoggingHandle> {
    let filter = tracing_subscriber::EnvFilter::new(filter_directive(config, debug_override));

    if config.logging.to_file {
        let logs_dir = config.logs_path();
        std::fs::create_dir_all(&logs_dir)?;

        let log_filename = log_file_name(chrono::Utc::now());
        let log_file_path = logs_dir.join(&log_filename);

        let file_appender = tracing_appender::rolling::never(&logs_dir, &log_filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false) // No ANSI codes in log files
                    .with_writer(non_blocking),
            )
            .init();

        Ok(LoggingHandle {
            _guard: Some(guard),
            log_file_path: Some(log_file_path),
        })
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();

        Ok(LoggingHandle {
            _guard: None,
            log_file_path: None,
        })
    }
}
