//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the SalaryBoard application.

use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::{SalaryBoardError, Result};
use crate::utils::helpers::format_cents;

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer on drop and must be held for the
/// lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let (file_layer, guard) = match config.directory.as_deref() {
        Some(directory) => {
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("salaryboard")
                .filename_suffix("log")
                .max_log_files(config.max_files)
                .build(directory)
                .map_err(|e| SalaryBoardError::Config(format!("Cannot open log directory {}: {}", directory, e)))?;
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stdout_layer = if config.json {
        tracing_subscriber::fmt::layer().json().with_writer(std::io::stdout).boxed()
    } else {
        tracing_subscriber::fmt::layer().with_writer(std::io::stdout).boxed()
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| SalaryBoardError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a newly stored submission
pub fn log_submission_created(submission_id: i64, technology_count: usize, salary_in_cents: i64) {
    info!(
        submission_id = submission_id,
        technology_count = technology_count,
        salary = %format_cents(salary_in_cents),
        "Submission created"
    );
}

/// Log a newly stored technology
pub fn log_technology_created(technology_id: i64, name: &str, implicit: bool) {
    info!(
        technology_id = technology_id,
        name = name,
        implicit = implicit,
        "Technology created"
    );
}

/// Log rejected client requests
pub fn log_rejected_request(client: &str, reason: &str) {
    warn!(
        client = client,
        reason = reason,
        "Request rejected"
    );
}

/// Log database operations
pub fn log_database_operation(operation: &str, table: &str, duration_ms: u64, success: bool) {
    if success {
        debug!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation completed"
        );
    } else {
        error!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation failed"
        );
    }
}
