//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output with configurable log levels
//! - JSON-formatted log files with rotation
//! - Helper macros for the events every search emits
//!
//! # Example
//!
//! ```no_run
//! use djen::logging::init_logging;
//! use djen::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of a collection run
///
/// # Example
///
/// ```no_run
/// use djen::log_collection_start;
///
/// log_collection_start!("OAB 118093/RJ", 100);
/// ```
#[macro_export]
macro_rules! log_collection_start {
    ($query:expr, $page_size:expr) => {
        tracing::info!(
            query = %$query,
            page_size = $page_size,
            "Starting paginated collection"
        );
    };
}

/// Log the completion of a collection run
///
/// # Example
///
/// ```no_run
/// use djen::log_collection_complete;
///
/// log_collection_complete!(250, 3, 250, "reached_expected_total");
/// ```
#[macro_export]
macro_rules! log_collection_complete {
    ($items:expr, $pages:expr, $expected:expr, $reason:expr) => {
        tracing::info!(
            items = $items,
            pages = $pages,
            expected_total = $expected,
            stop_reason = %$reason,
            "Collection completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use djen::log_error_with_context;
/// use djen::domain::DjenError;
///
/// let error = DjenError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log page progress
///
/// # Example
///
/// ```no_run
/// use djen::log_page_progress;
///
/// log_page_progress!(2, 10);
/// ```
#[macro_export]
macro_rules! log_page_progress {
    ($current:expr, $total:expr) => {
        tracing::debug!(
            current = $current,
            total = $total,
            progress_pct = if $total == 0 { 0.0 } else { $current as f64 / $total as f64 * 100.0 },
            "Fetching page"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use djen::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, "Server error: 500");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = %$reason,
            "Retrying operation"
        );
    };
}
