//! Logging and observability
//!
//! Structured logging built on `tracing`:
//! - Human readable console output on stderr
//! - Configurable log levels, overridable with `RUST_LOG`
//! - Optional JSON file logging with daily or hourly rotation
//!
//! # Example
//!
//! ```no_run
//! use shiftwatch::logging::init_logging;
//! use shiftwatch::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a check run
///
/// # Example
///
/// ```no_run
/// use shiftwatch::log_run_start;
/// use chrono::NaiveDate;
///
/// let reference = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// log_run_start!(reference, 5, false);
/// ```
#[macro_export]
macro_rules! log_run_start {
    ($reference:expr, $days:expr, $dry_run:expr) => {
        tracing::info!(
            reference = %$reference,
            days = $days,
            dry_run = $dry_run,
            "Starting schedule check"
        );
    };
}

/// Log the outcome of a diff that found changes
///
/// # Example
///
/// ```no_run
/// use shiftwatch::log_changes_found;
///
/// log_changes_found!(3, 2, 1);
/// ```
#[macro_export]
macro_rules! log_changes_found {
    ($count:expr, $added:expr, $removed:expr) => {
        tracing::info!(
            changes = $count,
            added = $added,
            removed = $removed,
            "Found changes in the schedule"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use shiftwatch::log_error_with_context;
/// use shiftwatch::domain::ShiftWatchError;
///
/// let error = ShiftWatchError::Delivery("relay refused".to_string());
/// log_error_with_context!(&error, "Failed to send notification");
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

#[cfg(test)]
mod tests {
    use crate::domain::ShiftWatchError;
    use chrono::NaiveDate;

    #[test]
    fn test_macros_expand() {
        let reference = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        crate::log_run_start!(reference, 5u32, true);
        crate::log_changes_found!(2usize, 1usize, 1usize);
        let error = ShiftWatchError::Other("boom".to_string());
        crate::log_error_with_context!(&error, "while testing");
    }
}
