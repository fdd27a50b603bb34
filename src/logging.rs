//! Structured logging for the UV monitoring service
//!
//! Thin layer over `tracing` that tags every event with the pipeline
//! stage it came from and an optional context id (a location id, a
//! calendar date, a notification identifier). Supports console output
//! and an append-only log file for background refresh runs.

use std::fmt;
use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::model::UvError;

// ---------------------------------------------------------------------------
// Log Sources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSource {
    Forecast,
    Grouping,
    Summary,
    Scheduler,
    Notifier,
    Config,
    System,
}

impl fmt::Display for LogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogSource::Forecast => write!(f, "FCST"),
            LogSource::Grouping => write!(f, "GROUP"),
            LogSource::Summary => write!(f, "SUM"),
            LogSource::Scheduler => write!(f, "SCHED"),
            LogSource::Notifier => write!(f, "NOTIFY"),
            LogSource::Config => write!(f, "CFG"),
            LogSource::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Failure Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureType {
    /// Expected failure - the user declined permission or turned delivery off
    Expected,
    /// Unexpected failure - the notification center misbehaved
    Unexpected,
    /// Unknown - cannot determine if this is expected or not
    Unknown,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureType::Expected => write!(f, "EXPECTED"),
            FailureType::Unexpected => write!(f, "UNEXPECTED"),
            FailureType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// ---------------------------------------------------------------------------
// Subscriber Setup
// ---------------------------------------------------------------------------

/// Install the global subscriber.
///
/// `filter` uses `EnvFilter` syntax (`"info"`, `"uvmon_service=debug"`);
/// an unparseable filter falls back to `info`. When `log_file` is given,
/// events are also appended there without ANSI colouring.
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logger(filter: &str, log_file: Option<&str>) -> Result<(), UvError> {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let console = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(false);

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| UvError::Logging(e.to_string()))?;

    info(LogSource::System, log_file, &format!("Logger initialized with filter {:?}", filter));
    Ok(())
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Log a general informational message
pub fn info(source: LogSource, context: Option<&str>, message: &str) {
    tracing::info!(source = %source, context = context.unwrap_or("-"), "{}", message);
}

/// Log a warning message
pub fn warn(source: LogSource, context: Option<&str>, message: &str) {
    tracing::warn!(source = %source, context = context.unwrap_or("-"), "{}", message);
}

/// Log an error message
pub fn error(source: LogSource, context: Option<&str>, message: &str) {
    tracing::error!(source = %source, context = context.unwrap_or("-"), "{}", message);
}

/// Log a debug message
pub fn debug(source: LogSource, context: Option<&str>, message: &str) {
    tracing::debug!(source = %source, context = context.unwrap_or("-"), "{}", message);
}

// ---------------------------------------------------------------------------
// Failure Classification Helpers
// ---------------------------------------------------------------------------

/// Classify a notification submission failure by its error text
pub fn classify_submission_failure(error_message: &str) -> FailureType {
    let lowered = error_message.to_ascii_lowercase();

    if lowered.contains("not authorized") || lowered.contains("denied") {
        FailureType::Expected
    } else if lowered.contains("rejected") || lowered.contains("unavailable") {
        FailureType::Unexpected
    } else {
        FailureType::Unknown
    }
}

/// Log a failed submission with automatic classification
pub fn log_submission_failure(identifier: &str, err: &dyn std::error::Error) {
    let error_msg = err.to_string();
    let failure_type = classify_submission_failure(&error_msg);

    let message = format!("submission failed [{}]: {}", failure_type, error_msg);

    match failure_type {
        FailureType::Expected => debug(LogSource::Notifier, Some(identifier), &message),
        FailureType::Unexpected => error(LogSource::Notifier, Some(identifier), &message),
        FailureType::Unknown => warn(LogSource::Notifier, Some(identifier), &message),
    }
}

// ---------------------------------------------------------------------------
// Scheduling Summary Logging
// ---------------------------------------------------------------------------

/// Log a summary of one scheduling pass for a notification category
pub fn log_schedule_summary(category: &str, total: usize, scheduled: usize, failed: usize) {
    let message = format!(
        "{} scheduling complete: {}/{} scheduled, {} failed",
        category, scheduled, total, failed
    );

    if failed == 0 {
        info(LogSource::Scheduler, None, &message);
    } else if scheduled == 0 {
        error(LogSource::Scheduler, None, &message);
    } else {
        warn(LogSource::Scheduler, None, &message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_tags_are_short_and_distinct() {
        let tags: Vec<String> = [
            LogSource::Forecast,
            LogSource::Grouping,
            LogSource::Summary,
            LogSource::Scheduler,
            LogSource::Notifier,
            LogSource::Config,
            LogSource::System,
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let unique: std::collections::HashSet<_> = tags.iter().collect();
        assert_eq!(unique.len(), tags.len());
        assert!(tags.iter().all(|t| t.len() <= 6));
    }

    #[test]
    fn test_failure_classification() {
        let result = classify_submission_failure("Notifications not authorized");
        assert_eq!(result, FailureType::Expected);

        let result = classify_submission_failure("Notification rejected: queue full");
        assert_eq!(result, FailureType::Unexpected);

        let result = classify_submission_failure("something odd happened");
        assert_eq!(result, FailureType::Unknown);
    }

    #[test]
    fn test_logging_without_subscriber_is_a_no_op() {
        info(LogSource::Config, None, "nobody is listening");
        log_schedule_summary("highLevel", 3, 2, 1);
    }

    // Installs the process-wide subscriber, so this is the only test here
    // that calls init_logger.
    #[test]
    fn test_init_logger_writes_startup_event_to_file() {
        let file = tempfile::NamedTempFile::new().expect("temp file should be creatable");
        let path = file.path().to_str().expect("temp path is UTF-8").to_string();

        init_logger("info", Some(&path)).expect("first install should succeed");

        let written = std::fs::read_to_string(&path).expect("log file should be readable");
        assert!(written.contains("Logger initialized"), "got {:?}", written);
        assert!(written.contains("source=SYS"), "got {:?}", written);

        let second = init_logger("info", None);
        assert!(matches!(second, Err(UvError::Logging(_))));
    }
}
