//! Core data types for the UV monitoring service.
//!
//! This module defines the shared domain model imported by all other modules.
//! It contains no I/O and almost no logic: only the sample and interval
//! types, their derived timestamps, and the crate-wide error type.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Validity of one forecast sample, in seconds. The forecast API is hourly.
pub const SAMPLE_DURATION_SECS: i64 = 3600;

/// Highest threshold the settings accept. Anything at or above 11 is extreme.
pub const MAX_THRESHOLD: u8 = 11;

/// The standard one-hour sample length as a `chrono::Duration`.
pub fn one_hour() -> Duration {
    Duration::seconds(SAMPLE_DURATION_SECS)
}

// ---------------------------------------------------------------------------
// Sample types
// ---------------------------------------------------------------------------

/// A single hourly UV observation or forecast point.
///
/// Corresponds to one entry in the `hourly.data[]` array of a forecast
/// response. Samples are immutable once built; pipeline stages produce new
/// values rather than editing existing ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UvSample {
    /// UV index. Negative values are never produced by the API but are not
    /// rejected either.
    pub index: i32,
    /// Instant the sample starts being valid.
    pub timestamp: DateTime<Utc>,
    /// Length of validity, one hour unless stated otherwise.
    #[serde(with = "duration_secs", default = "one_hour")]
    pub duration: Duration,
}

impl UvSample {
    /// Builds an hourly sample.
    pub fn new(index: i32, timestamp: DateTime<Utc>) -> Self {
        Self {
            index,
            timestamp,
            duration: one_hour(),
        }
    }

    /// Builds a sample with an explicit validity.
    pub fn with_duration(index: i32, timestamp: DateTime<Utc>, duration: Duration) -> Self {
        Self {
            index,
            timestamp,
            duration,
        }
    }

    /// Instant the sample stops being valid.
    pub fn end_timestamp(&self) -> DateTime<Utc> {
        self.timestamp + self.duration
    }

    /// Returns `true` if `instant` falls inside `[timestamp, end)`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.timestamp <= instant && instant < self.end_timestamp()
    }
}

// Equality ignores `duration`.
impl PartialEq for UvSample {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.timestamp == other.timestamp
    }
}

impl Eq for UvSample {}

/// A maximal run of adjacent samples sharing one UV index.
///
/// Produced by `analysis::groupings::group_by_index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UvInterval {
    pub index: i32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl UvInterval {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns `true` if the interval has not ended at `now`.
    pub fn is_current_or_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.end > now
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised at the edges of the service: configuration, forecast
/// decoding and notification submission. The pipeline itself is infallible.
#[derive(Debug, Error)]
pub enum UvError {
    /// A forecast payload or stored value could not be interpreted.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A user setting is outside its accepted range.
    #[error("Invalid setting {field}: {value} (maximum {max})")]
    InvalidSetting {
        field: &'static str,
        value: String,
        max: String,
    },

    /// A saved location names a time zone chrono-tz does not know.
    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),

    /// The notification center refused a request.
    #[error("Notification rejected: {0}")]
    NotificationRejected(String),

    /// The user has not granted notification permission.
    #[error("Notifications not authorized")]
    NotAuthorized,

    /// The global log subscriber could not be installed.
    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Serde helpers
// ---------------------------------------------------------------------------

mod duration_secs {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(duration.num_seconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = i64::deserialize(deserializer)?;
        Ok(Duration::seconds(secs))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 21, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_new_sample_defaults_to_one_hour() {
        let sample = UvSample::new(4, at(10));
        assert_eq!(sample.duration, Duration::hours(1));
        assert_eq!(sample.end_timestamp(), at(11));
    }

    #[test]
    fn test_sample_equality_ignores_duration() {
        let hourly = UvSample::new(5, at(12));
        let longer = UvSample::with_duration(5, at(12), Duration::hours(3));
        assert_eq!(hourly, longer);
    }

    #[test]
    fn test_sample_equality_respects_index_and_timestamp() {
        assert_ne!(UvSample::new(5, at(12)), UvSample::new(6, at(12)));
        assert_ne!(UvSample::new(5, at(12)), UvSample::new(5, at(13)));
    }

    #[test]
    fn test_contains_is_half_open() {
        let sample = UvSample::new(2, at(9));
        assert!(sample.contains(at(9)));
        assert!(sample.contains(at(9) + Duration::minutes(59)));
        assert!(!sample.contains(at(10)));
    }

    #[test]
    fn test_sample_json_without_duration_defaults_to_hour() {
        let json = r#"{"index":7,"timestamp":"2024-06-21T12:00:00Z"}"#;
        let sample: UvSample = serde_json::from_str(json).expect("sample should decode");
        assert_eq!(sample.index, 7);
        assert_eq!(sample.duration, one_hour());
    }

    #[test]
    fn test_interval_duration_and_upcoming() {
        let interval = UvInterval {
            index: 6,
            start: at(11),
            end: at(14),
        };
        assert_eq!(interval.duration(), Duration::hours(3));
        assert!(interval.is_current_or_upcoming(at(13)));
        assert!(!interval.is_current_or_upcoming(at(14)));
    }

    #[test]
    fn test_error_messages_are_readable() {
        let err = UvError::InvalidSetting {
            field: "delivery_hour",
            value: "24".to_string(),
            max: "23".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid setting delivery_hour: 24 (maximum 23)");
        assert_eq!(UvError::NotAuthorized.to_string(), "Notifications not authorized");
    }
}
