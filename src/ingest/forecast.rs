//! Hourly forecast payload decoding
//!
//! Turns the `hourly` block of a forecast API response into `UvSample`s.
//! Fetching the payload is the caller's job; this module only decodes and
//! orders what was fetched.
//!
//! Payload shape:
//! `{"hourly": {"data": [{"time": 1718960400, "uvIndex": 5}, ...]}}`

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::logging::{self, LogSource};
use crate::model::{UvError, UvSample};

// ============================================================================
// Forecast API Response Structures
// ============================================================================

/// Top-level forecast response. Blocks other than `hourly` are ignored.
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub hourly: HourlyBlock,
}

#[derive(Debug, Deserialize)]
pub struct HourlyBlock {
    #[serde(default)]
    pub data: Vec<HourlyPoint>,
}

/// One hourly forecast point
#[derive(Debug, Deserialize)]
pub struct HourlyPoint {
    /// Unix seconds; some providers send fractional values
    pub time: f64,
    #[serde(rename = "uvIndex")]
    pub uv_index: i32,
}

// ============================================================================
// Decoding
// ============================================================================

/// Decode a forecast response body into hourly samples, sorted by time.
pub fn parse_hourly_response(body: &str) -> Result<Vec<UvSample>, UvError> {
    let response: ForecastResponse = serde_json::from_str(body)?;

    let samples = response
        .hourly
        .data
        .into_iter()
        .map(parse_point)
        .collect::<Result<Vec<_>, _>>()?;

    if samples.is_empty() {
        logging::debug(LogSource::Forecast, None, "No data to add");
    }

    Ok(prepare_samples(samples))
}

/// Convert one hourly point into a one-hour sample
fn parse_point(point: HourlyPoint) -> Result<UvSample, UvError> {
    if !point.time.is_finite() {
        return Err(UvError::Parse(format!("non-finite timestamp {}", point.time)));
    }

    // floor keeps the fractional part non-negative before the epoch
    let whole = point.time.floor();
    let nanos = ((point.time - whole) * 1e9).round() as u32;
    let (secs, nanos) = if nanos >= 1_000_000_000 {
        (whole as i64 + 1, 0)
    } else {
        (whole as i64, nanos)
    };
    let timestamp = DateTime::<Utc>::from_timestamp(secs, nanos)
        .ok_or_else(|| UvError::Parse(format!("timestamp out of range: {}", point.time)))?;

    Ok(UvSample::new(point.uv_index, timestamp))
}

/// Sort samples ascending by timestamp. Samples sharing a timestamp keep
/// their relative order.
pub fn prepare_samples(mut samples: Vec<UvSample>) -> Vec<UvSample> {
    samples.sort_by_key(|s| s.timestamp);
    samples
}

// ============================================================================
// Tests
// ============================================================================
