//! Forecast freshness checks.
//!
//! Fetching is throttled: a refresh within a short cooldown of the previous
//! one is skipped unless the caller forces it. Separately, a cached forecast
//! that no longer reaches `now` is useless for scheduling and should be
//! replaced regardless of the cooldown.
//!
//! # Clock injection
//! All functions accept a `now: DateTime<Utc>` parameter rather than calling
//! `Utc::now()` internally. This keeps them deterministic in tests without
//! mocking or time manipulation.

use chrono::{DateTime, Utc};

use crate::model::UvSample;

/// Minimum minutes between two forecast fetches for the same location.
pub const REFRESH_COOLDOWN_MINUTES: i64 = 20;

// ---------------------------------------------------------------------------
// Refresh cooldown
// ---------------------------------------------------------------------------

/// Returns `true` if a new fetch is due.
///
/// A fetch is due when there has been no update yet, or when strictly more
/// than `cooldown_minutes` have passed since the last one:
///   elapsed > cooldown   →  due
///   elapsed == cooldown  →  not due
pub fn needs_refresh_at(
    last_update: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    cooldown_minutes: i64,
) -> bool {
    match last_update {
        None => true,
        Some(last) => (now - last).num_seconds() > cooldown_minutes * 60,
    }
}

/// Convenience wrapper using the real clock and the default cooldown.
/// Use `needs_refresh_at` in tests to keep them deterministic.
pub fn needs_refresh(last_update: Option<DateTime<Utc>>) -> bool {
    needs_refresh_at(last_update, Utc::now(), REFRESH_COOLDOWN_MINUTES)
}

// ---------------------------------------------------------------------------
// Coverage
// ---------------------------------------------------------------------------

/// Returns `true` if some sample is still valid after `now`.
pub fn forecast_covers(samples: &[UvSample], now: DateTime<Utc>) -> bool {
    samples.iter().any(|s| s.end_timestamp() > now)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
