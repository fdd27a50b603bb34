//! Natural-language daily UV summaries.
//!
//! Used as the body of the daily overview notification. All strings leave
//! this module fully rendered; the delivery layer does no further
//! formatting.

use std::fmt::Display;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::alert::thresholds::{UvCategory, classify};
use crate::analysis::groupings::{group_by_index, local_date, peak_interval, samples_on_day};
use crate::logging::{self, LogSource};
use crate::model::{UvInterval, UvSample};

// ---------------------------------------------------------------------------
// Time formatting
// ---------------------------------------------------------------------------

/// Wall-clock time of `instant` in `tz`, e.g. `"14:00"`.
pub fn format_time<Tz>(instant: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    instant.with_timezone(tz).format("%H:%M").to_string()
}

/// A time window in `tz`, e.g. `"11:00–14:00"`.
pub fn format_range<Tz>(start: DateTime<Utc>, end: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("{}–{}", format_time(start, tz), format_time(end, tz))
}

// ---------------------------------------------------------------------------
// Daily summary
// ---------------------------------------------------------------------------

/// Describes the UV outlook for `date` as seen in `tz`.
///
/// Returns `None` when no sample starts on that day. The wording depends on
/// the category of the day's peak interval and on whether more than one
/// elevated (moderate or worse) interval occurs.
pub fn describe_day<Tz>(samples: &[UvSample], date: NaiveDate, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let day = date.to_string();

    let today = samples_on_day(samples, date, tz);
    if today.is_empty() {
        logging::debug(LogSource::Summary, Some(&day), "No data available, cancelling description");
        return None;
    }

    let grouped = group_by_index(&today);

    let Some(peak) = peak_interval(&grouped) else {
        logging::error(
            LogSource::Summary,
            Some(&day),
            "No max value available, cancelling description",
        );
        return None;
    };

    let elevated: Vec<&UvInterval> = grouped
        .iter()
        .filter(|interval| classify(interval.index).is_elevated())
        .collect();

    let peak_window = format_range(peak.start, peak.end, tz);

    let (lead, otherwise) = match classify(peak.index) {
        UvCategory::None | UvCategory::Low => {
            return Some(format!(
                "Low levels all day. Peak levels of {} between {}.",
                peak.index, peak_window
            ));
        }
        UvCategory::Moderate => (
            format!(
                "Apply sunscreen if you're outside. Peak levels of {} between {}.",
                peak.index, peak_window
            ),
            "moderate",
        ),
        UvCategory::High => (
            format!(
                "High levels of UV radiation, apply sunscreen if you're outside. \
                 Peak levels of {} between {}.",
                peak.index, peak_window
            ),
            "moderate",
        ),
        UvCategory::VeryHigh | UvCategory::Extreme => (
            format!(
                "Extreme risk of harm with peak levels of {} between {}.",
                peak.index, peak_window
            ),
            "high",
        ),
    };

    let (Some(first), Some(last)) = (elevated.first(), elevated.last()) else {
        logging::error(
            LogSource::Summary,
            Some(&day),
            "No first & last elevated interval available, cancelling description",
        );
        return None;
    };

    if elevated.len() == 1 {
        Some(lead)
    } else {
        Some(format!(
            "{} Otherwise {} levels between {}.",
            lead,
            otherwise,
            format_range(first.start, last.end, tz)
        ))
    }
}

/// `describe_day` for the calendar day containing `now`.
pub fn describe_today<Tz>(samples: &[UvSample], now: DateTime<Utc>, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    describe_day(samples, local_date(now, tz), tz)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
