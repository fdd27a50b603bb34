//! Grouping helpers over chronologically ordered UV samples.
//!
//! None of these functions sort their input. Samples are expected in
//! ascending timestamp order, which `ingest::forecast::prepare_samples`
//! guarantees for fresh forecasts.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::logging::{self, LogSource};
use crate::model::{UvInterval, UvSample, one_hour};

// ---------------------------------------------------------------------------
// Index runs
// ---------------------------------------------------------------------------

/// Collapses consecutive samples with equal index into intervals.
///
/// Only the index is compared. Two equal samples on either side of a data
/// gap are merged into one interval that spans the gap.
///
/// A single-sample run keeps that sample's own duration. A longer run ends
/// one hour after its last sample starts, whatever the sample durations.
pub fn group_by_index(samples: &[UvSample]) -> Vec<UvInterval> {
    samples
        .chunk_by(|a, b| a.index == b.index)
        .filter_map(|run| {
            let first = run.first()?;
            let last = run.last()?;
            if spans_gap(run) {
                logging::debug(
                    LogSource::Grouping,
                    Some(&first.timestamp.to_rfc3339()),
                    &format!("Index {} run spans a gap in the forecast", first.index),
                );
            }
            let end = if run.len() == 1 {
                first.end_timestamp()
            } else {
                last.timestamp + one_hour()
            };
            Some(UvInterval {
                index: first.index,
                start: first.timestamp,
                end,
            })
        })
        .collect()
}

/// Whether some sample in `run` starts after its predecessor has ended.
fn spans_gap(run: &[UvSample]) -> bool {
    run.windows(2).any(|pair| pair[1].timestamp > pair[0].end_timestamp())
}

/// Re-expands intervals into one hourly sample per covered hour.
pub fn expand_intervals(intervals: &[UvInterval]) -> Vec<UvSample> {
    let mut samples = Vec::new();
    for interval in intervals {
        let mut cursor = interval.start;
        while cursor < interval.end {
            samples.push(UvSample::new(interval.index, cursor));
            cursor += one_hour();
        }
    }
    samples
}

/// Highest-index interval. Ties resolve to the earliest one.
pub fn peak_interval(intervals: &[UvInterval]) -> Option<&UvInterval> {
    intervals
        .iter()
        .reduce(|best, next| if next.index > best.index { next } else { best })
}

// ---------------------------------------------------------------------------
// Calendar days
// ---------------------------------------------------------------------------

/// Calendar date of `instant` as seen in `tz`.
pub fn local_date<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// Splits samples into runs that share a calendar day in `tz`.
///
/// Like `group_by_index`, only adjacent samples are compared, so unsorted
/// input can yield several chunks for the same day.
pub fn chunk_by_day<'a, Tz: TimeZone>(samples: &'a [UvSample], tz: &Tz) -> Vec<&'a [UvSample]> {
    samples
        .chunk_by(|a, b| local_date(a.timestamp, tz) == local_date(b.timestamp, tz))
        .collect()
}

/// Samples whose start falls on `date` in `tz`, in input order.
pub fn samples_on_day<Tz: TimeZone>(
    samples: &[UvSample],
    date: NaiveDate,
    tz: &Tz,
) -> Vec<UvSample> {
    samples
        .iter()
        .filter(|s| local_date(s.timestamp, tz) == date)
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Timeline lookups
// ---------------------------------------------------------------------------

/// The sample valid at `instant`, if the forecast covers it.
pub fn sample_at(samples: &[UvSample], instant: DateTime<Utc>) -> Option<&UvSample> {
    samples.iter().find(|s| s.contains(instant))
}

/// Intervals from the first one that has not ended at `now` onward.
pub fn current_and_upcoming(intervals: &[UvInterval], now: DateTime<Utc>) -> &[UvInterval] {
    let from = intervals
        .iter()
        .position(|i| i.is_current_or_upcoming(now))
        .unwrap_or(intervals.len());
    &intervals[from..]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
