//! Notification scheduling.
//!
//! Every pass replaces the whole pending set: the center is cleared first,
//! then the requests planned from the current forecast are submitted. Two
//! passes over the same inputs produce the same requests, so overlapping
//! passes simply leave the last one's requests behind.
//!
//! # Clock injection
//! Functions take `now: DateTime<Utc>` instead of reading the clock so the
//! past-interval cutoff is deterministic in tests.

use std::fmt::Display;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::alert::notifier::{
    NotificationCategory, NotificationCenter, NotificationRequest, submit_all,
};
use crate::alert::summary::{describe_day, format_time};
use crate::alert::thresholds::meets_threshold;
use crate::analysis::groupings::{chunk_by_day, group_by_index, local_date};
use crate::config::{DailyOverviewSettings, NotificationSettings};
use crate::locations::Location;
use crate::logging::{self, LogSource};
use crate::model::UvSample;

// ---------------------------------------------------------------------------
// High-level notifications
// ---------------------------------------------------------------------------

/// One request per index run at or above `threshold` that starts at or
/// after `now`. Runs already in progress are skipped.
pub fn plan_high_level<Tz>(
    samples: &[UvSample],
    threshold: u8,
    tz: &Tz,
    now: DateTime<Utc>,
) -> Vec<NotificationRequest>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    group_by_index(samples)
        .into_iter()
        .filter(|interval| meets_threshold(interval.index, threshold))
        .filter(|interval| {
            // no retroactive notifications
            let upcoming = interval.start >= now;
            if !upcoming {
                logging::debug(
                    LogSource::Scheduler,
                    Some(&interval.start.to_rfc3339()),
                    "Skipping high level interval that started in the past",
                );
            }
            upcoming
        })
        .map(|interval| {
            let body = format!(
                "Levels of index {} until {}.",
                interval.index,
                format_time(interval.end, tz)
            );
            NotificationRequest::new(NotificationCategory::HighLevel, interval.start, body)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Daily overview notifications
// ---------------------------------------------------------------------------

/// Quarter-hour steps searched past a nonexistent local time.
const GAP_SEARCH_STEPS: i64 = 12;

/// `hour:00:00` local time on `date`, as UTC.
///
/// A time inside a spring-forward gap moves to the first wall-clock time
/// after the gap. Ambiguous times resolve to the earlier instant. Returns
/// `None` only when `hour` is not a valid hour of day.
pub fn delivery_time<Tz: TimeZone>(date: NaiveDate, hour: u32, tz: &Tz) -> Option<DateTime<Utc>> {
    let local = date.and_hms_opt(hour, 0, 0)?;
    // zone transitions fall on quarter-hour boundaries
    (0..=GAP_SEARCH_STEPS)
        .map(|step| local + Duration::minutes(15 * step))
        .find_map(|candidate| tz.from_local_datetime(&candidate).earliest())
        .map(|dt| dt.with_timezone(&Utc))
}

/// One overview per calendar day whose peak reaches the configured
/// threshold. Days that cannot produce a trigger time or a description are
/// logged and skipped.
pub fn plan_daily_overview<Tz>(
    samples: &[UvSample],
    settings: &DailyOverviewSettings,
    tz: &Tz,
) -> Vec<NotificationRequest>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut requests = Vec::new();

    for day in chunk_by_day(samples, tz) {
        let Some(first) = day.first() else {
            continue;
        };
        let date = local_date(first.timestamp, tz);
        let context = date.to_string();

        let max_index = day.iter().fold(0_i32, |max, sample| max.max(sample.index));
        if !meets_threshold(max_index, settings.threshold) {
            logging::debug(
                LogSource::Scheduler,
                Some(&context),
                &format!("Peak {} below overview threshold {}", max_index, settings.threshold),
            );
            continue;
        }

        let Some(trigger) = delivery_time(date, settings.delivery_hour, tz) else {
            logging::error(
                LogSource::Scheduler,
                Some(&context),
                "Could not calculate trigger date",
            );
            continue;
        };

        let Some(body) = describe_day(samples, date, tz) else {
            logging::error(LogSource::Scheduler, Some(&context), "Could not process description");
            continue;
        };

        requests.push(NotificationRequest::new(
            NotificationCategory::DailyOverview,
            trigger,
            body,
        ));
    }

    requests
}

// ---------------------------------------------------------------------------
// Whole pass
// ---------------------------------------------------------------------------

/// Every request the current settings ask for, high-level ones first.
pub fn plan_notifications<Tz>(
    samples: &[UvSample],
    settings: &NotificationSettings,
    tz: &Tz,
    now: DateTime<Utc>,
) -> Vec<NotificationRequest>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if !settings.enabled {
        logging::debug(LogSource::Scheduler, None, "Notifications turned off, nothing to plan");
        return Vec::new();
    }

    let mut requests = Vec::new();

    if settings.high_level.enabled {
        requests.extend(plan_high_level(samples, settings.high_level.threshold, tz, now));
    }

    if settings.daily_overview.enabled {
        requests.extend(plan_daily_overview(samples, &settings.daily_overview, tz));
    }

    requests
}

/// Clears every pending request, then plans and submits a fresh set.
///
/// Returns the planned requests. Requests the center refused are logged,
/// not returned as errors; the pass always completes. Without a location
/// there is no time zone to plan in, so only the clearing happens.
pub fn schedule_notifications<C: NotificationCenter + ?Sized>(
    center: &mut C,
    samples: &[UvSample],
    settings: &NotificationSettings,
    location: Option<&Location>,
    now: DateTime<Utc>,
) -> Vec<NotificationRequest> {
    logging::debug(LogSource::Scheduler, None, "Removing pending notifications");
    center.remove_all_pending();

    if !settings.enabled {
        return Vec::new();
    }

    let Some(location) = location else {
        logging::error(
            LogSource::Scheduler,
            None,
            "Unable to schedule notifications due to no location",
        );
        return Vec::new();
    };

    let location_id = location.id();
    logging::debug(
        LogSource::Scheduler,
        Some(&location_id),
        &format!("Planning notifications from {} sample(s)", samples.len()),
    );

    let requests = plan_notifications(samples, settings, &location.time_zone, now);

    for category in [NotificationCategory::HighLevel, NotificationCategory::DailyOverview] {
        let batch: Vec<NotificationRequest> = requests
            .iter()
            .filter(|r| r.category == category)
            .cloned()
            .collect();
        if batch.is_empty() {
            continue;
        }
        let accepted = submit_all(center, &batch);
        let failed = batch.len() - accepted;
        logging::log_schedule_summary(&category.to_string(), batch.len(), accepted, failed);
    }

    requests
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
