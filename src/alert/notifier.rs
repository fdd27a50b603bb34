//! Notification requests and the delivery collaborator.
//!
//! The scheduler builds `NotificationRequest`s; something implementing
//! `NotificationCenter` hands them to the platform. Submission failures
//! are logged per request and never abort the remaining submissions.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::logging::{self, LogSource};
use crate::model::UvError;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// The two kinds of notification the service schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationCategory {
    /// Fired when an interval at or above the high-level threshold begins.
    HighLevel,
    /// Once per day at the user's delivery hour.
    DailyOverview,
}

impl NotificationCategory {
    /// Stable category identifier registered with the platform.
    pub fn identifier(self) -> &'static str {
        match self {
            NotificationCategory::HighLevel => "uvmon.notification.highLevel",
            NotificationCategory::DailyOverview => "uvmon.notification.dailyOverview",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            NotificationCategory::HighLevel => "High levels",
            NotificationCategory::DailyOverview => "Upcoming UV levels",
        }
    }
}

impl fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationCategory::HighLevel => write!(f, "highLevel"),
            NotificationCategory::DailyOverview => write!(f, "dailyOverview"),
        }
    }
}

/// One notification ready for delivery. The body is already rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub category: NotificationCategory,
    pub trigger_time: DateTime<Utc>,
    pub body: String,
}

impl NotificationRequest {
    pub fn new(category: NotificationCategory, trigger_time: DateTime<Utc>, body: String) -> Self {
        Self {
            category,
            trigger_time,
            body,
        }
    }

    /// `"{category id}+{trigger unix seconds}"`, unique per category and slot.
    pub fn identifier(&self) -> String {
        format!("{}+{}", self.category.identifier(), self.trigger_time.timestamp())
    }

    pub fn title(&self) -> &'static str {
        self.category.title()
    }
}

// ---------------------------------------------------------------------------
// Delivery collaborator
// ---------------------------------------------------------------------------

/// The platform notification center as seen by the scheduler.
pub trait NotificationCenter {
    /// Whether the user has granted permission to post notifications.
    fn is_authorized(&self) -> bool;

    /// Drops every pending request of every category.
    fn remove_all_pending(&mut self);

    /// Clears already-delivered notifications from the user's view.
    fn remove_all_delivered(&mut self);

    /// Queues one request for delivery at its trigger time.
    fn add(&mut self, request: &NotificationRequest) -> Result<(), UvError>;
}

/// Submits `requests` one by one and returns how many were accepted.
///
/// Nothing is submitted when the center is not authorized. A rejected
/// request is logged and the next one is still attempted.
pub fn submit_all<C: NotificationCenter + ?Sized>(
    center: &mut C,
    requests: &[NotificationRequest],
) -> usize {
    if !center.is_authorized() {
        logging::debug(
            LogSource::Notifier,
            None,
            &format!(
                "Scheduling of {} request(s) not possible due to authorization",
                requests.len()
            ),
        );
        return 0;
    }

    let mut accepted = 0;
    for request in requests {
        let identifier = request.identifier();
        match center.add(request) {
            Ok(()) => {
                accepted += 1;
                logging::debug(
                    LogSource::Notifier,
                    Some(&identifier),
                    &format!(
                        "Scheduled {} for {}: {}",
                        request.category, request.trigger_time, request.body
                    ),
                );
            }
            Err(e) => logging::log_submission_failure(&identifier, &e),
        }
    }
    accepted
}

/// Removes pending and delivered notifications, e.g. after the user
/// revokes permission.
pub fn disable_notifications<C: NotificationCenter + ?Sized>(center: &mut C) {
    logging::info(LogSource::Notifier, None, "Removing pending and delivered notifications");
    center.remove_all_pending();
    center.remove_all_delivered();
}

// ---------------------------------------------------------------------------
// In-memory center
// ---------------------------------------------------------------------------

/// A `NotificationCenter` that keeps everything in memory.
///
/// Requests whose identifier is already pending replace the older entry,
/// matching how platform centers treat duplicate identifiers.
#[derive(Debug, Default)]
pub struct InMemoryNotificationCenter {
    pub authorized: bool,
    pending: Vec<NotificationRequest>,
    delivered: Vec<NotificationRequest>,
    /// Identifiers `add` should refuse, for exercising failure paths.
    pub reject: Vec<String>,
}

impl InMemoryNotificationCenter {
    pub fn authorized() -> Self {
        Self {
            authorized: true,
            ..Self::default()
        }
    }

    pub fn pending(&self) -> &[NotificationRequest] {
        &self.pending
    }

    pub fn delivered(&self) -> &[NotificationRequest] {
        &self.delivered
    }

    /// Moves every pending request due at or before `now` to delivered.
    pub fn deliver_due(&mut self, now: DateTime<Utc>) -> usize {
        let (due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|r| r.trigger_time <= now);
        self.pending = waiting;
        let count = due.len();
        self.delivered.extend(due);
        count
    }
}

impl NotificationCenter for InMemoryNotificationCenter {
    fn is_authorized(&self) -> bool {
        self.authorized
    }

    fn remove_all_pending(&mut self) {
        self.pending.clear();
    }

    fn remove_all_delivered(&mut self) {
        self.delivered.clear();
    }

    fn add(&mut self, request: &NotificationRequest) -> Result<(), UvError> {
        if !self.authorized {
            return Err(UvError::NotAuthorized);
        }
        let identifier = request.identifier();
        if self.reject.contains(&identifier) {
            return Err(UvError::NotificationRejected(identifier));
        }
        self.pending.retain(|r| r.identifier() != identifier);
        self.pending.push(request.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
