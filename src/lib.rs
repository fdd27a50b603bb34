//! UV index monitoring service.
//!
//! Turns an hourly UV forecast into display intervals, daily summaries and
//! threshold notifications for a user's location. Platform services
//! (location lookup, forecast HTTP, OS notification delivery) stay outside
//! the crate; notification delivery is reached through the
//! `alert::notifier::NotificationCenter` trait.

pub mod alert;
pub mod analysis;
pub mod config;
pub mod ingest;
pub mod locations;
pub mod logging;
pub mod model;

pub use alert::notifier::{NotificationCategory, NotificationCenter, NotificationRequest};
pub use alert::scheduler::{plan_notifications, schedule_notifications};
pub use alert::summary::describe_day;
pub use alert::thresholds::{UvCategory, classify};
pub use analysis::groupings::group_by_index;
pub use model::{UvError, UvInterval, UvSample};
