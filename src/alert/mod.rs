//! Alerting: severity classification, daily summaries and notification
//! scheduling.
//!
//! Submodules:
//! - `thresholds` — index → category table and threshold checks.
//! - `summary` — natural-language description of one day.
//! - `notifier` — notification requests and the delivery collaborator.
//! - `scheduler` — clear-then-reschedule passes over a forecast.
//! - `stalenesses` — refresh cooldown and forecast coverage.

pub mod notifier;
pub mod scheduler;
pub mod stalenesses;
pub mod summary;
pub mod thresholds;
