//! Configuration file integration tests
//!
//! Loads TOML files from disk and drives a scheduling pass with the
//! settings and locations they contain.

use std::io::Write;

use chrono::{Duration, TimeZone, Utc};
use tempfile::NamedTempFile;

use uvmon_service::alert::notifier::InMemoryNotificationCenter;
use uvmon_service::config::load_config;
use uvmon_service::{NotificationCategory, UvError, UvSample, schedule_notifications};

const SAMPLE_CONFIG: &str = r#"
[logging]
filter = "uvmon_service=debug"

[notifications]
enabled = true

[notifications.high_level]
enabled = true
threshold = 8

[notifications.daily_overview]
enabled = true
threshold = 3
delivery_hour = 7

[[locations]]
title = "Sydney"
subtitle = "Australia"
latitude = -33.8688
longitude = 151.2093
time_zone = "Australia/Sydney"

[[locations]]
title = "Stockholm"
subtitle = "Sweden"
latitude = 59.3293
longitude = 18.0686
time_zone = "Europe/Stockholm"
"#;

fn write_config(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file should be creatable");
    file.write_all(text.as_bytes()).expect("temp file should be writable");
    file
}

#[test]
fn test_load_config_from_disk() {
    let file = write_config(SAMPLE_CONFIG);
    let config = load_config(file.path()).expect("sample config should load");

    assert_eq!(config.logging.filter, "uvmon_service=debug");
    assert!(config.notifications.enabled);
    assert_eq!(config.notifications.high_level.threshold, 8);

    let saved = config.saved_locations();
    assert_eq!(saved.len(), 2);
    assert!(saved.find("Stockholm+Sweden").is_some());
}

#[test]
fn test_invalid_config_on_disk_is_rejected() {
    let file = write_config("[notifications.daily_overview]\ndelivery_hour = 30\n");
    let err = load_config(file.path()).expect_err("hour 30 must be rejected");
    assert!(matches!(err, UvError::InvalidSetting { .. }));
}

#[test]
fn test_malformed_toml_is_config_error() {
    let file = write_config("[notifications\nenabled = ");
    assert!(matches!(load_config(file.path()), Err(UvError::Toml(_))));
}

#[test]
fn test_loaded_settings_drive_a_scheduling_pass() {
    let file = write_config(SAMPLE_CONFIG);
    let config = load_config(file.path()).expect("sample config should load");
    let sydney = config
        .saved_locations()
        .find("Sydney+Australia")
        .cloned()
        .expect("Sydney should be saved");

    // Sydney in January is UTC+11: 23:00 UTC on the 14th is 10:00 on the 15th.
    let start = Utc.with_ymd_and_hms(2024, 1, 14, 23, 0, 0).unwrap();
    let samples: Vec<UvSample> = [4, 9, 11, 11, 9, 5]
        .iter()
        .enumerate()
        .map(|(i, &index)| UvSample::new(index, start + Duration::hours(i as i64)))
        .collect();

    let mut center = InMemoryNotificationCenter::authorized();
    let now = Utc.with_ymd_and_hms(2024, 1, 14, 12, 0, 0).unwrap();
    let planned = schedule_notifications(
        &mut center,
        &samples,
        &config.notifications,
        Some(&sydney),
        now,
    );

    let high: Vec<_> = planned
        .iter()
        .filter(|r| r.category == NotificationCategory::HighLevel)
        .collect();
    // 9, 11 and 9 again are separate runs at or above 8.
    assert_eq!(high.len(), 3);
    assert_eq!(high[0].body, "Levels of index 9 until 12:00.");
    assert_eq!(high[1].body, "Levels of index 11 until 14:00.");

    let daily: Vec<_> = planned
        .iter()
        .filter(|r| r.category == NotificationCategory::DailyOverview)
        .collect();
    assert_eq!(daily.len(), 1);
    // 07:00 local on the 15th is 20:00 UTC on the 14th.
    assert_eq!(daily[0].trigger_time, Utc.with_ymd_and_hms(2024, 1, 14, 20, 0, 0).unwrap());
    assert_eq!(
        daily[0].body,
        "Extreme risk of harm with peak levels of 11 between 12:00–14:00. \
         Otherwise high levels between 10:00–16:00."
    );
    assert_eq!(center.pending().len(), 4);
}
