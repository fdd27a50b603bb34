//! Service configuration loaded from TOML.
//!
//! Example:
//!
//! ```toml
//! [logging]
//! filter = "info"
//!
//! [notifications]
//! enabled = true
//!
//! [notifications.high_level]
//! enabled = true
//! threshold = 6
//!
//! [notifications.daily_overview]
//! enabled = true
//! threshold = 3
//! delivery_hour = 8
//!
//! [[locations]]
//! title = "Stockholm"
//! subtitle = "Sweden"
//! latitude = 59.3293
//! longitude = 18.0686
//! time_zone = "Europe/Stockholm"
//! ```
//!
//! Every section is optional; missing values take the defaults below.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::locations::{Location, SavedLocations};
use crate::logging::{self, LogSource};
use crate::model::{UvError, MAX_THRESHOLD};

/// Latest hour of day accepted for the daily overview.
pub const MAX_DELIVERY_HOUR: u32 = 23;

// ---------------------------------------------------------------------------
// Notification settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighLevelSettings {
    pub enabled: bool,
    /// Minimum index that triggers a notification, 0..=11.
    pub threshold: u8,
}

impl Default for HighLevelSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            threshold: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyOverviewSettings {
    pub enabled: bool,
    /// Days whose peak stays below this index get no overview, 0..=11.
    pub threshold: u8,
    /// Local hour the overview fires at, 0..=23.
    pub delivery_hour: u32,
}

impl Default for DailyOverviewSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            threshold: 3,
            delivery_hour: 9,
        }
    }
}

/// The user's notification preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    /// Master switch. When off, nothing is scheduled.
    pub enabled: bool,
    pub high_level: HighLevelSettings,
    pub daily_overview: DailyOverviewSettings,
}

impl NotificationSettings {
    /// Flips the master switch. Turning it off also turns off both kinds so
    /// re-enabling starts from a clean slate.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.high_level.enabled = false;
            self.daily_overview.enabled = false;
        }
    }

    pub fn validate(&self) -> Result<(), UvError> {
        check_threshold("high_level.threshold", self.high_level.threshold)?;
        check_threshold("daily_overview.threshold", self.daily_overview.threshold)?;

        if self.daily_overview.delivery_hour > MAX_DELIVERY_HOUR {
            return Err(UvError::InvalidSetting {
                field: "daily_overview.delivery_hour",
                value: self.daily_overview.delivery_hour.to_string(),
                max: MAX_DELIVERY_HOUR.to_string(),
            });
        }
        Ok(())
    }
}

fn check_threshold(field: &'static str, value: u8) -> Result<(), UvError> {
    if value > MAX_THRESHOLD {
        return Err(UvError::InvalidSetting {
            field,
            value: value.to_string(),
            max: MAX_THRESHOLD.to_string(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Logging settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive, e.g. `"info"` or `"uvmon_service=debug"`.
    pub filter: String,
    /// Optional file that receives a copy of every event.
    pub file: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub logging: LoggingSettings,
    pub notifications: NotificationSettings,
    pub locations: Vec<Location>,
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<(), UvError> {
        self.notifications.validate()?;
        for location in &self.locations {
            location.coordinates.validate()?;
        }
        Ok(())
    }

    /// Saved locations with duplicates dropped, first occurrence kept.
    pub fn saved_locations(&self) -> SavedLocations {
        self.locations.iter().cloned().collect()
    }
}

/// Parse and validate a TOML configuration.
pub fn parse_config(text: &str) -> Result<ServiceConfig, UvError> {
    let config: ServiceConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Read, parse and validate the configuration file at `path`.
pub fn load_config(path: impl AsRef<Path>) -> Result<ServiceConfig, UvError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let config = parse_config(&text)?;

    logging::debug(
        LogSource::Config,
        Some(&path.display().to_string()),
        &format!("Loaded configuration with {} location(s)", config.locations.len()),
    );
    Ok(config)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").expect("empty config is valid");
        assert!(!config.notifications.enabled);
        assert!(!config.notifications.high_level.enabled);
        assert_eq!(config.notifications.high_level.threshold, 3);
        assert!(!config.notifications.daily_overview.enabled);
        assert_eq!(config.notifications.daily_overview.threshold, 3);
        assert_eq!(config.notifications.daily_overview.delivery_hour, 9);
        assert_eq!(config.logging.filter, "info");
        assert!(config.locations.is_empty());
    }

    #[test]
    fn test_full_config_parses() {
        let text = r#"
            [logging]
            filter = "uvmon_service=debug"

            [notifications]
            enabled = true

            [notifications.high_level]
            enabled = true
            threshold = 6

            [notifications.daily_overview]
            enabled = true
            threshold = 4
            delivery_hour = 7

            [[locations]]
            title = "Stockholm"
            subtitle = "Sweden"
            latitude = 59.3293
            longitude = 18.0686
            time_zone = "Europe/Stockholm"
        "#;

        let config = parse_config(text).expect("config should parse");
        assert_eq!(config.logging.filter, "uvmon_service=debug");
        assert!(config.notifications.enabled);
        assert_eq!(config.notifications.high_level.threshold, 6);
        assert_eq!(config.notifications.daily_overview.delivery_hour, 7);
        assert_eq!(config.locations.len(), 1);
        assert_eq!(config.locations[0].time_zone, chrono_tz::Europe::Stockholm);
    }

    #[test]
    fn test_threshold_above_eleven_is_rejected() {
        let text = "[notifications.high_level]\nthreshold = 12\n";
        let err = parse_config(text).expect_err("threshold 12 must be rejected");
        assert!(matches!(err, UvError::InvalidSetting { field: "high_level.threshold", .. }));
    }

    #[test]
    fn test_delivery_hour_above_23_is_rejected() {
        let text = "[notifications.daily_overview]\ndelivery_hour = 24\n";
        let err = parse_config(text).expect_err("hour 24 must be rejected");
        assert!(matches!(
            err,
            UvError::InvalidSetting {
                field: "daily_overview.delivery_hour",
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_time_zone_fails_to_parse() {
        let text = r#"
            [[locations]]
            title = "Nowhere"
            subtitle = "Atlantis"
            latitude = 0.0
            longitude = 0.0
            time_zone = "Atlantis/Capital"
        "#;
        assert!(matches!(parse_config(text), Err(UvError::Toml(_))));
    }

    #[test]
    fn test_disabling_master_switch_disables_both_kinds() {
        let mut settings = NotificationSettings::default();
        settings.set_enabled(true);
        settings.high_level.enabled = true;
        settings.daily_overview.enabled = true;

        settings.set_enabled(false);
        assert!(!settings.enabled);
        assert!(!settings.high_level.enabled);
        assert!(!settings.daily_overview.enabled);
    }

    #[test]
    fn test_saved_locations_drop_duplicates() {
        let entry = r#"
            [[locations]]
            title = "Oslo"
            subtitle = "Norway"
            latitude = 59.91
            longitude = 10.75
            time_zone = "Europe/Oslo"
        "#;
        let config = parse_config(&format!("{entry}{entry}")).expect("config should parse");
        assert_eq!(config.locations.len(), 2);
        assert_eq!(config.saved_locations().len(), 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_config("/definitely/not/here/uvmon.toml");
        assert!(matches!(result, Err(UvError::Io(_))));
    }
}
