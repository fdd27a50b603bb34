//! Saved locations for the UV monitoring service.
//!
//! A location carries the IANA time zone every calendar computation for it
//! runs in: day chunking, the daily delivery hour and the wall-clock times
//! printed in notification bodies.

use std::fmt;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::model::UvError;

// ---------------------------------------------------------------------------
// Coordinates
// ---------------------------------------------------------------------------

/// WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Rejects positions outside the WGS84 ranges.
    pub fn validate(&self) -> Result<(), UvError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(UvError::InvalidSetting {
                field: "latitude",
                value: self.latitude.to_string(),
                max: "90".to_string(),
            });
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(UvError::InvalidSetting {
                field: "longitude",
                value: self.longitude.to_string(),
                max: "180".to_string(),
            });
        }
        Ok(())
    }
}

/// `"lat,lon"`, the form forecast APIs take in their request path.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Place name, e.g. "Stockholm".
    pub title: String,
    /// Region or country shown under the title.
    pub subtitle: String,
    #[serde(flatten)]
    pub coordinates: Coordinate,
    pub time_zone: Tz,
}

impl Location {
    /// Builds a location from an IANA zone name such as `"Europe/Stockholm"`.
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        coordinates: Coordinate,
        time_zone: &str,
    ) -> Result<Self, UvError> {
        let time_zone: Tz = time_zone
            .parse()
            .map_err(|_| UvError::UnknownTimeZone(time_zone.to_string()))?;
        coordinates.validate()?;

        Ok(Self {
            title: title.into(),
            subtitle: subtitle.into(),
            coordinates,
            time_zone,
        })
    }

    pub fn id(&self) -> String {
        format!("{}+{}", self.title, self.subtitle)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.title, self.subtitle)
    }
}

// ---------------------------------------------------------------------------
// Saved location list
// ---------------------------------------------------------------------------

/// The user's saved locations in the order they were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavedLocations {
    locations: Vec<Location>,
}

impl SavedLocations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `location` unless an equal one is already saved.
    /// Returns `true` if the list changed.
    pub fn add(&mut self, location: Location) -> bool {
        if self.locations.contains(&location) {
            return false;
        }
        self.locations.push(location);
        true
    }

    /// Removes `location` if present. Returns `true` if the list changed.
    pub fn remove(&mut self, location: &Location) -> bool {
        match self.locations.iter().position(|l| l == location) {
            Some(index) => {
                self.locations.remove(index);
                true
            }
            None => false,
        }
    }

    /// Looks up a location by `Location::id`.
    pub fn find(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl FromIterator<Location> for SavedLocations {
    fn from_iter<I: IntoIterator<Item = Location>>(iter: I) -> Self {
        let mut saved = SavedLocations::new();
        for location in iter {
            saved.add(location);
        }
        saved
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
