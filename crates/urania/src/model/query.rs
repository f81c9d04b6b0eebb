use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Birth facts as the caller typed them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthQuery {
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM, seconds optional
    pub time: String,
    pub place: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub timezone: Option<String>,
}

impl BirthQuery {
    pub fn new(date: impl Into<String>, time: impl Into<String>, place: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
            place: place.into(),
            name: None,
            latitude: None,
            longitude: None,
            timezone: None,
        }
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64, timezone: Option<&str>) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self.timezone = timezone.map(str::to_string);
        self
    }

    pub fn validate(&self) -> Result<ValidBirth, InputError> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| InputError::InvalidDate(self.date.clone()))?;
        let time = NaiveTime::parse_from_str(self.time.trim(), "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(self.time.trim(), "%H:%M:%S"))
            .map_err(|_| InputError::InvalidTime(self.time.clone()))?;

        let place = self.place.trim();
        if place.is_empty() {
            return Err(InputError::EmptyPlace);
        }

        // Partial coordinates are ignored and the place gets geocoded instead.
        let location = match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => {
                if !coordinates_in_range(lat, lon) {
                    return Err(InputError::CoordinatesOutOfRange { lat, lon });
                }
                Some(LocationResult {
                    latitude: lat,
                    longitude: lon,
                    timezone: self
                        .timezone
                        .as_deref()
                        .map(str::trim)
                        .filter(|tz| !tz.is_empty())
                        .unwrap_or("UTC")
                        .to_string(),
                    place_name: place.to_string(),
                })
            }
            _ => None,
        };

        Ok(ValidBirth {
            local: NaiveDateTime::new(date, time),
            place: place.to_string(),
            name: self
                .name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .unwrap_or("User")
                .to_string(),
            location,
        })
    }
}

/// A `BirthQuery` that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidBirth {
    /// Wall-clock birth time at the birth place.
    pub local: NaiveDateTime,
    pub place: String,
    pub name: String,
    /// Present when the caller supplied coordinates.
    pub location: Option<LocationResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationResult {
    pub latitude: f64,
    pub longitude: f64,
    /// IANA identifier, e.g. "Asia/Kolkata"
    pub timezone: String,
    pub place_name: String,
}

impl LocationResult {
    pub fn new(latitude: f64, longitude: f64, timezone: &str, place_name: &str) -> Self {
        Self {
            latitude,
            longitude,
            timezone: timezone.to_string(),
            place_name: place_name.to_string(),
        }
    }

    pub fn is_in_range(&self) -> bool {
        coordinates_in_range(self.latitude, self.longitude)
    }
}

pub fn coordinates_in_range(lat: f64, lon: f64) -> bool {
    lat.is_finite() && lon.is_finite() && (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_valid_query() {
        let birth = BirthQuery::new("1990-04-12", "06:30", " Mumbai ").validate().unwrap();
        assert_eq!(birth.place, "Mumbai");
        assert_eq!(birth.name, "User");
        assert_eq!(birth.local.hour(), 6);
        assert!(birth.location.is_none());
    }

    #[test]
    fn test_seconds_are_accepted() {
        let birth = BirthQuery::new("1990-04-12", "06:30:15", "Pune").validate().unwrap();
        assert_eq!(birth.local.second(), 15);
    }

    #[test]
    fn test_invalid_fields() {
        assert_eq!(
            BirthQuery::new("1990-02-30", "06:30", "Pune").validate(),
            Err(InputError::InvalidDate("1990-02-30".to_string()))
        );
        assert_eq!(
            BirthQuery::new("1990-02-10", "25:00", "Pune").validate(),
            Err(InputError::InvalidTime("25:00".to_string()))
        );
        assert_eq!(
            BirthQuery::new("1990-02-10", "05:00", "   ").validate(),
            Err(InputError::EmptyPlace)
        );
    }

    #[test]
    fn test_supplied_coordinates() {
        let birth = BirthQuery::new("1990-02-10", "05:00", "Home")
            .with_coordinates(51.5, -0.12, Some("Europe/London"))
            .validate()
            .unwrap();
        let location = birth.location.unwrap();
        assert_eq!(location.timezone, "Europe/London");
        assert_eq!(location.place_name, "Home");

        let no_tz = BirthQuery::new("1990-02-10", "05:00", "Home")
            .with_coordinates(10.0, 10.0, None)
            .validate()
            .unwrap();
        assert_eq!(no_tz.location.unwrap().timezone, "UTC");
    }

    #[test]
    fn test_out_of_range_coordinates() {
        let result = BirthQuery::new("1990-02-10", "05:00", "Nowhere")
            .with_coordinates(91.0, 0.0, None)
            .validate();
        assert!(matches!(result, Err(InputError::CoordinatesOutOfRange { .. })));
    }
}
