//! Place and position resolution. Every operation here has a terminal
//! fallback, so none of them can fail.

pub mod gazetteer;
pub mod provider;

use std::sync::Arc;
use std::time::Duration;

use crate::model::{coordinates_in_range, LocationResult};
use crate::normalize::{normalize_geocode, normalize_ip_lookup, reverse_geocode_name};
use crate::provider::within;

pub use provider::{DeviceLocator, DevicePosition, FixedDevice, GeoProvider, HttpGeoProvider, NoDevice};

/// Forward-geocode result cap.
pub const SEARCH_LIMIT: usize = 5;
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

pub struct LocationResolver {
    geo: Arc<dyn GeoProvider>,
    device: Arc<dyn DeviceLocator>,
    timeout: Duration,
}

impl LocationResolver {
    pub fn new(geo: Arc<dyn GeoProvider>, device: Arc<dyn DeviceLocator>, timeout: Duration) -> Self {
        Self { geo, device, timeout }
    }

    /// IP geolocation, then the device position, then the default location.
    pub async fn resolve_current_location(&self) -> LocationResult {
        match within(self.timeout, self.geo.ip_lookup()).await.and_then(|raw| normalize_ip_lookup(&raw)) {
            Ok(location) => {
                log::debug!("location: resolved from ip lookup: {}", location.place_name);
                return location;
            }
            Err(e) => log::debug!("location: ip lookup unavailable ({e})"),
        }

        if let Some(position) = self.device.current_position().await {
            if coordinates_in_range(position.latitude, position.longitude) {
                let place_name = self.reverse_geocode(position.latitude, position.longitude).await;
                let timezone = position.timezone.as_deref().unwrap_or("UTC");
                log::debug!("location: resolved from device position: {}", place_name);
                return LocationResult::new(position.latitude, position.longitude, timezone, &place_name);
            }
            log::debug!(
                "location: device position out of range ({}, {})",
                position.latitude,
                position.longitude
            );
        }

        log::warn!("location: no provider answered, using default location");
        gazetteer::default_location()
    }

    /// Geocoder hits when it answers (possibly none), the gazetteer otherwise.
    pub async fn search_places(&self, query: &str) -> Vec<LocationResult> {
        let query = query.trim();
        match within(self.timeout, self.geo.geocode(query, SEARCH_LIMIT))
            .await
            .and_then(|raw| normalize_geocode(&raw, SEARCH_LIMIT))
        {
            Ok(hits) => hits,
            Err(e) => {
                log::debug!("location: geocoder unavailable for '{}' ({e}), searching gazetteer", query);
                gazetteer::search(query)
            }
        }
    }

    pub async fn resolve_coordinates(&self, place: &str) -> LocationResult {
        match self.search_places(place).await.into_iter().next() {
            Some(location) => location,
            None => gazetteer::lookup(place),
        }
    }

    pub async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> String {
        let query = format!("{latitude},{longitude}");
        match within(self.timeout, self.geo.geocode(&query, 1)).await {
            Ok(raw) => reverse_geocode_name(&raw).unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
            Err(e) => {
                log::debug!("location: reverse geocode failed ({e})");
                UNKNOWN_LOCATION.to_string()
            }
        }
    }
}
