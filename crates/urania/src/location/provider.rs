use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use urania_config::GeoProviderSettings;

use crate::error::{ProviderResult, Unavailable};
use crate::provider::http_client;

/// IP geolocation and forward/reverse geocoding.
#[async_trait]
pub trait GeoProvider: Send + Sync {
    /// Locate the caller from their public IP.
    async fn ip_lookup(&self) -> ProviderResult<Value>;

    /// Free-text or "lat,lon" query, at most `limit` results.
    async fn geocode(&self, query: &str, limit: usize) -> ProviderResult<Value>;
}

#[async_trait]
impl GeoProvider for Arc<dyn GeoProvider> {
    async fn ip_lookup(&self) -> ProviderResult<Value> {
        (**self).ip_lookup().await
    }

    async fn geocode(&self, query: &str, limit: usize) -> ProviderResult<Value> {
        (**self).geocode(query, limit).await
    }
}

/// Coordinates reported by the host device (GPS, OS location service).
#[derive(Debug, Clone, PartialEq)]
pub struct DevicePosition {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: Option<String>,
}

#[async_trait]
pub trait DeviceLocator: Send + Sync {
    async fn current_position(&self) -> Option<DevicePosition>;
}

/// Hosts without a location service.
pub struct NoDevice;

#[async_trait]
impl DeviceLocator for NoDevice {
    async fn current_position(&self) -> Option<DevicePosition> {
        None
    }
}

/// A position fixed at startup, e.g. from command-line flags.
pub struct FixedDevice(pub DevicePosition);

#[async_trait]
impl DeviceLocator for FixedDevice {
    async fn current_position(&self) -> Option<DevicePosition> {
        Some(self.0.clone())
    }
}

pub struct HttpGeoProvider {
    client: reqwest::Client,
    settings: GeoProviderSettings,
}

impl HttpGeoProvider {
    pub fn new(settings: GeoProviderSettings, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            settings,
        }
    }

    async fn get_json(&self, request: reqwest::RequestBuilder) -> ProviderResult<Value> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Unavailable::Status(status.as_u16()));
        }
        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl GeoProvider for HttpGeoProvider {
    async fn ip_lookup(&self) -> ProviderResult<Value> {
        let Some(key) = self.settings.ip_api_key.as_deref() else {
            return Err(Unavailable::NotConfigured("ip geolocation"));
        };
        log::debug!("geo provider: ip lookup");
        self.get_json(self.client.get(&self.settings.ip_endpoint).query(&[("apiKey", key)]))
            .await
    }

    async fn geocode(&self, query: &str, limit: usize) -> ProviderResult<Value> {
        let Some(key) = self.settings.geocoder_api_key.as_deref() else {
            return Err(Unavailable::NotConfigured("geocoding"));
        };
        log::debug!("geo provider: geocode '{}' (limit {})", query, limit);
        let limit = limit.to_string();
        self.get_json(
            self.client
                .get(&self.settings.geocoder_endpoint)
                .query(&[("q", query), ("key", key), ("limit", limit.as_str())]),
        )
        .await
    }
}
