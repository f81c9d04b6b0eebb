//! Outbound provider seams. Each trait has an HTTP implementation and is
//! faked in tests; implementations return raw JSON and never panic.

pub mod astro;
pub mod guidance;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::future::Future;
use std::time::Duration;

use crate::error::{ProviderResult, Unavailable};

pub use astro::HttpAstroProvider;
pub use guidance::HttpGuidanceProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AstroEndpoint {
    LagnaChart,
    NavamsaChart,
    PlanetDetails,
    SadeSati,
    Manglik,
    Kalsarpa,
}

impl AstroEndpoint {
    pub fn path(self) -> &'static str {
        match self {
            AstroEndpoint::LagnaChart => "horoscope-chart/chalit",
            AstroEndpoint::NavamsaChart => "horoscope-chart/D9",
            AstroEndpoint::PlanetDetails => "planet-details",
            AstroEndpoint::SadeSati => "sade-sati-details",
            AstroEndpoint::Manglik => "manglik-details",
            AstroEndpoint::Kalsarpa => "kalsarpa-details",
        }
    }
}

/// Birth parameters shared by every chart and analysis endpoint.
/// Credentials are added by the HTTP provider, not carried here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AstroRequest {
    pub full_name: String,
    pub day: u32,
    pub month: u32,
    pub year: i32,
    pub hour: u32,
    pub min: u32,
    pub sec: u32,
    pub gender: String,
    pub place: String,
    pub lat: f64,
    pub lon: f64,
    /// UTC offset in hours at the birth instant.
    pub tzone: f64,
    pub language: String,
}

#[async_trait]
pub trait AstroProvider: Send + Sync {
    async fn fetch(&self, endpoint: AstroEndpoint, request: &AstroRequest) -> ProviderResult<Value>;
}

#[async_trait]
impl AstroProvider for Arc<dyn AstroProvider> {
    async fn fetch(&self, endpoint: AstroEndpoint, request: &AstroRequest) -> ProviderResult<Value> {
        (**self).fetch(endpoint, request).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuidanceRequest {
    pub system: String,
    pub message: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[async_trait]
pub trait GuidanceProvider: Send + Sync {
    async fn complete(&self, request: GuidanceRequest) -> ProviderResult<String>;
}

#[async_trait]
impl GuidanceProvider for Arc<dyn GuidanceProvider> {
    async fn complete(&self, request: GuidanceRequest) -> ProviderResult<String> {
        (**self).complete(request).await
    }
}

/// reqwest client with the per-call timeout baked in.
pub(crate) fn http_client(timeout: Duration) -> reqwest::Client {
    match reqwest::Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => {
            // The clients layer still enforces the timeout around every call.
            log::warn!("provider: could not build HTTP client ({e}), using defaults");
            reqwest::Client::new()
        }
    }
}

/// Cap one provider call at `limit`; expiry is reported like any transport failure.
pub(crate) async fn within<T, F>(limit: Duration, call: F) -> ProviderResult<T>
where
    F: Future<Output = ProviderResult<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(Unavailable::Timeout(limit)),
    }
}
