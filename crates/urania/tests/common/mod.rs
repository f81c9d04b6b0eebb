#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use urania::{
    AstroEndpoint, AstroProvider, AstroRequest, Aggregator, GeoProvider, GuidanceProvider,
    GuidanceRequest, NoDevice, Providers, ProviderResult, RandomSource, Unavailable,
};
use urania_config::ProviderSettings;

/// Answers every call with the same failure.
pub struct Down(pub Unavailable);

#[async_trait]
impl AstroProvider for Down {
    async fn fetch(&self, _endpoint: AstroEndpoint, _request: &AstroRequest) -> ProviderResult<Value> {
        Err(self.0.clone())
    }
}

#[async_trait]
impl GuidanceProvider for Down {
    async fn complete(&self, _request: GuidanceRequest) -> ProviderResult<String> {
        Err(self.0.clone())
    }
}

#[derive(Default)]
pub struct CountingGeo {
    pub calls: AtomicUsize,
}

impl CountingGeo {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeoProvider for CountingGeo {
    async fn ip_lookup(&self) -> ProviderResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(Unavailable::Status(503))
    }

    async fn geocode(&self, _query: &str, _limit: usize) -> ProviderResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(Unavailable::Status(503))
    }
}

/// Sleeps past any sane timeout before answering.
pub struct Stalled(pub Duration);

#[async_trait]
impl AstroProvider for Stalled {
    async fn fetch(&self, _endpoint: AstroEndpoint, _request: &AstroRequest) -> ProviderResult<Value> {
        tokio::time::sleep(self.0).await;
        Ok(json!({"is_manglik": "true"}))
    }
}

/// Canned vedicastroapi-style payloads for every endpoint.
pub struct Healthy;

pub fn planet_details() -> Value {
    json!({"status": 200, "response": {
        "0": {"name": "Su", "full_name": "Sun", "zodiac": "Aries", "local_degree": 22.1, "house": 1, "retro": "false"},
        "1": {"name": "Mo", "full_name": "Moon", "zodiac": "Cancer", "local_degree": 3.75, "house": 4, "retro": "false"},
        "2": {"name": "Ma", "full_name": "Mars", "zodiac": "Capricorn", "global_degree": 281.5, "house": 10, "retro": "false"},
        "3": {"name": "Me", "full_name": "Mercury", "zodiac": "Pisces", "local_degree": 28.0, "house": 12, "retro": "true"},
        "4": {"name": "Ju", "full_name": "Jupiter", "zodiac": "Gemini", "local_degree": 5.5, "house": 3, "retro": "false"},
        "5": {"name": "Ve", "full_name": "Venus", "zodiac": "Aquarius", "local_degree": 14.2, "house": 11, "retro": "false"},
        "6": {"name": "Sa", "full_name": "Saturn", "zodiac": "Capricorn", "local_degree": 29.9, "house": 10, "retro": "false"},
        "7": {"name": "Ra", "full_name": "Rahu", "zodiac": "Capricorn", "local_degree": 12.0, "house": 10, "retro": "true"},
        "8": {"name": "Ke", "full_name": "Ketu", "zodiac": "Cancer", "local_degree": 12.0, "house": 4, "retro": "true"},
        "9": {"name": "As", "full_name": "Ascendant", "zodiac": "Aries", "local_degree": 1.0, "house": 1}
    }})
}

#[async_trait]
impl AstroProvider for Healthy {
    async fn fetch(&self, endpoint: AstroEndpoint, _request: &AstroRequest) -> ProviderResult<Value> {
        Ok(match endpoint {
            AstroEndpoint::LagnaChart => json!({"status": 200, "response": {
                "chart_data": {"1": [0], "3": [4], "4": [1, 8], "10": [2, 6, 7], "11": [5], "12": [3]}
            }}),
            AstroEndpoint::NavamsaChart => json!({"status": 200, "response": {
                "chart_data": {"2": ["0", "1"], "6": ["7"], "12": ["8"]}
            }}),
            AstroEndpoint::PlanetDetails => planet_details(),
            AstroEndpoint::SadeSati => json!({"status": 200, "response": {
                "is_undergoing_sade_sati": "true",
                "sade_sati_phase": "peak",
                "sade_sati_start_date": "2020-01-24",
                "sade_sati_end_date": "2027-06-03",
                "effects": ["Slow career growth"],
                "remedies": ["Recite Shani Chalisa daily"]
            }}),
            AstroEndpoint::Manglik => json!({"status": 200, "response": {"is_manglik": "false"}}),
            AstroEndpoint::Kalsarpa => json!({"status": 200, "response": {
                "has_kalsarpa_yoga": "true", "kalsarpa_type": "Vasuki", "severity": "partial"
            }}),
        })
    }
}

pub struct Echo;

#[async_trait]
impl GuidanceProvider for Echo {
    async fn complete(&self, request: GuidanceRequest) -> ProviderResult<String> {
        Ok(format!("You asked: {}", request.message))
    }
}

pub fn assemble(
    astro: Arc<dyn AstroProvider>,
    guidance: Arc<dyn GuidanceProvider>,
    geo: Arc<dyn GeoProvider>,
) -> Aggregator {
    let providers = Providers {
        astro,
        guidance,
        geo,
        device: Arc::new(NoDevice),
    };
    Aggregator::new(providers, &ProviderSettings::default()).with_randomness(RandomSource::Seeded(42))
}

/// HTTP providers with no credentials: every call is skipped before any network I/O.
pub fn unconfigured() -> Aggregator {
    Aggregator::from_settings(&ProviderSettings::default()).with_randomness(RandomSource::Seeded(42))
}
