//! Public entry point: resolve the place, fan out to the providers, keep what
//! normalizes and synthesize the rest. Provider trouble is logged and recorded
//! in each sub-result's `Origin`; only bad caller input is returned as an error.

use std::sync::Arc;
use std::time::Duration;
use urania_config::ProviderSettings;

use crate::clients::{astro_request, AnalysisProviderClient, ChartProviderClient, GuidanceProviderClient};
use crate::error::{InputError, ProviderResult};
use crate::fallback::{
    synthesize_chart, synthesize_kalsarpa, synthesize_manglik, synthesize_positions, synthesize_reply,
    synthesize_sade_sati, RandomSource,
};
use crate::location::{DeviceLocator, GeoProvider, HttpGeoProvider, LocationResolver, NoDevice};
use crate::model::{
    AstrologyAnalysis, BirthChart, BirthQuery, ChartVariant, GuidanceContext, LocationResult, Origin,
    ValidBirth,
};
use crate::normalize::fill_placement_degrees;
use crate::provider::{AstroProvider, GuidanceProvider, HttpAstroProvider, HttpGuidanceProvider};

/// Shortest trimmed query worth geocoding, in characters.
pub const MIN_SEARCH_CHARS: usize = 2;

/// The outbound capabilities an aggregator works with.
pub struct Providers {
    pub astro: Arc<dyn AstroProvider>,
    pub guidance: Arc<dyn GuidanceProvider>,
    pub geo: Arc<dyn GeoProvider>,
    pub device: Arc<dyn DeviceLocator>,
}

impl Providers {
    /// HTTP providers for everything; no device location service.
    pub fn http(settings: &ProviderSettings) -> Self {
        let timeout = Duration::from_secs(settings.timeout_secs);
        Self {
            astro: Arc::new(HttpAstroProvider::new(settings.astro.clone(), timeout)),
            guidance: Arc::new(HttpGuidanceProvider::new(settings.guidance.clone(), timeout)),
            geo: Arc::new(HttpGeoProvider::new(settings.geo.clone(), timeout)),
            device: Arc::new(NoDevice),
        }
    }
}

fn or_fallback<T>(what: &str, result: ProviderResult<T>, synthesize: impl FnOnce() -> T) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            log::warn!("{what}: {e}; using synthesized data");
            synthesize()
        }
    }
}

pub struct Aggregator {
    locations: LocationResolver,
    charts: ChartProviderClient,
    analyses: AnalysisProviderClient,
    guidance: GuidanceProviderClient,
    language: String,
    randomness: RandomSource,
}

impl Aggregator {
    pub fn new(providers: Providers, settings: &ProviderSettings) -> Self {
        let timeout = Duration::from_secs(settings.timeout_secs);
        Self {
            locations: LocationResolver::new(providers.geo, providers.device, timeout),
            charts: ChartProviderClient::new(providers.astro.clone(), timeout),
            analyses: AnalysisProviderClient::new(providers.astro, timeout),
            guidance: GuidanceProviderClient::new(
                providers.guidance,
                timeout,
                settings.guidance.max_tokens,
                settings.guidance.temperature,
            ),
            language: settings.language.clone(),
            randomness: RandomSource::from_seed(settings.fallback_seed),
        }
    }

    pub fn from_settings(settings: &ProviderSettings) -> Self {
        Self::new(Providers::http(settings), settings)
    }

    pub fn with_randomness(mut self, randomness: RandomSource) -> Self {
        self.randomness = randomness;
        self
    }

    pub async fn resolve_current_location(&self) -> LocationResult {
        self.locations.resolve_current_location().await
    }

    /// Up to five matches; queries under two characters are not searched.
    pub async fn search_places(&self, query: &str) -> Vec<LocationResult> {
        let query = query.trim();
        if query.chars().count() < MIN_SEARCH_CHARS {
            return Vec::new();
        }
        self.locations.search_places(query).await
    }

    pub async fn resolve_coordinates(&self, place: &str) -> LocationResult {
        self.locations.resolve_coordinates(place).await
    }

    async fn birth_location(&self, birth: &ValidBirth) -> LocationResult {
        match &birth.location {
            Some(location) => location.clone(),
            None => self.locations.resolve_coordinates(&birth.place).await,
        }
    }

    pub async fn generate_chart(&self, query: &BirthQuery) -> Result<BirthChart, InputError> {
        let birth = query.validate()?;
        let location = self.birth_location(&birth).await;
        let request = astro_request(&birth, &location, &self.language);
        let reply = self.charts.fetch(&request).await;

        let mut rng = self.randomness.rng();
        let positions_origin = if reply.positions.is_ok() { Origin::Provider } else { Origin::Fallback };
        let planet_positions = or_fallback("planet positions", reply.positions, || synthesize_positions(&mut rng));
        let mut lagna_chart = or_fallback("lagna chart", reply.lagna, || {
            synthesize_chart(ChartVariant::Primary, &mut rng)
        });
        let navamsa_chart = or_fallback("navamsa chart", reply.navamsa, || {
            synthesize_chart(ChartVariant::Navamsa, &mut rng)
        });
        if lagna_chart.origin == Origin::Provider && positions_origin == Origin::Provider {
            fill_placement_degrees(&mut lagna_chart, &planet_positions);
        }

        let chart = BirthChart {
            lagna_chart,
            navamsa_chart,
            planet_positions,
            positions_origin,
        };
        log::info!(
            "chart for {} at {} ({}): {}",
            birth.local,
            location.place_name,
            location.timezone,
            if chart.is_fully_sourced() { "provider" } else { "partly synthesized" }
        );
        Ok(chart)
    }

    pub async fn generate_analysis(&self, query: &BirthQuery) -> Result<AstrologyAnalysis, InputError> {
        let birth = query.validate()?;
        let location = self.birth_location(&birth).await;
        let request = astro_request(&birth, &location, &self.language);
        let reply = self.analyses.fetch(&request).await;

        let mut rng = self.randomness.rng();
        let analysis = AstrologyAnalysis {
            sadesati: or_fallback("sade sati", reply.sade_sati, || synthesize_sade_sati(&mut rng)),
            manglik: or_fallback("manglik", reply.manglik, || synthesize_manglik(&mut rng)),
            kalsarpa: or_fallback("kalsarpa", reply.kalsarpa, || synthesize_kalsarpa(&mut rng)),
        };
        let synthesized = analysis
            .conditions()
            .iter()
            .filter(|c| c.origin() == Origin::Fallback)
            .count();
        log::info!(
            "analysis for {} at {}: {} of 3 conditions synthesized",
            birth.local,
            location.place_name,
            synthesized
        );
        Ok(analysis)
    }

    pub async fn send_guidance_message(
        &self,
        text: &str,
        context: Option<&GuidanceContext>,
    ) -> Result<String, InputError> {
        if text.trim().is_empty() {
            return Err(InputError::EmptyMessage);
        }
        let reply = self.guidance.ask(text, context).await;
        Ok(or_fallback("guidance", reply, || synthesize_reply(text, &mut self.randomness.rng())))
    }
}
