//! One client per provider capability. Each caps every outbound call with the
//! configured timeout and hands back normalized data or `Unavailable`;
//! substitution with synthesized data happens one level up.

use chrono::{Datelike, Timelike};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::error::ProviderResult;
use crate::model::{
    ChartDocument, ChartVariant, GuidanceContext, Kalsarpa, LocationResult, Manglik, PlanetPosition,
    SadeSati, ValidBirth,
};
use crate::normalize::{
    normalize_chart, normalize_kalsarpa, normalize_manglik, normalize_planet_positions,
    normalize_sade_sati, unwrap_envelope,
};
use crate::provider::{within, AstroEndpoint, AstroProvider, AstroRequest, GuidanceProvider, GuidanceRequest};
use crate::timezone::offset_hours_at_local;

pub const DEFAULT_GENDER: &str = "male";

/// Chart and analysis request for one resolved birth.
pub fn astro_request(birth: &ValidBirth, location: &LocationResult, language: &str) -> AstroRequest {
    let local = birth.local;
    AstroRequest {
        full_name: birth.name.clone(),
        day: local.day(),
        month: local.month(),
        year: local.year(),
        hour: local.hour(),
        min: local.minute(),
        sec: local.second(),
        gender: DEFAULT_GENDER.to_string(),
        place: location.place_name.clone(),
        lat: location.latitude,
        lon: location.longitude,
        tzone: offset_hours_at_local(&location.timezone, local),
        language: language.to_string(),
    }
}

async fn fetch_unwrapped(
    provider: &dyn AstroProvider,
    timeout: Duration,
    endpoint: AstroEndpoint,
    request: &AstroRequest,
) -> ProviderResult<Value> {
    let raw = within(timeout, provider.fetch(endpoint, request)).await;
    if let Err(e) = &raw {
        log::debug!("{}: {e}", endpoint.path());
    }
    unwrap_envelope(raw?)
}

/// The three chart sub-results, each settled on its own.
#[derive(Debug)]
pub struct ChartReply {
    pub lagna: ProviderResult<ChartDocument>,
    pub navamsa: ProviderResult<ChartDocument>,
    pub positions: ProviderResult<Vec<PlanetPosition>>,
}

pub struct ChartProviderClient {
    provider: Arc<dyn AstroProvider>,
    timeout: Duration,
}

impl ChartProviderClient {
    pub fn new(provider: Arc<dyn AstroProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub async fn fetch(&self, request: &AstroRequest) -> ChartReply {
        let provider = self.provider.as_ref();
        let (lagna, navamsa, positions) = tokio::join!(
            fetch_unwrapped(provider, self.timeout, AstroEndpoint::LagnaChart, request),
            fetch_unwrapped(provider, self.timeout, AstroEndpoint::NavamsaChart, request),
            fetch_unwrapped(provider, self.timeout, AstroEndpoint::PlanetDetails, request),
        );
        ChartReply {
            lagna: lagna.and_then(|v| normalize_chart(ChartVariant::Primary, &v)),
            navamsa: navamsa.and_then(|v| normalize_chart(ChartVariant::Navamsa, &v)),
            positions: positions.and_then(|v| normalize_planet_positions(&v)),
        }
    }
}

#[derive(Debug)]
pub struct AnalysisReply {
    pub sade_sati: ProviderResult<SadeSati>,
    pub manglik: ProviderResult<Manglik>,
    pub kalsarpa: ProviderResult<Kalsarpa>,
}

pub struct AnalysisProviderClient {
    provider: Arc<dyn AstroProvider>,
    timeout: Duration,
}

impl AnalysisProviderClient {
    pub fn new(provider: Arc<dyn AstroProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub async fn fetch(&self, request: &AstroRequest) -> AnalysisReply {
        let provider = self.provider.as_ref();
        let (sade_sati, manglik, kalsarpa) = tokio::join!(
            fetch_unwrapped(provider, self.timeout, AstroEndpoint::SadeSati, request),
            fetch_unwrapped(provider, self.timeout, AstroEndpoint::Manglik, request),
            fetch_unwrapped(provider, self.timeout, AstroEndpoint::Kalsarpa, request),
        );
        AnalysisReply {
            sade_sati: sade_sati.and_then(|v| normalize_sade_sati(&v)),
            manglik: manglik.and_then(|v| normalize_manglik(&v)),
            kalsarpa: kalsarpa.and_then(|v| normalize_kalsarpa(&v)),
        }
    }
}

pub const GUIDE_PERSONA: &str = "You are Sage Cosmos, a wise and experienced Vedic astrologer with deep knowledge of:
- Birth chart analysis (Lagna and Navamsa charts)
- Planetary positions and their effects
- Sade Sati, Manglik, and Kalsarpa yoga analysis
- Remedies and spiritual guidance
- Life predictions and timing of events

Respond in a warm, wise, and mystical tone. Provide practical advice along with spiritual insights.
Keep responses concise but meaningful. Always end with a blessing or positive affirmation.";

/// The persona prompt, plus whatever the caller knows about the asker.
pub fn system_prompt(context: Option<&GuidanceContext>) -> String {
    let mut prompt = GUIDE_PERSONA.to_string();
    let Some(context) = context.filter(|c| !c.is_empty()) else {
        return prompt;
    };
    prompt.push_str("\n\nAbout the person asking:");
    if let Some(name) = context.subject_name.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        prompt.push_str(&format!("\n- Name: {name}"));
    }
    if let Some(summary) = context.birth_summary.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        prompt.push_str(&format!("\n- Birth details: {summary}"));
    }
    prompt
}

pub struct GuidanceProviderClient {
    provider: Arc<dyn GuidanceProvider>,
    timeout: Duration,
    max_tokens: u32,
    temperature: f32,
}

impl GuidanceProviderClient {
    pub fn new(provider: Arc<dyn GuidanceProvider>, timeout: Duration, max_tokens: u32, temperature: f32) -> Self {
        Self {
            provider,
            timeout,
            max_tokens,
            temperature,
        }
    }

    /// The provider's reply, verbatim.
    pub async fn ask(&self, message: &str, context: Option<&GuidanceContext>) -> ProviderResult<String> {
        let request = GuidanceRequest {
            system: system_prompt(context),
            message: message.to_string(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };
        within(self.timeout, self.provider.complete(request)).await
    }
}
