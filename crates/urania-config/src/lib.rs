use serde::Deserialize;
use std::fs;

pub const DEFAULT_ASTRO_API_URL: &str = "https://api.vedicastroapi.com/v3-json";
pub const DEFAULT_GUIDANCE_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_GUIDANCE_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_IPGEO_API_URL: &str = "https://api.ipgeolocation.io/ipgeo";
pub const DEFAULT_GEOCODER_API_URL: &str = "https://api.opencagedata.com/geocode/v1/json";

/// Chart and condition-analysis provider. Calls are skipped when `api_key` is unset.
#[derive(Debug, Clone, PartialEq)]
pub struct AstroProviderSettings {
    pub base_url: String,
    pub user_id: Option<String>,
    pub api_key: Option<String>,
}

impl AstroProviderSettings {
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// OpenAI-compatible chat completion provider.
#[derive(Debug, Clone, PartialEq)]
pub struct GuidanceProviderSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl GuidanceProviderSettings {
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// IP geolocation plus forward/reverse geocoding.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoProviderSettings {
    pub ip_endpoint: String,
    pub ip_api_key: Option<String>,
    pub geocoder_endpoint: String,
    pub geocoder_api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    pub astro: AstroProviderSettings,
    pub guidance: GuidanceProviderSettings,
    pub geo: GeoProviderSettings,
    pub timeout_secs: u64,
    pub language: String,
    /// Fixed seed for synthesized data; `None` draws from OS entropy.
    pub fallback_seed: Option<u64>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            astro: AstroProviderSettings {
                base_url: DEFAULT_ASTRO_API_URL.to_string(),
                user_id: None,
                api_key: None,
            },
            guidance: GuidanceProviderSettings {
                endpoint: DEFAULT_GUIDANCE_API_URL.to_string(),
                api_key: None,
                model: DEFAULT_GUIDANCE_MODEL.to_string(),
                max_tokens: default_max_tokens(),
                temperature: default_temperature(),
            },
            geo: GeoProviderSettings {
                ip_endpoint: DEFAULT_IPGEO_API_URL.to_string(),
                ip_api_key: None,
                geocoder_endpoint: DEFAULT_GEOCODER_API_URL.to_string(),
                geocoder_api_key: None,
            },
            timeout_secs: default_timeout_secs(),
            language: default_language(),
            fallback_seed: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct AstroToml {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    api_key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct GuidanceToml {
    #[serde(default)]
    endpoint: Option<String>,
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    max_tokens: Option<u32>,
    #[serde(default)]
    temperature: Option<f32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct GeoToml {
    #[serde(default)]
    ip_endpoint: Option<String>,
    #[serde(default)]
    ip_api_key: Option<String>,
    #[serde(default)]
    geocoder_endpoint: Option<String>,
    #[serde(default)]
    geocoder_api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    astro: Option<AstroToml>,
    #[serde(default)]
    guidance: Option<GuidanceToml>,
    #[serde(default)]
    geo: Option<GeoToml>,
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
    #[serde(default = "default_language")]
    language: String,
    #[serde(default)]
    fallback_seed: Option<u64>,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_language() -> String {
    "en".to_string()
}

fn default_max_tokens() -> u32 {
    300
}

fn default_temperature() -> f32 {
    0.7
}

/// Blank strings in config files mean "not set".
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Try the usual relative locations for `configs/urania.toml`. A missing file is fine.
pub fn read_config_toml_text() -> Option<String> {
    let paths = ["configs/urania.toml", "../../configs/urania.toml"];
    for p in &paths {
        if let Ok(c) = fs::read_to_string(p) {
            log::debug!("urania_config: loaded {}", p);
            return Some(c);
        }
    }
    log::debug!("urania_config: no config file at {:?}, using defaults", paths);
    None
}

pub fn parse_provider_settings(text: &str) -> anyhow::Result<ProviderSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse urania.toml: {e}"))?;
    let RootConfigToml {
        astro,
        guidance,
        geo,
        timeout_secs,
        language,
        fallback_seed,
    } = root;
    if timeout_secs == 0 {
        anyhow::bail!("timeout_secs must be greater than zero");
    }

    let defaults = ProviderSettings::default();
    let astro = astro.unwrap_or_default();
    let guidance = guidance.unwrap_or_default();
    let geo = geo.unwrap_or_default();

    Ok(ProviderSettings {
        astro: AstroProviderSettings {
            base_url: non_empty(astro.base_url).unwrap_or(defaults.astro.base_url),
            user_id: non_empty(astro.user_id),
            api_key: non_empty(astro.api_key),
        },
        guidance: GuidanceProviderSettings {
            endpoint: non_empty(guidance.endpoint).unwrap_or(defaults.guidance.endpoint),
            api_key: non_empty(guidance.api_key),
            model: non_empty(guidance.model).unwrap_or(defaults.guidance.model),
            max_tokens: guidance.max_tokens.unwrap_or(defaults.guidance.max_tokens),
            temperature: guidance.temperature.unwrap_or(defaults.guidance.temperature),
        },
        geo: GeoProviderSettings {
            ip_endpoint: non_empty(geo.ip_endpoint).unwrap_or(defaults.geo.ip_endpoint),
            ip_api_key: non_empty(geo.ip_api_key),
            geocoder_endpoint: non_empty(geo.geocoder_endpoint)
                .unwrap_or(defaults.geo.geocoder_endpoint),
            geocoder_api_key: non_empty(geo.geocoder_api_key),
        },
        timeout_secs,
        language: non_empty(Some(language)).unwrap_or(defaults.language),
        fallback_seed,
    })
}

/// Overlay `URANIA_*` variables onto file settings. `lookup` is `std::env::var` in production.
pub fn apply_env_overrides<F>(mut settings: ProviderSettings, lookup: F) -> anyhow::Result<ProviderSettings>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| non_empty(lookup(key));

    if let Some(v) = get("URANIA_ASTRO_API_URL") {
        settings.astro.base_url = v;
    }
    if let Some(v) = get("URANIA_ASTRO_USER_ID") {
        settings.astro.user_id = Some(v);
    }
    if let Some(v) = get("URANIA_ASTRO_API_KEY") {
        settings.astro.api_key = Some(v);
    }
    if let Some(v) = get("URANIA_GUIDANCE_API_URL") {
        settings.guidance.endpoint = v;
    }
    if let Some(v) = get("URANIA_GUIDANCE_API_KEY") {
        settings.guidance.api_key = Some(v);
    }
    if let Some(v) = get("URANIA_GUIDANCE_MODEL") {
        settings.guidance.model = v;
    }
    if let Some(v) = get("URANIA_IPGEO_API_KEY") {
        settings.geo.ip_api_key = Some(v);
    }
    if let Some(v) = get("URANIA_GEOCODER_API_KEY") {
        settings.geo.geocoder_api_key = Some(v);
    }
    if let Some(v) = get("URANIA_TIMEOUT_SECS") {
        let secs: u64 = v
            .parse()
            .map_err(|e| anyhow::anyhow!("URANIA_TIMEOUT_SECS is not a number ({v}): {e}"))?;
        if secs == 0 {
            anyhow::bail!("URANIA_TIMEOUT_SECS must be greater than zero");
        }
        settings.timeout_secs = secs;
    }
    if let Some(v) = get("URANIA_FALLBACK_SEED") {
        let seed: u64 = v
            .parse()
            .map_err(|e| anyhow::anyhow!("URANIA_FALLBACK_SEED is not a number ({v}): {e}"))?;
        settings.fallback_seed = Some(seed);
    }
    Ok(settings)
}

/// File settings (if any) with environment overrides applied.
pub fn load_provider_settings() -> anyhow::Result<ProviderSettings> {
    let settings = match read_config_toml_text() {
        Some(text) => parse_provider_settings(&text)?,
        None => ProviderSettings::default(),
    };
    apply_env_overrides(settings, |key| std::env::var(key).ok())
}
