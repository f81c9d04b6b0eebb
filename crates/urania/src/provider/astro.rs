use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use urania_config::AstroProviderSettings;

use super::{http_client, AstroEndpoint, AstroProvider, AstroRequest};
use crate::error::{ProviderResult, Unavailable};

/// Chart and condition provider speaking the vedicastroapi v3 JSON dialect.
pub struct HttpAstroProvider {
    client: reqwest::Client,
    settings: AstroProviderSettings,
}

#[derive(Debug, Serialize)]
struct SignedRequest<'a> {
    user_id: &'a str,
    api_key: &'a str,
    #[serde(flatten)]
    request: &'a AstroRequest,
}

impl HttpAstroProvider {
    pub fn new(settings: AstroProviderSettings, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            settings,
        }
    }

    fn url(&self, endpoint: AstroEndpoint) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), endpoint.path())
    }
}

#[async_trait]
impl AstroProvider for HttpAstroProvider {
    async fn fetch(&self, endpoint: AstroEndpoint, request: &AstroRequest) -> ProviderResult<Value> {
        let Some(api_key) = self.settings.api_key.as_deref() else {
            return Err(Unavailable::NotConfigured("astrology"));
        };
        let body = SignedRequest {
            user_id: self.settings.user_id.as_deref().unwrap_or(""),
            api_key,
            request,
        };

        let url = self.url(endpoint);
        log::debug!("astro provider: POST {}", url);
        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Unavailable::Status(status.as_u16()));
        }
        Ok(response.json::<Value>().await?)
    }
}
