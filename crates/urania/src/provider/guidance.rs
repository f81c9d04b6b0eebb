use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use urania_config::GuidanceProviderSettings;

use super::{http_client, GuidanceProvider, GuidanceRequest};
use crate::error::{ProviderResult, Unavailable};

/// OpenAI-compatible chat completion client.
pub struct HttpGuidanceProvider {
    client: reqwest::Client,
    settings: GuidanceProviderSettings,
}

impl HttpGuidanceProvider {
    pub fn new(settings: GuidanceProviderSettings, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            settings,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

/// First non-blank completion text, verbatim.
fn first_content(response: ChatResponse) -> ProviderResult<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| Unavailable::Shape("completion has no message content".to_string()))
}

#[async_trait]
impl GuidanceProvider for HttpGuidanceProvider {
    async fn complete(&self, request: GuidanceRequest) -> ProviderResult<String> {
        let Some(api_key) = self.settings.api_key.as_deref() else {
            return Err(Unavailable::NotConfigured("guidance"));
        };

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|e| Unavailable::Transport(e.to_string()))?,
        );

        let body = ChatRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage { role: "system", content: &request.system },
                ChatMessage { role: "user", content: &request.message },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        log::debug!(
            "guidance provider: model={} message_len={}",
            self.settings.model,
            request.message.len()
        );
        let response = self
            .client
            .post(&self.settings.endpoint)
            .headers(headers)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Unavailable::Status(status.as_u16()));
        }
        first_content(response.json::<ChatResponse>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_content() {
        let parsed: ChatResponse = serde_json::from_value(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "Trust the timing."}}]
        }))
        .unwrap();
        assert_eq!(first_content(parsed).unwrap(), "Trust the timing.");
    }

    #[test]
    fn test_empty_choices_is_shape_error() {
        let parsed: ChatResponse = serde_json::from_value(serde_json::json!({"choices": []})).unwrap();
        assert!(matches!(first_content(parsed), Err(Unavailable::Shape(_))));

        let blank: ChatResponse = serde_json::from_value(serde_json::json!({
            "choices": [{"message": {"content": "  "}}]
        }))
        .unwrap();
        assert!(matches!(first_content(blank), Err(Unavailable::Shape(_))));
    }

    #[tokio::test]
    async fn test_missing_key_skips_network() {
        let provider = HttpGuidanceProvider::new(
            GuidanceProviderSettings {
                endpoint: "http://127.0.0.1:9/v1/chat/completions".to_string(),
                api_key: None,
                model: "gpt-3.5-turbo".to_string(),
                max_tokens: 300,
                temperature: 0.7,
            },
            Duration::from_secs(1),
        );
        let result = provider
            .complete(GuidanceRequest {
                system: "s".to_string(),
                message: "m".to_string(),
                max_tokens: 10,
                temperature: 0.1,
            })
            .await;
        assert_eq!(result, Err(Unavailable::NotConfigured("guidance")));
    }
}
