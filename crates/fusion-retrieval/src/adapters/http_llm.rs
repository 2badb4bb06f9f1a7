//! OpenAI-compatible chat completions client implementing [`LlmClient`].
//!
//! Non-streaming. Works with any server exposing `/v1/chat/completions`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use fusion_core::errors::BackendError;
use fusion_core::traits::LlmClient;

/// Connection settings for [`HttpLlmClient`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpLlmConfig {
    /// Server root, without the `/v1` suffix.
    pub base_url: String,
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub request_timeout_ms: u64,
}

impl HttpLlmConfig {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            model: model.into(),
            max_tokens: 64,
            temperature: 0.0,
            request_timeout_ms: 5_000,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

pub struct HttpLlmClient {
    config: HttpLlmConfig,
    client: reqwest::Client,
}

impl std::fmt::Debug for HttpLlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpLlmClient")
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.model)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl HttpLlmClient {
    pub fn new(config: HttpLlmConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| BackendError::Other {
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { config, client })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn map_http_error(status: reqwest::StatusCode, body: &str) -> BackendError {
        let message = extract_error_message(body);
        match status.as_u16() {
            401 | 403 => BackendError::Unauthorized {
                reason: format!("HTTP {}: {message}", status.as_u16()),
            },
            502..=504 => BackendError::Unreachable {
                reason: format!("HTTP {}: {message}", status.as_u16()),
            },
            _ => BackendError::Other {
                reason: format!("HTTP {}: {message}", status.as_u16()),
            },
        }
    }
}

fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl LlmClient for HttpLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, BackendError> {
        let body = json!({
            "model": self.config.model,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "stream": false,
        });

        let mut request = self.client.post(self.url()).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| BackendError::Unreachable {
            reason: format!("LLM request failed: {e}"),
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Self::map_http_error(status, &text));
        }

        let parsed: CompletionResponse =
            response
                .json()
                .await
                .map_err(|e| BackendError::InvalidResponse {
                    reason: format!("malformed completion body: {e}"),
                })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| BackendError::InvalidResponse {
                reason: "completion has no message content".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_tolerates_trailing_slash() {
        let client = HttpLlmClient::new(HttpLlmConfig::new("http://localhost:8080/", "m")).unwrap();
        assert_eq!(client.url(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn http_401_maps_to_unauthorized() {
        let err = HttpLlmClient::map_http_error(
            reqwest::StatusCode::UNAUTHORIZED,
            r#"{"error":{"message":"bad key"}}"#,
        );
        assert!(matches!(err, BackendError::Unauthorized { ref reason } if reason.contains("bad key")));
    }

    #[test]
    fn http_500_maps_to_other_with_raw_body() {
        let err = HttpLlmClient::map_http_error(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert!(matches!(err, BackendError::Other { ref reason } if reason.contains("boom")));
    }

    #[test]
    fn api_key_not_serialized() {
        let config = HttpLlmConfig::new("http://x", "m").with_api_key("secret");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }
}
