//! AnthropicProvider -- concrete [`TextProvider`] implementation for the
//! Anthropic Messages API.
//!
//! One non-streaming call per generation request (`/v1/messages`) with a
//! bounded timeout. The API key is wrapped in [`secrecy::SecretString`]
//! and is never logged or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use postcal_core::generate::provider::TextProvider;
use postcal_types::generate::{PromptSpec, ProviderError};

/// Anthropic text-generation provider.
///
/// The key is stored as a [`SecretString`] and only exposed when
/// constructing HTTP request headers.
pub struct AnthropicProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl AnthropicProvider {
    /// The Anthropic API version header value.
    const API_VERSION: &'static str = "2023-06-01";

    /// Generation calls are short; fail fast rather than hold a request open.
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a new Anthropic provider.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Anthropic API key wrapped in SecretString
    /// * `model` - Model identifier (e.g., "claude-3-5-haiku-latest")
    pub fn new(api_key: SecretString, model: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: "https://api.anthropic.com".to_string(),
            model,
        }
    }

    /// The configured model for this provider.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Override the base URL (useful for testing or proxies).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn to_request(&self, spec: &PromptSpec) -> AnthropicRequest {
        AnthropicRequest {
            model: self.model.clone(),
            max_tokens: spec.max_tokens,
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: spec.prompt.clone(),
            }],
            system: Some(spec.system.clone()),
            stream: false,
            temperature: Some(spec.temperature),
        }
    }
}

// AnthropicProvider intentionally does NOT derive Debug; the SecretString
// field already shields the key, and omitting Debug keeps the rest of the
// request state out of logs too.

impl TextProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn complete(&self, spec: &PromptSpec) -> Result<String, ProviderError> {
        let body = self.to_request(spec);
        let url = format!("{}/v1/messages", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", Self::API_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Http(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ProviderError::Provider {
                message: format!("status {status}: {detail}"),
            });
        }

        let parsed: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        let text: String = parsed
            .content
            .iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n");

        if text.is_empty() {
            return Err(ProviderError::MalformedResponse(
                "response contained no text blocks".to_string(),
            ));
        }
        Ok(text)
    }
}

/// Request body for the Anthropic Messages API.
#[derive(Debug, Clone, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

/// A single message in an Anthropic conversation.
#[derive(Debug, Clone, Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

/// Non-streaming response from the Messages API.
#[derive(Debug, Clone, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContentBlock>,
}

#[derive(Debug, Clone, Deserialize)]
struct AnthropicContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}
