//! Anthropic Messages API client (slot A).

use super::classify::send_json;
use super::{ChatMessage, conversation_messages};
use async_trait::async_trait;
use relay_application::{ProviderClient, ProviderRequest};
use relay_domain::provider::config::resolve_api_key;
use relay_domain::{AnthropicProviderConfig, ProviderFailure, ProviderOutcome};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Client for `POST {base_url}/v1/messages`
pub struct AnthropicClient {
    config: AnthropicProviderConfig,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl AnthropicClient {
    /// Create a client; the API key is resolved once, here.
    pub fn new(config: AnthropicProviderConfig, http: reqwest::Client) -> Self {
        let api_key = resolve_api_key(config.api_key.as_deref(), &config.api_key_env);
        Self {
            config,
            api_key,
            http,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'))
    }

    fn extract_text(&self, response: MessagesResponse) -> Result<String, ProviderFailure> {
        let text = response
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            return Err(ProviderFailure::malformed(format!(
                "{} returned no text content",
                self.config.display_name
            )));
        }
        Ok(text)
    }

    async fn send(&self, request: &ProviderRequest) -> Result<String, ProviderFailure> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ProviderFailure::auth(format!(
                "{} API key not set (expected in ${})",
                self.config.display_name, self.config.api_key_env
            ))
        })?;

        let body = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            system: request.system_prompt.as_deref(),
            messages: conversation_messages(&request.history, &request.prompt),
        };

        debug!(
            provider = %self.config.display_name,
            model = %self.config.model,
            messages = body.messages.len(),
            "Sending Anthropic request"
        );

        let http_request = self
            .http
            .post(self.endpoint())
            .timeout(request.timeout)
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.config.api_version)
            .json(&body);

        let response: MessagesResponse = send_json(&self.config.display_name, http_request).await?;
        self.extract_text(response)
    }
}

#[async_trait]
impl ProviderClient for AnthropicClient {
    fn name(&self) -> &str {
        &self.config.display_name
    }

    async fn complete(&self, request: &ProviderRequest) -> ProviderOutcome {
        match self.send(request).await {
            Ok(text) => ProviderOutcome::success(text),
            Err(failure) => failure.into(),
        }
    }
}
