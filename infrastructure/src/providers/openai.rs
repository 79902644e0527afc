//! OpenAI Chat Completions client (slot B).

use super::classify::send_json;
use super::{ChatMessage, conversation_messages};
use async_trait::async_trait;
use relay_application::{ProviderClient, ProviderRequest};
use relay_domain::provider::config::resolve_api_key;
use relay_domain::{OpenAiProviderConfig, ProviderFailure, ProviderOutcome};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for `POST {base_url}/v1/chat/completions`
pub struct OpenAiClient {
    config: OpenAiProviderConfig,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl OpenAiClient {
    /// Create a client; the API key is resolved once, here.
    pub fn new(config: OpenAiProviderConfig, http: reqwest::Client) -> Self {
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
        format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    async fn send(&self, request: &ProviderRequest) -> Result<String, ProviderFailure> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ProviderFailure::auth(format!(
                "{} API key not set (expected in ${})",
                self.config.display_name, self.config.api_key_env
            ))
        })?;

        let mut messages = Vec::with_capacity(request.history.len() + 2);
        if let Some(system) = request.system_prompt.as_deref() {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.extend(conversation_messages(&request.history, &request.prompt));

        let body = ChatRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            messages,
        };

        debug!(
            provider = %self.config.display_name,
            model = %self.config.model,
            messages = body.messages.len(),
            "Sending OpenAI request"
        );

        let http_request = self
            .http
            .post(self.endpoint())
            .timeout(request.timeout)
            .bearer_auth(api_key)
            .json(&body);

        let response: ChatResponse = send_json(&self.config.display_name, http_request).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| {
                ProviderFailure::malformed(format!(
                    "{} returned no message content",
                    self.config.display_name
                ))
            })
    }
}

#[async_trait]
impl ProviderClient for OpenAiClient {
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
