//! Provider client port
//!
//! Defines the single capability the relay needs from an LLM service:
//! turn a prompt plus history into a [`ProviderOutcome`]. Adapters for the
//! concrete HTTP APIs live in the infrastructure layer.

use async_trait::async_trait;
use relay_domain::{ConversationId, ProviderFailure, ProviderOutcome, ProviderSlot, Turn};
use std::sync::Arc;
use std::time::Duration;

/// One completion request
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    /// Conversation the request belongs to (for logging only)
    pub conversation_id: Option<ConversationId>,
    pub system_prompt: Option<String>,
    /// The new user prompt
    pub prompt: String,
    /// Prior turns, oldest first
    pub history: Vec<Turn>,
    /// Per-call deadline
    pub timeout: Duration,
}

impl ProviderRequest {
    pub fn new(prompt: impl Into<String>, timeout: Duration) -> Self {
        Self {
            conversation_id: None,
            system_prompt: None,
            prompt: prompt.into(),
            history: Vec::new(),
            timeout,
        }
    }

    pub fn with_conversation(mut self, id: ConversationId) -> Self {
        self.conversation_id = Some(id);
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn with_history(mut self, history: Vec<Turn>) -> Self {
        self.history = history;
        self
    }
}

/// Client for one LLM provider
///
/// Implementations never return errors: every failure is classified into a
/// [`ProviderOutcome::Failure`] so callers can apply retry and degradation
/// uniformly.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Display name of the provider (e.g. "Claude")
    fn name(&self) -> &str;

    /// Send one completion request
    async fn complete(&self, request: &ProviderRequest) -> ProviderOutcome;
}

/// Run `client.complete` bounded by `request.timeout`.
///
/// A call still pending at the deadline is dropped and reported as a
/// `Timeout` failure.
pub async fn complete_within(client: &dyn ProviderClient, request: &ProviderRequest) -> ProviderOutcome {
    match tokio::time::timeout(request.timeout, client.complete(request)).await {
        Ok(outcome) => outcome,
        Err(_) => ProviderFailure::timeout(format!(
            "{} did not respond within {}s",
            client.name(),
            request.timeout.as_secs_f64()
        ))
        .into(),
    }
}

/// The two configured providers, addressed by slot
#[derive(Clone)]
pub struct ProviderSet {
    a: Arc<dyn ProviderClient>,
    b: Arc<dyn ProviderClient>,
}

impl ProviderSet {
    pub fn new(a: Arc<dyn ProviderClient>, b: Arc<dyn ProviderClient>) -> Self {
        Self { a, b }
    }

    pub fn get(&self, slot: ProviderSlot) -> &Arc<dyn ProviderClient> {
        match slot {
            ProviderSlot::A => &self.a,
            ProviderSlot::B => &self.b,
        }
    }

    pub fn name(&self, slot: ProviderSlot) -> &str {
        self.get(slot).name()
    }
}

impl std::fmt::Debug for ProviderSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSet")
            .field("a", &self.a.name())
            .field("b", &self.b.name())
            .finish()
    }
}
