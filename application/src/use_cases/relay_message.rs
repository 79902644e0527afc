//! Relay Message use case
//!
//! Orchestrates one user message: validate, read history, dispatch to the
//! provider(s) selected by the [`QueryMode`] concurrently, wait for every
//! dispatched call, apply the degradation policy, synthesize (dual mode),
//! then append the exchange to history.

use crate::config::RelayParams;
use crate::history_store::HistoryStore;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::provider_client::{ProviderRequest, ProviderSet, complete_within};
use crate::retry::RetryPolicy;
use crate::use_cases::synthesize::Synthesizer;
use relay_domain::{
    ConversationId, InputError, ProviderFailure, ProviderOutcome, ProviderResponse, ProviderSlot,
    QueryMode, QueryResult, Turn, UserMessage,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Errors surfaced to the caller of [`RelayMessageUseCase::handle`]
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Invalid input: {0}")]
    Input(#[from] InputError),

    #[error("{provider} failed: {failure}")]
    ProviderFailed {
        provider: String,
        failure: ProviderFailure,
    },

    #[error("All providers failed: {}", format_failures(.failures))]
    AllProvidersFailed {
        failures: Vec<(String, ProviderFailure)>,
    },
}

fn format_failures(failures: &[(String, ProviderFailure)]) -> String {
    failures
        .iter()
        .map(|(provider, failure)| format!("{provider} ({failure})"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl RelayError {
    /// Caller's fault; nothing was sent upstream
    pub fn is_input_error(&self) -> bool {
        matches!(self, RelayError::Input(_))
    }
}

/// Use case for relaying a message to one or both providers
pub struct RelayMessageUseCase {
    providers: ProviderSet,
    params: RelayParams,
    retry: RetryPolicy,
    history: Arc<HistoryStore>,
    synthesizer: Synthesizer,
    logger: Arc<dyn ConversationLogger>,
}

impl RelayMessageUseCase {
    pub fn new(providers: ProviderSet, params: RelayParams) -> Self {
        let retry = RetryPolicy::new(params.retry);
        let synthesizer = Synthesizer::new(
            Arc::clone(providers.get(params.synthesis_provider)),
            retry.clone(),
            params.timeout,
            params.synthesis_excerpt_chars,
        );
        Self {
            history: Arc::new(HistoryStore::new(params.max_history_pairs)),
            providers,
            params,
            retry,
            synthesizer,
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn params(&self) -> &RelayParams {
        &self.params
    }

    pub fn history(&self) -> &Arc<HistoryStore> {
        &self.history
    }

    pub fn provider_name(&self, slot: ProviderSlot) -> &str {
        self.providers.name(slot)
    }

    /// Forget a conversation's history
    pub async fn reset(&self, id: &ConversationId) {
        self.history.reset(id).await;
        self.logger.log(ConversationEvent::new(
            "history_reset",
            serde_json::json!({ "conversation": id.as_str() }),
        ));
    }

    /// Handle a message with default (no-op) progress
    pub async fn handle(
        &self,
        id: &ConversationId,
        text: &str,
        mode: QueryMode,
    ) -> Result<QueryResult, RelayError> {
        self.handle_with_progress(id, text, mode, &NoProgress).await
    }

    /// Handle a message with progress callbacks
    pub async fn handle_with_progress(
        &self,
        id: &ConversationId,
        text: &str,
        mode: QueryMode,
        progress: &dyn ProgressNotifier,
    ) -> Result<QueryResult, RelayError> {
        let message = UserMessage::parse(text, self.params.max_input_chars)?;

        // Held until the exchange is appended: same-conversation messages run one at a time.
        let mut conversation = self.history.lock(id).await;
        let history = conversation.snapshot();

        info!(
            conversation = %id,
            mode = %mode,
            history_turns = history.len(),
            "Relaying message"
        );
        self.logger.log(ConversationEvent::new(
            "user_message",
            serde_json::json!({
                "conversation": id.as_str(),
                "mode": mode.as_str(),
                "text": message.content(),
                "history_turns": history.len(),
            }),
        ));

        let request = ProviderRequest::new(message.content(), self.params.timeout)
            .with_conversation(id.clone())
            .with_history(history);

        let per_provider = self.dispatch(mode, request, progress).await;

        let result = self.apply_policy(mode, &message, per_provider, progress).await?;

        if let Some(visible) = result.visible_text() {
            conversation.append(Turn::user(message.content()), Turn::assistant(visible));
        }

        Ok(result)
    }

    /// Send `request` to every slot of `mode` at once and wait for all of them.
    async fn dispatch(
        &self,
        mode: QueryMode,
        request: ProviderRequest,
        progress: &dyn ProgressNotifier,
    ) -> BTreeMap<ProviderSlot, ProviderResponse> {
        let slots = mode.slots();
        let names: Vec<&str> = slots.iter().map(|s| self.providers.name(*s)).collect();
        progress.on_dispatch_start(mode, &names);

        let request = Arc::new(request);
        let mut join_set = JoinSet::new();

        for &slot in slots {
            let client = Arc::clone(self.providers.get(slot));
            let retry = self.retry.clone();
            let request = Arc::clone(&request);

            join_set.spawn(async move {
                let client = client.as_ref();
                let outcome = retry
                    .execute(client.name(), || complete_within(client, &request))
                    .await;
                (slot, outcome)
            });
        }

        let mut per_provider = BTreeMap::new();

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((slot, outcome)) => {
                    let name = self.providers.name(slot);
                    match &outcome {
                        ProviderOutcome::Success { text } => {
                            info!(provider = name, chars = text.len(), "Provider responded");
                        }
                        ProviderOutcome::Failure(failure) => {
                            warn!(provider = name, "Provider failed: {}", failure);
                        }
                    }
                    progress.on_provider_complete(name, outcome.is_success());
                    self.log_outcome(&request, name, &outcome);
                    per_provider.insert(slot, ProviderResponse::new(name, outcome));
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        // A task that panicked never reported back
        for &slot in slots {
            per_provider.entry(slot).or_insert_with(|| {
                let name = self.providers.name(slot);
                progress.on_provider_complete(name, false);
                ProviderResponse::new(
                    name,
                    ProviderFailure::unavailable("provider task aborted").into(),
                )
            });
        }

        per_provider
    }

    async fn apply_policy(
        &self,
        mode: QueryMode,
        message: &UserMessage,
        mut per_provider: BTreeMap<ProviderSlot, ProviderResponse>,
        progress: &dyn ProgressNotifier,
    ) -> Result<QueryResult, RelayError> {
        if !mode.is_dual() {
            let slot = mode.slots()[0];
            let response = per_provider.remove(&slot).unwrap_or_else(|| {
                ProviderResponse::new(
                    self.providers.name(slot),
                    ProviderFailure::unavailable("provider task aborted").into(),
                )
            });
            return match response.outcome {
                ProviderOutcome::Success { .. } => Ok(QueryResult::single(mode, slot, response)),
                ProviderOutcome::Failure(failure) => Err(RelayError::ProviderFailed {
                    provider: response.provider,
                    failure,
                }),
            };
        }

        let successes = per_provider
            .values()
            .filter(|r| r.outcome.is_success())
            .count();

        match successes {
            0 => {
                let failures = per_provider
                    .into_values()
                    .filter_map(|r| match r.outcome {
                        ProviderOutcome::Failure(f) => Some((r.provider, f)),
                        ProviderOutcome::Success { .. } => None,
                    })
                    .collect();
                warn!("Both providers failed, nothing recorded");
                Err(RelayError::AllProvidersFailed { failures })
            }
            1 => {
                info!("Only one provider answered, returning degraded result");
                Ok(QueryResult::degraded(per_provider))
            }
            _ => {
                let answers: Vec<(&str, &str)> = per_provider
                    .values()
                    .filter_map(|r| r.outcome.text().map(|t| (r.provider.as_str(), t)))
                    .collect();

                progress.on_synthesis_start(self.synthesizer.provider_name());
                let synthesis = self.synthesizer.synthesize(message.content(), &answers).await;
                progress.on_synthesis_complete(synthesis.fallback);
                debug!(fallback = synthesis.fallback, "Synthesis done");

                self.logger.log(ConversationEvent::new(
                    "synthesis",
                    serde_json::json!({
                        "provider": self.synthesizer.provider_name(),
                        "fallback": synthesis.fallback,
                        "text": &synthesis.text,
                    }),
                ));

                Ok(QueryResult::synthesized(
                    per_provider,
                    synthesis.text,
                    synthesis.fallback,
                ))
            }
        }
    }

    fn log_outcome(&self, request: &ProviderRequest, provider: &str, outcome: &ProviderOutcome) {
        self.logger.log(ConversationEvent::new(
            "provider_outcome",
            serde_json::json!({
                "conversation": request.conversation_id.as_ref().map(|c| c.as_str()),
                "provider": provider,
                "outcome": outcome,
            }),
        ));
    }
}
