//! Synthesis step
//!
//! Merges two provider answers into one by asking a provider to write a
//! combined reply. If that request fails (after retries) or comes back
//! empty, a deterministic labeled concatenation is used instead, so a dual
//! query with two answers always produces a combined text.

use crate::ports::provider_client::{ProviderClient, ProviderRequest, complete_within};
use crate::retry::RetryPolicy;
use relay_domain::{PromptTemplate, ProviderOutcome};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Combined answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesis {
    pub text: String,
    /// `text` is the labeled concatenation rather than a written merge
    pub fallback: bool,
}

/// Writes the combined answer for dual queries
pub struct Synthesizer {
    client: Arc<dyn ProviderClient>,
    retry: RetryPolicy,
    timeout: Duration,
    excerpt_chars: usize,
}

impl Synthesizer {
    pub fn new(
        client: Arc<dyn ProviderClient>,
        retry: RetryPolicy,
        timeout: Duration,
        excerpt_chars: usize,
    ) -> Self {
        Self {
            client,
            retry,
            timeout,
            excerpt_chars,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.client.name()
    }

    /// Merge `answers` (label, text) for `question`.
    ///
    /// Never fails: the concatenation fallback covers every failure.
    pub async fn synthesize(&self, question: &str, answers: &[(&str, &str)]) -> Synthesis {
        let request = ProviderRequest::new(
            PromptTemplate::synthesis_prompt(question, answers, self.excerpt_chars),
            self.timeout,
        )
        .with_system_prompt(PromptTemplate::synthesis_system());

        let client = self.client.as_ref();
        let outcome = self
            .retry
            .execute(client.name(), || complete_within(client, &request))
            .await;

        match outcome {
            ProviderOutcome::Success { text } if !text.trim().is_empty() => {
                info!(provider = client.name(), "Synthesis completed");
                Synthesis {
                    text,
                    fallback: false,
                }
            }
            ProviderOutcome::Success { .. } => {
                warn!(
                    provider = client.name(),
                    "Synthesis returned empty text, using concatenation"
                );
                Self::fallback(answers)
            }
            ProviderOutcome::Failure(failure) => {
                warn!(
                    provider = client.name(),
                    "Synthesis failed ({}), using concatenation", failure
                );
                Self::fallback(answers)
            }
        }
    }

    fn fallback(answers: &[(&str, &str)]) -> Synthesis {
        Synthesis {
            text: PromptTemplate::fallback_concatenation(answers),
            fallback: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::RetryConfig;
    use async_trait::async_trait;
    use relay_domain::FailureKind;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct Scripted {
        outcome: ProviderOutcome,
        calls: AtomicU32,
        last_prompt: Mutex<Option<String>>,
    }

    impl Scripted {
        fn new(outcome: ProviderOutcome) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                calls: AtomicU32::new(0),
                last_prompt: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl ProviderClient for Scripted {
        fn name(&self) -> &str {
            "GPT"
        }

        async fn complete(&self, request: &ProviderRequest) -> ProviderOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(request.prompt.clone());
            self.outcome.clone()
        }
    }

    fn synthesizer(client: Arc<Scripted>) -> Synthesizer {
        Synthesizer::new(
            client,
            RetryPolicy::new(
                RetryConfig::default()
                    .with_base_delay(Duration::from_millis(10))
                    .with_max_delay(Duration::from_millis(50)),
            ),
            Duration::from_secs(5),
            2000,
        )
    }

    const ANSWERS: [(&str, &str); 2] = [("Claude", "alpha"), ("GPT", "beta")];

    #[tokio::test(start_paused = true)]
    async fn test_successful_synthesis() {
        let client = Scripted::new(ProviderOutcome::success("merged"));
        let result = synthesizer(Arc::clone(&client))
            .synthesize("question?", &ANSWERS)
            .await;

        assert_eq!(result.text, "merged");
        assert!(!result.fallback);

        let prompt = client.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("question?"));
        assert!(prompt.contains("alpha"));
        assert!(prompt.contains("beta"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_retries_fall_back() {
        let client = Scripted::new(ProviderOutcome::failure(FailureKind::Unavailable, "down"));
        let result = synthesizer(Arc::clone(&client))
            .synthesize("q", &ANSWERS)
            .await;

        assert!(result.fallback);
        assert!(result.text.contains("alpha"));
        assert!(result.text.contains("beta"));
        assert_eq!(client.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_permanent_failure_falls_back_without_retry() {
        let client = Scripted::new(ProviderOutcome::failure(FailureKind::AuthError, "nope"));
        let result = synthesizer(Arc::clone(&client))
            .synthesize("q", &ANSWERS)
            .await;

        assert_eq!(result.text, "[Claude]\nalpha\n\n[GPT]\nbeta");
        assert!(result.fallback);
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_synthesis_falls_back() {
        let client = Scripted::new(ProviderOutcome::success("   \n"));
        let result = synthesizer(client).synthesize("q", &ANSWERS).await;
        assert!(result.fallback);
    }
}
