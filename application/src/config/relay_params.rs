//! Relay parameters - orchestration control.
//!
//! [`RelayParams`] groups the static parameters that control
//! [`RelayMessageUseCase`](crate::use_cases::relay_message::RelayMessageUseCase).

use crate::retry::RetryConfig;
use relay_domain::ProviderSlot;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Orchestration control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayParams {
    /// Deadline for each individual provider call.
    pub timeout: Duration,
    /// Retry policy applied to every provider call, synthesis included.
    pub retry: RetryConfig,
    /// User/assistant pairs kept per conversation.
    pub max_history_pairs: usize,
    /// Longest accepted user message, in characters.
    pub max_input_chars: usize,
    /// Provider that writes the synthesized answer in dual mode.
    pub synthesis_provider: ProviderSlot,
    /// Each answer is cut to this many characters inside the synthesis prompt.
    pub synthesis_excerpt_chars: usize,
}

impl Default for RelayParams {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            retry: RetryConfig::default(),
            max_history_pairs: 10,
            max_input_chars: 4000,
            synthesis_provider: ProviderSlot::B,
            synthesis_excerpt_chars: 2000,
        }
    }
}

impl RelayParams {
    // ==================== Builder Methods ====================

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_max_history_pairs(mut self, max: usize) -> Self {
        self.max_history_pairs = max;
        self
    }

    pub fn with_max_input_chars(mut self, max: usize) -> Self {
        self.max_input_chars = max;
        self
    }

    pub fn with_synthesis_provider(mut self, slot: ProviderSlot) -> Self {
        self.synthesis_provider = slot;
        self
    }

    pub fn with_synthesis_excerpt_chars(mut self, chars: usize) -> Self {
        self.synthesis_excerpt_chars = chars;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = RelayParams::default();
        assert_eq!(params.timeout, Duration::from_secs(60));
        assert_eq!(params.retry.max_attempts, 3);
        assert_eq!(params.max_history_pairs, 10);
        assert_eq!(params.max_input_chars, 4000);
        assert_eq!(params.synthesis_provider, ProviderSlot::B);
        assert_eq!(params.synthesis_excerpt_chars, 2000);
    }

    #[test]
    fn test_builder() {
        let params = RelayParams::default()
            .with_timeout(Duration::from_secs(5))
            .with_max_history_pairs(2)
            .with_synthesis_provider(ProviderSlot::A);
        assert_eq!(params.timeout, Duration::from_secs(5));
        assert_eq!(params.max_history_pairs, 2);
        assert_eq!(params.synthesis_provider, ProviderSlot::A);
    }
}
