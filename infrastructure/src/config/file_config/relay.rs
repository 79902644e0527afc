//! Relay configuration from TOML (`[relay]` section)

use relay_application::{RelayParams, RetryConfig};
use relay_domain::ProviderSlot;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw relay configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRelayConfig {
    /// Per-call deadline in seconds
    pub timeout_seconds: u64,
    /// Attempts per provider call, first one included
    pub max_attempts: u32,
    /// Backoff base delay in milliseconds
    pub base_delay_ms: u64,
    /// Backoff cap in milliseconds
    pub max_delay_ms: u64,
    /// User/assistant pairs kept per conversation
    pub max_history_pairs: usize,
    /// Longest accepted message in characters
    pub max_input_chars: usize,
    /// Slot that writes the synthesis: "a"/"anthropic" or "b"/"openai"
    pub synthesis_provider: String,
    /// Per-answer excerpt length inside the synthesis prompt
    pub synthesis_excerpt_chars: usize,
}

impl Default for FileRelayConfig {
    fn default() -> Self {
        let params = RelayParams::default();
        Self {
            timeout_seconds: params.timeout.as_secs(),
            max_attempts: params.retry.max_attempts,
            base_delay_ms: params.retry.base_delay.as_millis() as u64,
            max_delay_ms: params.retry.max_delay.as_millis() as u64,
            max_history_pairs: params.max_history_pairs,
            max_input_chars: params.max_input_chars,
            synthesis_provider: "openai".to_string(),
            synthesis_excerpt_chars: params.synthesis_excerpt_chars,
        }
    }
}

impl FileRelayConfig {
    /// Resolve `synthesis_provider` to a slot; accepts slot letters and provider names.
    pub fn parse_synthesis_provider(&self) -> Option<ProviderSlot> {
        match self.synthesis_provider.trim().to_ascii_lowercase().as_str() {
            "a" | "anthropic" | "claude" => Some(ProviderSlot::A),
            "b" | "openai" | "gpt" => Some(ProviderSlot::B),
            _ => None,
        }
    }

    /// Convert to application parameters.
    ///
    /// An unknown synthesis provider falls back to the default slot;
    /// [`FileConfig::validate`](super::FileConfig::validate) reports it.
    pub fn to_relay_params(&self) -> RelayParams {
        let defaults = RelayParams::default();
        RelayParams {
            timeout: Duration::from_secs(self.timeout_seconds),
            retry: RetryConfig {
                max_attempts: self.max_attempts,
                base_delay: Duration::from_millis(self.base_delay_ms),
                max_delay: Duration::from_millis(self.max_delay_ms),
            },
            max_history_pairs: self.max_history_pairs,
            max_input_chars: self.max_input_chars,
            synthesis_provider: self
                .parse_synthesis_provider()
                .unwrap_or(defaults.synthesis_provider),
            synthesis_excerpt_chars: self.synthesis_excerpt_chars,
        }
    }
}
