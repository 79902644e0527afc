//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod logging;
mod output;
mod providers;
mod relay;
mod repl;

pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use providers::{FileAnthropicConfig, FileOpenAiConfig, FileProvidersConfig};
pub use relay::FileRelayConfig;
pub use repl::FileReplConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("relay.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("relay.max_attempts cannot be 0")]
    InvalidMaxAttempts,

    #[error("relay.max_history_pairs cannot be 0")]
    InvalidHistoryPairs,

    #[error("relay.max_input_chars cannot be 0")]
    InvalidInputLength,

    #[error("relay.base_delay_ms ({base_ms}) exceeds relay.max_delay_ms ({max_ms})")]
    InvalidBackoff { base_ms: u64, max_ms: u64 },

    #[error("providers.{0}.model cannot be empty")]
    EmptyModelName(&'static str),

    #[error("unknown relay.synthesis_provider '{0}' (expected anthropic or openai)")]
    UnknownSynthesisProvider(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Orchestration settings
    pub relay: FileRelayConfig,
    /// Provider endpoints and credentials
    pub providers: FileProvidersConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Logging settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, returning every problem found.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let relay = &self.relay;

        if relay.timeout_seconds == 0 {
            errors.push(ConfigValidationError::InvalidTimeout);
        }
        if relay.max_attempts == 0 {
            errors.push(ConfigValidationError::InvalidMaxAttempts);
        }
        if relay.max_history_pairs == 0 {
            errors.push(ConfigValidationError::InvalidHistoryPairs);
        }
        if relay.max_input_chars == 0 {
            errors.push(ConfigValidationError::InvalidInputLength);
        }
        if relay.base_delay_ms > relay.max_delay_ms {
            errors.push(ConfigValidationError::InvalidBackoff {
                base_ms: relay.base_delay_ms,
                max_ms: relay.max_delay_ms,
            });
        }
        if relay.parse_synthesis_provider().is_none() {
            errors.push(ConfigValidationError::UnknownSynthesisProvider(
                relay.synthesis_provider.clone(),
            ));
        }

        if self.providers.anthropic.model.trim().is_empty() {
            errors.push(ConfigValidationError::EmptyModelName("anthropic"));
        }
        if self.providers.openai.model.trim().is_empty() {
            errors.push(ConfigValidationError::EmptyModelName("openai"));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_domain::OutputFormat;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[relay]
timeout_seconds = 30
max_history_pairs = 5

[providers.anthropic]
model = "claude-3-opus-20240229"
api_key_env = "MY_CLAUDE_KEY"

[output]
format = "full"
color = false

[repl]
show_progress = false
history_file = "~/.local/share/model-relay/history.txt"

[logging]
level = "debug"
conversation_log = "/tmp/relay.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.relay.timeout_seconds, 30);
        assert_eq!(config.relay.max_history_pairs, 5);
        assert_eq!(config.relay.max_attempts, 3);
        assert_eq!(config.providers.anthropic.model, "claude-3-opus-20240229");
        assert_eq!(config.providers.anthropic.api_key_env, "MY_CLAUDE_KEY");
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);
        assert!(!config.repl.show_progress);
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert!(config.output.color);
        assert!(config.repl.show_progress);
        assert!(config.logging.conversation_log.is_none());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let toml_str = r#"
[relay]
timeout_seconds = 0
max_attempts = 0
max_history_pairs = 0
max_input_chars = 0
base_delay_ms = 5000
max_delay_ms = 100
synthesis_provider = "gemini"

[providers.openai]
model = " "
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let errors = config.validate();
        assert_eq!(
            errors,
            vec![
                ConfigValidationError::InvalidTimeout,
                ConfigValidationError::InvalidMaxAttempts,
                ConfigValidationError::InvalidHistoryPairs,
                ConfigValidationError::InvalidInputLength,
                ConfigValidationError::InvalidBackoff {
                    base_ms: 5000,
                    max_ms: 100
                },
                ConfigValidationError::UnknownSynthesisProvider("gemini".to_string()),
                ConfigValidationError::EmptyModelName("openai"),
            ]
        );
    }
}
