//! Infrastructure layer for model-relay
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: HTTP provider clients, configuration file
//! loading and the JSONL conversation logger.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLoggingConfig, FileOutputConfig,
    FileProvidersConfig, FileRelayConfig, FileReplConfig,
};
pub use logging::JsonlConversationLogger;
pub use providers::{AnthropicClient, OpenAiClient, ProviderSetupError, build_providers};
