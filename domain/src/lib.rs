//! Domain layer for model-relay
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Relay
//!
//! A user message is relayed to one or both of two providers (slots A and B):
//!
//! - **Single**: one provider answers directly
//! - **Dual**: both providers answer concurrently and a synthesis step merges
//!   the two answers; if only one answers the result is *degraded*
//!
//! ## History
//!
//! Each conversation keeps a bounded FIFO of user/assistant turn pairs that
//! is handed to providers as context.

pub mod config;
pub mod conversation;
pub mod core;
pub mod orchestration;
pub mod prompt;
pub mod provider;

// Re-export commonly used types
pub use config::OutputFormat;
pub use conversation::{
    entities::{ConversationId, Role, Turn},
    window::HistoryWindow,
};
pub use core::{
    error::{DomainError, InputError},
    message::UserMessage,
};
pub use orchestration::{
    mode::QueryMode,
    value_objects::{ProviderResponse, QueryResult},
};
pub use prompt::PromptTemplate;
pub use provider::{
    config::{AnthropicProviderConfig, OpenAiProviderConfig, ProviderConfig},
    outcome::{FailureKind, ProviderFailure, ProviderOutcome},
    slot::ProviderSlot,
};
