//! Application layer for model-relay
//!
//! This crate contains the relay use case, its retry policy and history
//! store, and the port definitions adapters implement.
//! It depends only on the domain layer.

pub mod config;
pub mod history_store;
pub mod ports;
pub mod retry;
pub mod use_cases;

// Re-export commonly used types
pub use config::RelayParams;
pub use history_store::{ConversationGuard, HistoryStore};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    progress::{NoProgress, ProgressNotifier},
    provider_client::{ProviderClient, ProviderRequest, ProviderSet, complete_within},
};
pub use retry::{RetryConfig, RetryPolicy};
pub use use_cases::relay_message::{RelayError, RelayMessageUseCase};
pub use use_cases::synthesize::{Synthesis, Synthesizer};
