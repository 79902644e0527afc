//! Provider-facing domain types.
//!
//! - [`slot::ProviderSlot`] - which of the two providers a call targets
//! - [`outcome::ProviderOutcome`] - normalized result of a completion request
//! - [`config::ProviderConfig`] - provider settings without a serialization format

pub mod config;
pub mod outcome;
pub mod slot;
