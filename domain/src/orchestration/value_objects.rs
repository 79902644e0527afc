//! Orchestration value objects - immutable result types for relayed messages.
//!
//! - [`ProviderResponse`] - One provider's outcome, tagged with its display name
//! - [`QueryResult`] - Complete result of relaying one message

use super::mode::QueryMode;
use crate::provider::outcome::ProviderOutcome;
use crate::provider::slot::ProviderSlot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of one provider for one message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// Display name of the provider (e.g. "Claude")
    pub provider: String,
    pub outcome: ProviderOutcome,
}

impl ProviderResponse {
    pub fn new(provider: impl Into<String>, outcome: ProviderOutcome) -> Self {
        Self {
            provider: provider.into(),
            outcome,
        }
    }
}

/// Complete result of relaying one message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    pub mode: QueryMode,
    /// Outcome of every provider that was dispatched to
    pub per_provider: BTreeMap<ProviderSlot, ProviderResponse>,
    /// Combined answer (dual mode with both providers successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synthesized: Option<String>,
    /// `synthesized` is the labeled concatenation, not a model-written merge
    #[serde(default)]
    pub synthesis_fallback: bool,
    /// Dual mode was requested but only one provider answered
    pub degraded: bool,
}

impl QueryResult {
    /// Result of a single-provider query.
    pub fn single(mode: QueryMode, slot: ProviderSlot, response: ProviderResponse) -> Self {
        Self {
            mode,
            per_provider: BTreeMap::from([(slot, response)]),
            synthesized: None,
            synthesis_fallback: false,
            degraded: false,
        }
    }

    /// Dual-mode result where both providers answered and were merged.
    pub fn synthesized(
        per_provider: BTreeMap<ProviderSlot, ProviderResponse>,
        synthesized: impl Into<String>,
        fallback: bool,
    ) -> Self {
        Self {
            mode: QueryMode::Dual,
            per_provider,
            synthesized: Some(synthesized.into()),
            synthesis_fallback: fallback,
            degraded: false,
        }
    }

    /// Dual-mode result where only one provider answered.
    pub fn degraded(per_provider: BTreeMap<ProviderSlot, ProviderResponse>) -> Self {
        Self {
            mode: QueryMode::Dual,
            per_provider,
            synthesized: None,
            synthesis_fallback: false,
            degraded: true,
        }
    }

    /// Outcome of the provider in `slot`, if it was dispatched to
    pub fn outcome(&self, slot: ProviderSlot) -> Option<&ProviderOutcome> {
        self.per_provider.get(&slot).map(|r| &r.outcome)
    }

    /// The text the user sees and that is stored in history.
    ///
    /// The synthesized answer when present, otherwise the first successful
    /// provider's text.
    pub fn visible_text(&self) -> Option<&str> {
        self.synthesized.as_deref().or_else(|| {
            self.per_provider
                .values()
                .find_map(|response| response.outcome.text())
        })
    }

    /// Iterate over successful provider responses in slot order
    pub fn successful_responses(&self) -> impl Iterator<Item = (&ProviderSlot, &ProviderResponse)> {
        self.per_provider
            .iter()
            .filter(|(_, r)| r.outcome.is_success())
    }

    /// Iterate over failed provider responses in slot order
    pub fn failed_responses(&self) -> impl Iterator<Item = (&ProviderSlot, &ProviderResponse)> {
        self.per_provider
            .iter()
            .filter(|(_, r)| !r.outcome.is_success())
    }
}
