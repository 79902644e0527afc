//! Query mode value object

use crate::core::error::DomainError;
use crate::provider::slot::ProviderSlot;
use serde::{Deserialize, Serialize};

/// Which provider(s) a message is relayed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
    /// Only the provider in slot A
    SingleProviderA,
    /// Only the provider in slot B
    SingleProviderB,
    /// Both providers, answers merged by synthesis
    Dual,
}

impl QueryMode {
    /// Slots to dispatch to, in slot order
    pub fn slots(&self) -> &'static [ProviderSlot] {
        match self {
            QueryMode::SingleProviderA => &[ProviderSlot::A],
            QueryMode::SingleProviderB => &[ProviderSlot::B],
            QueryMode::Dual => &ProviderSlot::ALL,
        }
    }

    pub fn is_dual(&self) -> bool {
        matches!(self, QueryMode::Dual)
    }

    /// Single-provider mode for a slot
    pub fn single(slot: ProviderSlot) -> Self {
        match slot {
            ProviderSlot::A => QueryMode::SingleProviderA,
            ProviderSlot::B => QueryMode::SingleProviderB,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryMode::SingleProviderA => "a",
            QueryMode::SingleProviderB => "b",
            QueryMode::Dual => "dual",
        }
    }
}

impl Default for QueryMode {
    fn default() -> Self {
        QueryMode::Dual
    }
}

impl std::fmt::Display for QueryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for QueryMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(QueryMode::SingleProviderA),
            "b" => Ok(QueryMode::SingleProviderB),
            "dual" | "both" => Ok(QueryMode::Dual),
            other => Err(DomainError::InvalidMode(other.to_string())),
        }
    }
}
