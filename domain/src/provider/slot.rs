//! Provider slot value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// One of the two provider positions the relay dispatches to.
///
/// The orchestrator only ever reasons about slots; which upstream service sits
/// behind a slot is decided when the clients are wired together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderSlot {
    A,
    B,
}

impl ProviderSlot {
    pub const ALL: [ProviderSlot; 2] = [ProviderSlot::A, ProviderSlot::B];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderSlot::A => "a",
            ProviderSlot::B => "b",
        }
    }

    /// The other slot
    pub fn other(&self) -> ProviderSlot {
        match self {
            ProviderSlot::A => ProviderSlot::B,
            ProviderSlot::B => ProviderSlot::A,
        }
    }
}

impl Default for ProviderSlot {
    /// Synthesis runs on slot B unless configured otherwise
    fn default() -> Self {
        ProviderSlot::B
    }
}

impl std::fmt::Display for ProviderSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderSlot {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(ProviderSlot::A),
            "b" => Ok(ProviderSlot::B),
            other => Err(DomainError::InvalidSlot(other.to_string())),
        }
    }
}
