//! Provider outcome value objects
//!
//! Every provider call, whatever service it talks to, ends in a
//! [`ProviderOutcome`]. Failures are normalized into a small set of
//! [`FailureKind`]s so retry and degradation logic never has to know which
//! upstream produced them.

use serde::{Deserialize, Serialize};

/// Normalized failure classes shared by all providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Upstream throttled the request (HTTP 429)
    RateLimited,
    /// Credentials missing or rejected
    AuthError,
    /// No response within the per-call timeout
    Timeout,
    /// Upstream unreachable or failing (5xx, connection errors)
    Unavailable,
    /// Request rejected as invalid, or the response could not be understood
    Malformed,
}

impl FailureKind {
    /// Transient kinds are worth retrying; the rest are permanent.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FailureKind::RateLimited | FailureKind::Timeout | FailureKind::Unavailable
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::RateLimited => "rate_limited",
            FailureKind::AuthError => "auth_error",
            FailureKind::Timeout => "timeout",
            FailureKind::Unavailable => "unavailable",
            FailureKind::Malformed => "malformed",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A failed provider call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderFailure {
    pub kind: FailureKind,
    /// Whether the retry policy may try again
    pub retriable: bool,
    pub message: String,
}

impl ProviderFailure {
    /// Create a failure whose retriability follows its kind.
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            retriable: kind.is_transient(),
            message: message.into(),
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(FailureKind::RateLimited, message)
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(FailureKind::AuthError, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Timeout, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Unavailable, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Malformed, message)
    }
}

impl std::fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Result of one completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProviderOutcome {
    Success { text: String },
    Failure(ProviderFailure),
}

impl ProviderOutcome {
    pub fn success(text: impl Into<String>) -> Self {
        ProviderOutcome::Success { text: text.into() }
    }

    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        ProviderOutcome::Failure(ProviderFailure::new(kind, message))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProviderOutcome::Success { .. })
    }

    /// True for failures the retry policy should try again
    pub fn is_retriable(&self) -> bool {
        matches!(self, ProviderOutcome::Failure(f) if f.retriable)
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            ProviderOutcome::Success { text } => Some(text),
            ProviderOutcome::Failure(_) => None,
        }
    }

    pub fn as_failure(&self) -> Option<&ProviderFailure> {
        match self {
            ProviderOutcome::Success { .. } => None,
            ProviderOutcome::Failure(f) => Some(f),
        }
    }
}

impl From<ProviderFailure> for ProviderOutcome {
    fn from(failure: ProviderFailure) -> Self {
        ProviderOutcome::Failure(failure)
    }
}
