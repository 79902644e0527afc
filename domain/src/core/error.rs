//! Domain error types

use thiserror::Error;

/// Rejection of a user message before any provider is contacted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Message is empty")]
    Empty,

    #[error("Message is too long ({length} characters, maximum is {max})")]
    TooLong { length: usize, max: usize },
}

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("Invalid query mode: {0}")]
    InvalidMode(String),

    #[error("Invalid provider slot: {0}")]
    InvalidSlot(String),
}

impl DomainError {
    /// Check if this error was caused by the user's message itself
    pub fn is_input_error(&self) -> bool {
        matches!(self, DomainError::InvalidInput(_))
    }
}
