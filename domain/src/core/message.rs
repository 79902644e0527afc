//! User message value object

use super::error::InputError;
use serde::{Deserialize, Serialize};

/// A validated message from the user (Value Object)
///
/// Construction normalizes the raw text (surrounding whitespace trimmed,
/// NUL bytes removed) and rejects empty or over-long input, so holding a
/// `UserMessage` means it is safe to send to a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMessage {
    content: String,
}

impl UserMessage {
    /// Validate raw text against a maximum length measured in characters.
    pub fn parse(raw: &str, max_chars: usize) -> Result<Self, InputError> {
        let content: String = raw.trim().chars().filter(|c| *c != '\0').collect();

        if content.is_empty() {
            return Err(InputError::Empty);
        }

        let length = content.chars().count();
        if length > max_chars {
            return Err(InputError::TooLong {
                length,
                max: max_chars,
            });
        }

        Ok(Self { content })
    }

    /// Get the message content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for UserMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}
