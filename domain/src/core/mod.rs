//! Core domain concepts shared across all subdomains.
//!
//! - [`message::UserMessage`] - a validated message to relay to the providers
//! - [`error::InputError`] / [`error::DomainError`] - domain-level errors
//! - [`string`] - UTF-8 safe truncation helpers

pub mod error;
pub mod message;
pub mod string;
