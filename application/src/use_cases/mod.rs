//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod relay_message;
pub mod synthesize;
