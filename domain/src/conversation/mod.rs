//! Conversation domain.
//!
//! - [`entities::ConversationId`] - key of one ongoing exchange
//! - [`entities::Turn`] - a single user or assistant message
//! - [`window::HistoryWindow`] - bounded FIFO of turn pairs

pub mod entities;
pub mod window;
