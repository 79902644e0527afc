//! Interactive chat module
//!
//! Provides a readline-based interactive chat interface for the relay.

mod command;
mod repl;

pub use command::ChatCommand;
pub use repl::ChatRepl;
