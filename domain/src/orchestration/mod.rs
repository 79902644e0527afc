//! Orchestration domain - how a message is dispatched and what comes back.
//!
//! - [`mode::QueryMode`] - single provider or dual dispatch
//! - [`value_objects::QueryResult`] - per-provider outcomes, synthesis, degradation

pub mod mode;
pub mod value_objects;
