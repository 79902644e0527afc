//! Application-level configuration.
//!
//! - [`RelayParams`] - timeouts, retry, history and synthesis settings for the relay

pub mod relay_params;

pub use relay_params::RelayParams;
