//! Progress notification port
//!
//! Defines the interface for reporting progress while a message is relayed.

use relay_domain::QueryMode;

/// Callback for progress updates during a relay
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain log lines, nothing).
pub trait ProgressNotifier: Send + Sync {
    /// Called once the message has been dispatched to `providers`
    fn on_dispatch_start(&self, mode: QueryMode, providers: &[&str]);

    /// Called when a provider's call (including retries) has finished
    fn on_provider_complete(&self, provider: &str, success: bool);

    /// Called when the synthesis request starts
    fn on_synthesis_start(&self, _provider: &str) {}

    /// Called when synthesis is done; `fallback` means the concatenation was used
    fn on_synthesis_complete(&self, _fallback: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_dispatch_start(&self, _mode: QueryMode, _providers: &[&str]) {}
    fn on_provider_complete(&self, _provider: &str, _success: bool) {}
}
