//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for relay results
///
/// This is a domain concept representing how the output should be formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Synthesized answer followed by each provider's perspective
    Full,
    /// Only the visible answer (default)
    Answer,
    /// JSON output
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Answer
    }
}
