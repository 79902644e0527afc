//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Filter directive used when no `-v` flag is given (e.g. "info", "relay_application=debug")
    pub level: Option<String>,
    /// Directory for daily-rolling operation logs; stderr only when unset
    pub directory: Option<String>,
    /// JSONL conversation transcript path
    pub conversation_log: Option<String>,
}
