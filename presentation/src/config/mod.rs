//! Presentation-level configuration
//!
//! Resolved settings for output formatting and REPL behavior.

use relay_domain::OutputFormat;
use std::path::PathBuf;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
        }
    }
}

impl OutputConfig {
    /// Apply the color setting to the whole process
    pub fn apply_color(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplConfig {
    /// Show progress indicators
    pub show_progress: bool,
    /// Path to line-editor history file
    pub history_file: Option<PathBuf>,
    /// Conversation id for the session
    pub conversation: String,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: Self::default_history_file(),
            conversation: "local".to_string(),
        }
    }
}

impl ReplConfig {
    /// `$XDG_DATA_HOME/model-relay/history.txt`
    pub fn default_history_file() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("model-relay").join("history.txt"))
    }

    /// Expand a leading `~/` against the home directory.
    pub fn expand_path(path: &str) -> PathBuf {
        match (path.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(path),
        }
    }
}
