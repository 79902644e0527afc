//! CLI command definitions

use clap::{Parser, ValueEnum};
use relay_domain::QueryMode;
use std::path::PathBuf;

/// Which provider(s) a one-shot message goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Only the Anthropic provider
    Claude,
    /// Only the OpenAI provider
    Gpt,
    /// Both providers, answers merged
    Both,
}

impl From<ModeArg> for QueryMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Claude => QueryMode::SingleProviderA,
            ModeArg::Gpt => QueryMode::SingleProviderB,
            ModeArg::Both => QueryMode::Dual,
        }
    }
}

/// Output format for relay results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Combined answer plus each provider's perspective
    Full,
    /// Only the answer text
    Answer,
    /// JSON output
    Json,
}

impl From<OutputFormat> for relay_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => relay_domain::OutputFormat::Full,
            OutputFormat::Answer => relay_domain::OutputFormat::Answer,
            OutputFormat::Json => relay_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for model-relay
#[derive(Parser, Debug)]
#[command(name = "model-relay")]
#[command(author, version, about = "Ask two LLM providers at once and get one combined answer")]
#[command(long_about = r#"
model-relay sends your message to Claude and GPT concurrently.

In dual mode (the default) both answers are merged into one reply; if only
one provider answers you get that answer, marked as degraded.

Configuration files are loaded from (in priority order):
1. MODEL_RELAY_* environment variables
2. --config <path>     Explicit config file
3. ./relay.toml        Project-level config
4. ~/.config/model-relay/config.toml   Global config

Example:
  model-relay "What's the best way to handle errors in Rust?"
  model-relay --mode claude "Explain lifetimes briefly"
  model-relay --chat
"#)]
pub struct Cli {
    /// The message to send (not required in chat mode)
    pub message: Option<String>,

    /// Provider selection for a one-shot message
    #[arg(short, long, value_enum, default_value = "both")]
    pub mode: ModeArg,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Output format (default from config, otherwise "answer")
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Conversation id whose history is used
    #[arg(long, value_name = "ID")]
    pub conversation: Option<String>,

    /// Append a JSONL transcript of every exchange to this file
    #[arg(long, value_name = "PATH")]
    pub log_conversations: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
