//! CLI entrypoint for model-relay
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use relay_application::RelayMessageUseCase;
use relay_application::ports::progress::{NoProgress, ProgressNotifier};
use relay_domain::{ConversationId, QueryMode};
use relay_infrastructure::{ConfigLoader, FileConfig, JsonlConversationLogger, build_providers};
use relay_presentation::{
    ChatRepl, Cli, ConsoleFormatter, OutputConfig, OutputFormatter, ProgressReporter, ReplConfig,
    SimpleProgress,
};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(ExitCode::SUCCESS);
    }

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let issues = config.validate();
    if !issues.is_empty() {
        let listed: Vec<String> = issues.iter().map(|issue| format!("  - {}", issue)).collect();
        bail!("Invalid configuration:\n{}", listed.join("\n"));
    }

    let _log_guard = init_logging(&cli, &config);

    info!("Starting model-relay");

    let output = OutputConfig {
        format: cli
            .output
            .map(Into::into)
            .or(config.output.format)
            .unwrap_or_default(),
        color: config.output.color && !cli.no_color,
    };
    output.apply_color();

    // === Dependency Injection ===
    let providers = build_providers(&config.providers.to_provider_config())?;
    let mut use_case = RelayMessageUseCase::new(providers, config.relay.to_relay_params());

    let transcript = cli
        .log_conversations
        .clone()
        .or_else(|| config.logging.conversation_log.as_deref().map(PathBuf::from));
    if let Some(path) = transcript {
        match JsonlConversationLogger::new(&path) {
            Some(logger) => use_case = use_case.with_conversation_logger(Arc::new(logger)),
            None => warn!(path = %path.display(), "Conversation log disabled"),
        }
    }

    let conversation = cli
        .conversation
        .clone()
        .unwrap_or_else(|| config.repl.conversation.clone());

    // Chat mode
    if cli.chat {
        let repl = ReplConfig {
            show_progress: config.repl.show_progress && !cli.quiet,
            history_file: config
                .repl
                .history_file
                .as_deref()
                .map(ReplConfig::expand_path)
                .or_else(ReplConfig::default_history_file),
            conversation,
        };
        ChatRepl::new(use_case, output, repl).run().await?;
        return Ok(ExitCode::SUCCESS);
    }

    // One-shot mode - message is required
    let Some(message) = cli.message.as_deref() else {
        bail!("A message is required. Use --chat for interactive mode.");
    };

    let progress: Box<dyn ProgressNotifier> = if cli.quiet {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    let mode: QueryMode = cli.mode.into();
    let result = use_case
        .handle_with_progress(
            &ConversationId::new(conversation),
            message,
            mode,
            progress.as_ref(),
        )
        .await;

    match result {
        Ok(result) => {
            println!("{}", ConsoleFormatter.render(output.format, &result));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", ConsoleFormatter::format_error(&e));
            Ok(if e.is_input_error() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

/// Console logging on stderr, plus a daily file when `logging.directory` is set.
///
/// The returned guard flushes the file writer and must live until exit.
fn init_logging(cli: &Cli, config: &FileConfig) -> Option<WorkerGuard> {
    let level = match cli.verbose {
        0 => config.logging.level.as_deref().unwrap_or("warn"),
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = || EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));

    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter());

    let (file, guard) = match config.logging.directory.as_deref() {
        Some(dir) => {
            let appender =
                tracing_appender::rolling::daily(ReplConfig::expand_path(dir), "model-relay.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(filter());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry().with(console).with(file).init();

    guard
}
