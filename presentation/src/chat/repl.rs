//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::chat::ChatCommand;
use crate::config::{OutputConfig, ReplConfig};
use crate::output::console::ConsoleFormatter;
use crate::output::formatter::OutputFormatter;
use crate::progress::reporter::{ProgressReporter, SimpleProgress};
use colored::Colorize;
use relay_application::ports::progress::{NoProgress, ProgressNotifier};
use relay_application::RelayMessageUseCase;
use relay_domain::{ConversationId, ProviderSlot, QueryMode};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::io::IsTerminal;

/// Interactive chat REPL
pub struct ChatRepl {
    use_case: RelayMessageUseCase,
    conversation: ConversationId,
    output: OutputConfig,
    repl: ReplConfig,
}

impl ChatRepl {
    pub fn new(use_case: RelayMessageUseCase, output: OutputConfig, repl: ReplConfig) -> Self {
        Self {
            conversation: ConversationId::new(repl.conversation.clone()),
            use_case,
            output,
            repl,
        }
    }

    /// Run the interactive REPL until `/quit` or EOF
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(ref path) = self.repl.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            match rl.readline(">>> ") {
                Ok(line) => {
                    let command = ChatCommand::parse(&line);
                    if command != ChatCommand::Empty {
                        let _ = rl.add_history_entry(line.trim());
                    }
                    if !self.dispatch(command).await {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = self.repl.history_file {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    /// Act on one parsed line. Returns false when the session should end.
    async fn dispatch(&self, command: ChatCommand<'_>) -> bool {
        match command {
            ChatCommand::Empty => {}
            ChatCommand::Message { mode, text } => self.relay(mode, text).await,
            ChatCommand::Reset => {
                self.use_case.reset(&self.conversation).await;
                println!("{}", "History cleared.".green());
            }
            ChatCommand::History => {
                let turns = self.use_case.history().get(&self.conversation).await;
                println!(
                    "{} of {} exchanges stored.",
                    turns.len() / 2,
                    self.use_case.params().max_history_pairs
                );
            }
            ChatCommand::Help => self.print_help(),
            ChatCommand::Quit => {
                println!("Bye!");
                return false;
            }
            ChatCommand::Usage(usage) => println!("Usage: {}", usage),
            ChatCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        true
    }

    async fn relay(&self, mode: QueryMode, text: &str) {
        let progress: Box<dyn ProgressNotifier> = if !self.repl.show_progress {
            Box::new(NoProgress)
        } else if std::io::stderr().is_terminal() {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(SimpleProgress)
        };

        let result = self
            .use_case
            .handle_with_progress(&self.conversation, text, mode, progress.as_ref())
            .await;

        match result {
            Ok(result) => {
                println!();
                println!("{}", ConsoleFormatter.render(self.output.format, &result));
                println!();
            }
            Err(e) => eprintln!("{}", ConsoleFormatter::format_error(&e)),
        }
    }

    fn print_welcome(&self) {
        let a = self.use_case.provider_name(ProviderSlot::A);
        let b = self.use_case.provider_name(ProviderSlot::B);

        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│           Model Relay - Chat Mode           │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Providers: {} and {}", a.bold(), b.bold());
        println!("Plain messages go to both and are merged into one answer.");
        self.print_help();
    }

    fn print_help(&self) {
        println!();
        println!("Commands:");
        println!("  /claude <message> - Ask {} only", self.use_case.provider_name(ProviderSlot::A));
        println!("  /gpt <message>    - Ask {} only", self.use_case.provider_name(ProviderSlot::B));
        println!("  /both <message>   - Ask both and synthesize");
        println!("  /reset            - Forget this conversation");
        println!("  /history          - Show stored history size");
        println!("  /help, /h, /?     - Show this help");
        println!("  /quit, /exit, /q  - Exit chat");
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use relay_application::{ProviderClient, ProviderRequest, ProviderSet, RelayParams};
    use relay_domain::ProviderOutcome;
    use std::sync::Arc;

    struct Echo(&'static str);

    #[async_trait]
    impl ProviderClient for Echo {
        fn name(&self) -> &str {
            self.0
        }

        async fn complete(&self, request: &ProviderRequest) -> ProviderOutcome {
            ProviderOutcome::success(format!("{}: {}", self.0, request.prompt))
        }
    }

    fn repl() -> ChatRepl {
        let providers = ProviderSet::new(Arc::new(Echo("Claude")), Arc::new(Echo("GPT")));
        let use_case = RelayMessageUseCase::new(providers, RelayParams::default());
        let repl = ReplConfig {
            show_progress: false,
            history_file: None,
            conversation: "test".to_string(),
        };
        ChatRepl::new(use_case, OutputConfig::default(), repl)
    }

    #[tokio::test]
    async fn test_message_then_reset() {
        let repl = repl();
        assert!(repl.dispatch(ChatCommand::parse("/claude hello")).await);
        assert_eq!(
            repl.use_case.history().get(&repl.conversation).await.len(),
            2
        );

        assert!(repl.dispatch(ChatCommand::parse("/reset")).await);
        assert!(repl.use_case.history().get(&repl.conversation).await.is_empty());
    }

    #[tokio::test]
    async fn test_quit_ends_session() {
        let repl = repl();
        assert!(!repl.dispatch(ChatCommand::Quit).await);
        assert!(repl.dispatch(ChatCommand::parse("/nope")).await);
        assert!(repl.dispatch(ChatCommand::parse("/gpt")).await);
    }
}
