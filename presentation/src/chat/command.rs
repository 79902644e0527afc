//! Chat line parsing

use relay_domain::QueryMode;

/// What one line typed into the chat means
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand<'a> {
    /// Relay `text` using `mode`
    Message { mode: QueryMode, text: &'a str },
    /// Forget this conversation's history
    Reset,
    /// Show how much history is stored
    History,
    Help,
    Quit,
    /// A mode command without a message; carries the usage hint
    Usage(&'static str),
    Unknown(&'a str),
    Empty,
}

impl<'a> ChatCommand<'a> {
    /// Parse one input line. Plain text is a dual-mode message.
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return ChatCommand::Empty;
        }
        if !line.starts_with('/') {
            return ChatCommand::Message {
                mode: QueryMode::Dual,
                text: line,
            };
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        let mode_command = |mode: QueryMode, usage: &'static str| {
            if rest.is_empty() {
                ChatCommand::Usage(usage)
            } else {
                ChatCommand::Message { mode, text: rest }
            }
        };

        match command.to_ascii_lowercase().as_str() {
            "/claude" => mode_command(QueryMode::SingleProviderA, "/claude <message>"),
            "/gpt" => mode_command(QueryMode::SingleProviderB, "/gpt <message>"),
            "/both" => mode_command(QueryMode::Dual, "/both <message>"),
            "/reset" | "/clear" => ChatCommand::Reset,
            "/history" => ChatCommand::History,
            "/help" | "/h" | "/?" | "/start" => ChatCommand::Help,
            "/quit" | "/exit" | "/q" => ChatCommand::Quit,
            _ => ChatCommand::Unknown(command),
        }
    }
}
