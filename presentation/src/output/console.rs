//! Console output formatter for relay results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use relay_application::RelayError;
use relay_domain::{ProviderOutcome, QueryResult};

/// Formats relay results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete result
    pub fn format(result: &QueryResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Relay Results"));
        output.push('\n');

        if let Some(synthesized) = &result.synthesized {
            output.push_str(&Self::section_header("Combined Answer"));
            if result.synthesis_fallback {
                output.push_str(&format!(
                    "{}\n",
                    "(synthesis unavailable, showing both answers)".yellow()
                ));
            }
            output.push_str(&format!("\n{}\n", synthesized));
        } else if result.degraded {
            output.push_str(&format!("\n{}\n", Self::degraded_notice(result).yellow()));
        }

        let title = if result.per_provider.len() > 1 {
            "Perspectives"
        } else {
            "Answer"
        };
        output.push_str(&Self::section_header(title));

        for response in result.per_provider.values() {
            match &response.outcome {
                ProviderOutcome::Success { text } => {
                    output.push_str(&format!(
                        "\n{}\n{}\n",
                        format!("── {} ──", response.provider).yellow().bold(),
                        text
                    ));
                }
                ProviderOutcome::Failure(failure) => {
                    output.push_str(&format!(
                        "\n{}\nError ({}): {}\n",
                        format!("── {} ──", response.provider).red().bold(),
                        failure.kind,
                        failure.message
                    ));
                }
            }
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(result: &QueryResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Visible text only, with a one-line notice for degraded results
    pub fn format_answer(result: &QueryResult) -> String {
        let text = result.visible_text().unwrap_or_default();
        if result.degraded {
            format!("{}\n\n{}", Self::degraded_notice(result).dimmed(), text)
        } else {
            text.to_string()
        }
    }

    /// Format a failed relay for stderr
    pub fn format_error(error: &RelayError) -> String {
        match error {
            RelayError::Input(e) => format!("{} {}", "Rejected:".yellow().bold(), e),
            RelayError::ProviderFailed { provider, failure } => format!(
                "{} {} could not answer ({}): {}",
                "Error:".red().bold(),
                provider,
                failure.kind,
                failure.message
            ),
            RelayError::AllProvidersFailed { failures } => {
                let mut output = format!("{} no provider could answer", "Error:".red().bold());
                for (provider, failure) in failures {
                    output.push_str(&format!(
                        "\n  {} {} ({}): {}",
                        "x".red(),
                        provider,
                        failure.kind,
                        failure.message
                    ));
                }
                output
            }
        }
    }

    fn degraded_notice(result: &QueryResult) -> String {
        let answered: Vec<&str> = result
            .successful_responses()
            .map(|(_, r)| r.provider.as_str())
            .collect();
        let failed: Vec<&str> = result
            .failed_responses()
            .map(|(_, r)| r.provider.as_str())
            .collect();
        format!(
            "Only {} answered ({} unavailable)",
            answered.join(", "),
            failed.join(", ")
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_full(&self, result: &QueryResult) -> String {
        Self::format(result)
    }

    fn format_json(&self, result: &QueryResult) -> String {
        Self::format_json(result)
    }

    fn format_answer(&self, result: &QueryResult) -> String {
        Self::format_answer(result)
    }
}
