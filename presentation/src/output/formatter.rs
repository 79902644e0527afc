//! Output formatter trait

use relay_domain::{OutputFormat, QueryResult};

/// Trait for formatting relay results
pub trait OutputFormatter {
    /// Combined answer plus every provider's perspective
    fn format_full(&self, result: &QueryResult) -> String;

    /// Format as JSON
    fn format_json(&self, result: &QueryResult) -> String;

    /// Only the text the user would see
    fn format_answer(&self, result: &QueryResult) -> String;

    /// Dispatch on the configured format
    fn render(&self, format: OutputFormat, result: &QueryResult) -> String {
        match format {
            OutputFormat::Full => self.format_full(result),
            OutputFormat::Answer => self.format_answer(result),
            OutputFormat::Json => self.format_json(result),
        }
    }
}
