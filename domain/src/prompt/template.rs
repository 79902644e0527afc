//! Prompt templates for synthesis and its fallback

use crate::core::string::truncate;

/// Templates for the synthesis step
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the synthesis request
    pub fn synthesis_system() -> &'static str {
        r#"You combine answers written by two different assistants into one reply.
Keep the strongest points of each, reconcile contradictions by favoring the better-supported position,
and answer the user's question directly and concisely.
Do not mention that the reply was assembled from several sources."#
    }

    /// User prompt for the synthesis request.
    ///
    /// Each answer is cut to `excerpt_chars` characters so two long answers
    /// cannot blow the synthesis request past the provider's context limit.
    pub fn synthesis_prompt(
        question: &str,
        answers: &[(&str, &str)],
        excerpt_chars: usize,
    ) -> String {
        let mut prompt = format!("User question:\n{}\n", question);

        for (label, text) in answers {
            prompt.push_str(&format!(
                "\n--- Answer from {} ---\n{}\n",
                label,
                truncate(text, excerpt_chars)
            ));
        }

        prompt.push_str(
            r#"
Write a single answer that:
1. Combines the strongest points from both answers
2. Resolves any contradictions thoughtfully
3. Is clear, concise and addresses the question directly

Answer:"#,
        );

        prompt
    }

    /// Deterministic stand-in used when the synthesis request fails.
    ///
    /// Every answer appears in full under its label, in the order given.
    pub fn fallback_concatenation(answers: &[(&str, &str)]) -> String {
        answers
            .iter()
            .map(|(label, text)| format!("[{}]\n{}", label, text.trim()))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesis_prompt_format() {
        let prompt = PromptTemplate::synthesis_prompt(
            "What is Rust?",
            &[("Claude", "A systems language."), ("GPT", "Memory safe.")],
            2000,
        );
        assert!(prompt.contains("What is Rust?"));
        assert!(prompt.contains("--- Answer from Claude ---"));
        assert!(prompt.contains("Memory safe."));
        assert!(prompt.ends_with("Answer:"));
    }

    #[test]
    fn test_synthesis_prompt_truncates_answers() {
        let long = "x".repeat(50);
        let prompt = PromptTemplate::synthesis_prompt("q", &[("A", long.as_str()), ("B", "short")], 10);
        assert!(prompt.contains("xxxxxxx..."));
        assert!(!prompt.contains(&long));
    }

    #[test]
    fn test_fallback_contains_both_answers() {
        let text = PromptTemplate::fallback_concatenation(&[("Claude", "A"), ("GPT", "B")]);
        assert_eq!(text, "[Claude]\nA\n\n[GPT]\nB");
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let answers = [("Claude", "first"), ("GPT", "second")];
        assert_eq!(
            PromptTemplate::fallback_concatenation(&answers),
            PromptTemplate::fallback_concatenation(&answers)
        );
    }
}
