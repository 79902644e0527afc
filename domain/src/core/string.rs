//! String utilities for the domain layer.

const ELLIPSIS: &str = "...";

/// Truncate a string to at most `max_chars` characters, ending with `...`
/// when anything was cut.
///
/// Counts characters rather than bytes so multi-byte text is never split
/// mid-character and limits match what a user would count.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut out: String = s.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Short single-line preview of a message, for log lines.
pub fn preview(s: &str, max_chars: usize) -> String {
    let flat = s.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate(&flat, max_chars)
}
