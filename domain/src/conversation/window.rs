//! Bounded conversation history.

use super::entities::{Role, Turn};
use serde::{Deserialize, Serialize};

/// Ordered turns of one conversation, capped at `max_pairs` user/assistant pairs.
///
/// Turns are only ever added a pair at a time, so the window always holds an
/// even number of turns alternating user → assistant. When a new pair would
/// exceed the cap the oldest pair is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryWindow {
    turns: Vec<Turn>,
    max_pairs: usize,
}

impl HistoryWindow {
    pub fn new(max_pairs: usize) -> Self {
        Self {
            turns: Vec::new(),
            max_pairs,
        }
    }

    /// Append one exchange and evict the oldest pairs beyond the cap.
    pub fn push_pair(&mut self, user: Turn, assistant: Turn) {
        debug_assert_eq!(user.role(), Role::User);
        debug_assert_eq!(assistant.role(), Role::Assistant);

        self.turns.push(user);
        self.turns.push(assistant);

        let cap = self.max_pairs * 2;
        if self.turns.len() > cap {
            let excess = self.turns.len() - cap;
            self.turns.drain(..excess);
        }
    }

    /// Drop every stored turn
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns (twice the number of pairs)
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn pair_count(&self) -> usize {
        self.turns.len() / 2
    }

    pub fn max_pairs(&self) -> usize {
        self.max_pairs
    }

    /// Iterate over (user, assistant) pairs, oldest first
    pub fn pairs(&self) -> impl Iterator<Item = (&Turn, &Turn)> {
        self.turns.chunks_exact(2).map(|pair| (&pair[0], &pair[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push(window: &mut HistoryWindow, n: usize) {
        window.push_pair(Turn::user(format!("q{n}")), Turn::assistant(format!("a{n}")));
    }

    #[test]
    fn test_new_window_is_empty() {
        let window = HistoryWindow::new(3);
        assert!(window.is_empty());
        assert_eq!(window.pair_count(), 0);
    }

    #[test]
    fn test_push_pair_keeps_order() {
        let mut window = HistoryWindow::new(3);
        push(&mut window, 1);
        push(&mut window, 2);

        let texts: Vec<_> = window.turns().iter().map(|t| t.text()).collect();
        assert_eq!(texts, vec!["q1", "a1", "q2", "a2"]);
    }

    #[test]
    fn test_oldest_pairs_evicted_first() {
        let mut window = HistoryWindow::new(2);
        for n in 1..=5 {
            push(&mut window, n);
            assert!(window.len() <= 4);
        }

        let users: Vec<_> = window.pairs().map(|(u, _)| u.text()).collect();
        assert_eq!(users, vec!["q4", "q5"]);
        assert_eq!(window.pair_count(), 2);
    }

    #[test]
    fn test_cap_holds_for_many_exchanges() {
        for max_pairs in 1..=4 {
            for exchanges in 0..=10 {
                let mut window = HistoryWindow::new(max_pairs);
                for n in 1..=exchanges {
                    push(&mut window, n);
                }
                assert!(window.len() <= 2 * max_pairs);
                assert_eq!(window.pair_count(), exchanges.min(max_pairs));

                // Exactly the most recent pairs, chronological
                let expected: Vec<String> = (1..=exchanges)
                    .skip(exchanges.saturating_sub(max_pairs))
                    .map(|n| format!("q{n}"))
                    .collect();
                let actual: Vec<String> =
                    window.pairs().map(|(u, _)| u.text().to_string()).collect();
                assert_eq!(actual, expected);
            }
        }
    }

    #[test]
    fn test_pairs_alternate_roles() {
        let mut window = HistoryWindow::new(2);
        push(&mut window, 1);
        push(&mut window, 2);
        push(&mut window, 3);
        for (user, assistant) in window.pairs() {
            assert_eq!(user.role(), Role::User);
            assert_eq!(assistant.role(), Role::Assistant);
        }
    }

    #[test]
    fn test_clear() {
        let mut window = HistoryWindow::new(2);
        push(&mut window, 1);
        window.clear();
        assert!(window.is_empty());
        assert_eq!(window.max_pairs(), 2);
    }
}
