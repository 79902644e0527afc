//! Per-conversation history store.
//!
//! Holds one [`HistoryWindow`] per conversation id. Each window sits behind
//! its own async mutex: the relay locks a conversation for the whole
//! read → dispatch → append sequence, so two messages in the same
//! conversation are handled one after the other while different
//! conversations proceed independently.

use relay_domain::{ConversationId, HistoryWindow, Turn};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::debug;

type Slot = Arc<AsyncMutex<HistoryWindow>>;

/// Bounded in-memory history for all conversations
#[derive(Debug)]
pub struct HistoryStore {
    max_pairs: usize,
    conversations: Mutex<HashMap<ConversationId, Slot>>,
}

impl HistoryStore {
    pub fn new(max_pairs: usize) -> Self {
        Self {
            max_pairs,
            conversations: Mutex::new(HashMap::new()),
        }
    }

    pub fn max_pairs(&self) -> usize {
        self.max_pairs
    }

    fn slot(&self, id: &ConversationId) -> Slot {
        let mut map = self
            .conversations
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        map.entry(id.clone())
            .or_insert_with(|| Arc::new(AsyncMutex::new(HistoryWindow::new(self.max_pairs))))
            .clone()
    }

    fn existing(&self, id: &ConversationId) -> Option<Slot> {
        self.conversations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Snapshot of a conversation's turns, oldest first.
    ///
    /// Unknown ids yield an empty history and are not recorded.
    pub async fn get(&self, id: &ConversationId) -> Vec<Turn> {
        match self.existing(id) {
            Some(slot) => slot.lock().await.turns().to_vec(),
            None => Vec::new(),
        }
    }

    /// Append one user/assistant exchange, evicting the oldest beyond the cap.
    pub async fn append(&self, id: &ConversationId, user: Turn, assistant: Turn) {
        self.lock(id).await.append(user, assistant);
    }

    /// Forget a conversation. Unknown ids are a no-op.
    pub async fn reset(&self, id: &ConversationId) {
        if let Some(slot) = self.existing(id) {
            slot.lock().await.clear();
            debug!(conversation = %id, "History reset");
        }
    }

    /// Take exclusive access to a conversation until the guard is dropped.
    pub async fn lock(&self, id: &ConversationId) -> ConversationGuard {
        let window = self.slot(id).lock_owned().await;
        ConversationGuard {
            id: id.clone(),
            window,
        }
    }

    /// Number of conversations seen so far
    pub fn conversation_count(&self) -> usize {
        self.conversations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Exclusive handle on one conversation's history
pub struct ConversationGuard {
    id: ConversationId,
    window: OwnedMutexGuard<HistoryWindow>,
}

impl ConversationGuard {
    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    pub fn snapshot(&self) -> Vec<Turn> {
        self.window.turns().to_vec()
    }

    pub fn append(&mut self, user: Turn, assistant: Turn) {
        self.window.push_pair(user, assistant);
        debug!(
            conversation = %self.id,
            pairs = self.window.pair_count(),
            "History appended"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_domain::Role;
    use std::time::Duration;

    fn id(s: &str) -> ConversationId {
        ConversationId::new(s)
    }

    #[tokio::test]
    async fn test_unknown_conversation_is_empty() {
        let store = HistoryStore::new(3);
        assert!(store.get(&id("nobody")).await.is_empty());
        assert_eq!(store.conversation_count(), 0);
    }

    #[tokio::test]
    async fn test_append_and_cap() {
        let store = HistoryStore::new(2);
        let c = id("c");
        for n in 0..5 {
            store
                .append(&c, Turn::user(format!("q{n}")), Turn::assistant(format!("a{n}")))
                .await;
        }

        let turns = store.get(&c).await;
        let texts: Vec<_> = turns.iter().map(|t| t.text()).collect();
        assert_eq!(texts, ["q3", "a3", "q4", "a4"]);
        assert_eq!(turns[0].role(), Role::User);
        assert_eq!(turns[1].role(), Role::Assistant);
    }

    #[tokio::test]
    async fn test_conversations_are_isolated() {
        let store = HistoryStore::new(5);
        store.append(&id("x"), Turn::user("hi"), Turn::assistant("hello")).await;
        assert_eq!(store.get(&id("x")).await.len(), 2);
        assert!(store.get(&id("y")).await.is_empty());
    }

    #[tokio::test]
    async fn test_reset() {
        let store = HistoryStore::new(5);
        let c = id("c");
        store.append(&c, Turn::user("hi"), Turn::assistant("hello")).await;
        store.reset(&c).await;
        assert!(store.get(&c).await.is_empty());

        // Unknown id: no-op
        store.reset(&id("never")).await;
        assert_eq!(store.conversation_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_lock_serializes_same_conversation() {
        let store = Arc::new(HistoryStore::new(5));
        let c = id("c");

        let mut guard = store.lock(&c).await;

        let waiter = {
            let store = Arc::clone(&store);
            let c = c.clone();
            tokio::spawn(async move { store.lock(&c).await.snapshot().len() })
        };

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!waiter.is_finished());

        guard.append(Turn::user("q"), Turn::assistant("a"));
        drop(guard);

        assert_eq!(waiter.await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_lock_does_not_block_other_conversations() {
        let store = HistoryStore::new(5);
        let _a = store.lock(&id("a")).await;
        let b = store.lock(&id("b")).await;
        assert!(b.snapshot().is_empty());
        assert_eq!(b.id().as_str(), "b");
    }
}
