//! Conversation history, keyed by A2A context id.
//!
//! The executor receives its store by injection; there is no process-wide
//! history map. [`InMemoryConversationStore`] is provided for development
//! and tests; persistent deployments implement [`ConversationStore`].

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::chat::ChatMessage;
use crate::error::BridgeResult;

/// Ordered per-context message history.
///
/// Implementations must be `Send + Sync`; all methods take `&self` and use
/// interior mutability.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// All messages recorded for `context_id`, oldest first.
    ///
    /// An unknown context yields an empty list.
    async fn get(&self, context_id: &str) -> BridgeResult<Vec<ChatMessage>>;

    /// Append one message to the history of `context_id`.
    async fn append(&self, context_id: &str, message: ChatMessage) -> BridgeResult<()>;

    /// Forget the history of `context_id`.
    async fn clear(&self, context_id: &str) -> BridgeResult<()>;
}

/// In-memory history store backed by a `HashMap`.
///
/// All data is lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    conversations: Arc<RwLock<HashMap<String, Vec<ChatMessage>>>>,
}

impl InMemoryConversationStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of contexts with recorded history.
    pub async fn len(&self) -> usize {
        self.conversations.read().await.len()
    }

    /// Returns `true` if no context has recorded history.
    pub async fn is_empty(&self) -> bool {
        self.conversations.read().await.is_empty()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn get(&self, context_id: &str) -> BridgeResult<Vec<ChatMessage>> {
        let conversations = self.conversations.read().await;
        let history = conversations.get(context_id).cloned().unwrap_or_default();
        debug!(context_id = %context_id, messages = history.len(), "History lookup");
        Ok(history)
    }

    async fn append(&self, context_id: &str, message: ChatMessage) -> BridgeResult<()> {
        let mut conversations = self.conversations.write().await;
        let history = conversations.entry(context_id.to_string()).or_default();
        history.push(message);
        debug!(context_id = %context_id, messages = history.len(), "History appended");
        Ok(())
    }

    async fn clear(&self, context_id: &str) -> BridgeResult<()> {
        let mut conversations = self.conversations.write().await;
        if conversations.remove(context_id).is_some() {
            debug!(context_id = %context_id, "History cleared");
        }
        Ok(())
    }
}

/// Keep only the most recent `history_length` messages.
///
/// `None` or `Some(0)` keeps everything.
///
/// ```
/// use a2a_langchain_bridge::chat::ChatMessage;
/// use a2a_langchain_bridge::history::apply_history_length;
///
/// let history: Vec<_> = (0..10).map(|i| ChatMessage::human(format!("m{}", i))).collect();
/// let recent = apply_history_length(history, Some(3));
/// assert_eq!(recent.len(), 3);
/// assert_eq!(recent[0].content().to_text(), "m7");
/// ```
pub fn apply_history_length(
    mut history: Vec<ChatMessage>,
    history_length: Option<usize>,
) -> Vec<ChatMessage> {
    if let Some(length) = history_length {
        if length > 0 && history.len() > length {
            history = history.split_off(history.len() - length);
        }
    }
    history
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn append_preserves_order_per_context() {
        let store = InMemoryConversationStore::new();
        store.append("c1", ChatMessage::human("one")).await.unwrap();
        store.append("c2", ChatMessage::human("other")).await.unwrap();
        store.append("c1", ChatMessage::ai("two")).await.unwrap();

        let history = store.get("c1").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].content().to_text(), "one");
        assert_eq!(history[1].message_type(), "ai");
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn unknown_context_is_empty() {
        let store = InMemoryConversationStore::new();
        assert!(store.get("missing").await.unwrap().is_empty());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn clear_forgets_context() {
        let store = InMemoryConversationStore::new();
        store.append("c1", ChatMessage::human("one")).await.unwrap();
        store.clear("c1").await.unwrap();
        assert!(store.get("c1").await.unwrap().is_empty());
        store.clear("never-seen").await.unwrap();
    }

    #[test]
    fn zero_length_keeps_everything() {
        let history = vec![ChatMessage::human("a"), ChatMessage::human("b")];
        assert_eq!(apply_history_length(history.clone(), Some(0)), history);
        assert_eq!(apply_history_length(history.clone(), None), history);
    }
}
