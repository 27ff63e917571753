//! Executor configuration and builder.

use serde::{Deserialize, Serialize};

/// Executor settings.
///
/// Deserializable so hosts can load it from their own configuration files.
/// Unset fields take their defaults.
///
/// ```
/// use a2a_langchain_bridge::builders::ExecutorConfig;
///
/// let config: ExecutorConfig =
///     serde_json::from_str(r#"{"systemPrompt": "Be brief.", "historyLength": 10}"#).unwrap();
/// assert_eq!(config.history_length, Some(10));
/// assert_eq!(config.event_capacity, 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExecutorConfig {
    /// Prepended to every model call as a system message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,

    /// Number of most recent history messages sent to the model.
    /// `None` or `0` sends the whole history.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_length: Option<usize>,

    /// Channel capacity for event queues created by [`Self::event_queue`].
    pub event_capacity: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            system_prompt: None,
            history_length: None,
            event_capacity: 1024,
        }
    }
}

#[cfg(feature = "server")]
impl ExecutorConfig {
    /// A fresh event queue sized by `event_capacity`.
    pub fn event_queue(&self) -> crate::server::EventQueue {
        crate::server::EventQueue::new(self.event_capacity)
    }
}

/// Builder for [`ChatAgentExecutor`](crate::server::ChatAgentExecutor).
///
/// The history store defaults to an
/// [`InMemoryConversationStore`](crate::history::InMemoryConversationStore).
///
/// ```rust,ignore
/// let executor = ChatAgentExecutorBuilder::new(Arc::new(MyModel))
///     .with_system_prompt("You are a helpful assistant.")
///     .with_history_length(20)
///     .build();
/// ```
#[cfg(feature = "server")]
pub struct ChatAgentExecutorBuilder {
    model: std::sync::Arc<dyn crate::chat::ChatModel>,
    store: Option<std::sync::Arc<dyn crate::history::ConversationStore>>,
    config: ExecutorConfig,
}

#[cfg(feature = "server")]
impl ChatAgentExecutorBuilder {
    /// Create a new builder around the given model.
    pub fn new(model: std::sync::Arc<dyn crate::chat::ChatModel>) -> Self {
        Self {
            model,
            store: None,
            config: ExecutorConfig::default(),
        }
    }

    /// Set the conversation store implementation.
    pub fn with_store(
        mut self,
        store: std::sync::Arc<dyn crate::history::ConversationStore>,
    ) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    /// Limit how many history messages are sent to the model.
    pub fn with_history_length(mut self, length: usize) -> Self {
        self.config.history_length = Some(length);
        self
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the executor.
    pub fn build(self) -> crate::server::ChatAgentExecutor {
        use crate::history::InMemoryConversationStore;
        use std::sync::Arc;

        let store = self
            .store
            .unwrap_or_else(|| Arc::new(InMemoryConversationStore::new()));
        crate::server::ChatAgentExecutor::new(self.model, store, self.config)
    }
}
