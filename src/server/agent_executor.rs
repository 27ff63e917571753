//! Agent executor trait — the integration point between the task lifecycle
//! and agent logic.
//!
//! The surrounding transport builds a [`RequestContext`] per request and
//! hands it, together with an [`EventQueue`], to an [`AgentExecutor`]. The
//! executor reports progress by publishing status events to the queue.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::BridgeResult;
use crate::types::Message;

use super::event_queue::EventQueue;

/// Context for an agent execution request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique identifier for this task.
    pub task_id: String,

    /// Conversation context identifier — groups related tasks.
    pub context_id: String,

    /// The incoming message that triggered this execution.
    /// `None` for cancel requests.
    pub message: Option<Message>,

    /// Optional metadata from the client request.
    pub metadata: Option<Value>,
}

impl RequestContext {
    /// Create a context for an incoming message.
    ///
    /// Task and context ids fall back to the message's own ids, then to
    /// fresh UUIDs.
    pub fn for_message(message: Message) -> Self {
        let task_id = message
            .task_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let context_id = message
            .context_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        RequestContext {
            task_id,
            context_id,
            message: Some(message),
            metadata: None,
        }
    }

    /// Extracts text content from the incoming message parts, joined by
    /// `delimiter`. Empty if there is no message or it has no text parts.
    pub fn get_user_input(&self, delimiter: &str) -> String {
        self.message
            .as_ref()
            .map(|message| crate::utils::get_message_text(message, delimiter))
            .unwrap_or_default()
    }
}

/// Core trait for agent execution logic.
///
/// The framework calls [`execute`](AgentExecutor::execute) when a message
/// arrives and [`cancel`](AgentExecutor::cancel) when cancellation is
/// requested.
#[async_trait]
pub trait AgentExecutor: Send + Sync {
    /// Execute the agent's logic for a given request, publishing status
    /// events to `event_queue`. Returns once execution is complete.
    async fn execute(&self, context: RequestContext, event_queue: EventQueue) -> BridgeResult<()>;

    /// Request the agent to cancel the task identified by `context.task_id`
    /// and publish a `canceled` status.
    async fn cancel(&self, context: RequestContext, event_queue: EventQueue) -> BridgeResult<()>;
}
