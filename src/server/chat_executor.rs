//! An [`AgentExecutor`] that answers A2A messages with a chat model.
//!
//! Per request: reconcile the inbound transport message into a chat message,
//! bind whatever tools the peer advertised, run the model over the
//! conversation history, then serialize the reply back into a transport
//! message carried by the `completed` status.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::builders::ExecutorConfig;
use crate::chat::{collect_chunks, AiMessage, ChatMessage, ChatModel, ToolDefinition};
use crate::error::{BridgeError, BridgeResult};
use crate::history::{apply_history_length, ConversationStore};
use crate::reconcile::{extract_tool_definitions, to_chat_message, to_transport_message};

use super::agent_executor::{AgentExecutor, RequestContext};
use super::event_queue::EventQueue;
use super::task_updater::TaskUpdater;

/// Chat-model backed agent executor.
///
/// Construct with [`ChatAgentExecutorBuilder`](crate::builders::ChatAgentExecutorBuilder).
pub struct ChatAgentExecutor {
    model: Arc<dyn ChatModel>,
    store: Arc<dyn ConversationStore>,
    config: ExecutorConfig,
}

impl ChatAgentExecutor {
    pub fn new(
        model: Arc<dyn ChatModel>,
        store: Arc<dyn ConversationStore>,
        config: ExecutorConfig,
    ) -> Self {
        Self {
            model,
            store,
            config,
        }
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn ConversationStore> {
        &self.store
    }

    /// System prompt, retained history window, then the inbound message.
    fn model_input(&self, history: Vec<ChatMessage>, inbound: ChatMessage) -> Vec<ChatMessage> {
        let history = apply_history_length(history, self.config.history_length);
        let mut input = Vec::with_capacity(history.len() + 2);
        if let Some(prompt) = self
            .config
            .system_prompt
            .as_deref()
            .filter(|prompt| !prompt.trim().is_empty())
        {
            input.push(ChatMessage::system(prompt));
        }
        input.extend(history);
        input.push(inbound);
        input
    }

    async fn run_model(
        &self,
        input: Vec<ChatMessage>,
        tools: Vec<ToolDefinition>,
    ) -> BridgeResult<AiMessage> {
        let stream = self.model.stream(input, tools).await?;
        collect_chunks(stream).await
    }
}

#[async_trait]
impl AgentExecutor for ChatAgentExecutor {
    async fn execute(&self, context: RequestContext, event_queue: EventQueue) -> BridgeResult<()> {
        let message = context
            .message
            .as_ref()
            .ok_or_else(|| BridgeError::invalid_params("execute requires an inbound message"))?;

        let updater = TaskUpdater::new(event_queue, &context.task_id, &context.context_id);

        let tools = extract_tool_definitions(message);
        let inbound = to_chat_message(message);
        debug!(
            task_id = %context.task_id,
            message_type = inbound.message_type(),
            tools = tools.len(),
            "Reconciled inbound message"
        );

        let history = self.store.get(&context.context_id).await?;
        self.store
            .append(&context.context_id, inbound.clone())
            .await?;

        updater.start_work(None).await?;

        let input = self.model_input(history, inbound);
        let reply = match self.run_model(input, tools).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(task_id = %context.task_id, error = %e, "Chat model failed");
                updater.failed_with_text(&format!("Error: {}", e)).await?;
                return Ok(());
            }
        };

        self.store
            .append(&context.context_id, ChatMessage::Ai(reply.clone()))
            .await?;

        let outbound = to_transport_message(
            &reply,
            Uuid::new_v4().to_string(),
            Some(context.task_id.clone()),
            Some(context.context_id.clone()),
        );
        info!(
            task_id = %context.task_id,
            parts = outbound.parts.len(),
            tool_calls = reply.tool_calls.len(),
            "Chat turn completed"
        );
        updater.complete(Some(outbound)).await
    }

    async fn cancel(&self, context: RequestContext, event_queue: EventQueue) -> BridgeResult<()> {
        debug!(task_id = %context.task_id, "Cancel requested");
        let updater = TaskUpdater::new(event_queue, context.task_id, context.context_id);
        updater.cancel(None).await
    }
}
