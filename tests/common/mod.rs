//! Shared test utilities for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use a2a_langchain_bridge::chat::{
    AiMessageChunk, ChatMessage, ChatModel, ChunkStream, ToolDefinition,
};
use a2a_langchain_bridge::error::{BridgeError, BridgeResult};
use a2a_langchain_bridge::types::{Message, Part, Role, StreamResponse, TaskStatusUpdateEvent};
use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::{broadcast, Mutex};

/// A model that replays a fixed list of chunks and records every call.
#[derive(Default)]
pub struct ScriptedChatModel {
    chunks: Vec<AiMessageChunk>,
    pub calls: Arc<Mutex<Vec<(Vec<ChatMessage>, Vec<ToolDefinition>)>>>,
}

impl ScriptedChatModel {
    pub fn new(chunks: Vec<AiMessageChunk>) -> Self {
        Self {
            chunks,
            calls: Arc::default(),
        }
    }

    /// A model that answers with one text chunk per string.
    pub fn replying(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| AiMessageChunk::text(*t)).collect())
    }
}

#[async_trait]
impl ChatModel for ScriptedChatModel {
    async fn stream(
        &self,
        messages: Vec<ChatMessage>,
        tools: Vec<ToolDefinition>,
    ) -> BridgeResult<ChunkStream> {
        self.calls.lock().await.push((messages, tools));
        let chunks: Vec<BridgeResult<AiMessageChunk>> =
            self.chunks.iter().cloned().map(Ok).collect();
        Ok(Box::pin(futures::stream::iter(chunks)))
    }
}

/// A model whose stream fails after `good_chunks` fragments.
pub struct FailingChatModel {
    pub good_chunks: usize,
}

#[async_trait]
impl ChatModel for FailingChatModel {
    async fn stream(
        &self,
        _messages: Vec<ChatMessage>,
        _tools: Vec<ToolDefinition>,
    ) -> BridgeResult<ChunkStream> {
        let mut items: Vec<BridgeResult<AiMessageChunk>> = (0..self.good_chunks)
            .map(|i| Ok(AiMessageChunk::text(format!("part{} ", i))))
            .collect();
        items.push(Err(BridgeError::model("upstream timed out")));
        Ok(Box::pin(futures::stream::iter(items)))
    }
}

/// A user message with a single text part and the given ids.
pub fn user_message(text: &str, context_id: &str, task_id: &str) -> Message {
    Message::user("u-1", text).with_ids(Some(context_id.to_string()), Some(task_id.to_string()))
}

/// A tagged `tool-definitions` data part.
pub fn tool_definitions_part(tools: Value) -> Part {
    let count = tools.as_array().map(|a| a.len()).unwrap_or(0);
    Part::tagged_data(
        json!({ "tools": tools }),
        json!({ "type": "tool-definitions", "format": "langchain", "count": count }),
    )
}

/// A tagged `tool-messages` data part.
pub fn tool_messages_part(entries: Value) -> Part {
    let count = entries.as_array().map(|a| a.len()).unwrap_or(0);
    Part::tagged_data(
        json!({ "toolMessages": entries }),
        json!({ "type": "tool-messages", "format": "langchain", "count": count }),
    )
}

/// A well-formed function tool definition.
pub fn weather_tool() -> Value {
    json!({
        "type": "function",
        "function": {
            "name": "get_weather",
            "description": "Current weather for a city",
            "parameters": {
                "type": "object",
                "properties": { "city": { "type": "string" } },
                "required": ["city"]
            }
        }
    })
}

pub fn agent_message(parts: Vec<Part>) -> Message {
    Message::new("a-1", Role::Agent, parts)
}

/// Drain every status update currently buffered in `rx`.
pub fn drain_status_updates(
    rx: &mut broadcast::Receiver<StreamResponse>,
) -> Vec<TaskStatusUpdateEvent> {
    let mut updates = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let StreamResponse::StatusUpdate(update) = event {
            updates.push(update);
        }
    }
    updates
}
