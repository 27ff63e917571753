//! Scripted Agent — runs two chat turns through the executor without a real model.
//!
//! The first turn advertises a tool and the scripted model answers with a
//! tool call; the second turn returns the tool result and the model answers
//! in text. Every published status event is printed as JSON.
//!
//! Run with:
//! ```sh
//! RUST_LOG=debug cargo run --example scripted_agent
//! ```

use std::sync::Arc;

use a2a_langchain_bridge::builders::ChatAgentExecutorBuilder;
use a2a_langchain_bridge::chat::{
    AiMessageChunk, ChatMessage, ChatModel, ChunkStream, ToolCallChunk, ToolDefinition,
};
use a2a_langchain_bridge::error::{BridgeError, BridgeResult};
use a2a_langchain_bridge::reconcile::to_chat_message;
use a2a_langchain_bridge::server::{AgentExecutor, RequestContext};
use a2a_langchain_bridge::types::{Message, Part, Role, StreamResponse};
use async_trait::async_trait;
use serde_json::json;

/// Calls `get_weather` when it has tools and no tool result yet, otherwise
/// summarizes the last tool result.
struct ScriptedModel;

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn stream(
        &self,
        messages: Vec<ChatMessage>,
        tools: Vec<ToolDefinition>,
    ) -> BridgeResult<ChunkStream> {
        let chunks = match messages.last() {
            Some(ChatMessage::Tool(result)) => vec![
                AiMessageChunk::text("The weather is "),
                AiMessageChunk::text(result.content.to_text()),
            ],
            _ if !tools.is_empty() => vec![AiMessageChunk::tool_call(ToolCallChunk {
                name: Some(tools[0].name().to_string()),
                args: Some(r#"{"city": "Oslo"}"#.to_string()),
                id: Some("call_1".to_string()),
                index: Some(0),
            })],
            _ => vec![AiMessageChunk::text("I have no tools to use.")],
        };
        Ok(Box::pin(futures::stream::iter(chunks.into_iter().map(Ok::<_, BridgeError>))))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "a2a_langchain_bridge=info".into()),
        )
        .init();

    let executor = ChatAgentExecutorBuilder::new(Arc::new(ScriptedModel))
        .with_system_prompt("You report the weather.")
        .build();

    // Turn 1: the user advertises a tool.
    let weather_tool = json!({
        "type": "function",
        "function": {
            "name": "get_weather",
            "description": "Current weather for a city",
            "parameters": {
                "type": "object",
                "properties": {"city": {"type": "string"}},
                "required": ["city"]
            }
        }
    });
    let first = Message::new(
        "m-1",
        Role::User,
        vec![
            Part::text("What's the weather in Oslo?"),
            Part::tagged_data(
                json!({"tools": [weather_tool]}),
                json!({"type": "tool-definitions", "format": "langchain", "count": 1}),
            ),
        ],
    )
    .with_ids(Some("ctx-1".into()), Some("task-1".into()));

    let reply = run_turn(&executor, first).await?;
    if let Some(reply) = reply {
        if let ChatMessage::Ai(ai) = to_chat_message(&reply) {
            println!("model requested: {:?}", ai.tool_calls);
        }
    }

    // Turn 2: the user returns the tool result.
    let second = Message::new(
        "m-2",
        Role::User,
        vec![Part::tagged_data(
            json!({"toolMessages": [{
                "tool_call_id": "call_1",
                "name": "get_weather",
                "content": r#"[{"functionResponse":{"name":"get_weather","response":{"output":"sunny, 18°C"}}}]"#
            }]}),
            json!({"type": "tool-messages", "format": "langchain", "count": 1}),
        )],
    )
    .with_ids(Some("ctx-1".into()), Some("task-2".into()));

    run_turn(&executor, second).await?;
    Ok(())
}

/// Execute one turn, print its events, and return the completed message.
async fn run_turn(
    executor: &a2a_langchain_bridge::server::ChatAgentExecutor,
    message: Message,
) -> Result<Option<Message>, Box<dyn std::error::Error>> {
    let context = RequestContext::for_message(message);
    println!("> {}", context.get_user_input(" "));

    let queue = executor.config().event_queue();
    let mut rx = queue.subscribe();
    executor.execute(context, queue).await?;

    let mut completed = None;
    while let Ok(event) = rx.try_recv() {
        println!("{}", serde_json::to_string_pretty(&event)?);
        if let StreamResponse::StatusUpdate(update) = event {
            if update.r#final {
                completed = update.status.message;
            }
        }
    }
    Ok(completed)
}
