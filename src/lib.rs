//! # a2a-langchain-bridge — A2A ↔ LangChain message reconciliation
//!
//! Agents speaking the [A2A protocol](https://a2a-protocol.org/latest/specification/)
//! exchange messages made of typed parts (text, file, structured data).
//! LangChain-style chat models consume a different shape: human, AI, tool
//! and system messages with tool calls and response metadata. This crate
//! converts between the two so tool calls, tool results and model metadata
//! survive a hop through the transport.
//!
//! ## Overview
//!
//! - [`reconcile`] — pure conversion functions, the core of the crate
//! - [`chat`] — the conversational message model and the [`chat::ChatModel`] seam
//! - [`history`] — per-context conversation storage
//! - [`server`] — an [`server::AgentExecutor`] that runs chat turns as A2A tasks
//! - [`types`] — the A2A wire types the bridge reads and writes
//!
//! Structured data parts are recognized by their metadata tag:
//!
//! | `metadata.type`        | Payload                          |
//! |------------------------|----------------------------------|
//! | `tool-definitions`     | `{tools: [...]}` advertised tools |
//! | `langchain_ai_message` | a full AI message                |
//! | `tool-messages`        | `{toolMessages: [...]}` results  |
//!
//! ## Feature flags
//!
//! | Feature  | Default | Description |
//! |----------|---------|-------------|
//! | `server` | yes     | Executor, task updater and event queue |
//! | `full`   | no      | Enable all features |
//!
//! ## Quick Start
//!
//! ```
//! use a2a_langchain_bridge::prelude::*;
//! use serde_json::json;
//!
//! // An AI reply with a tool call goes out as a text part plus a tagged data part.
//! let mut args = serde_json::Map::new();
//! args.insert("q".into(), json!("rust"));
//! let reply = AiMessage::text("Searching.")
//!     .with_tool_call(ToolCall::new("search", args, Some("call_1".into())));
//! let outbound = to_transport_message(&reply, "msg-1", None, None);
//! assert_eq!(outbound.parts.len(), 2);
//!
//! // The peer rebuilds the same AI message from it.
//! match to_chat_message(&outbound) {
//!     ChatMessage::Ai(ai) => {
//!         assert_eq!(ai.tool_calls[0].name, "search");
//!         assert_eq!(ai.content.to_text(), "Searching.");
//!     }
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```
//!
//! ## Demos
//!
//! `demos/scripted_agent.rs` runs the executor against a scripted model and
//! prints the published status events.

pub mod builders;
pub mod chat;
pub mod error;
pub mod history;
pub mod reconcile;
pub mod types;
pub mod utils;

#[cfg(feature = "server")]
pub mod server;

/// Prelude module that re-exports commonly used types and functions.
///
/// ```
/// use a2a_langchain_bridge::prelude::*;
///
/// let message = Message::user("m1", "hello");
/// assert_eq!(extract_text(&message.parts), "hello");
/// ```
pub mod prelude {
    // Transport types
    pub use crate::types::{
        Message, Part, Role, StreamResponse, TaskState, TaskStatus, TaskStatusUpdateEvent,
    };

    // Conversational types
    pub use crate::chat::{
        AiMessage, AiMessageChunk, ChatMessage, ChatModel, InvalidToolCall, MessageContent,
        ToolCall, ToolDefinition, ToolMessage,
    };

    // Reconciliation
    pub use crate::reconcile::{
        extract_text, extract_tool_definitions, normalize_tool_calls, reconstruct_tool_content,
        to_chat_message, to_transport_message, validate_tool_definitions,
    };

    // Error types
    pub use crate::error::{BridgeError, BridgeResult};

    pub use crate::builders::ExecutorConfig;
    pub use crate::history::{ConversationStore, InMemoryConversationStore};

    #[cfg(feature = "server")]
    pub use crate::builders::ChatAgentExecutorBuilder;

    #[cfg(feature = "server")]
    pub use crate::server::{
        AgentExecutor, ChatAgentExecutor, EventQueue, RequestContext, TaskUpdater,
    };
}

// Re-export core types at crate root for convenience.
pub use builders::ExecutorConfig;
pub use error::{BridgeError, BridgeResult};
pub use reconcile::{to_chat_message, to_transport_message};
pub use types::*;

#[cfg(feature = "server")]
pub use builders::ChatAgentExecutorBuilder;
