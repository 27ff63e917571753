//! Conversational-model types.
//!
//! - [`ChatMessage`] — tagged union over human, AI, tool-result and system messages
//! - [`ToolCall`] / [`InvalidToolCall`] — tool invocations requested by the model
//! - [`ToolDefinition`] — function-calling schema advertised by a peer
//! - [`AiMessageChunk`] — streamed response fragment and its accumulation
//! - [`ChatModel`] — the streaming chat-completion seam

pub mod chunk;
pub mod message;
pub mod model;
pub mod tool;

pub use chunk::{collect_chunks, AiMessageChunk, ToolCallChunk};
pub use message::{
    AiMessage, ChatMessage, HumanMessage, MessageContent, SystemMessage, ToolMessage, ToolStatus,
};
pub use model::{ChatModel, ChunkStream};
pub use tool::{FunctionDefinition, FunctionParameters, InvalidToolCall, ToolCall, ToolDefinition};
