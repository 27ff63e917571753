//! The chat model seam.
//!
//! Concrete provider clients live outside this crate; they plug in by
//! implementing [`ChatModel`].

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::BridgeResult;

use super::chunk::{collect_chunks, AiMessageChunk};
use super::message::{AiMessage, ChatMessage};
use super::tool::ToolDefinition;

/// A stream of response fragments.
pub type ChunkStream = BoxStream<'static, BridgeResult<AiMessageChunk>>;

/// A streaming chat-completion model.
///
/// `tools` is the validated tool set bound for this call; it is empty when
/// the peer advertised no tools or its advertisement was rejected.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Start a completion and return its fragments.
    async fn stream(
        &self,
        messages: Vec<ChatMessage>,
        tools: Vec<ToolDefinition>,
    ) -> BridgeResult<ChunkStream>;

    /// Run a completion to the end and return the accumulated response.
    async fn invoke(
        &self,
        messages: Vec<ChatMessage>,
        tools: Vec<ToolDefinition>,
    ) -> BridgeResult<AiMessage> {
        let stream = self.stream(messages, tools).await?;
        collect_chunks(stream).await
    }
}
