//! Conversational message types.
//!
//! The shapes follow LangChain's message dictionaries (`human`, `ai`, `tool`,
//! `system`) so that history stores and debugging output look the same as
//! the payloads exchanged with peers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::tool::{InvalidToolCall, ToolCall};

/// Content of a conversational message.
///
/// On the wire this is either a plain string or an array of content blocks
/// (`{"type": "text", "text": "..."}`, image blocks, provider-specific
/// blocks). Blocks are kept as raw JSON so nothing is lost in transit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text content.
    Text(String),
    /// Ordered content blocks.
    Blocks(Vec<Value>),
}

impl MessageContent {
    /// Flattens the content to text.
    ///
    /// Block content keeps only `type: "text"` blocks, joined with `"\n"`.
    pub fn to_text(&self) -> String {
        match self {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Blocks(blocks) => blocks
                .iter()
                .filter(|block| block.get("type").and_then(Value::as_str) == Some("text"))
                .filter_map(|block| block.get("text").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Returns `true` for an empty string or an empty block list.
    pub fn is_empty(&self) -> bool {
        match self {
            MessageContent::Text(text) => text.is_empty(),
            MessageContent::Blocks(blocks) => blocks.is_empty(),
        }
    }

    /// The content as a JSON value (string or array).
    pub fn to_value(&self) -> Value {
        match self {
            MessageContent::Text(text) => Value::String(text.clone()),
            MessageContent::Blocks(blocks) => Value::Array(blocks.clone()),
        }
    }
}

impl Default for MessageContent {
    fn default() -> Self {
        MessageContent::Text(String::new())
    }
}

impl From<String> for MessageContent {
    fn from(text: String) -> Self {
        MessageContent::Text(text)
    }
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        MessageContent::Text(text.to_string())
    }
}

impl From<Vec<Value>> for MessageContent {
    fn from(blocks: Vec<Value>) -> Self {
        MessageContent::Blocks(blocks)
    }
}

/// Input from the human side of the conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HumanMessage {
    /// Message content.
    pub content: MessageContent,
    /// Optional message identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Instructions prepended to the model input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemMessage {
    /// Message content.
    pub content: MessageContent,
}

/// A model response, possibly requesting tool invocations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiMessage {
    /// Message content.
    pub content: MessageContent,

    /// Optional message identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Tool invocations requested by the model.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,

    /// Tool invocations the model attempted but that could not be parsed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invalid_tool_calls: Vec<InvalidToolCall>,

    /// Provider-specific extra fields (e.g. legacy `tool_calls`).
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub additional_kwargs: Map<String, Value>,

    /// Provider response metadata (model name, finish reason, ...).
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub response_metadata: Map<String, Value>,

    /// Token usage reported by the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<Value>,
}

impl AiMessage {
    /// Create an AI message with text content and nothing else.
    pub fn text(content: impl Into<String>) -> Self {
        AiMessage {
            content: MessageContent::Text(content.into()),
            ..Default::default()
        }
    }

    /// Set the message identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Append a tool call.
    pub fn with_tool_call(mut self, call: ToolCall) -> Self {
        self.tool_calls.push(call);
        self
    }
}

/// Outcome reported by a tool execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    /// The tool ran successfully.
    #[default]
    Success,
    /// The tool reported an error.
    Error,
}

/// The result of executing a tool call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolMessage {
    /// Human-readable result.
    pub content: MessageContent,

    /// The structured payload the result was derived from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact: Option<Value>,

    /// Identifier of the tool call this result answers. Never empty.
    pub tool_call_id: String,

    /// Name of the tool that ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Execution outcome.
    #[serde(default)]
    pub status: ToolStatus,
}

/// One conversational message.
///
/// Serialized with a `type` discriminator: `human`, `ai`, `tool`, `system`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChatMessage {
    /// Human input.
    Human(HumanMessage),
    /// Model response.
    Ai(AiMessage),
    /// Tool execution result.
    Tool(ToolMessage),
    /// System instructions.
    System(SystemMessage),
}

impl ChatMessage {
    /// Create a human message with text content.
    pub fn human(content: impl Into<String>) -> Self {
        ChatMessage::Human(HumanMessage {
            content: MessageContent::Text(content.into()),
            id: None,
        })
    }

    /// Create an AI message with text content.
    pub fn ai(content: impl Into<String>) -> Self {
        ChatMessage::Ai(AiMessage::text(content))
    }

    /// Create a system message with text content.
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage::System(SystemMessage {
            content: MessageContent::Text(content.into()),
        })
    }

    /// The message content.
    pub fn content(&self) -> &MessageContent {
        match self {
            ChatMessage::Human(m) => &m.content,
            ChatMessage::Ai(m) => &m.content,
            ChatMessage::Tool(m) => &m.content,
            ChatMessage::System(m) => &m.content,
        }
    }

    /// The LangChain message type name.
    pub fn message_type(&self) -> &'static str {
        match self {
            ChatMessage::Human(_) => "human",
            ChatMessage::Ai(_) => "ai",
            ChatMessage::Tool(_) => "tool",
            ChatMessage::System(_) => "system",
        }
    }

    /// Returns the inner AI message, if this is one.
    pub fn as_ai(&self) -> Option<&AiMessage> {
        match self {
            ChatMessage::Ai(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the inner tool message, if this is one.
    pub fn as_tool(&self) -> Option<&ToolMessage> {
        match self {
            ChatMessage::Tool(m) => Some(m),
            _ => None,
        }
    }
}

impl From<AiMessage> for ChatMessage {
    fn from(message: AiMessage) -> Self {
        ChatMessage::Ai(message)
    }
}

impl From<HumanMessage> for ChatMessage {
    fn from(message: HumanMessage) -> Self {
        ChatMessage::Human(message)
    }
}

impl From<ToolMessage> for ChatMessage {
    fn from(message: ToolMessage) -> Self {
        ChatMessage::Tool(message)
    }
}
