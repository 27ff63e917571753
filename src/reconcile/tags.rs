//! Metadata tagging convention for structured data parts.
//!
//! A data part's meaning is decided by its metadata, never by the shape of
//! its payload:
//!
//! | `type`                 | `format`    | payload                          |
//! |------------------------|-------------|----------------------------------|
//! | `tool-definitions`     | `langchain` | `{ "tools": [ToolDefinition] }`  |
//! | `langchain_ai_message` | —           | serialized AI message            |
//! | `tool-messages`        | `langchain` | `{ "toolMessages": [entry] }`    |
//!
//! `count` may accompany any of them. It is advisory: a mismatch with the
//! actual array length is logged and otherwise ignored.

use serde_json::{json, Value};
use tracing::warn;

use crate::types::Part;

/// Metadata key naming the payload kind.
pub const TYPE_KEY: &str = "type";
/// Metadata key naming the payload format.
pub const FORMAT_KEY: &str = "format";
/// Metadata key declaring the expected array length.
pub const COUNT_KEY: &str = "count";

/// Format value for LangChain-shaped payloads.
pub const LANGCHAIN_FORMAT: &str = "langchain";
/// Type value for an inbound tool advertisement.
pub const TOOL_DEFINITIONS_TYPE: &str = "tool-definitions";
/// Type value for a serialized AI message.
pub const AI_MESSAGE_TYPE: &str = "langchain_ai_message";
/// Type value for tool execution results.
pub const TOOL_MESSAGES_TYPE: &str = "tool-messages";

/// Payload key holding advertised tools.
pub const TOOLS_FIELD: &str = "tools";
/// Payload key holding tool execution results.
pub const TOOL_MESSAGES_FIELD: &str = "toolMessages";

/// Discriminator derived from a data part's metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartTag {
    /// `{type: "tool-definitions", format: "langchain"}`
    ToolDefinitions,
    /// `{type: "langchain_ai_message"}`
    AiMessage,
    /// `{type: "tool-messages", format: "langchain"}`
    ToolMessages,
    /// Missing, malformed or unrecognized metadata.
    Untagged,
}

impl PartTag {
    /// Classify a part by its metadata map.
    pub fn from_metadata(metadata: Option<&Value>) -> Self {
        let Some(metadata) = metadata.and_then(Value::as_object) else {
            return PartTag::Untagged;
        };
        let kind = metadata.get(TYPE_KEY).and_then(Value::as_str);
        let langchain =
            metadata.get(FORMAT_KEY).and_then(Value::as_str) == Some(LANGCHAIN_FORMAT);

        match kind {
            Some(TOOL_MESSAGES_TYPE) if langchain => PartTag::ToolMessages,
            Some(TOOL_DEFINITIONS_TYPE) if langchain => PartTag::ToolDefinitions,
            Some(AI_MESSAGE_TYPE) => PartTag::AiMessage,
            _ => PartTag::Untagged,
        }
    }

    /// Metadata to attach to an outbound part carrying this payload kind.
    ///
    /// Returns `None` for [`PartTag::Untagged`].
    pub fn to_metadata(self) -> Option<Value> {
        match self {
            PartTag::ToolDefinitions => Some(json!({
                TYPE_KEY: TOOL_DEFINITIONS_TYPE,
                FORMAT_KEY: LANGCHAIN_FORMAT,
            })),
            PartTag::AiMessage => Some(json!({ TYPE_KEY: AI_MESSAGE_TYPE })),
            PartTag::ToolMessages => Some(json!({
                TYPE_KEY: TOOL_MESSAGES_TYPE,
                FORMAT_KEY: LANGCHAIN_FORMAT,
            })),
            PartTag::Untagged => None,
        }
    }
}

/// A data part selected by its tag.
#[derive(Debug, Clone, Copy)]
pub struct TaggedData<'a> {
    /// The part payload.
    pub data: &'a Value,
    /// The part metadata.
    pub metadata: Option<&'a Value>,
}

impl TaggedData<'_> {
    /// The advisory `count` declared in the metadata, if any.
    pub fn declared_count(&self) -> Option<u64> {
        self.metadata
            .and_then(|metadata| metadata.get(COUNT_KEY))
            .and_then(Value::as_u64)
    }

    /// Compare the declared `count` with the actual array length.
    ///
    /// Logs a warning on mismatch and returns `false`; returns `true` when
    /// the counts agree or no count was declared.
    pub fn check_count(&self, actual: usize, what: &str) -> bool {
        match self.declared_count() {
            Some(expected) if expected != actual as u64 => {
                warn!(
                    expected,
                    actual,
                    payload = what,
                    "Declared count does not match payload length"
                );
                false
            }
            _ => true,
        }
    }
}

/// Find the first data part carrying `tag`, in part order.
pub fn find_tagged(parts: &[Part], tag: PartTag) -> Option<TaggedData<'_>> {
    crate::utils::data_parts(parts)
        .find(|(_, metadata)| PartTag::from_metadata(*metadata) == tag)
        .map(|(data, metadata)| TaggedData { data, metadata })
}
