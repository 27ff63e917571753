//! Transport message → conversational message.
//!
//! Exactly one conversational message is produced per transport message.
//! The path is chosen in priority order by inspecting data-part tags:
//!
//! 1. first `tool-messages` part with a non-empty `toolMessages` array
//!    → [`ChatMessage::Tool`] built from the **first** entry only;
//! 2. first `langchain_ai_message` part whose payload is an object
//!    → [`ChatMessage::Ai`];
//! 3. otherwise the message text → [`ChatMessage::Ai`] for agent messages,
//!    [`ChatMessage::Human`] for everything else.

use serde_json::{Map, Value};
use tracing::debug;

use crate::chat::{AiMessage, ChatMessage, HumanMessage, InvalidToolCall, MessageContent};
use crate::types::{Message, Role};

use super::payload::{is_blank, AiMessagePayload};
use super::tags::{find_tagged, PartTag, TOOL_MESSAGES_FIELD};
use super::text::extract_text;
use super::tool_calls::normalize_tool_calls;
use super::tool_result::reconstruct_tool_message;

/// The reconstruction path selected for a transport message.
#[derive(Debug, Clone, PartialEq)]
pub enum Reconstruction<'a> {
    /// Rebuild a tool result from this `toolMessages` entry.
    ToolResult(&'a Value),
    /// Rebuild an AI message from this payload.
    Ai(AiMessagePayload),
    /// Wrap the extracted text.
    Text,
}

impl<'a> Reconstruction<'a> {
    /// Select the path for `message`. Later parts of the same tier are ignored.
    pub fn select(message: &'a Message) -> Self {
        if let Some(tagged) = find_tagged(&message.parts, PartTag::ToolMessages) {
            let entries = tagged
                .data
                .get(TOOL_MESSAGES_FIELD)
                .and_then(Value::as_array)
                .filter(|entries| !entries.is_empty());
            if let Some(entries) = entries {
                tagged.check_count(entries.len(), TOOL_MESSAGES_FIELD);
                if entries.len() > 1 {
                    debug!(
                        message_id = %message.message_id,
                        ignored = entries.len() - 1,
                        "Only the first tool message entry is reconstructed"
                    );
                }
                return Reconstruction::ToolResult(&entries[0]);
            }
        }

        if let Some(tagged) = find_tagged(&message.parts, PartTag::AiMessage) {
            if let Some(payload) = AiMessagePayload::from_data(tagged.data) {
                return Reconstruction::Ai(payload);
            }
        }

        Reconstruction::Text
    }
}

/// Turn a transport message into one conversational message.
///
/// Never fails; unusable structured parts fall through to the text path.
///
/// ```
/// use a2a_langchain_bridge::chat::ChatMessage;
/// use a2a_langchain_bridge::reconcile::to_chat_message;
/// use a2a_langchain_bridge::types::Message;
///
/// let chat = to_chat_message(&Message::user("m1", "hi"));
/// assert!(matches!(chat, ChatMessage::Human(_)));
/// assert_eq!(chat.content().to_text(), "hi");
/// ```
pub fn to_chat_message(message: &Message) -> ChatMessage {
    match Reconstruction::select(message) {
        Reconstruction::ToolResult(entry) => {
            ChatMessage::Tool(reconstruct_tool_message(entry, &message.message_id))
        }
        Reconstruction::Ai(payload) => ChatMessage::Ai(reconstruct_ai(message, payload)),
        Reconstruction::Text => {
            let content = MessageContent::Text(extract_text(&message.parts));
            match message.role {
                Role::Agent => ChatMessage::Ai(AiMessage {
                    content,
                    id: Some(message.message_id.clone()),
                    ..Default::default()
                }),
                Role::User | Role::Unspecified => ChatMessage::Human(HumanMessage {
                    content,
                    id: Some(message.message_id.clone()),
                }),
            }
        }
    }
}

fn reconstruct_ai(message: &Message, payload: AiMessagePayload) -> AiMessage {
    let content = match payload.content {
        Some(Value::String(text)) => MessageContent::Text(text),
        Some(Value::Array(blocks)) => MessageContent::Blocks(blocks),
        Some(Value::Null) | None => MessageContent::Text(extract_text(&message.parts)),
        Some(other) => MessageContent::Text(other.to_string()),
    };

    let tool_calls = normalize_tool_calls(
        payload.tool_calls.as_ref(),
        payload.additional_kwargs.as_ref(),
    );

    let invalid_tool_calls = payload
        .invalid_tool_calls
        .as_ref()
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| serde_json::from_value::<InvalidToolCall>(entry.clone()).ok())
                .collect()
        })
        .unwrap_or_default();

    let id = payload
        .id
        .as_ref()
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| message.message_id.clone());

    AiMessage {
        content,
        id: Some(id),
        tool_calls,
        invalid_tool_calls,
        additional_kwargs: into_map(payload.additional_kwargs),
        response_metadata: into_map(payload.response_metadata),
        usage_metadata: payload.usage_metadata.filter(|usage| !is_blank(usage)),
    }
}

fn into_map(value: Option<Value>) -> Map<String, Value> {
    match value {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Part;
    use serde_json::json;

    fn agent_with(parts: Vec<Part>) -> Message {
        Message::new("msg-1", Role::Agent, parts)
    }

    #[test]
    fn tool_messages_win_over_ai_message() {
        let message = agent_with(vec![
            Part::tagged_data(json!({"content": "ai"}), json!({"type": "langchain_ai_message"})),
            Part::tagged_data(
                json!({"toolMessages": [{"tool_call_id": "c1", "content": "ok"}]}),
                json!({"type": "tool-messages", "format": "langchain"}),
            ),
        ]);
        assert!(matches!(
            Reconstruction::select(&message),
            Reconstruction::ToolResult(_)
        ));
    }

    #[test]
    fn empty_tool_messages_fall_through() {
        let message = agent_with(vec![
            Part::tagged_data(
                json!({"toolMessages": []}),
                json!({"type": "tool-messages", "format": "langchain"}),
            ),
            Part::tagged_data(json!({"content": "ai"}), json!({"type": "langchain_ai_message"})),
        ]);
        assert!(matches!(Reconstruction::select(&message), Reconstruction::Ai(_)));
    }

    #[test]
    fn non_object_ai_payload_falls_back_to_text() {
        let message = agent_with(vec![
            Part::text("fallback"),
            Part::tagged_data(json!("oops"), json!({"type": "langchain_ai_message"})),
        ]);
        assert_eq!(Reconstruction::select(&message), Reconstruction::Text);
        assert_eq!(to_chat_message(&message).content().to_text(), "fallback");
    }

    #[test]
    fn object_content_is_stringified() {
        let message = agent_with(vec![Part::tagged_data(
            json!({"content": {"a": 1}}),
            json!({"type": "langchain_ai_message"}),
        )]);
        let ai = to_chat_message(&message);
        assert_eq!(ai.content(), &MessageContent::Text(r#"{"a":1}"#.into()));
    }

    #[test]
    fn empty_metadata_fields_are_dropped() {
        let message = agent_with(vec![Part::tagged_data(
            json!({"content": "x", "response_metadata": {}, "usage_metadata": {}, "tool_calls": []}),
            json!({"type": "langchain_ai_message"}),
        )]);
        let chat = to_chat_message(&message);
        let ai = chat.as_ai().unwrap();
        assert!(ai.response_metadata.is_empty());
        assert!(ai.usage_metadata.is_none());
        assert!(ai.tool_calls.is_empty());
        assert_eq!(ai.id.as_deref(), Some("msg-1"));
    }
}
