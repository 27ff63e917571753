//! AI message → transport message.
//!
//! The outbound message carries a plain text part for peers that only read
//! text, plus a `langchain_ai_message` data part holding every field
//! [`to_chat_message`](super::to_chat_message) needs to rebuild the same AI
//! message on the other side.

use serde_json::Value;

use crate::chat::{AiMessage, MessageContent};
use crate::types::{Message, Part, Role};

use super::payload::AiMessagePayload;
use super::tags::PartTag;

/// Text sent when the model produced nothing at all.
pub const EMPTY_RESPONSE_PLACEHOLDER: &str = "[No content received from LLM]";

/// Serialize an AI message into an agent transport message.
///
/// Parts, in order:
/// 1. a text part with the flattened content, unless it is blank;
/// 2. a data part tagged `{type: "langchain_ai_message"}` with `content`,
///    `id`, `tool_calls`, `additional_kwargs`, `response_metadata`, and
///    `usage_metadata` / `invalid_tool_calls` when present.
///
/// A message with no content and no tool calls (valid or invalid) becomes a
/// single text part holding [`EMPTY_RESPONSE_PLACEHOLDER`].
pub fn to_transport_message(
    message: &AiMessage,
    message_id: impl Into<String>,
    task_id: Option<String>,
    context_id: Option<String>,
) -> Message {
    let mut parts = Vec::with_capacity(2);

    let text = message.content.to_text();
    if !text.trim().is_empty() {
        parts.push(Part::text(text));
    }

    if !is_degenerate(message) {
        let payload = to_payload(message);
        // AiMessagePayload holds only JSON values, so this cannot fail.
        let data = serde_json::to_value(&payload).unwrap_or(Value::Null);
        parts.push(Part::Data {
            data,
            metadata: PartTag::AiMessage.to_metadata(),
        });
    }

    if parts.is_empty() {
        parts.push(Part::text(EMPTY_RESPONSE_PLACEHOLDER));
    }

    Message::new(message_id, Role::Agent, parts).with_ids(context_id, task_id)
}

/// The full-fidelity payload carried by the data part.
pub fn to_payload(message: &AiMessage) -> AiMessagePayload {
    AiMessagePayload {
        content: Some(message.content.to_value()),
        id: message.id.clone().map(Value::String),
        tool_calls: Some(to_json(&message.tool_calls)),
        additional_kwargs: Some(Value::Object(message.additional_kwargs.clone())),
        response_metadata: Some(Value::Object(message.response_metadata.clone())),
        usage_metadata: message.usage_metadata.clone(),
        invalid_tool_calls: if message.invalid_tool_calls.is_empty() {
            None
        } else {
            Some(to_json(&message.invalid_tool_calls))
        },
    }
}

fn is_degenerate(message: &AiMessage) -> bool {
    let blank = match &message.content {
        MessageContent::Text(text) => text.trim().is_empty(),
        MessageContent::Blocks(blocks) => blocks.is_empty(),
    };
    blank && message.tool_calls.is_empty() && message.invalid_tool_calls.is_empty()
}

fn to_json<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ToolCall;
    use serde_json::{json, Map};

    #[test]
    fn text_part_then_data_part() {
        let message = AiMessage::text("hello").with_id("ai-1");
        let out = to_transport_message(&message, "out-1", Some("t1".into()), Some("c1".into()));

        assert_eq!(out.role, Role::Agent);
        assert_eq!(out.message_id, "out-1");
        assert_eq!(out.task_id.as_deref(), Some("t1"));
        assert_eq!(out.context_id.as_deref(), Some("c1"));
        assert_eq!(out.parts.len(), 2);
        assert_eq!(out.parts[0], Part::text("hello"));
        match &out.parts[1] {
            Part::Data { data, metadata } => {
                assert_eq!(metadata, &Some(json!({"type": "langchain_ai_message"})));
                assert_eq!(data["content"], json!("hello"));
                assert_eq!(data["id"], json!("ai-1"));
                assert_eq!(data["tool_calls"], json!([]));
            }
            other => panic!("expected data part, got {:?}", other),
        }
    }

    #[test]
    fn tool_calls_only_has_no_text_part() {
        let message = AiMessage::text("").with_tool_call(ToolCall::new(
            "search",
            Map::new(),
            Some("call_1".into()),
        ));
        let out = to_transport_message(&message, "out-1", None, None);
        assert_eq!(out.parts.len(), 1);
        assert!(matches!(out.parts[0], Part::Data { .. }));
    }

    #[test]
    fn block_content_flattens_to_text_part() {
        let message = AiMessage {
            content: MessageContent::Blocks(vec![
                json!({"type": "text", "text": "a"}),
                json!({"type": "reasoning", "reasoning": "hidden"}),
                json!({"type": "text", "text": "b"}),
            ]),
            ..Default::default()
        };
        let out = to_transport_message(&message, "out-1", None, None);
        assert_eq!(out.parts[0], Part::text("a\nb"));
    }

    #[test]
    fn degenerate_message_gets_placeholder() {
        let out = to_transport_message(&AiMessage::text("  "), "out-1", None, None);
        assert_eq!(out.parts, vec![Part::text(EMPTY_RESPONSE_PLACEHOLDER)]);
    }
}
