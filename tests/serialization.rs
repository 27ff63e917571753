//! Wire-format checks for transport and conversational types.

use a2a_langchain_bridge::chat::{AiMessage, ChatMessage, ToolCall, ToolMessage, ToolStatus};
use a2a_langchain_bridge::reconcile::to_transport_message;
use a2a_langchain_bridge::types::*;
use serde_json::{json, Map};

// ---- Transport ----

#[test]
fn test_outbound_message_wire_shape() {
    let mut args = Map::new();
    args.insert("q".into(), json!("rust"));
    let reply = AiMessage::text("Searching.")
        .with_id("ai-1")
        .with_tool_call(ToolCall::new("search", args, Some("call_1".into())));

    let outbound = to_transport_message(&reply, "m-1", Some("t-1".into()), Some("c-1".into()));
    let wire = serde_json::to_value(&outbound).unwrap();

    assert_eq!(
        wire,
        json!({
            "kind": "message",
            "messageId": "m-1",
            "role": "agent",
            "taskId": "t-1",
            "contextId": "c-1",
            "parts": [
                {"kind": "text", "text": "Searching."},
                {
                    "kind": "data",
                    "metadata": {"type": "langchain_ai_message"},
                    "data": {
                        "content": "Searching.",
                        "id": "ai-1",
                        "tool_calls": [{"name": "search", "args": {"q": "rust"}, "id": "call_1"}],
                        "additional_kwargs": {},
                        "response_metadata": {}
                    }
                }
            ]
        })
    );
}

#[test]
fn test_status_update_wire_shape() {
    let event = StreamResponse::StatusUpdate(TaskStatusUpdateEvent {
        task_id: "t-1".into(),
        context_id: "c-1".into(),
        kind: "status-update".into(),
        status: TaskStatus::new(TaskState::InputRequired),
        r#final: false,
        metadata: None,
    });
    let wire = serde_json::to_value(&event).unwrap();
    assert_eq!(wire["kind"], "status-update");
    assert_eq!(wire["status"]["state"], "input-required");
    assert_eq!(wire["final"], false);

    let back: StreamResponse = serde_json::from_value(wire).unwrap();
    assert_eq!(back, event);
}

#[test]
fn test_stream_response_rejects_unknown_kind() {
    let result = serde_json::from_value::<StreamResponse>(json!({"kind": "artifact-update"}));
    assert!(result.is_err());
}

// ---- Conversational ----

#[test]
fn test_chat_message_type_tags() {
    let messages = [
        (ChatMessage::human("hi"), "human"),
        (ChatMessage::ai("hello"), "ai"),
        (ChatMessage::system("be nice"), "system"),
        (
            ChatMessage::Tool(ToolMessage {
                content: "42".into(),
                artifact: None,
                tool_call_id: "call_1".into(),
                name: None,
                status: ToolStatus::Success,
            }),
            "tool",
        ),
    ];
    for (message, tag) in messages {
        let wire = serde_json::to_value(&message).unwrap();
        assert_eq!(wire["type"], tag);
        let back: ChatMessage = serde_json::from_value(wire).unwrap();
        assert_eq!(back, message);
    }
}
