//! Tests for tool-result reconstruction.

use a2a_langchain_bridge::chat::{MessageContent, ToolStatus};
use a2a_langchain_bridge::reconcile::{
    reconstruct_tool_content, reconstruct_tool_message, resolve_tool_call_id,
};
use serde_json::json;

// ---- reconstruct_tool_content ----

#[test]
fn test_function_response_output_is_flattened() {
    let raw = r#"[{"functionResponse":{"name":"calc","response":{"output":"42"}}}]"#;
    let result = reconstruct_tool_content(&json!(raw));
    assert_eq!(result.text().as_deref(), Some("42"));
    assert_eq!(
        result.artifact,
        Some(json!([{"functionResponse": {"name": "calc", "response": {"output": "42"}}}]))
    );
}

#[test]
fn test_multiple_records_join_with_newline() {
    let raw = r#"[
        {"functionResponse": {"response": {"output": "first"}}},
        {"functionResponse": {"response": {"error": "second failed"}}}
    ]"#;
    let result = reconstruct_tool_content(&json!(raw));
    assert_eq!(result.text().as_deref(), Some("first\nsecond failed"));
}

#[test]
fn test_raw_text_is_text_and_artifact() {
    let result = reconstruct_tool_content(&json!("  plain result  "));
    assert_eq!(result.texts, vec!["plain result"]);
    assert_eq!(result.artifact, Some(json!("plain result")));
}

#[test]
fn test_json_without_function_response_keeps_source_text() {
    let result = reconstruct_tool_content(&json!(r#"{"temperature": 21}"#));
    assert_eq!(result.text().as_deref(), Some(r#"{"temperature": 21}"#));
    assert_eq!(result.artifact, Some(json!({"temperature": 21})));
}

#[test]
fn test_blank_and_null_content_yield_nothing() {
    for content in [json!(""), json!("   "), json!(null)] {
        let result = reconstruct_tool_content(&content);
        assert!(result.text().is_none());
        assert!(result.artifact.is_none());
    }
}

#[test]
fn test_structured_content_is_artifact_only() {
    let result = reconstruct_tool_content(&json!({"rows": [1, 2]}));
    assert!(result.texts.is_empty());
    assert_eq!(result.artifact, Some(json!({"rows": [1, 2]})));
}

// ---- resolve_tool_call_id ----

#[test]
fn test_tool_call_id_precedence() {
    let fallback = "msg-1";
    assert_eq!(
        resolve_tool_call_id(&json!({"tool_call_id": "a", "id": "b"}), fallback),
        "a"
    );
    assert_eq!(resolve_tool_call_id(&json!({"tool_call_id": "", "id": "b"}), fallback), "b");
    assert_eq!(resolve_tool_call_id(&json!({}), fallback), "msg-1");
}

#[test]
fn test_tool_call_id_is_never_empty() {
    let id = resolve_tool_call_id(&json!({"tool_call_id": ""}), "");
    assert!(!id.is_empty());
}

// ---- reconstruct_tool_message ----

#[test]
fn test_tool_message_from_entry() {
    let entry = json!({
        "id": "call_7",
        "name": "calc",
        "status": "error",
        "content": r#"{"functionResponse":{"response":{"error":"division by zero"}}}"#
    });
    let tool = reconstruct_tool_message(&entry, "msg-1");
    assert_eq!(tool.content, MessageContent::Text("division by zero".into()));
    assert_eq!(tool.tool_call_id, "call_7");
    assert_eq!(tool.name.as_deref(), Some("calc"));
    assert_eq!(tool.status, ToolStatus::Error);
}

#[test]
fn test_structured_content_keeps_raw_value_as_content() {
    let entry = json!({"tool_call_id": "c", "content": {"rows": 3}});
    let tool = reconstruct_tool_message(&entry, "msg-1");
    assert_eq!(tool.content.to_text(), r#"{"rows":3}"#);
    assert_eq!(tool.artifact, Some(json!({"rows": 3})));
}

#[test]
fn test_entry_artifact_used_when_nothing_derived() {
    let entry = json!({"tool_call_id": "c", "content": "", "artifact": {"kept": true}});
    let tool = reconstruct_tool_message(&entry, "msg-1");
    assert_eq!(tool.artifact, Some(json!({"kept": true})));
    assert_eq!(tool.status, ToolStatus::Success);
}
