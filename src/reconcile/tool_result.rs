//! Reconstruction of tool execution results.
//!
//! A tool result's `content` is either free text or a JSON-encoded record
//! (or array of records) in the function-calling response shape:
//!
//! ```json
//! [{"functionResponse": {"name": "calc", "response": {"output": "42"}}}]
//! ```
//!
//! The records are flattened to readable text and the parsed value is kept
//! as the artifact, so the model sees text while the structure survives.

use serde_json::Value;
use uuid::Uuid;

use crate::chat::{MessageContent, ToolMessage, ToolStatus};

use super::text::TEXT_DELIMITER;

/// Readable text and preserved payload derived from a tool result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolResultContent {
    /// Text fragments, one per flattened record.
    pub texts: Vec<String>,
    /// The structured value the texts were derived from.
    pub artifact: Option<Value>,
}

impl ToolResultContent {
    /// The text fragments joined with `"\n"`, or `None` if there are none.
    pub fn text(&self) -> Option<String> {
        if self.texts.is_empty() {
            None
        } else {
            Some(self.texts.join(TEXT_DELIMITER))
        }
    }
}

/// Derive text and artifact from a raw tool-result `content` value.
///
/// - non-string (and non-null) content: no text, the value is the artifact;
/// - blank string: nothing;
/// - unparsable string: the trimmed string is both text and artifact;
/// - JSON string: `functionResponse.response` of each record flattened to
///   text, falling back to the trimmed string; the parsed value is the
///   artifact.
pub fn reconstruct_tool_content(content: &Value) -> ToolResultContent {
    let raw = match content {
        Value::String(raw) => raw,
        Value::Null => return ToolResultContent::default(),
        other => {
            return ToolResultContent {
                texts: Vec::new(),
                artifact: Some(other.clone()),
            }
        }
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ToolResultContent::default();
    }

    let parsed = match serde_json::from_str::<Value>(trimmed) {
        Ok(parsed) => parsed,
        Err(_) => {
            return ToolResultContent {
                texts: vec![trimmed.to_string()],
                artifact: Some(Value::String(trimmed.to_string())),
            }
        }
    };

    let records: Vec<&Value> = match &parsed {
        Value::Array(items) => items.iter().collect(),
        single => vec![single],
    };
    let mut texts: Vec<String> = records
        .into_iter()
        .filter_map(function_response_text)
        .collect();
    if texts.is_empty() {
        texts.push(trimmed.to_string());
    }

    ToolResultContent {
        texts,
        artifact: Some(parsed),
    }
}

fn function_response_text(record: &Value) -> Option<String> {
    let function_response = record
        .get("functionResponse")
        .or_else(|| record.get("function_response"))?;
    let response = function_response.get("response")?;

    let text = match response {
        Value::String(text) => text.clone(),
        other => match (
            other.get("output").and_then(Value::as_str),
            other.get("error").and_then(Value::as_str),
        ) {
            (Some(output), _) => output.to_string(),
            (None, Some(error)) => error.to_string(),
            (None, None) => other.to_string(),
        },
    };
    Some(text)
}

/// Pick the identifier of the tool call a result answers.
///
/// First non-empty of `tool_call_id`, `id`, then `fallback`. If all three
/// are empty a fresh identifier is generated so the result never carries
/// an empty id.
pub fn resolve_tool_call_id(entry: &Value, fallback: &str) -> String {
    ["tool_call_id", "id"]
        .iter()
        .filter_map(|key| entry.get(*key).and_then(Value::as_str))
        .chain(std::iter::once(fallback))
        .find(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Build a [`ToolMessage`] from one `toolMessages` entry.
///
/// The entry shape is `{id?, tool_call_id?, name?, content, artifact?,
/// status?}`. When no text could be derived, the raw content is used as the
/// message content. A derived artifact takes precedence over the entry's
/// own `artifact` field.
pub fn reconstruct_tool_message(entry: &Value, fallback_id: &str) -> ToolMessage {
    let raw_content = entry.get("content").unwrap_or(&Value::Null);
    let derived = reconstruct_tool_content(raw_content);

    let content = match derived.text() {
        Some(text) => MessageContent::Text(text),
        None => match raw_content {
            Value::String(text) => MessageContent::Text(text.clone()),
            Value::Array(blocks) => MessageContent::Blocks(blocks.clone()),
            Value::Null => MessageContent::default(),
            other => MessageContent::Text(other.to_string()),
        },
    };

    let artifact = derived
        .artifact
        .or_else(|| entry.get("artifact").filter(|a| !a.is_null()).cloned());

    let status = match entry.get("status").and_then(Value::as_str) {
        Some("error") => ToolStatus::Error,
        _ => ToolStatus::Success,
    };

    ToolMessage {
        content,
        artifact,
        tool_call_id: resolve_tool_call_id(entry, fallback_id),
        name: entry
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .map(str::to_string),
        status,
    }
}
