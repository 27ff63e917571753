//! Wire shape of the `langchain_ai_message` data part.
//!
//! Every field is held as raw JSON so that decoding an arbitrary object
//! never fails; the reconstructor decides per field what is usable.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload of a data part tagged `{type: "langchain_ai_message"}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiMessagePayload {
    /// String or array of content blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,

    /// Message identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    /// Canonical tool calls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Value>,

    /// Provider extra fields, possibly holding legacy tool calls.
    #[serde(
        default,
        alias = "additional_fields",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_kwargs: Option<Value>,

    /// Provider response metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_metadata: Option<Value>,

    /// Token usage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<Value>,

    /// Tool calls the model produced but that could not be parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_tool_calls: Option<Value>,
}

impl AiMessagePayload {
    /// Decode a data part payload. Returns `None` if it is not an object.
    pub fn from_data(data: &Value) -> Option<Self> {
        if !data.is_object() {
            return None;
        }
        serde_json::from_value(data.clone()).ok()
    }
}

/// `true` for null, empty strings, empty arrays and empty objects.
pub(crate) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
