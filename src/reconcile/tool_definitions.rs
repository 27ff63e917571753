//! Validation of tool advertisements received from a peer.
//!
//! A tool list is bound as a unit. If any element is malformed the whole
//! list is rejected, so the model is never offered a partial tool set that
//! the peer's later tool calls might not match.

use serde_json::Value;
use tracing::{debug, warn};

use crate::chat::ToolDefinition;
use crate::types::Message;

use super::tags::{find_tagged, PartTag, TOOLS_FIELD};

/// Check a candidate tool list against the function-calling schema shape.
///
/// Returns `true` only if the list is a non-empty array in which every
/// element has `type: "function"`, a non-empty `function.name` and
/// `function.description`, and a `function.parameters` object with
/// `type: "object"`, an object `properties`, and (if present) an array
/// `required`.
pub fn validate_tool_definitions(candidates: &Value) -> bool {
    match candidates.as_array() {
        Some(tools) if !tools.is_empty() => tools.iter().all(is_valid_tool),
        _ => false,
    }
}

fn is_valid_tool(tool: &Value) -> bool {
    if tool.get("type").and_then(Value::as_str) != Some("function") {
        return false;
    }
    let Some(function) = tool.get("function").and_then(Value::as_object) else {
        return false;
    };

    let non_empty = |key: &str| {
        function
            .get(key)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.is_empty())
    };
    if !non_empty("name") || !non_empty("description") {
        return false;
    }

    let Some(parameters) = function.get("parameters").and_then(Value::as_object) else {
        return false;
    };
    if parameters.get("type").and_then(Value::as_str) != Some("object") {
        return false;
    }
    if !parameters.get("properties").is_some_and(Value::is_object) {
        return false;
    }
    match parameters.get("required") {
        None => true,
        Some(required) => required.is_array(),
    }
}

/// Read the tool advertisement carried by a message, if any.
///
/// Looks at the first data part tagged `{type: "tool-definitions",
/// format: "langchain"}`. Returns an empty list when there is no such part,
/// or when the advertised list fails validation (logged).
pub fn extract_tool_definitions(message: &Message) -> Vec<ToolDefinition> {
    let Some(tagged) = find_tagged(&message.parts, PartTag::ToolDefinitions) else {
        return Vec::new();
    };

    let candidates = tagged.data.get(TOOLS_FIELD).unwrap_or(&Value::Null);
    if let Some(tools) = candidates.as_array() {
        tagged.check_count(tools.len(), TOOLS_FIELD);
    }

    if !validate_tool_definitions(candidates) {
        warn!(
            message_id = %message.message_id,
            "Rejected tool definitions; proceeding without tools"
        );
        return Vec::new();
    }

    match serde_json::from_value::<Vec<ToolDefinition>>(candidates.clone()) {
        Ok(tools) => {
            debug!(
                message_id = %message.message_id,
                count = tools.len(),
                "Accepted tool definitions"
            );
            tools
        }
        Err(err) => {
            warn!(
                message_id = %message.message_id,
                error = %err,
                "Tool definitions could not be decoded; proceeding without tools"
            );
            Vec::new()
        }
    }
}
