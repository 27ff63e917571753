//! Tool-call normalization.
//!
//! Peers encode tool calls in one of two ways:
//!
//! - canonical: `tool_calls: [{"name": "...", "args": {...}, "id": "..."}]`
//! - legacy: `additional_kwargs.tool_calls: [{"id": "...", "function":
//!   {"name": "...", "arguments": "<JSON text>"}}]`
//!
//! Both are reduced to [`ToolCall`]s. The canonical array is preferred; the
//! legacy array is consulted only when the canonical one yields nothing.

use serde_json::{Map, Value};

use crate::chat::ToolCall;

/// Coerce a tool-call argument payload into a mapping.
///
/// A string is parsed as JSON and kept if it holds an object. An object
/// passes through. Everything else, including unparsable text, becomes an
/// empty mapping.
///
/// ```
/// use a2a_langchain_bridge::reconcile::coerce_args;
/// use serde_json::json;
///
/// assert_eq!(coerce_args(&json!("{\"a\": 1}")).get("a"), Some(&json!(1)));
/// assert!(coerce_args(&json!("not json")).is_empty());
/// assert!(coerce_args(&json!(42)).is_empty());
/// ```
pub fn coerce_args(value: &Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map.clone(),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        },
        _ => Map::new(),
    }
}

/// Reconcile the canonical and legacy encodings into one list.
///
/// `canonical` is the `tool_calls` field of a payload, `additional_kwargs`
/// the bag that may hold the legacy `tool_calls`. An empty result means the
/// caller should omit tool calls entirely.
pub fn normalize_tool_calls(
    canonical: Option<&Value>,
    additional_kwargs: Option<&Value>,
) -> Vec<ToolCall> {
    let calls = canonical.map(canonical_tool_calls).unwrap_or_default();
    if !calls.is_empty() {
        return calls;
    }
    additional_kwargs
        .and_then(|kwargs| kwargs.get("tool_calls"))
        .map(legacy_tool_calls)
        .unwrap_or_default()
}

fn canonical_tool_calls(value: &Value) -> Vec<ToolCall> {
    let Some(entries) = value.as_array() else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let name = non_empty_str(entry.get("name"))?;
            let args = entry.get("args").map(coerce_args).unwrap_or_default();
            Some(ToolCall::new(name, args, non_empty_str(entry.get("id"))))
        })
        .collect()
}

fn legacy_tool_calls(value: &Value) -> Vec<ToolCall> {
    let Some(entries) = value.as_array() else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let function = entry.get("function")?;
            let name = non_empty_str(function.get("name"))?;
            let args = function
                .get("arguments")
                .map(coerce_args)
                .unwrap_or_default();
            Some(ToolCall::new(name, args, non_empty_str(entry.get("id"))))
        })
        .collect()
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_string_args_are_parsed() {
        let calls = normalize_tool_calls(
            Some(&json!([{"name": "add", "args": "{\"a\": 1, \"b\": 2}", "id": "c1"}])),
            None,
        );
        assert_eq!(calls.len(), 1);
        assert_eq!(Value::Object(calls[0].args.clone()), json!({"a": 1, "b": 2}));
        assert_eq!(calls[0].id.as_deref(), Some("c1"));
    }

    #[test]
    fn entries_without_name_are_skipped() {
        let calls = normalize_tool_calls(
            Some(&json!([{"args": {}}, {"name": "", "args": {}}, {"name": "ok"}])),
            None,
        );
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "ok");
        assert!(calls[0].args.is_empty());
        assert!(calls[0].id.is_none());
    }

    #[test]
    fn legacy_used_when_canonical_empty() {
        let calls = normalize_tool_calls(
            Some(&json!([])),
            Some(&json!({"tool_calls": [
                {"id": "call_9", "function": {"name": "lookup", "arguments": "{\"q\": \"x\"}"}}
            ]})),
        );
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "lookup");
        assert_eq!(calls[0].args.get("q"), Some(&json!("x")));
        assert_eq!(calls[0].id.as_deref(), Some("call_9"));
    }

    #[test]
    fn legacy_unparsable_arguments_become_empty() {
        let calls = normalize_tool_calls(
            None,
            Some(&json!({"tool_calls": [{"function": {"name": "f", "arguments": "{oops"}}]})),
        );
        assert_eq!(calls.len(), 1);
        assert!(calls[0].args.is_empty());
    }

    #[test]
    fn nothing_anywhere_yields_empty() {
        assert!(normalize_tool_calls(None, None).is_empty());
        assert!(normalize_tool_calls(Some(&json!("bogus")), Some(&json!({}))).is_empty());
    }

    #[test]
    fn non_object_json_string_is_empty_mapping() {
        assert!(coerce_args(&json!("[1, 2]")).is_empty());
        assert!(coerce_args(&Value::Null).is_empty());
    }
}
