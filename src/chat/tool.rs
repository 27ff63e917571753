//! Tool invocation and tool schema types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A tool invocation requested by the model.
///
/// `args` is always a mapping; encodings that carry arguments as a JSON
/// string are parsed before a `ToolCall` is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool name. Never empty.
    pub name: String,
    /// Call arguments.
    #[serde(default)]
    pub args: Map<String, Value>,
    /// Provider-assigned call identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ToolCall {
    /// Create a tool call.
    pub fn new(name: impl Into<String>, args: Map<String, Value>, id: Option<String>) -> Self {
        ToolCall {
            name: name.into(),
            args,
            id,
        }
    }
}

/// A tool invocation that could not be parsed into a [`ToolCall`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvalidToolCall {
    /// Tool name, if one was produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The raw argument text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<String>,
    /// Provider-assigned call identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Why the call was rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A callable tool advertised by a peer, in function-calling schema shape.
///
/// ```json
/// {
///   "type": "function",
///   "function": {
///     "name": "get_weather",
///     "description": "Current weather for a city",
///     "parameters": {
///       "type": "object",
///       "properties": {"city": {"type": "string"}},
///       "required": ["city"]
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Always `"function"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// The function schema.
    pub function: FunctionDefinition,
}

/// The `function` member of a [`ToolDefinition`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    /// Function name.
    pub name: String,
    /// What the function does.
    pub description: String,
    /// JSON-Schema-like parameter object.
    pub parameters: FunctionParameters,
}

/// The parameter schema of a [`FunctionDefinition`].
///
/// Schema keywords other than `type`, `properties` and `required` are kept
/// in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionParameters {
    /// Always `"object"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Property schemas keyed by parameter name.
    pub properties: Map<String, Value>,
    /// Names of required parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    /// Any other schema keywords.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ToolDefinition {
    /// Create a function tool definition.
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        properties: Map<String, Value>,
        required: Option<Vec<String>>,
    ) -> Self {
        ToolDefinition {
            kind: "function".to_string(),
            function: FunctionDefinition {
                name: name.into(),
                description: description.into(),
                parameters: FunctionParameters {
                    kind: "object".to_string(),
                    properties,
                    required,
                    extra: Map::new(),
                },
            },
        }
    }

    /// The function name.
    pub fn name(&self) -> &str {
        &self.function.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tool_definition_keeps_extra_schema_keywords() {
        let value = json!({
            "type": "function",
            "function": {
                "name": "lookup",
                "description": "Look something up",
                "parameters": {
                    "type": "object",
                    "properties": {"q": {"type": "string"}},
                    "additionalProperties": false
                }
            }
        });
        let def: ToolDefinition = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(def.name(), "lookup");
        assert!(def.function.parameters.required.is_none());
        assert_eq!(serde_json::to_value(&def).unwrap(), value);
    }

    #[test]
    fn tool_call_args_default_to_empty() {
        let call: ToolCall = serde_json::from_value(json!({"name": "noop"})).unwrap();
        assert!(call.args.is_empty());
        assert!(call.id.is_none());
    }
}
