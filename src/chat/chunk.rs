//! Streamed response fragments and their accumulation.
//!
//! A streaming chat model yields [`AiMessageChunk`]s. The caller folds them
//! with [`AiMessageChunk::concat`] and turns the sum into an [`AiMessage`]
//! with [`AiMessageChunk::into_message`], at which point the accumulated
//! tool-call argument text is parsed.

use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::BridgeResult;

use super::message::{AiMessage, MessageContent};
use super::tool::{InvalidToolCall, ToolCall};

/// A fragment of a tool call as emitted mid-stream.
///
/// Fragments sharing an `index` belong to the same call; their `args` text
/// is concatenated in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolCallChunk {
    /// Tool name (usually only on the first fragment).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Partial JSON argument text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<String>,
    /// Call identifier (usually only on the first fragment).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Position of the call within the response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

/// One fragment of a streamed AI response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiMessageChunk {
    /// Content fragment.
    pub content: MessageContent,
    /// Message identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Tool-call fragments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_call_chunks: Vec<ToolCallChunk>,
    /// Provider-specific extra fields.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub additional_kwargs: Map<String, Value>,
    /// Provider response metadata.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub response_metadata: Map<String, Value>,
    /// Token usage for this fragment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<Value>,
}

impl AiMessageChunk {
    /// A chunk carrying only text.
    pub fn text(content: impl Into<String>) -> Self {
        AiMessageChunk {
            content: MessageContent::Text(content.into()),
            ..Default::default()
        }
    }

    /// A chunk carrying only a tool-call fragment.
    pub fn tool_call(chunk: ToolCallChunk) -> Self {
        AiMessageChunk {
            tool_call_chunks: vec![chunk],
            ..Default::default()
        }
    }

    /// Merge `other` into `self`, returning the sum.
    pub fn concat(mut self, other: AiMessageChunk) -> Self {
        self.content = concat_content(self.content, other.content);

        if self.id.is_none() {
            self.id = other.id;
        }

        for incoming in other.tool_call_chunks {
            let existing = match incoming.index {
                Some(index) => self
                    .tool_call_chunks
                    .iter_mut()
                    .find(|chunk| chunk.index == Some(index)),
                None => None,
            };
            match existing {
                Some(chunk) => merge_tool_call_chunk(chunk, incoming),
                None => self.tool_call_chunks.push(incoming),
            }
        }

        merge_maps(&mut self.additional_kwargs, other.additional_kwargs);
        merge_maps(&mut self.response_metadata, other.response_metadata);

        self.usage_metadata = match (self.usage_metadata.take(), other.usage_metadata) {
            (Some(mut left), Some(right)) => {
                add_usage(&mut left, right);
                Some(left)
            }
            (left, right) => left.or(right),
        };

        self
    }

    /// Finish accumulation and build the AI message.
    ///
    /// Tool-call fragments with a name and parseable object arguments (or no
    /// arguments) become [`ToolCall`]s; everything else becomes an
    /// [`InvalidToolCall`].
    pub fn into_message(self) -> AiMessage {
        let mut tool_calls = Vec::new();
        let mut invalid_tool_calls = Vec::new();

        for chunk in self.tool_call_chunks {
            let name = chunk.name.filter(|name| !name.is_empty());
            let raw_args = chunk.args.unwrap_or_default();

            let parsed = if raw_args.trim().is_empty() {
                Some(Map::new())
            } else {
                match serde_json::from_str::<Value>(&raw_args) {
                    Ok(Value::Object(map)) => Some(map),
                    _ => None,
                }
            };

            match (name, parsed) {
                (Some(name), Some(args)) => tool_calls.push(ToolCall {
                    name,
                    args,
                    id: chunk.id,
                }),
                (name, _) => invalid_tool_calls.push(InvalidToolCall {
                    error: Some(if name.is_none() {
                        "Missing tool name.".to_string()
                    } else {
                        "Malformed args.".to_string()
                    }),
                    name,
                    args: Some(raw_args),
                    id: chunk.id,
                }),
            }
        }

        AiMessage {
            content: self.content,
            id: self.id,
            tool_calls,
            invalid_tool_calls,
            additional_kwargs: self.additional_kwargs,
            response_metadata: self.response_metadata,
            usage_metadata: self.usage_metadata,
        }
    }
}

/// Drain a chunk stream into a single AI message.
///
/// The first failed fragment aborts accumulation. An empty stream yields an
/// empty AI message.
pub async fn collect_chunks<S>(stream: S) -> BridgeResult<AiMessage>
where
    S: Stream<Item = BridgeResult<AiMessageChunk>>,
{
    futures::pin_mut!(stream);
    let mut total = AiMessageChunk::default();
    while let Some(chunk) = stream.next().await {
        total = total.concat(chunk?);
    }
    Ok(total.into_message())
}

fn concat_content(left: MessageContent, right: MessageContent) -> MessageContent {
    match (left, right) {
        (MessageContent::Text(mut a), MessageContent::Text(b)) => {
            a.push_str(&b);
            MessageContent::Text(a)
        }
        (MessageContent::Blocks(mut a), MessageContent::Blocks(b)) => {
            a.extend(b);
            MessageContent::Blocks(a)
        }
        (MessageContent::Text(a), MessageContent::Blocks(b)) => {
            let mut blocks = Vec::with_capacity(b.len() + 1);
            if !a.is_empty() {
                blocks.push(text_block(a));
            }
            blocks.extend(b);
            MessageContent::Blocks(blocks)
        }
        (MessageContent::Blocks(mut a), MessageContent::Text(b)) => {
            if !b.is_empty() {
                a.push(text_block(b));
            }
            MessageContent::Blocks(a)
        }
    }
}

fn text_block(text: String) -> Value {
    serde_json::json!({"type": "text", "text": text})
}

fn merge_tool_call_chunk(target: &mut ToolCallChunk, incoming: ToolCallChunk) {
    if target.name.is_none() {
        target.name = incoming.name;
    }
    if target.id.is_none() {
        target.id = incoming.id;
    }
    if let Some(args) = incoming.args {
        target.args.get_or_insert_with(String::new).push_str(&args);
    }
}

/// Later keys override earlier ones, except that nested objects merge.
fn merge_maps(target: &mut Map<String, Value>, incoming: Map<String, Value>) {
    for (key, value) in incoming {
        match (target.get_mut(&key), value) {
            (Some(Value::Object(left)), Value::Object(right)) => merge_maps(left, right),
            (Some(slot), value) => *slot = value,
            (None, value) => {
                target.insert(key, value);
            }
        }
    }
}

/// Token counts add up; anything else behaves like [`merge_maps`].
fn add_usage(target: &mut Value, incoming: Value) {
    match (target, incoming) {
        (Value::Object(left), Value::Object(right)) => {
            for (key, value) in right {
                match left.get_mut(&key) {
                    Some(existing) => add_usage(existing, value),
                    None => {
                        left.insert(key, value);
                    }
                }
            }
        }
        (left @ Value::Number(_), Value::Number(right)) => {
            if let (Some(a), Some(b)) = (left.as_u64(), right.as_u64()) {
                *left = Value::from(a + b);
            } else if let (Some(a), Some(b)) = (left.as_f64(), right.as_f64()) {
                *left = Value::from(a + b);
            }
        }
        (left, right) => *left = right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_chunks_concatenate() {
        let total = AiMessageChunk::text("Hel")
            .concat(AiMessageChunk::text("lo"))
            .into_message();
        assert_eq!(total.content, MessageContent::Text("Hello".into()));
        assert!(total.tool_calls.is_empty());
    }

    #[test]
    fn tool_call_fragments_merge_by_index() {
        let first = AiMessageChunk::tool_call(ToolCallChunk {
            name: Some("search".into()),
            args: Some("{\"q\": ".into()),
            id: Some("call_1".into()),
            index: Some(0),
        });
        let second = AiMessageChunk::tool_call(ToolCallChunk {
            name: None,
            args: Some("\"rust\"}".into()),
            id: None,
            index: Some(0),
        });

        let message = first.concat(second).into_message();
        assert_eq!(message.tool_calls.len(), 1);
        assert_eq!(message.tool_calls[0].name, "search");
        assert_eq!(message.tool_calls[0].id.as_deref(), Some("call_1"));
        assert_eq!(message.tool_calls[0].args.get("q"), Some(&json!("rust")));
    }

    #[test]
    fn malformed_arguments_become_invalid_tool_calls() {
        let message = AiMessageChunk::tool_call(ToolCallChunk {
            name: Some("search".into()),
            args: Some("{\"q\": ".into()),
            id: Some("call_1".into()),
            index: Some(0),
        })
        .into_message();
        assert!(message.tool_calls.is_empty());
        assert_eq!(message.invalid_tool_calls.len(), 1);
        assert_eq!(message.invalid_tool_calls[0].args.as_deref(), Some("{\"q\": "));
        assert_eq!(
            message.invalid_tool_calls[0].error.as_deref(),
            Some("Malformed args.")
        );
    }

    #[test]
    fn usage_metadata_adds_up() {
        let mut first = AiMessageChunk::text("a");
        first.usage_metadata = Some(json!({"input_tokens": 10, "output_tokens": 1}));
        let mut second = AiMessageChunk::text("b");
        second.usage_metadata = Some(json!({"output_tokens": 2, "total_tokens": 13}));

        let message = first.concat(second).into_message();
        assert_eq!(
            message.usage_metadata,
            Some(json!({"input_tokens": 10, "output_tokens": 3, "total_tokens": 13}))
        );
    }

    #[test]
    fn response_metadata_merges_nested_objects() {
        let mut first = AiMessageChunk::default();
        first.response_metadata = json!({"model": "m", "extra": {"a": 1}})
            .as_object()
            .cloned()
            .unwrap();
        let mut second = AiMessageChunk::default();
        second.response_metadata = json!({"finish_reason": "stop", "extra": {"b": 2}})
            .as_object()
            .cloned()
            .unwrap();

        let message = first.concat(second).into_message();
        assert_eq!(
            Value::Object(message.response_metadata),
            json!({"model": "m", "finish_reason": "stop", "extra": {"a": 1, "b": 2}})
        );
    }

    #[tokio::test]
    async fn collect_chunks_drains_the_stream() {
        let stream = futures::stream::iter(vec![
            Ok::<_, crate::error::BridgeError>(AiMessageChunk::text("4")),
            Ok(AiMessageChunk::text("2")),
        ]);
        let message = collect_chunks(stream).await.unwrap();
        assert_eq!(message.content.to_text(), "42");
    }
}
