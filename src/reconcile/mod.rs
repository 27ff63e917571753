//! Message and tool reconciliation between transport and model messages.
//!
//! Everything here is a pure, synchronous function over borrowed input:
//! no shared state, no I/O, no errors. Malformed structured input degrades
//! to a less structured interpretation (ultimately plain text) instead of
//! failing. The one exception is tool advertisement validation, which is
//! all-or-nothing.
//!
//! - [`extract_text`] — join the text parts of a message
//! - [`validate_tool_definitions`] / [`extract_tool_definitions`] — inbound tool schemas
//! - [`normalize_tool_calls`] / [`coerce_args`] — canonical and legacy tool-call encodings
//! - [`reconstruct_tool_content`] / [`reconstruct_tool_message`] — tool results
//! - [`to_chat_message`] — transport → conversational
//! - [`to_transport_message`] — conversational (AI) → transport
//!
//! [`to_transport_message`] followed by [`to_chat_message`] reproduces the
//! original AI message's content, tool calls and metadata.

pub mod payload;
pub mod reconstruct;
pub mod serialize;
pub mod tags;
pub mod text;
pub mod tool_calls;
pub mod tool_definitions;
pub mod tool_result;

pub use payload::AiMessagePayload;
pub use reconstruct::{to_chat_message, Reconstruction};
pub use serialize::{to_payload, to_transport_message, EMPTY_RESPONSE_PLACEHOLDER};
pub use tags::{find_tagged, PartTag, TaggedData};
pub use text::{extract_text, TEXT_DELIMITER};
pub use tool_calls::{coerce_args, normalize_tool_calls};
pub use tool_definitions::{extract_tool_definitions, validate_tool_definitions};
pub use tool_result::{
    reconstruct_tool_content, reconstruct_tool_message, resolve_tool_call_id, ToolResultContent,
};
