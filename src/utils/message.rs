//! Utility functions for creating and handling Message objects.

use crate::types::{Message, Part, Role};
use crate::utils::parts::get_text_parts;
use uuid::Uuid;

/// Creates a new agent message containing a single text Part.
///
/// # Example
///
/// ```
/// use a2a_langchain_bridge::utils::new_agent_text_message;
///
/// let message = new_agent_text_message("Hello, I'm an agent", None::<String>, None::<String>);
/// assert_eq!(message.role, a2a_langchain_bridge::types::Role::Agent);
/// ```
pub fn new_agent_text_message(
    text: impl Into<String>,
    context_id: Option<impl Into<String>>,
    task_id: Option<impl Into<String>>,
) -> Message {
    new_agent_parts_message(vec![Part::text(text)], context_id, task_id)
}

/// Creates a new agent message containing a list of Parts, with a generated id.
pub fn new_agent_parts_message(
    parts: Vec<Part>,
    context_id: Option<impl Into<String>>,
    task_id: Option<impl Into<String>>,
) -> Message {
    Message::new(Uuid::new_v4().to_string(), Role::Agent, parts).with_ids(
        context_id.map(|id| id.into()),
        task_id.map(|id| id.into()),
    )
}

/// Extracts and joins all text content from a Message's parts.
///
/// # Example
///
/// ```
/// use a2a_langchain_bridge::utils::{new_agent_text_message, get_message_text};
///
/// let message = new_agent_text_message("Hello, world!", None::<String>, None::<String>);
/// assert_eq!(get_message_text(&message, "\n"), "Hello, world!");
/// ```
pub fn get_message_text(message: &Message, delimiter: &str) -> String {
    get_text_parts(&message.parts).join(delimiter)
}
