//! Utility functions for working with Part objects.

use crate::types::Part;
use serde_json::Value;

/// Extracts text content from all text Parts in a list, in order.
///
/// # Example
///
/// ```
/// use a2a_langchain_bridge::types::Part;
/// use a2a_langchain_bridge::utils::get_text_parts;
///
/// let parts = vec![Part::text("Hello"), Part::data(serde_json::json!({})), Part::text("World")];
/// assert_eq!(get_text_parts(&parts), vec!["Hello", "World"]);
/// ```
pub fn get_text_parts(parts: &[Part]) -> Vec<String> {
    parts
        .iter()
        .filter_map(|part| match part {
            Part::Text { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

/// Iterates over the data Parts in a list as `(data, metadata)` pairs, in order.
///
/// # Example
///
/// ```
/// use a2a_langchain_bridge::types::Part;
/// use a2a_langchain_bridge::utils::data_parts;
/// use serde_json::json;
///
/// let parts = vec![
///     Part::text("ignored"),
///     Part::tagged_data(json!({"k": 1}), json!({"type": "x"})),
/// ];
/// let found: Vec<_> = data_parts(&parts).collect();
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].0, &json!({"k": 1}));
/// ```
pub fn data_parts<'a>(
    parts: &'a [Part],
) -> impl Iterator<Item = (&'a Value, Option<&'a Value>)> + 'a {
    parts.iter().filter_map(|part| match part {
        Part::Data { data, metadata } => Some((data, metadata.as_ref())),
        _ => None,
    })
}
