//! Text extraction from transport parts.

use crate::types::Part;
use crate::utils::get_text_parts;

/// Delimiter placed between text parts and between flattened text blocks.
pub const TEXT_DELIMITER: &str = "\n";

/// Concatenate the text parts of a message, in order, separated by `"\n"`.
///
/// File and data parts are ignored. An empty slice yields an empty string.
///
/// ```
/// use a2a_langchain_bridge::reconcile::extract_text;
/// use a2a_langchain_bridge::types::Part;
///
/// let parts = vec![Part::text("a"), Part::data(serde_json::json!({})), Part::text("b")];
/// assert_eq!(extract_text(&parts), "a\nb");
/// ```
pub fn extract_text(parts: &[Part]) -> String {
    get_text_parts(parts).join(TEXT_DELIMITER)
}
