//! HTML escaping helpers.

use serde::Serialize;

/// Escapes text for element content and attribute values, matching the
/// `ENT_QUOTES` behavior the original templates relied on.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serializes a value for embedding inside a `<script>` element.
///
/// `</` is escaped so a string value cannot terminate the script element
/// early.
#[must_use]
pub fn json_for_script<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .map(|json| json.replace("</", "<\\/"))
        .unwrap_or_else(|_| "null".to_string())
}
