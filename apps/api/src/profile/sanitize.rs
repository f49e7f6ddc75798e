//! Sanitizer: turns markup-laden, entity-encoded free text into plain measurable text.
//!
//! Block-level closing tags and `<br>` become line breaks so list-ish markup keeps one
//! item per line; every other tag is dropped. Only a fixed set of entities is decoded.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

/// Entities decoded by the sanitizer. `&amp;` is last so `&amp;lt;` decodes to `&lt;`.
const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&amp;", "&"),
];

fn line_break_tags() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<br\s*/?>|</(p|div|li|h[1-6]|tr|ul|ol)\s*>").ok())
        .as_ref()
}

fn any_tag() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").ok()).as_ref()
}

/// Sanitizes a value of unknown shape.
///
/// `null` is empty, strings are cleaned, anything else is dumped structurally.
pub fn sanitize(input: &Value) -> String {
    match input {
        Value::Null => String::new(),
        Value::String(s) => sanitize_str(s),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

/// Strips tags, decodes the fixed entity set and tidies whitespace.
///
/// Returns the input unchanged if the tag patterns are unavailable.
pub fn sanitize_str(input: &str) -> String {
    let (Some(breaks), Some(tags)) = (line_break_tags(), any_tag()) else {
        return input.to_string();
    };

    let with_breaks = breaks.replace_all(input, "\n");
    let stripped = tags.replace_all(&with_breaks, "");
    let decoded = ENTITIES
        .iter()
        .fold(stripped.into_owned(), |text, (entity, plain)| {
            text.replace(entity, plain)
        });

    normalize_whitespace(&decoded)
}

/// Collapses runs of blanks inside each line, trims lines, squeezes blank-line runs to one
/// and trims the whole text.
fn normalize_whitespace(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    for raw in text.replace("\r\n", "\n").replace('\r', "\n").split('\n') {
        let line = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if line.is_empty() && lines.last().map_or(true, |l| l.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}
