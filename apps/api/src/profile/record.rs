//! The raw enhancement record as produced by the upstream enhancement service.
//!
//! Nothing about the shape of this record is trusted. Every field is held as raw
//! JSON and only coerced into canonical types by the resolver, so a wrong-typed
//! field can never fail deserialization of the whole record.

use serde::Serialize;
use serde_json::Value;

use crate::profile::sanitize::sanitize;

/// Accepted key names per field, most preferred first.
const PERSONAL_INFO_KEYS: &[&str] = &["personalInfo"];
const SECTIONS_KEYS: &[&str] = &["sections", "enhancedSections"];
const KEYWORD_ANALYSIS_KEYS: &[&str] = &["keywordAnalysis"];
const FULL_TEXT_KEYS: &[&str] = &["fullText", "enhancedFullText", "fullDocument"];
const ORIGINAL_CV_KEYS: &[&str] = &["originalCv", "originalData"];

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancementRecord {
    pub personal_info: Value,
    pub sections: Value,
    pub keyword_analysis: Value,
    pub full_text: Value,
    pub original_cv: Value,
}

impl EnhancementRecord {
    /// Builds a record from arbitrary JSON. Anything that is not an object is an empty record.
    ///
    /// Each field takes the first present, non-null key among its accepted names, so a
    /// record carrying both `fullText` and `enhancedFullText` keeps the former and
    /// loses nothing else.
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        let pick = |keys: &[&str]| field(&value, keys).cloned().unwrap_or(Value::Null);
        Self {
            personal_info: pick(PERSONAL_INFO_KEYS),
            sections: pick(SECTIONS_KEYS),
            keyword_analysis: pick(KEYWORD_ANALYSIS_KEYS),
            full_text: pick(FULL_TEXT_KEYS),
            original_cv: pick(ORIGINAL_CV_KEYS),
        }
    }

    /// Returns a sub-object of `originalCv`, tolerating a missing or non-object parent.
    pub fn original(&self, key: &str) -> Option<&Value> {
        self.original_cv.get(key).filter(|v| !v.is_null())
    }
}

/// Looks up the first present, non-null key among `keys`.
pub fn field<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let object = value.as_object()?;
    keys.iter()
        .filter_map(|k| object.get(*k))
        .find(|v| !v.is_null())
}

/// Coerces a JSON value in a text position into sanitized text.
///
/// Strings are sanitized, numbers and booleans are stringified, arrays and objects
/// are flattened to their string leaves. Blank results are `None`.
pub fn text_of(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::Array(_) | Value::Object(_) => flatten_text(value).join("\n"),
        scalar => sanitize(scalar),
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// `text_of` for the first present key among `keys`.
pub fn text_field(value: &Value, keys: &[&str]) -> Option<String> {
    let object = value.as_object()?;
    keys.iter()
        .filter_map(|k| object.get(*k))
        .find_map(text_of)
}

/// Collects every string-ish leaf of a JSON tree in document order.
pub fn flatten_text(value: &Value) -> Vec<String> {
    let mut out = Vec::new();
    collect_leaves(value, &mut out);
    out
}

fn collect_leaves(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::Array(items) => items.iter().for_each(|item| collect_leaves(item, out)),
        Value::Object(map) => map.values().for_each(|item| collect_leaves(item, out)),
        scalar => {
            if let Some(text) = text_of(scalar) {
                out.push(text);
            }
        }
    }
}

/// Coerces a value in a list position into a list of sanitized strings.
///
/// Arrays keep one entry per element (objects flattened to one line), a bare string
/// is a single entry.
pub fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(_) => {
                    let line = flatten_text(item).join(" — ");
                    if line.is_empty() {
                        None
                    } else {
                        Some(line)
                    }
                }
                other => text_of(other),
            })
            .collect(),
        other => text_of(other).into_iter().collect(),
    }
}
