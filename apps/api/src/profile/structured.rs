//! Defensive "is this text actually serialized data?" parsing.
//!
//! Enhancement output sometimes carries JSON lists serialized as text, occasionally
//! wrapped in markdown fences or surrounded by prose. `try_parse_structured` is the single
//! place that decides and parses; callers only ever see `Option<T>`.

use std::sync::OnceLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::profile::models::{CertificationEntry, EducationEntry, ExperienceEntry};
use crate::profile::record::{field, string_list, text_field, text_of};

/// Keys under which an object may wrap the list it actually carries.
const LIST_WRAPPER_KEYS: &[&str] = &[
    "items",
    "entries",
    "experience",
    "workExperience",
    "education",
    "certifications",
    "skills",
    "data",
];

fn key_shaped() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""[A-Za-z_][A-Za-z0-9_ ]*"\s*:"#).ok())
        .as_ref()
}

/// Heuristic: does the text look like serialized structured data?
///
/// True when the trimmed text opens a JSON array/object, or contains a `"key":` shape.
pub fn looks_structured(text: &str) -> bool {
    let body = strip_json_fences(text);
    body.starts_with('[')
        || body.starts_with('{')
        || key_shaped().is_some_and(|re| re.is_match(body))
}

/// Parses `text` as structured data when the heuristic says it is structured.
pub fn try_parse_structured<T: DeserializeOwned>(text: &str) -> Option<T> {
    if !looks_structured(text) {
        return None;
    }
    let body = strip_json_fences(text);
    if let Ok(parsed) = serde_json::from_str::<T>(body) {
        return Some(parsed);
    }
    // Prose around the payload: retry on the outermost bracket span.
    let parsed = [('[', ']'), ('{', '}')].into_iter().find_map(|(open, close)| {
        let start = body.find(open)?;
        let end = body.rfind(close)?;
        (end > start)
            .then(|| serde_json::from_str::<T>(&body[start..=end]).ok())
            .flatten()
    });
    if parsed.is_none() {
        debug!("text looked structured but did not parse ({} chars)", text.len());
    }
    parsed
}

/// Strips ```json ... ``` or ``` ... ``` code fences.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));
    match inner {
        Some(stripped) => {
            let stripped = stripped.trim_start();
            stripped
                .strip_suffix("```")
                .map(str::trim)
                .unwrap_or(stripped)
        }
        None => text,
    }
}

/// Normalises structured content to a list of items.
///
/// Arrays are returned as-is; an object wrapping a list under a known key yields
/// that list; any other object is a single item.
pub fn as_item_list(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        Value::Object(_) => match field(value, LIST_WRAPPER_KEYS) {
            Some(Value::Array(items)) => items.clone(),
            _ => vec![value.clone()],
        },
        Value::String(text) => try_parse_structured::<Value>(text)
            .map(|parsed| as_item_list(&parsed))
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn bullet_list(value: &Value, keys: &[&str]) -> Vec<String> {
    match field(value, keys) {
        Some(Value::String(text)) => text_of(&Value::String(text.clone()))
            .map(|t| split_lines(&t))
            .unwrap_or_default(),
        Some(other) => string_list(other),
        None => Vec::new(),
    }
}

/// Splits multi-line text into items, dropping bullet glyphs and blank lines.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            line.trim()
                .trim_start_matches(['•', '-', '*', '·', '–'])
                .trim()
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}

/// Splits a free-text skills blob on newlines, commas, semicolons and bullets.
pub fn split_skill_text(text: &str) -> Vec<String> {
    text.split(['\n', ',', ';', '•', '|'])
        .map(|item| item.trim().trim_start_matches(['-', '*']).trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

pub fn experience_from_value(value: &Value) -> Option<ExperienceEntry> {
    if !value.is_object() {
        return None;
    }
    let entry = ExperienceEntry {
        title: text_field(value, &["title", "position", "role", "jobTitle"]),
        company: text_field(value, &["company", "employer", "organization", "companyName"]),
        location: text_field(value, &["location", "city"]),
        start_date: text_field(value, &["startDate", "start_date", "start", "from"]),
        end_date: text_field(value, &["endDate", "end_date", "end", "to"])
            .or_else(|| text_field(value, &["dates", "period", "duration"])),
        description: text_field(value, &["description", "summary"]),
        highlights: bullet_list(
            value,
            &["achievements", "highlights", "bullets", "responsibilities"],
        ),
    };
    (entry.title.is_some() || entry.company.is_some()).then_some(entry)
}

pub fn education_from_value(value: &Value) -> Option<EducationEntry> {
    if !value.is_object() {
        return None;
    }
    let mut details = bullet_list(value, &["details", "honors", "achievements", "courses"]);
    if let Some(gpa) = text_field(value, &["gpa", "grade"]) {
        details.insert(0, format!("GPA: {gpa}"));
    }
    let entry = EducationEntry {
        degree: text_field(value, &["degree", "title", "qualification", "field"]),
        institution: text_field(value, &["institution", "school", "university", "organization"]),
        location: text_field(value, &["location", "city"]),
        start_date: text_field(value, &["startDate", "start_date", "start", "from"]),
        end_date: text_field(value, &["endDate", "end_date", "end", "to", "year", "graduationDate"])
            .or_else(|| text_field(value, &["dates", "period"])),
        details,
    };
    (entry.degree.is_some() || entry.institution.is_some()).then_some(entry)
}

pub fn certification_from_value(value: &Value) -> Option<CertificationEntry> {
    match value {
        Value::Object(_) => {
            let name = text_field(value, &["name", "title", "certification"])?;
            Some(CertificationEntry {
                name,
                issuer: text_field(value, &["issuer", "organization", "authority", "issuedBy"]),
                date: text_field(value, &["date", "year", "issueDate", "dateIssued"]),
                credential_id: text_field(value, &["credentialId", "credential_id", "id"]),
            })
        }
        Value::String(_) => text_of(value).map(|name| CertificationEntry {
            name,
            ..Default::default()
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_prose_is_not_structured() {
        assert!(!looks_structured("Led a team of 5 engineers: shipped v2."));
        assert_eq!(try_parse_structured::<Value>("Just text"), None);
    }

    #[test]
    fn test_array_text_parses() {
        let parsed: Option<Value> = try_parse_structured(r#"[{"title": "Engineer"}]"#);
        assert_eq!(parsed, Some(json!([{"title": "Engineer"}])));
    }

    #[test]
    fn test_fenced_json_parses() {
        let text = "```json\n[\"Rust\", \"SQL\"]\n```";
        let parsed: Option<Vec<String>> = try_parse_structured(text);
        assert_eq!(parsed, Some(vec!["Rust".to_string(), "SQL".to_string()]));
    }

    #[test]
    fn test_payload_inside_prose_parses() {
        let text = r#"Here is the list: [{"company": "Acme"}] hope it helps"#;
        let parsed: Option<Value> = try_parse_structured(text);
        assert_eq!(parsed, Some(json!([{"company": "Acme"}])));
    }

    #[test]
    fn test_key_shaped_but_broken_is_none() {
        assert!(looks_structured(r#"{"title": "Engineer", "#));
        assert_eq!(try_parse_structured::<Value>(r#"{"title": "Engineer", "#), None);
    }

    #[test]
    fn test_as_item_list_unwraps_known_key() {
        let value = json!({"experience": [{"title": "A"}, {"title": "B"}]});
        assert_eq!(as_item_list(&value).len(), 2);
        assert_eq!(as_item_list(&json!({"title": "A"})).len(), 1);
        assert!(as_item_list(&json!(5)).is_empty());
    }

    #[test]
    fn test_experience_from_value_aliases() {
        let entry = experience_from_value(&json!({
            "position": "Platform Lead",
            "employer": "Acme",
            "start": "2019",
            "achievements": "• Cut costs 30%\n• Hired 4 engineers",
        }))
        .unwrap();
        assert_eq!(entry.title.as_deref(), Some("Platform Lead"));
        assert_eq!(entry.company.as_deref(), Some("Acme"));
        assert_eq!(entry.start_date.as_deref(), Some("2019"));
        assert_eq!(entry.highlights, vec!["Cut costs 30%", "Hired 4 engineers"]);
    }

    #[test]
    fn test_experience_without_identity_is_dropped() {
        assert_eq!(experience_from_value(&json!({"description": "x"})), None);
        assert_eq!(experience_from_value(&json!("Engineer at Acme")), None);
    }

    #[test]
    fn test_education_gpa_goes_first_in_details() {
        let entry = education_from_value(&json!({
            "degree": "BSc Computer Science",
            "school": "UPM",
            "gpa": 3.8,
            "honors": ["Cum laude"],
        }))
        .unwrap();
        assert_eq!(entry.details, vec!["GPA: 3.8", "Cum laude"]);
        assert_eq!(entry.institution.as_deref(), Some("UPM"));
    }

    #[test]
    fn test_certification_from_string_and_object() {
        assert_eq!(
            certification_from_value(&json!("CISSP")).map(|c| c.name),
            Some("CISSP".to_string())
        );
        let cert = certification_from_value(&json!({"title": "AWS SA", "issuer": "Amazon"}))
            .unwrap();
        assert_eq!(cert.issuer.as_deref(), Some("Amazon"));
        assert_eq!(certification_from_value(&json!({"issuer": "nobody"})), None);
    }

    #[test]
    fn test_split_skill_text() {
        assert_eq!(
            split_skill_text("Rust, Go; SQL\n• Testing\n - Kubernetes"),
            vec!["Rust", "Go", "SQL", "Testing", "Kubernetes"]
        );
    }
}
