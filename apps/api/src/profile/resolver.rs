//! Content Resolver: reduces an untrusted `EnhancementRecord` to a `ResolvedProfile`.
//!
//! # Fallback chains (first available wins)
//! - summary: summary section → full-text excerpt → omitted
//! - skills: `keywordAnalysis` → original skills → skills section → placeholder*
//! - experience: structured section → original list → section text → placeholder*
//! - education / certifications: structured section → original list → section text
//!
//! `*` only under `MissingDataPolicy::Placeholder`, and never when `fullText` is present.
//!
//! Each field is resolved by its own total function over raw JSON, so a malformed
//! field degrades to its fallback without touching the others.

use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, warn};

use crate::profile::concepts::{match_concept, SectionConcept};
use crate::profile::models::{
    FieldSource, NamedSection, PersonalInfo, ProfileSources, ResolvedProfile, SectionBody,
    SocialLink,
};
use crate::profile::placeholder::{placeholder_experience, MissingDataPolicy, PLACEHOLDER_SKILLS};
use crate::profile::record::{field, flatten_text, string_list, text_field, text_of, EnhancementRecord};
use crate::profile::structured::{
    as_item_list, certification_from_value, education_from_value, experience_from_value,
    split_skill_text, try_parse_structured,
};

/// Characters of full text used when no summary section exists.
pub const SUMMARY_EXCERPT_CHARS: usize = 600;

const LINK_KEYS: &[(&str, &str)] = &[
    ("linkedin", "LinkedIn"),
    ("github", "GitHub"),
    ("website", "Website"),
    ("portfolio", "Portfolio"),
];

/// Content of one enhancement section, classified once at this boundary.
#[derive(Debug, Clone, PartialEq)]
enum SectionContent {
    Empty,
    Text(String),
    Structured(Value),
}

impl SectionContent {
    fn classify(value: &Value) -> Self {
        match value {
            Value::Null => SectionContent::Empty,
            Value::String(raw) => match try_parse_structured::<Value>(raw) {
                Some(parsed) => SectionContent::Structured(parsed),
                None => text_of(value).map_or(SectionContent::Empty, SectionContent::Text),
            },
            Value::Array(_) => SectionContent::Structured(value.clone()),
            Value::Object(_) => match field(value, &["content", "text", "enhancedContent"]) {
                Some(inner) => SectionContent::classify(inner),
                None => SectionContent::Structured(value.clone()),
            },
            scalar => text_of(scalar).map_or(SectionContent::Empty, SectionContent::Text),
        }
    }

    fn into_body(self) -> Option<SectionBody> {
        let body = match self {
            SectionContent::Empty => return None,
            SectionContent::Text(text) => SectionBody::Text(text),
            SectionContent::Structured(value) => SectionBody::Items(
                as_item_list(&value)
                    .iter()
                    .flat_map(string_list)
                    .collect(),
            ),
        };
        (!body.is_empty()).then_some(body)
    }
}

#[derive(Debug, Clone)]
struct SectionEnhancement {
    label: String,
    content: SectionContent,
}

/// Sections split into the first section per concept and everything else.
#[derive(Debug, Default)]
struct SortedSections {
    canonical: Vec<(SectionConcept, SectionEnhancement)>,
    generic: Vec<SectionEnhancement>,
}

impl SortedSections {
    fn take(&mut self, concept: SectionConcept) -> Option<SectionEnhancement> {
        let index = self.canonical.iter().position(|(c, _)| *c == concept)?;
        Some(self.canonical.remove(index).1)
    }
}

/// Resolves every field of the profile. Never fails.
pub fn resolve(record: &EnhancementRecord, policy: MissingDataPolicy) -> ResolvedProfile {
    let mut sections = sort_sections(enhancement_sections(&record.sections));
    let full_text = text_of(&record.full_text);
    // Real document text always beats invented data.
    let fill_policy = if full_text.is_some() { MissingDataPolicy::Omit } else { policy };
    let mut named_sections = Vec::new();

    let (summary_text, summary_source) =
        resolve_summary(sections.take(SectionConcept::Summary), full_text.as_deref());
    let (skills, skills_source) =
        resolve_skills(record, sections.take(SectionConcept::Skills), fill_policy);

    let (experience, experience_source) = resolve_entries(
        SectionConcept::Experience,
        sections.take(SectionConcept::Experience),
        original_list(record, &["workExperience", "experience"]),
        experience_from_value,
        &mut named_sections,
    );
    let (experience, experience_source) =
        if experience_source == FieldSource::None && fill_policy == MissingDataPolicy::Placeholder {
            warn!("no experience could be resolved; using placeholder entries");
            (placeholder_experience(), FieldSource::Placeholder)
        } else {
            (experience, experience_source)
        };

    let (education, education_source) = resolve_entries(
        SectionConcept::Education,
        sections.take(SectionConcept::Education),
        original_list(record, &["education"]),
        education_from_value,
        &mut named_sections,
    );
    let (certifications, certifications_source) = resolve_entries(
        SectionConcept::Certifications,
        sections.take(SectionConcept::Certifications),
        original_list(record, &["certifications"]),
        certification_from_value,
        &mut named_sections,
    );

    named_sections.extend(sections.generic.into_iter().filter_map(|section| {
        section.content.into_body().map(|body| NamedSection {
            label: section.label,
            concept: None,
            body,
        })
    }));

    ResolvedProfile {
        personal_info: resolve_personal_info(record),
        summary_text,
        skills,
        experience,
        education,
        certifications,
        named_sections,
        full_text,
        sources: ProfileSources {
            summary: summary_source,
            skills: skills_source,
            experience: experience_source,
            education: education_source,
            certifications: certifications_source,
        },
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

fn enhancement_sections(value: &Value) -> Vec<SectionEnhancement> {
    match value {
        Value::Array(items) => items.iter().filter_map(section_from_item).collect(),
        Value::Object(map) => map
            .iter()
            .map(|(label, content)| SectionEnhancement {
                label: label.clone(),
                content: SectionContent::classify(content),
            })
            .collect(),
        Value::String(raw) => try_parse_structured::<Value>(raw)
            .map(|parsed| enhancement_sections(&parsed))
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn section_from_item(item: &Value) -> Option<SectionEnhancement> {
    let label = text_field(item, &["sectionLabel", "label", "title", "name", "section"])?;
    let content = field(item, &["enhancedContent", "content", "text", "body"])
        .map(SectionContent::classify)
        .unwrap_or(SectionContent::Empty);
    Some(SectionEnhancement { label, content })
}

fn sort_sections(sections: Vec<SectionEnhancement>) -> SortedSections {
    let mut sorted = SortedSections::default();
    for section in sections {
        match match_concept(&section.label) {
            Some(concept) if !sorted.canonical.iter().any(|(c, _)| *c == concept) => {
                sorted.canonical.push((concept, section));
            }
            _ => sorted.generic.push(section),
        }
    }
    sorted
}

// ────────────────────────────────────────────────────────────────────────────
// Field resolution
// ────────────────────────────────────────────────────────────────────────────

fn resolve_summary(
    section: Option<SectionEnhancement>,
    full_text: Option<&str>,
) -> (Option<String>, FieldSource) {
    let from_section = section.and_then(|s| match s.content {
        SectionContent::Text(text) => Some(text),
        SectionContent::Structured(value) => {
            let text = flatten_text(&value).join("\n");
            (!text.is_empty()).then_some(text)
        }
        SectionContent::Empty => None,
    });
    if let Some(text) = from_section {
        return (Some(text), FieldSource::Enhancement);
    }
    match full_text {
        Some(text) => {
            debug!("summary taken from full-text excerpt");
            (Some(excerpt(text, SUMMARY_EXCERPT_CHARS)), FieldSource::FullText)
        }
        None => (None, FieldSource::None),
    }
}

/// First `max_chars` characters, cut back to a word boundary.
fn excerpt(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    match chars.next() {
        None => head,
        Some(next) if next.is_whitespace() => head.trim_end().to_string(),
        Some(_) => match head.rfind(char::is_whitespace) {
            Some(cut) if cut > 0 => head[..cut].trim_end().to_string(),
            _ => head,
        },
    }
}

fn resolve_skills(
    record: &EnhancementRecord,
    section: Option<SectionEnhancement>,
    policy: MissingDataPolicy,
) -> (Vec<String>, FieldSource) {
    let from_keywords = dedupe(keyword_skills(&record.keyword_analysis));
    if !from_keywords.is_empty() {
        return (from_keywords, FieldSource::Enhancement);
    }

    let from_original = dedupe(record.original("skills").map(skill_names).unwrap_or_default());
    if !from_original.is_empty() {
        return (from_original, FieldSource::Original);
    }

    let from_section = dedupe(
        section
            .map(|s| match s.content {
                SectionContent::Text(text) => split_skill_text(&text),
                SectionContent::Structured(value) => skill_names(&value),
                SectionContent::Empty => Vec::new(),
            })
            .unwrap_or_default(),
    );
    if !from_section.is_empty() {
        return (from_section, FieldSource::Enhancement);
    }

    if policy == MissingDataPolicy::Placeholder {
        warn!("no skills could be resolved; using placeholder skills");
        let skills = PLACEHOLDER_SKILLS.iter().map(|s| s.to_string()).collect();
        return (skills, FieldSource::Placeholder);
    }
    (Vec::new(), FieldSource::None)
}

/// Normalises `keywordAnalysis` entries: bare strings or `{keyword}` objects.
fn keyword_skills(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(_) => text_of(item),
                Value::Object(_) => text_field(item, &["keyword", "name"]),
                _ => None,
            })
            .collect(),
        Value::String(raw) => match try_parse_structured::<Value>(raw) {
            Some(parsed) => keyword_skills(&parsed),
            None => text_of(value)
                .map(|text| split_skill_text(&text))
                .unwrap_or_default(),
        },
        Value::Object(_) => field(value, &["keywords", "items"])
            .map(keyword_skills)
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Skill names from a list of strings, `{name}` objects or `{category, items}` groups.
fn skill_names(value: &Value) -> Vec<String> {
    as_item_list(value)
        .iter()
        .flat_map(|item| match item {
            Value::Object(_) => match field(item, &["items", "skills"]) {
                Some(group) => string_list(group),
                None => text_field(item, &["name", "skill", "keyword"])
                    .into_iter()
                    .collect(),
            },
            other => text_of(other).into_iter().collect(),
        })
        .collect()
}

fn dedupe(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty() && seen.insert(item.to_lowercase()))
        .collect()
}

fn original_list(record: &EnhancementRecord, keys: &[&str]) -> Vec<Value> {
    keys.iter()
        .find_map(|key| record.original(key))
        .map(as_item_list)
        .unwrap_or_default()
}

/// Structured section → original list → section text kept as a named section.
fn resolve_entries<T>(
    concept: SectionConcept,
    section: Option<SectionEnhancement>,
    original: Vec<Value>,
    parse: fn(&Value) -> Option<T>,
    named_sections: &mut Vec<NamedSection>,
) -> (Vec<T>, FieldSource) {
    let mut leftover_text = None;
    if let Some(section) = section {
        match section.content {
            SectionContent::Structured(value) => {
                let entries: Vec<T> = as_item_list(&value).iter().filter_map(parse).collect();
                if !entries.is_empty() {
                    return (entries, FieldSource::Enhancement);
                }
                debug!(?concept, "structured section yielded no usable entries");
            }
            SectionContent::Text(text) => leftover_text = Some((section.label, text)),
            SectionContent::Empty => {}
        }
    }

    let entries: Vec<T> = original.iter().filter_map(parse).collect();
    if !entries.is_empty() {
        return (entries, FieldSource::Original);
    }

    match leftover_text {
        Some((label, text)) => {
            named_sections.push(NamedSection {
                label,
                concept: Some(concept),
                body: SectionBody::Text(text),
            });
            (Vec::new(), FieldSource::Enhancement)
        }
        None => (Vec::new(), FieldSource::None),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Personal info
// ────────────────────────────────────────────────────────────────────────────

fn resolve_personal_info(record: &EnhancementRecord) -> PersonalInfo {
    let primary = &record.personal_info;
    let fallback = record.original("personalInfo");
    let pick = |keys: &[&str]| {
        text_field(primary, keys).or_else(|| fallback.and_then(|f| text_field(f, keys)))
    };

    let mut links = links_of(primary);
    if links.is_empty() {
        links = fallback.map(links_of).unwrap_or_default();
    }

    PersonalInfo {
        name: pick(&["name", "fullName"]),
        title: pick(&["title", "jobTitle", "headline"]),
        email: pick(&["email"]),
        phone: pick(&["phone", "phoneNumber"]),
        location: pick(&["location", "address", "city"]),
        links,
    }
}

fn links_of(value: &Value) -> Vec<SocialLink> {
    let mut links: Vec<SocialLink> = LINK_KEYS
        .iter()
        .filter_map(|(key, label)| {
            text_field(value, &[*key]).map(|url| SocialLink {
                label: Some(label.to_string()),
                url,
            })
        })
        .collect();

    match field(value, &["socialLinks", "links"]) {
        Some(Value::Array(items)) => links.extend(items.iter().filter_map(|item| match item {
            Value::Object(_) => text_field(item, &["url", "href", "link"]).map(|url| SocialLink {
                label: text_field(item, &["label", "name", "platform"]),
                url,
            }),
            other => text_of(other).map(|url| SocialLink { label: None, url }),
        })),
        Some(Value::Object(map)) => links.extend(map.iter().filter_map(|(label, url)| {
            text_of(url).map(|url| SocialLink {
                label: Some(label.clone()),
                url,
            })
        })),
        Some(other) => links.extend(text_of(other).map(|url| SocialLink { label: None, url })),
        None => {}
    }

    let mut seen = HashSet::new();
    links.retain(|link| seen.insert(link.url.clone()));
    links
}
