//! Block Builder: turns a `ResolvedProfile` into the ordered `LayoutBlock` stream.
//!
//! Order: personal header → summary → skills → experience → education →
//! certifications → remaining named sections. When no section produced content the
//! full text is emitted under a "Full Document" heading instead.

use serde::{Deserialize, Serialize};

use crate::profile::concepts::SectionConcept;
use crate::profile::models::{
    CertificationEntry, EducationEntry, ExperienceEntry, NamedSection, PersonalInfo,
    ResolvedProfile, SectionBody,
};

pub const FULL_DOCUMENT_HEADING: &str = "Full Document";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderBlock {
    pub name: Option<String>,
    pub title: Option<String>,
}

/// Text lines. Before layout these are logical (hard-break) lines; once placed they
/// are the wrapped lines that fit on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphBlock {
    pub lines: Vec<String>,
    /// Set on the remainder of a paragraph carried over from the previous page.
    pub continued: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagGridBlock {
    pub items: Vec<String>,
    /// `None` uses the page spec's column count.
    pub columns: Option<usize>,
}

/// One experience, education or certification entry. Laid out as a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryBlock {
    pub title: String,
    pub meta: Option<String>,
    pub subtitle: Vec<String>,
    pub description: Vec<String>,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayoutBlock {
    Header(HeaderBlock),
    Heading { text: String },
    Divider,
    Paragraph(ParagraphBlock),
    TagGrid(TagGridBlock),
    BulletList { items: Vec<String> },
    KeyValueRow { items: Vec<String> },
    Entry(EntryBlock),
}

impl LayoutBlock {
    pub fn heading(text: impl Into<String>) -> Self {
        LayoutBlock::Heading { text: text.into() }
    }

    pub fn paragraph(text: &str) -> Self {
        LayoutBlock::Paragraph(ParagraphBlock {
            lines: text.split('\n').map(str::to_string).collect(),
            continued: false,
        })
    }

    /// Lead-in blocks must share a page with the content block that follows them.
    pub fn is_lead_in(&self) -> bool {
        matches!(self, LayoutBlock::Heading { .. } | LayoutBlock::Divider)
    }

    /// Splittable blocks may be broken across a page boundary; everything else is atomic.
    pub fn is_splittable(&self) -> bool {
        matches!(self, LayoutBlock::Paragraph(_) | LayoutBlock::BulletList { .. })
    }
}

pub fn build_blocks(profile: &ResolvedProfile) -> Vec<LayoutBlock> {
    let mut blocks = Vec::new();
    push_personal_header(&mut blocks, &profile.personal_info);

    if !profile.has_structured_content() {
        if let Some(full_text) = &profile.full_text {
            push_section(
                &mut blocks,
                FULL_DOCUMENT_HEADING,
                vec![LayoutBlock::paragraph(full_text)],
            );
            return blocks;
        }
    }

    for concept in SectionConcept::ALL {
        let content = canonical_content(profile, concept);
        if !content.is_empty() {
            push_section(&mut blocks, concept.heading(), content);
            continue;
        }
        // Text that could not be structured is rendered in its concept's slot.
        for section in profile
            .named_sections
            .iter()
            .filter(|s| s.concept == Some(concept))
        {
            push_named_section(&mut blocks, section);
        }
    }

    for section in profile.named_sections.iter().filter(|s| s.concept.is_none()) {
        push_named_section(&mut blocks, section);
    }
    blocks
}

fn push_personal_header(blocks: &mut Vec<LayoutBlock>, info: &PersonalInfo) {
    if info.is_empty() {
        return;
    }
    if info.name.is_some() || info.title.is_some() {
        blocks.push(LayoutBlock::Header(HeaderBlock {
            name: info.name.clone(),
            title: info.title.clone(),
        }));
    }
    let contact = info.contact_items();
    if !contact.is_empty() {
        blocks.push(LayoutBlock::KeyValueRow { items: contact });
    }
}

fn push_section(blocks: &mut Vec<LayoutBlock>, heading: &str, content: Vec<LayoutBlock>) {
    blocks.push(LayoutBlock::heading(heading));
    blocks.push(LayoutBlock::Divider);
    blocks.extend(content);
}

fn push_named_section(blocks: &mut Vec<LayoutBlock>, section: &NamedSection) {
    let content = match &section.body {
        _ if section.body.is_empty() => return,
        SectionBody::Text(text) => LayoutBlock::paragraph(text),
        SectionBody::Items(items) => LayoutBlock::BulletList {
            items: items.clone(),
        },
    };
    push_section(blocks, &section.label, vec![content]);
}

fn canonical_content(profile: &ResolvedProfile, concept: SectionConcept) -> Vec<LayoutBlock> {
    match concept {
        SectionConcept::Summary => profile
            .summary_text
            .as_deref()
            .map(LayoutBlock::paragraph)
            .into_iter()
            .collect(),
        SectionConcept::Skills if profile.skills.is_empty() => Vec::new(),
        SectionConcept::Skills => vec![LayoutBlock::TagGrid(TagGridBlock {
            items: profile.skills.clone(),
            columns: None,
        })],
        SectionConcept::Experience => profile.experience.iter().map(experience_entry).collect(),
        SectionConcept::Education => profile.education.iter().map(education_entry).collect(),
        SectionConcept::Certifications => profile
            .certifications
            .iter()
            .map(certification_entry)
            .collect(),
    }
}

fn date_range(start: Option<&str>, end: Option<&str>) -> Option<String> {
    match (start, end) {
        (Some(start), Some(end)) => Some(format!("{start} – {end}")),
        (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
        (None, None) => None,
    }
}

fn text_lines(text: Option<&str>) -> Vec<String> {
    text.map(|t| t.split('\n').map(str::to_string).collect())
        .unwrap_or_default()
}

fn experience_entry(entry: &ExperienceEntry) -> LayoutBlock {
    let (title, subtitle) = match (&entry.title, &entry.company) {
        (Some(title), company) => (title.clone(), company.clone()),
        (None, company) => (company.clone().unwrap_or_default(), None),
    };
    LayoutBlock::Entry(EntryBlock {
        title,
        meta: date_range(entry.start_date.as_deref(), entry.end_date.as_deref()),
        subtitle: subtitle.into_iter().chain(entry.location.clone()).collect(),
        description: text_lines(entry.description.as_deref()),
        bullets: entry.highlights.clone(),
    })
}

fn education_entry(entry: &EducationEntry) -> LayoutBlock {
    let (title, subtitle) = match (&entry.degree, &entry.institution) {
        (Some(degree), institution) => (degree.clone(), institution.clone()),
        (None, institution) => (institution.clone().unwrap_or_default(), None),
    };
    LayoutBlock::Entry(EntryBlock {
        title,
        meta: date_range(entry.start_date.as_deref(), entry.end_date.as_deref()),
        subtitle: subtitle.into_iter().chain(entry.location.clone()).collect(),
        description: Vec::new(),
        bullets: entry.details.clone(),
    })
}

fn certification_entry(entry: &CertificationEntry) -> LayoutBlock {
    LayoutBlock::Entry(EntryBlock {
        title: entry.name.clone(),
        meta: entry.date.clone(),
        subtitle: entry
            .issuer
            .clone()
            .into_iter()
            .chain(entry.credential_id.as_ref().map(|id| format!("ID: {id}")))
            .collect(),
        description: Vec::new(),
        bullets: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::models::{FieldSource, ProfileSources};

    fn kinds(blocks: &[LayoutBlock]) -> Vec<&'static str> {
        blocks
            .iter()
            .map(|b| match b {
                LayoutBlock::Header(_) => "header",
                LayoutBlock::Heading { .. } => "heading",
                LayoutBlock::Divider => "divider",
                LayoutBlock::Paragraph(_) => "paragraph",
                LayoutBlock::TagGrid(_) => "grid",
                LayoutBlock::BulletList { .. } => "bullets",
                LayoutBlock::KeyValueRow { .. } => "row",
                LayoutBlock::Entry(_) => "entry",
            })
            .collect()
    }

    fn headings(blocks: &[LayoutBlock]) -> Vec<String> {
        blocks
            .iter()
            .filter_map(|b| match b {
                LayoutBlock::Heading { text } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_empty_profile_builds_nothing() {
        assert!(build_blocks(&ResolvedProfile::default()).is_empty());
    }

    #[test]
    fn test_name_and_skills() {
        let profile = ResolvedProfile {
            personal_info: PersonalInfo {
                name: Some("Jane Doe".to_string()),
                ..Default::default()
            },
            skills: vec!["SQL".into(), "Go".into(), "Testing".into()],
            sources: ProfileSources {
                skills: FieldSource::Enhancement,
                ..Default::default()
            },
            ..Default::default()
        };
        let blocks = build_blocks(&profile);
        assert_eq!(kinds(&blocks), vec!["header", "heading", "divider", "grid"]);
    }

    #[test]
    fn test_section_priority_order() {
        let profile = ResolvedProfile {
            summary_text: Some("Builder".into()),
            skills: vec!["Rust".into()],
            experience: vec![ExperienceEntry {
                title: Some("Engineer".into()),
                ..Default::default()
            }],
            education: vec![EducationEntry {
                degree: Some("BSc".into()),
                ..Default::default()
            }],
            certifications: vec![CertificationEntry {
                name: "CKA".into(),
                ..Default::default()
            }],
            named_sections: vec![NamedSection {
                label: "Languages".into(),
                concept: None,
                body: SectionBody::Items(vec!["English".into()]),
            }],
            sources: ProfileSources {
                summary: FieldSource::Enhancement,
                skills: FieldSource::Enhancement,
                experience: FieldSource::Original,
                education: FieldSource::Original,
                certifications: FieldSource::Original,
            },
            ..Default::default()
        };
        assert_eq!(
            headings(&build_blocks(&profile)),
            vec![
                "Professional Summary",
                "Skills",
                "Professional Experience",
                "Education",
                "Certifications",
                "Languages"
            ]
        );
    }

    #[test]
    fn test_unstructured_concept_text_renders_in_its_slot() {
        let profile = ResolvedProfile {
            skills: vec!["Rust".into()],
            certifications: vec![CertificationEntry {
                name: "CKA".into(),
                ..Default::default()
            }],
            named_sections: vec![
                NamedSection {
                    label: "Hobbies".into(),
                    concept: None,
                    body: SectionBody::Text("Climbing".into()),
                },
                NamedSection {
                    label: "Experiencia".into(),
                    concept: Some(SectionConcept::Experience),
                    body: SectionBody::Text("• Built X".into()),
                },
            ],
            sources: ProfileSources {
                skills: FieldSource::Enhancement,
                experience: FieldSource::Enhancement,
                certifications: FieldSource::Original,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            headings(&build_blocks(&profile)),
            vec!["Skills", "Experiencia", "Certifications", "Hobbies"]
        );
    }

    #[test]
    fn test_full_document_fallback_replaces_excerpt() {
        let profile = ResolvedProfile {
            personal_info: PersonalInfo {
                email: Some("a@b.c".into()),
                ..Default::default()
            },
            summary_text: Some("excerpt".into()),
            full_text: Some("line one\nline two".into()),
            sources: ProfileSources {
                summary: FieldSource::FullText,
                ..Default::default()
            },
            ..Default::default()
        };
        let blocks = build_blocks(&profile);
        assert_eq!(kinds(&blocks), vec!["row", "heading", "divider", "paragraph"]);
        assert_eq!(headings(&blocks), vec![FULL_DOCUMENT_HEADING]);
        assert_eq!(
            blocks[3],
            LayoutBlock::Paragraph(ParagraphBlock {
                lines: vec!["line one".into(), "line two".into()],
                continued: false,
            })
        );
    }

    #[test]
    fn test_experience_entry_shape() {
        let block = experience_entry(&ExperienceEntry {
            title: Some("Staff Engineer".into()),
            company: Some("Acme".into()),
            location: Some("Remote".into()),
            start_date: Some("2020".into()),
            end_date: Some("Present".into()),
            description: Some("Platform team".into()),
            highlights: vec!["Cut costs".into()],
        });
        assert_eq!(
            block,
            LayoutBlock::Entry(EntryBlock {
                title: "Staff Engineer".into(),
                meta: Some("2020 – Present".into()),
                subtitle: vec!["Acme".into(), "Remote".into()],
                description: vec!["Platform team".into()],
                bullets: vec!["Cut costs".into()],
            })
        );
    }

    #[test]
    fn test_entry_without_title_promotes_company() {
        let LayoutBlock::Entry(entry) = experience_entry(&ExperienceEntry {
            company: Some("Acme".into()),
            ..Default::default()
        }) else {
            panic!("expected entry");
        };
        assert_eq!(entry.title, "Acme");
        assert!(entry.subtitle.is_empty());
    }

    #[test]
    fn test_placeholder_only_profile_still_renders() {
        let profile = ResolvedProfile {
            skills: vec!["Communication".into()],
            sources: ProfileSources {
                skills: FieldSource::Placeholder,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(headings(&build_blocks(&profile)), vec!["Skills"]);
    }

    #[test]
    fn test_block_classes() {
        assert!(LayoutBlock::heading("x").is_lead_in());
        assert!(LayoutBlock::Divider.is_lead_in());
        assert!(LayoutBlock::paragraph("x").is_splittable());
        assert!(!LayoutBlock::TagGrid(TagGridBlock { items: vec![], columns: None }).is_splittable());
    }
}
