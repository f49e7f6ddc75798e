use serde::{Deserialize, Serialize};

use crate::profile::concepts::SectionConcept;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub links: Vec<SocialLink>,
}

impl PersonalInfo {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.title.is_none()
            && self.contact_items().is_empty()
    }

    /// Contact line items in display order: email, phone, location, links.
    pub fn contact_items(&self) -> Vec<String> {
        let mut items: Vec<String> = [&self.email, &self.phone, &self.location]
            .into_iter()
            .flatten()
            .cloned()
            .collect();
        items.extend(self.links.iter().map(|link| link.url.clone()));
        items
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: Option<String>,
    pub institution: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CertificationEntry {
    pub name: String,
    pub issuer: Option<String>,
    pub date: Option<String>,
    pub credential_id: Option<String>,
}

/// Where a resolved field's value came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    Enhancement,
    Original,
    FullText,
    Placeholder,
    #[default]
    None,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileSources {
    pub summary: FieldSource,
    pub skills: FieldSource,
    pub experience: FieldSource,
    pub education: FieldSource,
    pub certifications: FieldSource,
}

impl ProfileSources {
    pub fn uses_placeholder(&self) -> bool {
        [self.skills, self.experience].contains(&FieldSource::Placeholder)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SectionBody {
    Text(String),
    Items(Vec<String>),
}

impl SectionBody {
    pub fn is_empty(&self) -> bool {
        match self {
            SectionBody::Text(text) => text.trim().is_empty(),
            SectionBody::Items(items) => items.is_empty(),
        }
    }
}

/// A section kept under its own label.
///
/// `concept` is set when the label names a canonical section whose structured value
/// could not be resolved; the body is then rendered in that concept's slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSection {
    pub label: String,
    pub concept: Option<SectionConcept>,
    pub body: SectionBody,
}

/// Canonical, fully-defaulted profile. Every field is always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedProfile {
    pub personal_info: PersonalInfo,
    pub summary_text: Option<String>,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub certifications: Vec<CertificationEntry>,
    pub named_sections: Vec<NamedSection>,
    pub full_text: Option<String>,
    pub sources: ProfileSources,
}

impl ResolvedProfile {
    /// True when some section has real content. Full-text excerpts and placeholder
    /// data do not count.
    pub fn has_structured_content(&self) -> bool {
        let canonical = [
            (self.summary_text.is_some(), self.sources.summary),
            (!self.skills.is_empty(), self.sources.skills),
            (!self.experience.is_empty(), self.sources.experience),
            (!self.education.is_empty(), self.sources.education),
            (!self.certifications.is_empty(), self.sources.certifications),
        ];
        canonical
            .iter()
            .any(|(present, source)| {
                *present && !matches!(source, FieldSource::FullText | FieldSource::Placeholder)
            })
            || self.named_sections.iter().any(|s| !s.body.is_empty())
    }
}
