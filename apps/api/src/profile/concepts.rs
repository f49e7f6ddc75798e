//! Section concept matcher: decides which canonical section a free-form label names.
//!
//! Matching is a case-insensitive substring test against a bilingual (English/Spanish)
//! keyword set. The specific concepts are tried before the generic summary words, so
//! "Technical Skills Summary" is a skills section.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionConcept {
    Summary,
    Skills,
    Experience,
    Education,
    Certifications,
}

const SUMMARY_KEYWORDS: &[&str] = &[
    "summary",
    "profile",
    "about",
    "objective",
    "resumen",
    "perfil",
    "objetivo",
    "acerca de",
];

const SKILLS_KEYWORDS: &[&str] = &[
    "skill",
    "competenc",
    "abilities",
    "aptitud",
    "habilidad",
    "conocimiento",
    "capacidad",
];

const EXPERIENCE_KEYWORDS: &[&str] = &[
    "experience",
    "employment",
    "work history",
    "experiencia",
    "empleo",
    "trayectoria",
    "laboral",
];

const EDUCATION_KEYWORDS: &[&str] = &[
    "education",
    "academic",
    "educación",
    "educacion",
    "formación",
    "formacion",
    "estudios",
];

const CERTIFICATION_KEYWORDS: &[&str] = &["certif", "credential", "credencial", "licens"];

impl SectionConcept {
    pub const ALL: [SectionConcept; 5] = [
        SectionConcept::Summary,
        SectionConcept::Skills,
        SectionConcept::Experience,
        SectionConcept::Education,
        SectionConcept::Certifications,
    ];

    /// Summary words ("summary", "profile") often qualify other headings, so they go last.
    const MATCH_ORDER: [SectionConcept; 5] = [
        SectionConcept::Skills,
        SectionConcept::Experience,
        SectionConcept::Education,
        SectionConcept::Certifications,
        SectionConcept::Summary,
    ];

    fn keywords(self) -> &'static [&'static str] {
        match self {
            SectionConcept::Summary => SUMMARY_KEYWORDS,
            SectionConcept::Skills => SKILLS_KEYWORDS,
            SectionConcept::Experience => EXPERIENCE_KEYWORDS,
            SectionConcept::Education => EDUCATION_KEYWORDS,
            SectionConcept::Certifications => CERTIFICATION_KEYWORDS,
        }
    }

    /// Heading text used when the section is rendered.
    pub fn heading(self) -> &'static str {
        match self {
            SectionConcept::Summary => "Professional Summary",
            SectionConcept::Skills => "Skills",
            SectionConcept::Experience => "Professional Experience",
            SectionConcept::Education => "Education",
            SectionConcept::Certifications => "Certifications",
        }
    }
}

/// Returns the concept a section label refers to, if any.
pub fn match_concept(label: &str) -> Option<SectionConcept> {
    let label = label.to_lowercase();
    SectionConcept::MATCH_ORDER
        .into_iter()
        .find(|concept| concept.keywords().iter().any(|kw| label.contains(kw)))
}
