//! Placeholder content injected only under `MissingDataPolicy::Placeholder`.
//!
//! This is fabricated data. The resolver marks every field it fills from here with
//! `FieldSource::Placeholder` and logs a warning, so callers can always tell.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::profile::models::ExperienceEntry;

/// What to do when skills or experience cannot be resolved from the record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingDataPolicy {
    /// Leave the section out.
    #[default]
    Omit,
    /// Fill the section with built-in sample content.
    Placeholder,
}

impl FromStr for MissingDataPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "omit" => Ok(MissingDataPolicy::Omit),
            "placeholder" => Ok(MissingDataPolicy::Placeholder),
            other => Err(format!("unknown missing-data policy '{other}'")),
        }
    }
}

pub const PLACEHOLDER_SKILLS: &[&str] = &[
    "Leadership",
    "Project Management",
    "Strategic Planning",
    "Risk Management",
    "Team Building",
    "Communication",
];

pub fn placeholder_experience() -> Vec<ExperienceEntry> {
    vec![
        ExperienceEntry {
            title: Some("IT Security Director".to_string()),
            company: Some("Example Corp".to_string()),
            start_date: Some("2018".to_string()),
            end_date: Some("Present".to_string()),
            description: Some(
                "Leads the information security program across infrastructure and product teams."
                    .to_string(),
            ),
            highlights: vec![
                "Defined the security roadmap and governance model".to_string(),
                "Coordinated incident response and audit readiness".to_string(),
            ],
            ..Default::default()
        },
        ExperienceEntry {
            title: Some("Security Engineer".to_string()),
            company: Some("Example Systems".to_string()),
            start_date: Some("2013".to_string()),
            end_date: Some("2018".to_string()),
            description: Some(
                "Designed and operated network and application security controls.".to_string(),
            ),
            highlights: vec!["Ran vulnerability management for production systems".to_string()],
            ..Default::default()
        },
    ]
}
