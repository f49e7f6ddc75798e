use anyhow::{Context, Result};

use crate::layout::PageFormat;
use crate::profile::MissingDataPolicy;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Preset for the default page spec.
    pub page_format: PageFormat,
    /// Default tag-grid column count.
    pub grid_columns: usize,
    /// Applied when a request does not name a policy.
    pub on_missing_data: MissingDataPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            page_format: PageFormat::A4,
            grid_columns: 3,
            on_missing_data: MissingDataPolicy::Omit,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: optional_env("PORT")
                .map(|v| v.parse::<u16>())
                .transpose()
                .context("PORT must be a valid port number")?
                .unwrap_or(defaults.port),
            rust_log: optional_env("RUST_LOG").unwrap_or(defaults.rust_log),
            page_format: optional_env("PAGE_FORMAT")
                .map(|v| v.parse::<PageFormat>())
                .transpose()
                .map_err(anyhow::Error::msg)
                .context("PAGE_FORMAT must be 'a4' or 'letter'")?
                .unwrap_or(defaults.page_format),
            grid_columns: optional_env("GRID_COLUMNS")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("GRID_COLUMNS must be a positive integer")?
                .unwrap_or(defaults.grid_columns),
            on_missing_data: optional_env("ON_MISSING_DATA")
                .map(|v| v.parse::<MissingDataPolicy>())
                .transpose()
                .map_err(anyhow::Error::msg)
                .context("ON_MISSING_DATA must be 'omit' or 'placeholder'")?
                .unwrap_or(defaults.on_missing_data),
        })
    }
}

/// Unset and blank variables read as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
