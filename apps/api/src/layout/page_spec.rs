//! Page geometry and typography for the flow paginator.
//!
//! All lengths are PostScript points (1/72 in). A `PageSpec` is read-only configuration:
//! it is validated once (at startup for the default, per request for overrides) and
//! shared immutably afterwards.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Line height as a multiple of font size when the metrics table has no entry.
pub const LINE_HEIGHT_FACTOR: f32 = 1.4;

#[derive(Debug, Error, PartialEq)]
pub enum PageSpecError {
    #[error("page dimensions must be positive and finite (got {width} x {height})")]
    PageSize { width: f32, height: f32 },

    #[error("margins must be non-negative and finite")]
    NegativeMargin,

    #[error("margins leave no content area ({width} x {height})")]
    NoContentArea { width: f32, height: f32 },

    #[error("tag grid needs at least one column")]
    ZeroColumns,

    #[error("gaps must be non-negative and finite")]
    NegativeGap,

    #[error("line height for {size}pt must be positive (got {line_height})")]
    LineHeight { size: u16, line_height: f32 },

    #[error("font sizes must be non-zero")]
    ZeroFontSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Margins {
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            bottom: value,
            left: value,
            right: value,
        }
    }
}

/// Font sizes (points) per text role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Typography {
    pub name: u16,
    pub title: u16,
    pub heading: u16,
    pub body: u16,
    pub meta: u16,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            name: 20,
            title: 13,
            heading: 13,
            body: 10,
            meta: 9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageFormat {
    A4,
    Letter,
}

impl FromStr for PageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(PageFormat::A4),
            "letter" | "us-letter" => Ok(PageFormat::Letter),
            other => Err(format!("unknown page format '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSpec {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: Margins,
    /// Tag-grid columns.
    pub columns: usize,
    #[serde(default = "default_column_gap")]
    pub column_gap: f32,
    #[serde(default = "default_block_gap")]
    pub block_gap: f32,
    /// Font size (pt) → line height (pt). Sizes not listed use `LINE_HEIGHT_FACTOR`.
    #[serde(default)]
    pub font_metrics: BTreeMap<u16, f32>,
    #[serde(default)]
    pub typography: Typography,
}

fn default_column_gap() -> f32 {
    12.0
}

fn default_block_gap() -> f32 {
    6.0
}

impl PageSpec {
    /// Preset for a paper format with 48pt margins and a 3-column grid.
    pub fn preset(format: PageFormat) -> Self {
        let (page_width, page_height) = match format {
            PageFormat::A4 => (595.28, 841.89),
            PageFormat::Letter => (612.0, 792.0),
        };
        let typography = Typography::default();
        let font_metrics = [
            typography.name,
            typography.title,
            typography.heading,
            typography.body,
            typography.meta,
        ]
        .into_iter()
        .map(|size| (size, f32::from(size) * LINE_HEIGHT_FACTOR))
        .collect();

        Self {
            page_width,
            page_height,
            margin: Margins::uniform(48.0),
            columns: 3,
            column_gap: default_column_gap(),
            block_gap: default_block_gap(),
            font_metrics,
            typography,
        }
    }

    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    pub fn content_width(&self) -> f32 {
        self.page_width - self.margin.left - self.margin.right
    }

    pub fn content_height(&self) -> f32 {
        self.page_height - self.margin.top - self.margin.bottom
    }

    /// Lowest y a block may extend to.
    pub fn content_bottom(&self) -> f32 {
        self.page_height - self.margin.bottom
    }

    pub fn line_height(&self, font_size: u16) -> f32 {
        self.font_metrics
            .get(&font_size)
            .copied()
            .unwrap_or(f32::from(font_size) * LINE_HEIGHT_FACTOR)
    }

    /// Width of one tag-grid column.
    pub fn grid_column_width(&self, columns: usize) -> f32 {
        let columns = columns.max(1) as f32;
        (self.content_width() - (columns - 1.0) * self.column_gap) / columns
    }

    /// Rejects configurations the paginator cannot lay out.
    pub fn validate(&self) -> Result<(), PageSpecError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        let non_negative = |v: f32| v.is_finite() && v >= 0.0;

        if !positive(self.page_width) || !positive(self.page_height) {
            return Err(PageSpecError::PageSize {
                width: self.page_width,
                height: self.page_height,
            });
        }
        let m = &self.margin;
        if ![m.top, m.bottom, m.left, m.right].into_iter().all(non_negative) {
            return Err(PageSpecError::NegativeMargin);
        }
        if !positive(self.content_width()) || !positive(self.content_height()) {
            return Err(PageSpecError::NoContentArea {
                width: self.content_width(),
                height: self.content_height(),
            });
        }
        if self.columns == 0 {
            return Err(PageSpecError::ZeroColumns);
        }
        if !non_negative(self.column_gap) || !non_negative(self.block_gap) {
            return Err(PageSpecError::NegativeGap);
        }
        if !positive(self.grid_column_width(self.columns)) {
            return Err(PageSpecError::NoContentArea {
                width: self.grid_column_width(self.columns),
                height: self.content_height(),
            });
        }
        if let Some((&size, &line_height)) = self
            .font_metrics
            .iter()
            .find(|(size, lh)| **size == 0 || !positive(**lh))
        {
            return Err(PageSpecError::LineHeight { size, line_height });
        }
        let t = &self.typography;
        if [t.name, t.title, t.heading, t.body, t.meta].contains(&0) {
            return Err(PageSpecError::ZeroFontSize);
        }
        Ok(())
    }
}

impl Default for PageSpec {
    fn default() -> Self {
        Self::preset(PageFormat::A4)
    }
}
