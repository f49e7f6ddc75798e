//! Paginated output handed to a render backend.
//!
//! Coordinates are page points with the origin at the top-left corner; `y` grows
//! downward and marks the top of a line box. Backends with a bottom-left origin flip
//! with `page_height - y - line_height`.

use serde::{Deserialize, Serialize};

use crate::layout::blocks::LayoutBlock;

pub const FILENAME_PREFIX: &str = "CV_";
pub const FALLBACK_FILENAME: &str = "CV_Document";
const MAX_TITLE_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Text {
        x: f32,
        y: f32,
        text: String,
        font_size: u16,
        bold: bool,
    },
    Rule {
        x: f32,
        y: f32,
        width: f32,
        thickness: f32,
    },
}

impl DrawCommand {
    pub fn y(&self) -> f32 {
        match self {
            DrawCommand::Text { y, .. } | DrawCommand::Rule { y, .. } => *y,
        }
    }

    pub(crate) fn shifted(&self, dy: f32) -> Self {
        let mut moved = self.clone();
        match &mut moved {
            DrawCommand::Text { y, .. } | DrawCommand::Rule { y, .. } => *y += dy,
        }
        moved
    }
}

/// A block fixed to a page position. Split blocks carry only the part placed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedBlock {
    pub block: LayoutBlock,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCommand>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based.
    pub number: usize,
    pub blocks: Vec<PlacedBlock>,
}

impl Page {
    pub fn new(number: usize) -> Self {
        Self {
            number,
            blocks: Vec::new(),
        }
    }

    /// Sum of placed block heights plus the gaps between them.
    pub fn used_height(&self, block_gap: f32) -> f32 {
        let heights: f32 = self.blocks.iter().map(|b| b.height).sum();
        heights + block_gap * self.blocks.len().saturating_sub(1) as f32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub pages: Vec<Page>,
    pub suggested_filename: String,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn placed_blocks(&self) -> impl Iterator<Item = &PlacedBlock> {
        self.pages.iter().flat_map(|p| p.blocks.iter())
    }
}

/// `CV_<title>` with every character outside `[A-Za-z0-9_-]` replaced by `_`.
pub fn derive_filename(title: Option<&str>) -> String {
    let title = title.map(str::trim).unwrap_or_default();
    if title.is_empty() {
        return FALLBACK_FILENAME.to_string();
    }
    let safe: String = title
        .chars()
        .take(MAX_TITLE_CHARS)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{FILENAME_PREFIX}{safe}")
}
