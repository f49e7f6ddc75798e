//! Flow Paginator: places a `LayoutBlock` stream onto fixed-size pages.
//!
//! Every block is measured first (wrapped against the static metric tables) into one
//! or more units: a splittable block has one unit per wrapped paragraph line or per
//! bullet item, an atomic block has exactly one. Placement then walks the blocks with
//! an explicit `PaginatorState` that each step consumes and returns.
//!
//! Rules:
//!   - a unit is placed only if it ends at or above the bottom margin, unless the page
//!     is still empty (oversized content is placed, never dropped)
//!   - a run of lead-ins (`Heading`, `Divider`) moves to a new page together with its
//!     follower when the follower's first unit would not fit after them
//!   - splittable blocks break between units; the rest continues on the next page

use tracing::warn;

use crate::layout::blocks::{EntryBlock, HeaderBlock, LayoutBlock, ParagraphBlock, TagGridBlock};
use crate::layout::document::{derive_filename, Document, DrawCommand, Page, PlacedBlock};
use crate::layout::font_metrics::{get_metrics, FontFace};
use crate::layout::page_spec::PageSpec;
use crate::layout::wrap::wrap_text;

pub const DIVIDER_HEIGHT: f32 = 6.0;
pub const RULE_THICKNESS: f32 = 0.75;
pub const BULLET_INDENT: f32 = 12.0;
const BULLET_GLYPH: &str = "•";
const KEY_VALUE_SEPARATOR: &str = " | ";
/// Slack for accumulated float error in fit checks.
const FIT_EPSILON: f32 = 1e-3;

// ────────────────────────────────────────────────────────────────────────────
// State
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaginatorState {
    /// 1-based number of the page being filled.
    pub page: usize,
    pub cursor_y: f32,
    /// Nothing has been placed on the current page yet.
    pub at_page_top: bool,
    /// The last placed block was a lead-in; the next block stays on this page.
    pub after_lead_in: bool,
}

impl PaginatorState {
    pub fn start(spec: &PageSpec) -> Self {
        Self {
            page: 1,
            cursor_y: spec.margin.top,
            at_page_top: true,
            after_lead_in: false,
        }
    }

    pub fn fits(&self, height: f32, spec: &PageSpec) -> bool {
        self.cursor_y + height <= spec.content_bottom() + FIT_EPSILON
    }

    /// Height left above the bottom margin.
    pub fn available(&self, spec: &PageSpec) -> f32 {
        spec.content_bottom() - self.cursor_y + FIT_EPSILON
    }

    pub fn next_page(self, spec: &PageSpec) -> Self {
        Self {
            page: self.page + 1,
            ..Self::start(spec)
        }
    }

    pub fn advance(self, height: f32, spec: &PageSpec, lead_in: bool) -> Self {
        Self {
            cursor_y: self.cursor_y + height + spec.block_gap,
            at_page_top: false,
            after_lead_in: lead_in,
            ..self
        }
    }

    /// A break is allowed only when it would not strand a lead-in or leave a page empty.
    fn may_break(&self) -> bool {
        !self.at_page_top && !self.after_lead_in
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Measurement
// ────────────────────────────────────────────────────────────────────────────

/// A slice of a block that is never split. Command `y` is relative to the unit top.
#[derive(Debug, Clone)]
struct Unit {
    /// Paragraph line or bullet item text; empty for atomic blocks.
    text: String,
    height: f32,
    commands: Vec<DrawCommand>,
}

struct Measured<'a> {
    block: &'a LayoutBlock,
    units: Vec<Unit>,
}

impl Measured<'_> {
    fn height(&self) -> f32 {
        self.units.iter().map(|u| u.height).sum()
    }

    /// Height the block needs on the page it starts on.
    fn leading_height(&self) -> f32 {
        if self.block.is_splittable() {
            self.units.first().map(|u| u.height).unwrap_or(0.0)
        } else {
            self.height()
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct TextStyle {
    size: u16,
    bold: bool,
}

impl TextStyle {
    fn regular(size: u16) -> Self {
        Self { size, bold: false }
    }

    fn bold(size: u16) -> Self {
        Self { size, bold: true }
    }

    fn face(&self) -> FontFace {
        if self.bold {
            FontFace::Bold
        } else {
            FontFace::Regular
        }
    }

    fn wrap(&self, text: &str, width: f32) -> Vec<String> {
        wrap_text(text, get_metrics(self.face()), f32::from(self.size), width)
    }

    fn width_of(&self, text: &str) -> f32 {
        get_metrics(self.face()).width_pt(text, f32::from(self.size))
    }
}

/// Accumulates commands top-down; `height` is the next free offset.
#[derive(Default)]
struct UnitBuilder {
    height: f32,
    commands: Vec<DrawCommand>,
}

impl UnitBuilder {
    fn text_lines(&mut self, lines: &[String], x: f32, style: TextStyle, spec: &PageSpec) {
        let line_height = spec.line_height(style.size);
        for line in lines {
            self.commands.push(DrawCommand::Text {
                x,
                y: self.height,
                text: line.clone(),
                font_size: style.size,
                bold: style.bold,
            });
            self.height += line_height;
        }
    }

    fn bullet(&mut self, item: &str, x: f32, width: f32, spec: &PageSpec) {
        let style = TextStyle::regular(spec.typography.body);
        self.commands.push(DrawCommand::Text {
            x,
            y: self.height,
            text: BULLET_GLYPH.to_string(),
            font_size: style.size,
            bold: false,
        });
        let lines = style.wrap(item, width - BULLET_INDENT);
        self.text_lines(&lines, x + BULLET_INDENT, style, spec);
    }

    fn finish(self, text: impl Into<String>) -> Unit {
        Unit {
            text: text.into(),
            height: self.height,
            commands: self.commands,
        }
    }
}

fn measure<'a>(block: &'a LayoutBlock, spec: &PageSpec) -> Measured<'a> {
    let left = spec.margin.left;
    let width = spec.content_width();
    let t = &spec.typography;

    let units = match block {
        LayoutBlock::Header(header) => vec![measure_header(header, spec)],
        LayoutBlock::Heading { text } => {
            let style = TextStyle::bold(t.heading);
            let mut unit = UnitBuilder::default();
            unit.text_lines(&style.wrap(text, width), left, style, spec);
            vec![unit.finish("")]
        }
        LayoutBlock::Divider => vec![Unit {
            text: String::new(),
            height: DIVIDER_HEIGHT,
            commands: vec![DrawCommand::Rule {
                x: left,
                y: DIVIDER_HEIGHT / 2.0,
                width,
                thickness: RULE_THICKNESS,
            }],
        }],
        LayoutBlock::Paragraph(paragraph) => {
            let style = TextStyle::regular(t.body);
            paragraph
                .lines
                .iter()
                .flat_map(|line| style.wrap(line, width))
                .map(|line| {
                    let mut unit = UnitBuilder::default();
                    unit.text_lines(std::slice::from_ref(&line), left, style, spec);
                    unit.finish(line)
                })
                .collect()
        }
        LayoutBlock::TagGrid(grid) => vec![measure_grid(grid, spec)],
        LayoutBlock::BulletList { items } => items
            .iter()
            .map(|item| {
                let mut unit = UnitBuilder::default();
                unit.bullet(item, left, width, spec);
                unit.finish(item.as_str())
            })
            .collect(),
        LayoutBlock::KeyValueRow { items } => {
            let style = TextStyle::regular(t.meta);
            let mut unit = UnitBuilder::default();
            unit.text_lines(&style.wrap(&items.join(KEY_VALUE_SEPARATOR), width), left, style, spec);
            vec![unit.finish("")]
        }
        LayoutBlock::Entry(entry) => vec![measure_entry(entry, spec)],
    };

    Measured { block, units }
}

fn measure_header(header: &HeaderBlock, spec: &PageSpec) -> Unit {
    let left = spec.margin.left;
    let width = spec.content_width();
    let mut unit = UnitBuilder::default();
    if let Some(name) = &header.name {
        let style = TextStyle::bold(spec.typography.name);
        unit.text_lines(&style.wrap(name, width), left, style, spec);
    }
    if let Some(title) = &header.title {
        let style = TextStyle::regular(spec.typography.title);
        unit.text_lines(&style.wrap(title, width), left, style, spec);
    }
    unit.finish("")
}

/// Cell `i` sits at row `i / columns`, column `i % columns`. A row is as tall as its
/// tallest wrapped cell.
fn measure_grid(grid: &TagGridBlock, spec: &PageSpec) -> Unit {
    let columns = grid.columns.unwrap_or(spec.columns).max(1);
    let column_width = spec.grid_column_width(columns);
    let style = TextStyle::regular(spec.typography.body);
    let line_height = spec.line_height(style.size);

    let mut unit = UnitBuilder::default();
    for row in grid.items.chunks(columns) {
        let row_top = unit.height;
        let mut row_height = line_height;
        for (column, item) in row.iter().enumerate() {
            let x = spec.margin.left + column as f32 * (column_width + spec.column_gap);
            let lines = style.wrap(item, column_width);
            for (k, line) in lines.iter().enumerate() {
                unit.commands.push(DrawCommand::Text {
                    x,
                    y: row_top + k as f32 * line_height,
                    text: line.clone(),
                    font_size: style.size,
                    bold: false,
                });
            }
            row_height = row_height.max(lines.len() as f32 * line_height);
        }
        unit.height += row_height;
    }
    unit.finish("")
}

/// Title row (dates right-aligned on it), subtitle row, description, bullets.
fn measure_entry(entry: &EntryBlock, spec: &PageSpec) -> Unit {
    let left = spec.margin.left;
    let width = spec.content_width();
    let t = &spec.typography;
    let title_style = TextStyle::bold(t.body);
    let meta_style = TextStyle::regular(t.meta);
    let body_style = TextStyle::regular(t.body);

    let mut unit = UnitBuilder::default();
    let title_width = match &entry.meta {
        Some(meta) => {
            let meta_width = meta_style.width_of(meta);
            unit.commands.push(DrawCommand::Text {
                x: left + (width - meta_width).max(0.0),
                y: 0.0,
                text: meta.clone(),
                font_size: meta_style.size,
                bold: false,
            });
            (width - meta_width - spec.column_gap).max(width / 2.0)
        }
        None => width,
    };
    unit.text_lines(&title_style.wrap(&entry.title, title_width), left, title_style, spec);

    if !entry.subtitle.is_empty() {
        let subtitle = entry.subtitle.join(KEY_VALUE_SEPARATOR);
        unit.text_lines(&meta_style.wrap(&subtitle, width), left, meta_style, spec);
    }
    for line in &entry.description {
        unit.text_lines(&body_style.wrap(line, width), left, body_style, spec);
    }
    for bullet in &entry.bullets {
        unit.bullet(bullet, left, width, spec);
    }
    unit.finish("")
}

// ────────────────────────────────────────────────────────────────────────────
// Placement
// ────────────────────────────────────────────────────────────────────────────

/// Lays `blocks` out on pages of `spec`. Deterministic; an empty stream yields one
/// empty page.
pub fn paginate(blocks: &[LayoutBlock], spec: &PageSpec) -> Document {
    let measured: Vec<Measured> = blocks.iter().map(|b| measure(b, spec)).collect();

    let mut pages = vec![Page::new(1)];
    let mut state = PaginatorState::start(spec);
    for (index, block) in measured.iter().enumerate() {
        if block.block.is_lead_in() && state.may_break() {
            let run = lead_in_run_height(&measured[index..], spec);
            if !state.fits(run, spec) {
                state = break_page(state, spec, &mut pages);
            }
        }
        state = place(block, state, spec, &mut pages);
    }

    let title = blocks.iter().find_map(|b| match b {
        LayoutBlock::Header(header) => header.title.as_deref(),
        _ => None,
    });
    Document {
        pages,
        suggested_filename: derive_filename(title),
    }
}

/// Height of the lead-in run at the head of `rest` plus what its follower needs on
/// the same page.
fn lead_in_run_height(rest: &[Measured], spec: &PageSpec) -> f32 {
    let lead_ins = rest.iter().take_while(|m| m.block.is_lead_in());
    let run: f32 = lead_ins.clone().map(|m| m.height() + spec.block_gap).sum();
    let follower = rest
        .get(lead_ins.count())
        .map(|m| m.leading_height())
        .unwrap_or(0.0);
    run + follower
}

fn break_page(state: PaginatorState, spec: &PageSpec, pages: &mut Vec<Page>) -> PaginatorState {
    let next = state.next_page(spec);
    pages.push(Page::new(next.page));
    next
}

fn place(
    measured: &Measured,
    state: PaginatorState,
    spec: &PageSpec,
    pages: &mut Vec<Page>,
) -> PaginatorState {
    if measured.block.is_splittable() && !measured.units.is_empty() {
        return place_split(measured, state, spec, pages);
    }

    let height = measured.height();
    let state = if state.may_break() && !state.fits(height, spec) {
        break_page(state, spec, pages)
    } else {
        state
    };
    if !state.fits(height, spec) {
        warn!(
            page = state.page,
            height,
            available = state.available(spec),
            "Oversized block placed past the bottom margin"
        );
    }
    push_placed(pages, &state, spec, measured.block.clone(), &measured.units);
    state.advance(height, spec, measured.block.is_lead_in())
}

fn place_split(
    measured: &Measured,
    mut state: PaginatorState,
    spec: &PageSpec,
    pages: &mut Vec<Page>,
) -> PaginatorState {
    let units = &measured.units;
    let mut start = 0;
    while start < units.len() {
        let available = state.available(spec);
        let fitting = units[start..]
            .iter()
            .scan(0.0_f32, |used, unit| {
                *used += unit.height;
                Some(*used)
            })
            .take_while(|used| *used <= available)
            .count();

        if fitting == 0 {
            if state.may_break() {
                state = break_page(state, spec, pages);
                continue;
            }
            warn!(page = state.page, "Line taller than the content area placed anyway");
        }

        let end = start + fitting.max(1);
        let slice = &units[start..end];
        let height: f32 = slice.iter().map(|u| u.height).sum();
        push_placed(pages, &state, spec, split_part(measured.block, slice, start > 0), slice);
        state = state.advance(height, spec, false);
        start = end;
        if start < units.len() {
            state = break_page(state, spec, pages);
        }
    }
    state
}

/// The part of a splittable block made of `units`.
fn split_part(block: &LayoutBlock, units: &[Unit], continuation: bool) -> LayoutBlock {
    let texts = units.iter().map(|u| u.text.clone()).collect();
    match block {
        LayoutBlock::Paragraph(paragraph) => LayoutBlock::Paragraph(ParagraphBlock {
            lines: texts,
            continued: paragraph.continued || continuation,
        }),
        LayoutBlock::BulletList { .. } => LayoutBlock::BulletList { items: texts },
        other => other.clone(),
    }
}

fn push_placed(
    pages: &mut [Page],
    state: &PaginatorState,
    spec: &PageSpec,
    block: LayoutBlock,
    units: &[Unit],
) {
    let mut commands = Vec::new();
    let mut offset = state.cursor_y;
    for unit in units {
        commands.extend(unit.commands.iter().map(|c| c.shifted(offset)));
        offset += unit.height;
    }
    let placed = PlacedBlock {
        block,
        x: spec.margin.left,
        y: state.cursor_y,
        width: spec.content_width(),
        height: units.iter().map(|u| u.height).sum(),
        commands,
    };
    // `pages` always ends with the page `state` is filling.
    if let Some(page) = pages.last_mut() {
        page.blocks.push(placed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::page_spec::{Margins, PageFormat};

    fn spec() -> PageSpec {
        PageSpec::preset(PageFormat::A4)
    }

    fn small_spec() -> PageSpec {
        // 200pt content height: 14 body lines at 14pt
        let mut spec = PageSpec::preset(PageFormat::Letter);
        spec.page_height = 296.0;
        spec
    }

    fn numbered_paragraph(n: usize) -> LayoutBlock {
        LayoutBlock::Paragraph(ParagraphBlock {
            lines: (1..=n).map(|i| format!("Line {i}")).collect(),
            continued: false,
        })
    }

    fn grid(items: &[&str]) -> LayoutBlock {
        LayoutBlock::TagGrid(TagGridBlock {
            items: items.iter().map(|s| s.to_string()).collect(),
            columns: None,
        })
    }

    fn entry(bullets: usize) -> LayoutBlock {
        LayoutBlock::Entry(EntryBlock {
            title: "Engineer".into(),
            meta: Some("2020 – 2024".into()),
            subtitle: vec!["Acme".into()],
            description: vec![],
            bullets: (0..bullets).map(|i| format!("Shipped thing {i}")).collect(),
        })
    }

    fn assert_pages_fit(doc: &Document, spec: &PageSpec) {
        for page in &doc.pages {
            if page.blocks.len() == 1 {
                continue;
            }
            let used = page.used_height(spec.block_gap);
            assert!(
                used <= spec.content_height() + 1e-2,
                "page {} overflows: {used} > {}",
                page.number,
                spec.content_height()
            );
        }
    }

    #[test]
    fn test_empty_stream_yields_one_empty_page() {
        let doc = paginate(&[], &spec());
        assert_eq!(doc.page_count(), 1);
        assert!(doc.pages[0].blocks.is_empty());
        assert_eq!(doc.suggested_filename, "CV_Document");
    }

    #[test]
    fn test_three_skills_make_one_grid_row() {
        let spec = spec();
        let blocks = vec![
            LayoutBlock::Header(HeaderBlock { name: Some("Jane Doe".into()), title: None }),
            LayoutBlock::heading("Skills"),
            LayoutBlock::Divider,
            grid(&["SQL", "Go", "Testing"]),
        ];
        let doc = paginate(&blocks, &spec);
        assert_eq!(doc.page_count(), 1);
        let placed = &doc.pages[0].blocks[3];
        assert!((placed.height - spec.line_height(spec.typography.body)).abs() < 1e-3);
        let ys: Vec<f32> = placed.commands.iter().map(DrawCommand::y).collect();
        assert!(ys.iter().all(|y| *y == ys[0]), "all cells share one row");
        assert_eq!(placed.commands.len(), 3);
    }

    #[test]
    fn test_grid_cells_follow_row_major_order() {
        let spec = spec();
        let items = ["a", "b", "c", "d", "e", "f", "g"];
        let doc = paginate(&[grid(&items)], &spec);
        let placed = &doc.pages[0].blocks[0];
        let line_height = spec.line_height(spec.typography.body);
        let column_width = spec.grid_column_width(3);
        assert!((placed.height - 3.0 * line_height).abs() < 1e-3);
        for (i, cmd) in placed.commands.iter().enumerate() {
            let DrawCommand::Text { x, y, text, .. } = cmd else {
                panic!("grid draws text only");
            };
            assert_eq!(text, items[i]);
            let (row, column) = (i / 3, i % 3);
            let expected_x = spec.margin.left + column as f32 * (column_width + spec.column_gap);
            assert!((x - expected_x).abs() < 1e-3);
            assert!((y - (spec.margin.top + row as f32 * line_height)).abs() < 1e-3);
        }
    }

    #[test]
    fn test_paragraph_splits_without_losing_lines() {
        let spec = spec();
        let blocks = vec![LayoutBlock::heading("Experience"), LayoutBlock::Divider, numbered_paragraph(90)];
        let doc = paginate(&blocks, &spec);
        assert_eq!(doc.page_count(), 2);

        let parts: Vec<&ParagraphBlock> = doc
            .placed_blocks()
            .filter_map(|p| match &p.block {
                LayoutBlock::Paragraph(para) => Some(para),
                _ => None,
            })
            .collect();
        assert_eq!(parts.len(), 2);
        assert!(!parts[0].continued);
        assert!(parts[1].continued);
        let joined: Vec<String> = parts.iter().flat_map(|p| p.lines.clone()).collect();
        let expected: Vec<String> = (1..=90).map(|i| format!("Line {i}")).collect();
        assert_eq!(joined, expected);

        let first_on_page_two = &doc.pages[1].blocks[0];
        assert_eq!(first_on_page_two.y, spec.margin.top);
        assert_pages_fit(&doc, &spec);
    }

    #[test]
    fn test_heading_moves_with_atomic_follower() {
        let spec = small_spec();
        let blocks = vec![
            numbered_paragraph(10),
            LayoutBlock::heading("Education"),
            LayoutBlock::Divider,
            entry(3),
        ];
        let doc = paginate(&blocks, &spec);
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages[0].blocks.len(), 1);
        assert!(matches!(doc.pages[1].blocks[0].block, LayoutBlock::Heading { .. }));
        assert!(matches!(doc.pages[1].blocks[2].block, LayoutBlock::Entry(_)));
        assert_pages_fit(&doc, &spec);
    }

    #[test]
    fn test_no_page_ends_with_a_lead_in() {
        let spec = small_spec();
        let mut blocks = Vec::new();
        for i in 0..8 {
            blocks.push(LayoutBlock::heading(format!("Section {i}")));
            blocks.push(LayoutBlock::Divider);
            blocks.push(if i % 2 == 0 { numbered_paragraph(4) } else { entry(2) });
        }
        let doc = paginate(&blocks, &spec);
        assert!(doc.page_count() > 1);
        for page in &doc.pages {
            let last = page.blocks.last().map(|b| &b.block);
            assert!(
                !last.is_some_and(LayoutBlock::is_lead_in),
                "page {} ends with a lead-in",
                page.number
            );
        }
        assert_pages_fit(&doc, &spec);
    }

    #[test]
    fn test_heading_runs_with_first_paragraph_line() {
        let spec = small_spec();
        // nine lines leave room for the heading pair and two more lines
        let blocks = vec![
            numbered_paragraph(9),
            LayoutBlock::heading("Notes"),
            LayoutBlock::Divider,
            numbered_paragraph(6),
        ];
        let doc = paginate(&blocks, &spec);
        let page_one = &doc.pages[0].blocks;
        assert!(matches!(page_one.last().map(|b| &b.block), Some(LayoutBlock::Paragraph(_))));
        assert!(page_one.iter().any(|b| matches!(b.block, LayoutBlock::Heading { .. })));
        assert_pages_fit(&doc, &spec);
    }

    #[test]
    fn test_oversized_atomic_block_is_placed_whole() {
        let spec = small_spec();
        let blocks = vec![numbered_paragraph(2), entry(40)];
        let doc = paginate(&blocks, &spec);
        assert_eq!(doc.page_count(), 2);
        let placed = &doc.pages[1].blocks[0];
        assert!(placed.height > spec.content_height());
        let LayoutBlock::Entry(entry) = &placed.block else {
            panic!("expected the entry");
        };
        assert_eq!(entry.bullets.len(), 40);
    }

    #[test]
    fn test_bullet_list_splits_between_items() {
        let spec = small_spec();
        let items: Vec<String> = (0..30).map(|i| format!("Item {i}")).collect();
        let doc = paginate(&[LayoutBlock::BulletList { items: items.clone() }], &spec);
        assert!(doc.page_count() > 1);
        let placed: Vec<String> = doc
            .placed_blocks()
            .flat_map(|p| match &p.block {
                LayoutBlock::BulletList { items } => items.clone(),
                _ => vec![],
            })
            .collect();
        assert_eq!(placed, items);
        assert_pages_fit(&doc, &spec);
    }

    #[test]
    fn test_pagination_is_deterministic() {
        let spec = small_spec();
        let blocks = vec![
            LayoutBlock::Header(HeaderBlock { name: Some("A".into()), title: Some("Lead".into()) }),
            LayoutBlock::heading("Summary"),
            LayoutBlock::Divider,
            numbered_paragraph(30),
            LayoutBlock::heading("Work"),
            LayoutBlock::Divider,
            entry(5),
        ];
        assert_eq!(paginate(&blocks, &spec), paginate(&blocks, &spec));
    }

    #[test]
    fn test_filename_comes_from_header_title() {
        let blocks = vec![LayoutBlock::Header(HeaderBlock {
            name: Some("Jane".into()),
            title: Some("Staff Engineer".into()),
        })];
        assert_eq!(paginate(&blocks, &spec()).suggested_filename, "CV_Staff_Engineer");
    }

    #[test]
    fn test_divider_draws_full_width_rule() {
        let mut spec = spec();
        spec.margin = Margins::uniform(20.0);
        let doc = paginate(&[LayoutBlock::Divider], &spec);
        let placed = &doc.pages[0].blocks[0];
        assert_eq!(placed.height, DIVIDER_HEIGHT);
        assert_eq!(
            placed.commands,
            vec![DrawCommand::Rule {
                x: 20.0,
                y: 20.0 + DIVIDER_HEIGHT / 2.0,
                width: spec.content_width(),
                thickness: RULE_THICKNESS,
            }]
        );
    }

    #[test]
    fn test_state_is_threaded_forward() {
        let spec = spec();
        let state = PaginatorState::start(&spec);
        let moved = state.advance(20.0, &spec, true);
        assert_eq!(moved.cursor_y, spec.margin.top + 20.0 + spec.block_gap);
        assert!(moved.after_lead_in && !moved.at_page_top);
        let next = moved.next_page(&spec);
        assert_eq!(next.page, 2);
        assert_eq!(next.cursor_y, spec.margin.top);
        assert!(next.at_page_top);
    }
}
