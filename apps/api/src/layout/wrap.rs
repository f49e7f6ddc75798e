//! Greedy word wrap against the static metric tables.
//!
//! Lines are filled word by word up to `max_width`; breaks happen only on whitespace and
//! a word is never split. A single word wider than the line sits alone on its line.

use crate::layout::font_metrics::FontMetricTable;

/// Wraps one logical line. Blank input yields a single empty line so blank lines
/// keep their vertical space.
pub fn wrap_line(text: &str, metrics: &FontMetricTable, font_size: f32, max_width: f32) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;
    let space_w = metrics.space_pt(font_size);

    for word in text.split_whitespace() {
        let word_w = metrics.width_pt(word, font_size);
        if current.is_empty() {
            current.push_str(word);
            current_width = word_w;
        } else if current_width + space_w + word_w > max_width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_w;
        } else {
            current.push(' ');
            current.push_str(word);
            current_width += space_w + word_w;
        }
    }
    lines.push(current);
    lines
}

/// Wraps multi-line text, keeping hard line breaks.
pub fn wrap_text(text: &str, metrics: &FontMetricTable, font_size: f32, max_width: f32) -> Vec<String> {
    text.split('\n')
        .flat_map(|line| wrap_line(line, metrics, font_size, max_width))
        .collect()
}
