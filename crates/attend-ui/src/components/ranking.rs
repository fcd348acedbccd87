//! Horizontal ranking bars for category and employee breakdowns.
//!
//! Each entry renders as `label ████████░░ count`, with bar length scaled to
//! the largest value in the list.

use attend_core::formatting::format_count;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::themes::Theme;

const FILLED_CHAR: char = '\u{2588}'; // █  FULL BLOCK
const EMPTY_CHAR: char = '\u{2591}'; // ░  LIGHT SHADE

/// Width reserved for the entry label, in terminal columns.
const LABEL_WIDTH: usize = 18;

/// Build one ranking line: padded label, scaled bar, count.
fn ranking_line<'a>(
    label: &str,
    value: u64,
    max_value: u64,
    bar_width: usize,
    theme: &Theme,
) -> Line<'a> {
    let filled = if max_value == 0 {
        0
    } else {
        (value as f64 / max_value as f64 * bar_width as f64).round() as usize
    };
    let filled = filled.min(bar_width);

    Line::from(vec![
        Span::styled(pad_label(label, LABEL_WIDTH), theme.label),
        Span::raw(" "),
        Span::styled(FILLED_CHAR.to_string().repeat(filled), theme.rank_filled),
        Span::styled(
            EMPTY_CHAR.to_string().repeat(bar_width - filled),
            theme.rank_empty,
        ),
        Span::raw(" "),
        Span::styled(format_count(value), theme.value),
    ])
}

/// Truncate or right-pad `label` to exactly `width` display columns.
fn pad_label(label: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in label.chars() {
        let w = ch.to_string().as_str().width();
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str(&" ".repeat(width - used));
    out
}

/// Render a bordered ranking list of `(label, value)` entries, largest first
/// (entries are rendered in the order given; callers pass sorted summaries).
pub fn render_ranking(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    entries: &[(String, u64)],
    theme: &Theme,
) {
    let max_value = entries.iter().map(|(_, v)| *v).max().unwrap_or(0);

    // Columns left for the bar after label, separators, and count.
    let count_width = 8;
    let bar_width = (area.width as usize)
        .saturating_sub(LABEL_WIDTH + count_width + 4)
        .max(4);

    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = entries
        .iter()
        .take(visible)
        .map(|(label, value)| ranking_line(label, *value, max_value, bar_width, theme))
        .collect();

    frame.render_widget(
        Paragraph::new(lines).style(theme.text).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title)),
        ),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
