//! Daily and weekly consumption trend tabs.
//!
//! Each tab renders a vertical bar chart next to a bordered two-column table
//! with a highlighted totals row at the bottom.

use attend_core::formatting::format_count;
use attend_data::aggregator::{DailyCount, WeeklyCount};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::themes::Theme;

/// Render the daily trend tab: bar chart per date plus the daily table.
pub fn render_daily(frame: &mut Frame, area: Rect, daily: &[DailyCount], theme: &Theme) {
    let [chart_area, table_area] =
        Layout::horizontal([Constraint::Percentage(62), Constraint::Percentage(38)]).areas(area);

    let entries: Vec<(String, u64)> = daily
        .iter()
        .map(|d| (d.date.clone(), d.meals))
        .collect();
    render_bar_chart(frame, chart_area, "Daily Meals", &entries, 5, theme);

    let rows: Vec<(String, u64)> = entries;
    render_count_table(frame, table_area, "Rekap Harian", "Tanggal", &rows, theme);
}

/// Render the weekly trend tab: bar chart per ISO week plus the weekly table.
pub fn render_weekly(frame: &mut Frame, area: Rect, weekly: &[WeeklyCount], theme: &Theme) {
    let [chart_area, table_area] =
        Layout::horizontal([Constraint::Percentage(62), Constraint::Percentage(38)]).areas(area);

    let entries: Vec<(String, u64)> = weekly
        .iter()
        .map(|w| (format!("W{}", w.week), w.meals))
        .collect();
    render_bar_chart(frame, chart_area, "Weekly Meals", &entries, 5, theme);

    render_count_table(frame, table_area, "Rekap Mingguan", "Minggu", &entries, theme);
}

/// Vertical bar chart over `(label, value)` entries.
fn render_bar_chart(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    entries: &[(String, u64)],
    bar_width: u16,
    theme: &Theme,
) {
    // Only as many bars as fit; the table alongside always shows everything.
    let capacity = (area.width.saturating_sub(2) / (bar_width + 1)).max(1) as usize;

    let bars: Vec<Bar> = entries
        .iter()
        .take(capacity)
        .map(|(label, value)| {
            Bar::default()
                .value(*value)
                .label(Line::from(label.clone()))
                .style(theme.chart_bar)
                .value_style(theme.chart_value)
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title)),
        )
        .bar_width(bar_width)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

/// Two-column count table with alternating row styles and a totals row.
fn render_count_table(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    key_header: &str,
    rows: &[(String, u64)],
    theme: &Theme,
) {
    let header = Row::new([
        Cell::from(key_header.to_string()).style(theme.table_header),
        Cell::from("Jumlah Makan").style(theme.table_header),
    ])
    .height(1);

    let mut data_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, (key, meals))| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new([
                Cell::from(key.clone()),
                Cell::from(format_count(*meals)),
            ])
            .style(style)
        })
        .collect();

    let total: u64 = rows.iter().map(|(_, meals)| meals).sum();
    data_rows.push(
        Row::new([Cell::from("TOTAL"), Cell::from(format_count(total))]).style(theme.table_total),
    );

    let table = Table::new(
        data_rows,
        [Constraint::Length(12), Constraint::Length(14)],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", title)),
    )
    .style(theme.text);

    frame.render_widget(table, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
