//! Per-employee ranking tab with free-text search.

use attend_core::formatting::format_count;
use attend_data::aggregator::EmployeeTotal;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::components::ranking;
use crate::themes::Theme;

/// How many employees the ranking panel shows.
const TOP_N: usize = 10;

/// Render the employee tab: search box, top-N ranking, and the full table
/// of (already searched) employee totals.
pub fn render_employees(
    frame: &mut Frame,
    area: Rect,
    employees: &[EmployeeTotal],
    search: &str,
    search_active: bool,
    theme: &Theme,
) {
    let [search_area, body_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(4)]).areas(area);

    render_search_box(frame, search_area, search, search_active, theme);

    let [rank_area, table_area] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
            .areas(body_area);

    let entries: Vec<(String, u64)> = employees
        .iter()
        .take(TOP_N)
        .map(|t| (t.employee.full_name(), t.meals))
        .collect();
    ranking::render_ranking(frame, rank_area, "Top Employees", &entries, theme);

    render_employee_table(frame, table_area, employees, theme);
}

fn render_search_box(
    frame: &mut Frame,
    area: Rect,
    search: &str,
    search_active: bool,
    theme: &Theme,
) {
    let (style, hint) = if search_active {
        (theme.search_active, "Enter/Esc to finish")
    } else {
        (theme.dim, "press / to search name or ID")
    };

    let mut spans = vec![Span::styled(search.to_string(), theme.text)];
    if search_active {
        spans.push(Span::styled("_", theme.search_active));
    }
    if search.is_empty() && !search_active {
        spans = vec![Span::styled(hint.to_string(), theme.dim)];
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .title(" Search "),
        ),
        area,
    );
}

fn render_employee_table(
    frame: &mut Frame,
    area: Rect,
    employees: &[EmployeeTotal],
    theme: &Theme,
) {
    let header_cells = [
        "First Name",
        "Last Name",
        "ID",
        "Department",
        "Attendance Group",
        "Total Makan",
    ]
    .iter()
    .map(|h| Cell::from(*h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let visible = area.height.saturating_sub(4) as usize;
    let mut data_rows: Vec<Row> = employees
        .iter()
        .take(visible)
        .enumerate()
        .map(|(i, total)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            let e = &total.employee;
            Row::new([
                Cell::from(e.first_name.clone()),
                Cell::from(e.last_name.clone()),
                Cell::from(e.id.clone()),
                Cell::from(e.department.clone()),
                Cell::from(e.attendance_group.clone()),
                Cell::from(format_count(total.meals)),
            ])
            .style(style)
        })
        .collect();

    let total: u64 = employees.iter().map(|t| t.meals).sum();
    data_rows.push(
        Row::new([
            Cell::from("TOTAL"),
            Cell::from(""),
            Cell::from(""),
            Cell::from(""),
            Cell::from(format!("{} employees", employees.len())),
            Cell::from(format_count(total)),
        ])
        .style(theme.table_total),
    );

    let widths = [
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(14),
        Constraint::Length(18),
        Constraint::Length(12),
    ];

    let table = Table::new(data_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Rekap Karyawan "),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
