//! Department and attendance-group breakdown tabs.
//!
//! Both panels always show the full-organisation distribution: the active
//! department/group filters do not narrow them, only the date range does.

use attend_core::formatting::format_count;
use attend_data::aggregator::{CategoryCount, GroupWeekCount};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::components::ranking;
use crate::themes::Theme;

/// Render the department tab: ranking bars plus the per-department table.
pub fn render_departments(
    frame: &mut Frame,
    area: Rect,
    departments: &[CategoryCount],
    theme: &Theme,
) {
    let [rank_area, table_area] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area);

    let entries: Vec<(String, u64)> = departments
        .iter()
        .map(|d| (d.name.clone(), d.meals))
        .collect();
    ranking::render_ranking(frame, rank_area, "Departments (whole org)", &entries, theme);

    render_category_table(
        frame,
        table_area,
        "Rekap Departemen",
        "Department",
        departments,
        theme,
    );
}

/// Render the group tab: ranking bars plus the per-(group, week) table.
pub fn render_groups(
    frame: &mut Frame,
    area: Rect,
    groups: &[CategoryCount],
    group_weekly: &[GroupWeekCount],
    theme: &Theme,
) {
    let [rank_area, table_area] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area);

    let entries: Vec<(String, u64)> = groups.iter().map(|g| (g.name.clone(), g.meals)).collect();
    ranking::render_ranking(
        frame,
        rank_area,
        "Attendance Groups (whole org)",
        &entries,
        theme,
    );

    render_group_weekly_table(frame, table_area, group_weekly, theme);
}

fn render_category_table(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    key_header: &str,
    rows: &[CategoryCount],
    theme: &Theme,
) {
    let header = Row::new([
        Cell::from(key_header.to_string()).style(theme.table_header),
        Cell::from("Total Makan").style(theme.table_header),
    ])
    .height(1);

    let mut data_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new([
                Cell::from(row.name.clone()),
                Cell::from(format_count(row.meals)),
            ])
            .style(style)
        })
        .collect();

    let total: u64 = rows.iter().map(|r| r.meals).sum();
    data_rows.push(
        Row::new([Cell::from("TOTAL"), Cell::from(format_count(total))]).style(theme.table_total),
    );

    let table = Table::new(data_rows, [Constraint::Min(16), Constraint::Length(12)])
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title)),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

fn render_group_weekly_table(
    frame: &mut Frame,
    area: Rect,
    rows: &[GroupWeekCount],
    theme: &Theme,
) {
    let header = Row::new([
        Cell::from("Attendance Group").style(theme.table_header),
        Cell::from("Minggu").style(theme.table_header),
        Cell::from("Makan").style(theme.table_header),
    ])
    .height(1);

    let data_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new([
                Cell::from(row.group.clone()),
                Cell::from(format!("W{}", row.week)),
                Cell::from(format_count(row.meals)),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        data_rows,
        [
            Constraint::Min(16),
            Constraint::Length(8),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Rekap Group Mingguan "),
    )
    .style(theme.text);

    frame.render_widget(table, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn departments() -> Vec<CategoryCount> {
        vec![
            CategoryCount {
                name: "Engineering".to_string(),
                meals: 120,
            },
            CategoryCount {
                name: "Sales".to_string(),
                meals: 95,
            },
        ]
    }

    fn groups() -> Vec<CategoryCount> {
        vec![CategoryCount {
            name: "Shift A".to_string(),
            meals: 140,
        }]
    }

    fn group_weekly() -> Vec<GroupWeekCount> {
        vec![
            GroupWeekCount {
                group: "Shift A".to_string(),
                week: 31,
                meals: 70,
            },
            GroupWeekCount {
                group: "Shift A".to_string(),
                week: 32,
                meals: 70,
            },
        ]
    }

    #[test]
    fn test_render_departments_does_not_panic() {
        let backend = TestBackend::new(120, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_departments(frame, area, &departments(), &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_departments_empty_does_not_panic() {
        let backend = TestBackend::new(120, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_departments(frame, area, &[], &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_groups_does_not_panic() {
        let backend = TestBackend::new(120, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::light();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_groups(frame, area, &groups(), &group_weekly(), &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_departments_shows_names_and_total() {
        let backend = TestBackend::new(120, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_departments(frame, area, &departments(), &theme);
            })
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        let content: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(content.contains("Engineering"));
        assert!(content.contains("215")); // 120 + 95
    }
}
