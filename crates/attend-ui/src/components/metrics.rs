//! Headline metric boxes shown above every dashboard tab.

use attend_core::formatting::{format_count, format_number, format_percent};
use attend_data::aggregator::HeadlineMetrics;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::themes::Theme;

/// Render the four headline metrics as a row of bordered boxes.
pub fn render_metrics(frame: &mut Frame, area: Rect, metrics: &HeadlineMetrics, theme: &Theme) {
    let boxes = [
        ("Total Meals", format_count(metrics.total_meals)),
        ("Employees", format_count(metrics.employee_count as u64)),
        ("Daily Average", format_number(metrics.daily_average, 1)),
        ("Participation", format_percent(metrics.participation_rate)),
    ];

    let areas = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);

    for ((label, value), slot) in boxes.iter().zip(areas.iter()) {
        let lines = vec![
            Line::from(Span::styled(value.clone(), theme.metric_value)),
            Line::from(Span::styled(*label, theme.metric_label)),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            *slot,
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn sample_metrics() -> HeadlineMetrics {
        HeadlineMetrics {
            total_meals: 1234,
            employee_count: 42,
            daily_average: 61.7,
            participation_rate: 88.2,
        }
    }

    #[test]
    fn test_render_metrics_does_not_panic() {
        let backend = TestBackend::new(100, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_metrics(frame, area, &sample_metrics(), &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_metrics_shows_formatted_values() {
        let backend = TestBackend::new(100, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_metrics(frame, area, &sample_metrics(), &theme);
            })
            .unwrap();

        let mut content = String::new();
        let buffer = terminal.backend().buffer().clone();
        for cell in buffer.content() {
            content.push_str(cell.symbol());
        }
        assert!(content.contains("1,234"));
        assert!(content.contains("88.2%"));
        assert!(content.contains("Participation"));
    }

    #[test]
    fn test_render_metrics_tiny_area_does_not_panic() {
        let backend = TestBackend::new(8, 2);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::light();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_metrics(frame, area, &sample_metrics(), &theme);
            })
            .unwrap();
    }
}
