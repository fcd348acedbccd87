//! Welcome panel (no file loaded) and the single generic error panel.

use attend_core::error::FORMAT_HINT;
use ratatui::{
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::themes::Theme;

/// Render the static welcome/help panel shown when no CSV was given.
///
/// A missing file is not an error; the panel explains the expected format
/// and how to start.
pub fn render_welcome(frame: &mut Frame, area: Rect, theme: &Theme) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Welcome to the Meal Attendance Dashboard",
            theme.header,
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Start with an attendance export:  mealdash <FILE.csv>",
            theme.text,
        )),
        Line::from(""),
        Line::from(Span::styled("Expected format:", theme.label)),
        Line::from(Span::styled(
            "  - 5 leading banner lines before the header row",
            theme.dim,
        )),
        Line::from(Span::styled(
            "  - columns: First Name, Last Name, ID, Department, Attendance Group",
            theme.dim,
        )),
        Line::from(Span::styled(
            "  - one column per date, named MM-DD (e.g. 08-01)",
            theme.dim,
        )),
        Line::from(Span::styled(
            "  - cells: A (ate), - (absent), or blank",
            theme.dim,
        )),
        Line::from(""),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];

    frame.render_widget(
        Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Meal Attendance Dashboard "),
        ),
        area,
    );
}

/// Render the generic processing-failure panel.
///
/// Every ingestion/aggregation failure collapses to one message plus the
/// static format hint; the typed cause goes to the log, not the screen.
pub fn render_error(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Something went wrong while processing the file.",
            theme.error,
        )),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), theme.warning)),
        Line::from(""),
        Line::from(Span::styled(FORMAT_HINT, theme.dim)),
        Line::from(""),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];

    frame.render_widget(
        Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Meal Attendance Dashboard "),
        ),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_render_welcome_does_not_panic() {
        let backend = TestBackend::new(90, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_welcome(frame, area, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_welcome_mentions_format() {
        let backend = TestBackend::new(90, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_welcome(frame, area, &theme);
            })
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        let content: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(content.contains("MM-DD"));
        assert!(content.contains("Attendance Group"));
    }

    #[test]
    fn test_render_error_shows_message_and_hint() {
        let backend = TestBackend::new(100, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::light();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_error(frame, area, "Missing required column: ID", &theme);
            })
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        let content: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(content.contains("Missing required column"));
    }
}
