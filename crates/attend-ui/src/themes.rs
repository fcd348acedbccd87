use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned as the safe
/// default.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Complete theme definition carrying all UI styles used by the dashboard
/// components and views.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header / tabs ────────────────────────────────────────────────────────
    pub header: Style,
    pub tab_active: Style,
    pub tab_inactive: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub success: Style,
    pub warning: Style,
    pub error: Style,

    // ── Metric boxes ─────────────────────────────────────────────────────────
    pub metric_value: Style,
    pub metric_label: Style,

    // ── Tables ───────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub table_total: Style,

    // ── Charts / ranking bars ────────────────────────────────────────────────
    pub chart_bar: Style,
    pub chart_value: Style,
    pub rank_filled: Style,
    pub rank_empty: Style,

    // ── Search box ───────────────────────────────────────────────────────────
    pub search_active: Style,
}

impl Theme {
    /// Theme for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            tab_active: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            metric_value: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            metric_label: Style::default().fg(Color::Gray),
            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            chart_bar: Style::default().fg(Color::Cyan),
            chart_value: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            rank_filled: Style::default().fg(Color::Green),
            rank_empty: Style::default().fg(Color::DarkGray),
            search_active: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Theme for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            tab_active: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Magenta),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            metric_value: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            metric_label: Style::default().fg(Color::DarkGray),
            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            table_total: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            chart_bar: Style::default().fg(Color::Blue),
            chart_value: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            rank_filled: Style::default().fg(Color::Blue),
            rank_empty: Style::default().fg(Color::Gray),
            search_active: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Resolve a theme by name; `"auto"` (or anything unrecognised) picks
    /// based on the detected terminal background.
    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            "light" => Self::light(),
            _ => match detect_background() {
                BackgroundType::Light => Self::light(),
                _ => Self::dark(),
            },
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
