//! Main application state and TUI event loop for the meal dashboard.
//!
//! [`App`] owns the loaded attendance table plus every interactive control
//! (tab, filters, date range, search).  Summaries are recomputed from the
//! immutable table on each draw, so every keystroke is reflected by simply
//! re-running the reductions.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
    Frame, Terminal,
};
use tracing::{info, warn};

use attend_core::error::{AttendError, Result};
use attend_core::models::{AttendanceTable, DateRange, FilterSelection};
use attend_data::aggregator::{self, DashboardSummary};
use attend_data::export;

use crate::themes::Theme;
use crate::{breakdown_view, components::metrics, employee_view, trend_view, welcome_view};

/// Sentinel shown at index 0 of the department and group choice lists.
const ALL_CHOICE: &str = "All";

// ── Tab ───────────────────────────────────────────────────────────────────────

/// Which dashboard tab the TUI is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Daily,
    Weekly,
    Departments,
    Employees,
    Groups,
}

impl Tab {
    /// All tabs in display order.
    pub const ALL: [Tab; 5] = [
        Tab::Daily,
        Tab::Weekly,
        Tab::Departments,
        Tab::Employees,
        Tab::Groups,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Daily => "Daily",
            Tab::Weekly => "Weekly",
            Tab::Departments => "Departments",
            Tab::Employees => "Employees",
            Tab::Groups => "Groups",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    fn next(self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Tab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Resolve a `--view` name; unknown names fall back to the daily tab.
    pub fn from_name(name: &str) -> Tab {
        match name {
            "weekly" => Tab::Weekly,
            "department" => Tab::Departments,
            "employee" => Tab::Employees,
            "group" => Tab::Groups,
            _ => Tab::Daily,
        }
    }
}

// ── AppConfig ─────────────────────────────────────────────────────────────────

/// Startup configuration resolved from settings, applied once in [`App::new`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub theme: String,
    pub view: String,
    pub year: i32,
    pub export_dir: PathBuf,
    pub department: Option<String>,
    pub group: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
#[derive(Debug)]
pub struct App {
    table: AttendanceTable,
    theme: Theme,
    tab: Tab,
    /// Department choices with [`ALL_CHOICE`] at index 0.
    dept_choices: Vec<String>,
    dept_index: usize,
    /// Attendance-group choices with [`ALL_CHOICE`] at index 0.
    group_choices: Vec<String>,
    group_index: usize,
    /// Inclusive date-column indices; the key handlers keep `start <= end`.
    start_index: usize,
    end_index: usize,
    search: String,
    search_mode: bool,
    status: Option<String>,
    export_dir: PathBuf,
    year: i32,
    should_quit: bool,
}

impl App {
    /// Build the application from a loaded table and startup configuration.
    ///
    /// Unknown `--department` / `--group` values and unknown date labels are
    /// configuration errors; the loader guarantees at least one date column.
    pub fn new(table: AttendanceTable, config: AppConfig) -> Result<Self> {
        let mut dept_choices = vec![ALL_CHOICE.to_string()];
        dept_choices.extend(table.departments());
        let mut group_choices = vec![ALL_CHOICE.to_string()];
        group_choices.extend(table.groups());

        let dept_index = match config.department {
            None => 0,
            Some(ref name) => dept_choices
                .iter()
                .position(|d| d == name)
                .ok_or_else(|| AttendError::Config(format!("unknown department: {name}")))?,
        };
        let group_index = match config.group {
            None => 0,
            Some(ref name) => group_choices
                .iter()
                .position(|g| g == name)
                .ok_or_else(|| {
                    AttendError::Config(format!("unknown attendance group: {name}"))
                })?,
        };

        let last = table.dates.len() - 1;
        let start_index = match config.start {
            None => 0,
            Some(ref label) => table
                .date_index(label)
                .ok_or_else(|| AttendError::UnknownDateLabel(label.clone()))?,
        };
        let end_index = match config.end {
            None => last,
            Some(ref label) => table
                .date_index(label)
                .ok_or_else(|| AttendError::UnknownDateLabel(label.clone()))?,
        };

        Ok(Self {
            table,
            theme: Theme::from_name(&config.theme),
            tab: Tab::from_name(&config.view),
            dept_choices,
            dept_index,
            group_choices,
            group_index,
            start_index,
            end_index,
            search: String::new(),
            search_mode: false,
            status: None,
            export_dir: config.export_dir,
            year: config.year,
            should_quit: false,
        })
    }

    // ── Derived state ─────────────────────────────────────────────────────────

    /// Current filter selection; choice index 0 means no constraint.
    pub fn filters(&self) -> FilterSelection {
        FilterSelection {
            department: (self.dept_index > 0)
                .then(|| self.dept_choices[self.dept_index].clone()),
            group: (self.group_index > 0).then(|| self.group_choices[self.group_index].clone()),
        }
    }

    /// Current date range from the inclusive index pair.
    pub fn range(&self) -> DateRange {
        DateRange::from_indices(self.start_index, self.end_index)
    }

    /// Run all reductions for the current controls.
    pub fn summary(&self) -> Result<DashboardSummary> {
        aggregator::summarize(&self.table, &self.filters(), &self.range(), self.year)
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    /// Apply one key event to the application state.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.search_mode {
            match code {
                KeyCode::Enter | KeyCode::Esc => self.search_mode = false,
                KeyCode::Backspace => {
                    self.search.pop();
                }
                KeyCode::Char(c) => self.search.push(c),
                _ => {}
            }
            return;
        }

        self.status = None;
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Tab => self.tab = self.tab.next(),
            KeyCode::BackTab => self.tab = self.tab.prev(),
            KeyCode::Char(c @ '1'..='5') => {
                self.tab = Tab::ALL[(c as usize) - ('1' as usize)];
            }
            KeyCode::Char('d') => self.dept_index = (self.dept_index + 1) % self.dept_choices.len(),
            KeyCode::Char('D') => {
                self.dept_index =
                    (self.dept_index + self.dept_choices.len() - 1) % self.dept_choices.len();
            }
            KeyCode::Char('g') => {
                self.group_index = (self.group_index + 1) % self.group_choices.len();
            }
            KeyCode::Char('G') => {
                self.group_index =
                    (self.group_index + self.group_choices.len() - 1) % self.group_choices.len();
            }
            KeyCode::Char('[') => self.start_index = self.start_index.saturating_sub(1),
            KeyCode::Char(']') => {
                self.start_index = (self.start_index + 1).min(self.end_index);
            }
            KeyCode::Char('{') => {
                self.end_index = self.end_index.saturating_sub(1).max(self.start_index);
            }
            KeyCode::Char('}') => {
                self.end_index = (self.end_index + 1).min(self.table.dates.len() - 1);
            }
            KeyCode::Char('/') => {
                self.tab = Tab::Employees;
                self.search_mode = true;
            }
            KeyCode::Char('e') => self.export(),
            _ => {}
        }
    }

    /// Write all six recap CSVs for the current controls to the export dir.
    fn export(&mut self) {
        let result = self
            .summary()
            .and_then(|summary| export::export_all(&self.export_dir, &summary));
        match result {
            Ok(paths) => {
                info!(count = paths.len(), dir = %self.export_dir.display(), "exported recaps");
                self.status = Some(format!(
                    "Exported {} files to {}",
                    paths.len(),
                    self.export_dir.display()
                ));
            }
            Err(err) => {
                warn!(error = %err, "export failed");
                self.status = Some(format!("Export failed: {err}"));
            }
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let [header_area, metrics_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(4),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_header(frame, header_area);

        match self.summary() {
            Ok(summary) => {
                metrics::render_metrics(frame, metrics_area, &summary.headline, &self.theme);
                self.render_body(frame, body_area, &summary);
            }
            Err(err) => {
                welcome_view::render_error(frame, body_area, &err.to_string(), &self.theme);
            }
        }

        self.render_footer(frame, footer_area);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let [tabs_area, filter_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

        let titles: Vec<Line> = Tab::ALL
            .iter()
            .enumerate()
            .map(|(i, t)| Line::from(format!("{} {}", i + 1, t.title())))
            .collect();
        frame.render_widget(
            Tabs::new(titles)
                .select(self.tab.index())
                .style(self.theme.tab_inactive)
                .highlight_style(self.theme.tab_active),
            tabs_area,
        );

        let range = self.range();
        let labels = range.labels(&self.table);
        let range_text = match (labels.first(), labels.last()) {
            (Some(first), Some(last)) => format!("{first}..{last}"),
            _ => "empty".to_string(),
        };
        let filter_line = Line::from(vec![
            Span::styled("dept: ", self.theme.label),
            Span::styled(self.dept_choices[self.dept_index].clone(), self.theme.value),
            Span::styled("  group: ", self.theme.label),
            Span::styled(
                self.group_choices[self.group_index].clone(),
                self.theme.value,
            ),
            Span::styled("  dates: ", self.theme.label),
            Span::styled(range_text, self.theme.value),
            Span::styled(format!("  year: {}", self.year), self.theme.dim),
        ]);
        frame.render_widget(Paragraph::new(filter_line), filter_area);
    }

    fn render_body(&self, frame: &mut Frame, area: Rect, summary: &DashboardSummary) {
        match self.tab {
            Tab::Daily => trend_view::render_daily(frame, area, &summary.daily, &self.theme),
            Tab::Weekly => trend_view::render_weekly(frame, area, &summary.weekly, &self.theme),
            Tab::Departments => {
                breakdown_view::render_departments(frame, area, &summary.departments, &self.theme)
            }
            Tab::Employees => {
                let shown = aggregator::search_employees(&summary.employees, &self.search);
                employee_view::render_employees(
                    frame,
                    area,
                    &shown,
                    &self.search,
                    self.search_mode,
                    &self.theme,
                );
            }
            Tab::Groups => breakdown_view::render_groups(
                frame,
                area,
                &summary.groups,
                &summary.group_weekly,
                &self.theme,
            ),
        }
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.status {
            Some(message) => Line::from(Span::styled(message.clone(), self.theme.success)),
            None => Line::from(Span::styled(
                "Tab/1-5 views  d/g filters  [ ] { } dates  / search  e export  q quit",
                self.theme.dim,
            )),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the interactive dashboard until the user quits.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout so the loop stays
    /// responsive without spinning.  Exits on `q`, `Q`, or `Ctrl+C`.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }
}

/// Show the static welcome panel until the user quits.
pub fn run_welcome(theme_name: &str) -> io::Result<()> {
    let theme = Theme::from_name(theme_name);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(250);

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            welcome_view::render_welcome(frame, area, &theme);
        })?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                    KeyCode::Char('q') | KeyCode::Char('Q') => break,
                    _ => {}
                }
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
