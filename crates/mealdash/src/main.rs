mod bootstrap;

use std::path::Path;

use anyhow::Result;
use attend_core::error::{AttendError, FORMAT_HINT};
use attend_core::models::{AttendanceTable, DateRange, FilterSelection};
use attend_core::settings::Settings;
use attend_data::{aggregator, export, loader};
use attend_ui::app::{self, App, AppConfig};

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("mealdash v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "View: {}, Theme: {}, Year: {}",
        settings.view,
        settings.theme,
        settings.year
    );

    // No file is not an error: show the welcome screen and exit on 'q'.
    let Some(file) = settings.file.clone() else {
        app::run_welcome(&settings.theme)
            .map_err(|e| AttendError::Terminal(e.to_string()))?;
        return Ok(());
    };

    let export_dir = settings
        .export_dir
        .clone()
        .unwrap_or_else(bootstrap::default_export_dir);

    if settings.export {
        match run_export(&settings, &file, &export_dir) {
            Ok(paths) => {
                for path in paths {
                    println!("{}", path.display());
                }
                return Ok(());
            }
            Err(err) => {
                report_failure(&err);
                std::process::exit(1);
            }
        }
    }

    let table = match loader::load_attendance(&file) {
        Ok(table) => table,
        Err(err) => {
            report_failure(&err);
            std::process::exit(1);
        }
    };

    let config = AppConfig {
        theme: settings.theme.clone(),
        view: settings.view.clone(),
        year: settings.year,
        export_dir,
        department: settings.department.clone(),
        group: settings.group.clone(),
        start: settings.start.clone(),
        end: settings.end.clone(),
    };

    let dashboard = match App::new(table, config) {
        Ok(dashboard) => dashboard,
        Err(err) => {
            report_failure(&err);
            std::process::exit(1);
        }
    };

    dashboard
        .run()
        .map_err(|e| AttendError::Terminal(e.to_string()))?;
    Ok(())
}

/// Headless `--export` mode: load, summarise, write all six recap CSVs.
fn run_export(
    settings: &Settings,
    file: &Path,
    export_dir: &Path,
) -> attend_core::error::Result<Vec<std::path::PathBuf>> {
    let table = loader::load_attendance(file)?;

    let filters = resolve_filters(&table, settings)?;
    let range = resolve_range(&table, settings)?;

    let summary = aggregator::summarize(&table, &filters, &range, settings.year)?;
    export::export_all(export_dir, &summary)
}

/// Validate `--department` / `--group` against the table's categories.
fn resolve_filters(
    table: &AttendanceTable,
    settings: &Settings,
) -> attend_core::error::Result<FilterSelection> {
    if let Some(ref name) = settings.department {
        if !table.departments().contains(name) {
            return Err(AttendError::Config(format!("unknown department: {name}")));
        }
    }
    if let Some(ref name) = settings.group {
        if !table.groups().contains(name) {
            return Err(AttendError::Config(format!(
                "unknown attendance group: {name}"
            )));
        }
    }
    Ok(FilterSelection {
        department: settings.department.clone(),
        group: settings.group.clone(),
    })
}

/// Resolve `--start` / `--end` labels, defaulting to the full date span.
fn resolve_range(
    table: &AttendanceTable,
    settings: &Settings,
) -> attend_core::error::Result<DateRange> {
    match (&settings.start, &settings.end) {
        (None, None) => Ok(DateRange::full(table)),
        (start, end) => {
            let first = table.dates.first().cloned().unwrap_or_default();
            let last = table.dates.last().cloned().unwrap_or_default();
            let start_label = start.clone().unwrap_or(first);
            let end_label = end.clone().unwrap_or(last);
            DateRange::resolve(table, &start_label, &end_label)
        }
    }
}

/// Single generic failure path: the typed cause goes to the log, the user
/// sees one message plus the expected-format hint.
fn report_failure(err: &AttendError) {
    tracing::error!(error = %err, "processing failed");
    eprintln!("Something went wrong while processing the file.");
    eprintln!("{err}");
    eprintln!("{FORMAT_HINT}");
}

// ── Tests ──────────────────────────────────────────────────────────────────────
