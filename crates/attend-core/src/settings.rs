use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::calendar::DEFAULT_REFERENCE_YEAR;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Meal-attendance dashboard for HR attendance CSV exports
#[derive(Parser, Debug, Clone)]
#[command(
    name = "mealdash",
    about = "Interactive meal-attendance dashboard for HR attendance CSV exports",
    version
)]
pub struct Settings {
    /// Attendance CSV export to analyse (welcome screen when omitted)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Reference year used to derive ISO week numbers from MM-DD labels
    #[arg(long, default_value_t = DEFAULT_REFERENCE_YEAR)]
    pub year: i32,

    /// Initial department filter (exact match; all departments when omitted)
    #[arg(long)]
    pub department: Option<String>,

    /// Initial attendance-group filter (exact match; all groups when omitted)
    #[arg(long)]
    pub group: Option<String>,

    /// Start date label (MM-DD); defaults to the first date column
    #[arg(long)]
    pub start: Option<String>,

    /// End date label (MM-DD); defaults to the last date column
    #[arg(long)]
    pub end: Option<String>,

    /// Initial dashboard tab
    #[arg(long, default_value = "daily", value_parser = ["daily", "weekly", "department", "employee", "group"])]
    pub view: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "auto"])]
    pub theme: String,

    /// Write all six summary CSV files and exit without starting the dashboard
    #[arg(long)]
    pub export: bool,

    /// Directory for exported summary CSV files
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.mealdash/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file,
    /// `~/.mealdash/last_used.json`.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".mealdash").join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to an explicit path, creating parent
    /// directories if needed.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        // Write to a temp file then rename for atomicity.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at `path` if it exists.
    pub fn clear_at(path: &std::path::Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Full implementation – accepts args and an explicit config path so that
    /// tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        // Build raw ArgMatches so we can query ValueSource.
        let matches = Settings::command().get_matches_from(args.clone());

        let mut settings = Settings::parse_from(args);

        if settings.clear {
            let _ = LastUsedParams::clear_at(config_path);
            return settings;
        }

        let last = LastUsedParams::load_from(config_path);

        // Merge last-used values for fields that were NOT explicitly set on
        // the command line (CLI always wins). Filters and date labels are
        // data-dependent and never persisted.
        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme {
                settings.theme = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "view") {
            if let Some(v) = last.view {
                settings.view = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "year") {
            if let Some(v) = last.year {
                settings.year = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "export_dir") {
            if let Some(v) = last.export_dir {
                settings.export_dir = Some(v);
            }
        }

        let to_save = LastUsedParams {
            theme: Some(settings.theme.clone()),
            view: Some(settings.view.clone()),
            year: Some(settings.year),
            export_dir: settings.export_dir.clone(),
        };
        if let Err(e) = to_save.save_to(config_path) {
            tracing::warn!("Failed to persist last-used params: {}", e);
        }

        settings
    }
}

/// Whether an argument was supplied on the command line (as opposed to
/// defaulted).
fn is_arg_explicitly_set(matches: &ArgMatches, name: &str) -> bool {
    matches
        .value_source(name)
        .map(|s| s == ValueSource::CommandLine)
        .unwrap_or(false)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
