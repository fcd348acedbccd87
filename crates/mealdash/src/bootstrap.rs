use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure the standard `~/.mealdash/` directory hierarchy exists.
///
/// Creates the following directories if absent (including any missing parents):
/// - `~/.mealdash/`
/// - `~/.mealdash/logs/`
/// - `~/.mealdash/exports/`
pub fn ensure_directories() -> anyhow::Result<()> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let app_dir = home.join(".mealdash");
    std::fs::create_dir_all(&app_dir)?;
    std::fs::create_dir_all(app_dir.join("logs"))?;
    std::fs::create_dir_all(app_dir.join("exports"))?;
    Ok(())
}

/// Default directory for exported summary CSVs, `~/.mealdash/exports/`.
pub fn default_export_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".mealdash")
        .join("exports")
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is the uppercase CLI level name, mapped to a
/// [`tracing_subscriber::EnvFilter`] directive.  Falls back to `"info"` if
/// the level string is not recognised.  All output goes to stderr, which is
/// safe alongside the alternate-screen TUI.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let upper = log_level.to_uppercase();
    let normalised = match upper.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => other,
    };

    let filter = EnvFilter::try_new(normalised).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_directories() {
        let tmp = TempDir::new().expect("tempdir");

        // Override HOME so that dirs::home_dir() resolves to our temp dir.
        let original_home = std::env::var_os("HOME");
        std::env::set_var("HOME", tmp.path());

        let result = ensure_directories();

        // Restore HOME.
        match original_home {
            Some(v) => std::env::set_var("HOME", v),
            None => std::env::remove_var("HOME"),
        }

        result.expect("ensure_directories should succeed");

        let app_dir = tmp.path().join(".mealdash");
        assert!(app_dir.is_dir(), ".mealdash dir must exist");
        assert!(app_dir.join("logs").is_dir(), "logs subdir must exist");
        assert!(
            app_dir.join("exports").is_dir(),
            "exports subdir must exist"
        );
    }

    #[test]
    fn test_default_export_dir_is_under_home() {
        let dir = default_export_dir();
        assert!(dir.ends_with(".mealdash/exports"));
    }
}
