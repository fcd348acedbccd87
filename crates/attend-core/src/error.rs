use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the attendance dashboard.
#[derive(Error, Debug)]
pub enum AttendError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV document could not be parsed or written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required identity column is missing from the header row.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// The header row contains no date columns at all.
    #[error("No date columns (MM-DD) found in header")]
    NoDateColumns,

    /// A date-column cell holds a symbol outside the attendance alphabet.
    #[error("Unrecognised attendance symbol {symbol:?} in column {column} for employee {employee}")]
    UnknownSymbol {
        column: String,
        employee: String,
        symbol: String,
    },

    /// A date label was requested that is not one of the table's columns.
    #[error("Unknown date label: {0}")]
    UnknownDateLabel(String),

    /// A date label does not denote a real calendar date in the reference year.
    #[error("Invalid date label {label:?} for year {year}")]
    InvalidDateLabel { label: String, year: i32 },

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, AttendError>;

/// Static hint shown next to any ingestion/processing failure.
///
/// The user-facing surface is deliberately a single generic message plus this
/// hint; the typed variants above exist for logs and tests.
pub const FORMAT_HINT: &str = "Expected a CSV export with 5 leading header lines, columns \
First Name, Last Name, ID, Department, Attendance Group, date columns named MM-DD, \
and cells containing A (ate), - (absent), or blank.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = AttendError::FileRead {
            path: PathBuf::from("/some/absensi.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/absensi.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_missing_column() {
        let err = AttendError::MissingColumn("Department".to_string());
        assert_eq!(err.to_string(), "Missing required column: Department");
    }

    #[test]
    fn test_error_display_unknown_symbol() {
        let err = AttendError::UnknownSymbol {
            column: "08-03".to_string(),
            employee: "EMP-7".to_string(),
            symbol: "X".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("\"X\""));
        assert!(msg.contains("08-03"));
        assert!(msg.contains("EMP-7"));
    }

    #[test]
    fn test_error_display_unknown_date_label() {
        let err = AttendError::UnknownDateLabel("13-99".to_string());
        assert_eq!(err.to_string(), "Unknown date label: 13-99");
    }

    #[test]
    fn test_error_display_invalid_date_label() {
        let err = AttendError::InvalidDateLabel {
            label: "02-30".to_string(),
            year: 2025,
        };
        let msg = err.to_string();
        assert!(msg.contains("02-30"));
        assert!(msg.contains("2025"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AttendError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_format_hint_mentions_required_columns() {
        assert!(FORMAT_HINT.contains("Attendance Group"));
        assert!(FORMAT_HINT.contains("MM-DD"));
    }
}
