//! CSV ingestion for attendance exports.
//!
//! The export format carries 5 lines of report banner before the real header
//! row. The header mixes identity columns with one column per calendar date
//! (`MM-DD`); date cells hold a single attendance symbol.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use attend_core::calendar;
use attend_core::error::{AttendError, Result};
use attend_core::models::{AttendanceRow, AttendanceTable, Employee};
use tracing::debug;

/// Number of leading banner lines before the header row.
pub const HEADER_SKIP_LINES: usize = 5;

/// Symbol marking that the employee ate / attended on a date.
pub const ATTENDANCE_MARKER: &str = "A";

/// Symbol marking absence on a date.
pub const ABSENCE_MARKER: &str = "-";

/// Identity columns that must be present in the header row.
const REQUIRED_COLUMNS: [&str; 5] = [
    "First Name",
    "Last Name",
    "ID",
    "Department",
    "Attendance Group",
];

/// Column positions resolved from the header row.
struct ColumnPlan {
    first_name: usize,
    last_name: usize,
    id: usize,
    department: usize,
    group: usize,
    /// `(column index, label)` for every date column, in header order.
    dates: Vec<(usize, String)>,
}

impl ColumnPlan {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| AttendError::MissingColumn(name.to_string()))
        };
        for name in REQUIRED_COLUMNS {
            find(name)?;
        }

        // Placeholder columns (blank names, spreadsheet "Unnamed: N" artifacts)
        // are dropped; date columns are recognised by the MM-DD pattern.
        let dates: Vec<(usize, String)> = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !h.trim().is_empty() && !h.starts_with("Unnamed"))
            .filter(|(_, h)| calendar::is_date_label(h.trim()))
            .map(|(i, h)| (i, h.trim().to_string()))
            .collect();
        if dates.is_empty() {
            return Err(AttendError::NoDateColumns);
        }

        Ok(Self {
            first_name: find("First Name")?,
            last_name: find("Last Name")?,
            id: find("ID")?,
            department: find("Department")?,
            group: find("Attendance Group")?,
            dates,
        })
    }
}

/// Load an attendance export from `path`.
pub fn load_attendance(path: &Path) -> Result<AttendanceTable> {
    let file = File::open(path).map_err(|source| AttendError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let table = load_attendance_from_reader(BufReader::new(file))?;
    debug!(
        "Loaded {} employees x {} dates from {}",
        table.rows.len(),
        table.dates.len(),
        path.display()
    );
    Ok(table)
}

/// Load an attendance export from any buffered reader.
///
/// Skips the banner lines, parses the header row, and maps every date cell
/// to 0/1. An unrecognised symbol fails the whole load instead of being
/// coerced to absence.
pub fn load_attendance_from_reader<R: BufRead>(mut input: R) -> Result<AttendanceTable> {
    for _ in 0..HEADER_SKIP_LINES {
        let mut banner = String::new();
        if input.read_line(&mut banner)? == 0 {
            break;
        }
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let plan = ColumnPlan::from_headers(&headers)?;

    let cell = |record: &csv::StringRecord, idx: usize| -> String {
        record.get(idx).unwrap_or("").trim().to_string()
    };

    let mut rows: Vec<AttendanceRow> = Vec::new();
    for record in reader.records() {
        let record = record?;

        let employee = Employee {
            first_name: cell(&record, plan.first_name),
            last_name: cell(&record, plan.last_name),
            id: cell(&record, plan.id),
            department: cell(&record, plan.department),
            attendance_group: cell(&record, plan.group),
        };

        let mut meals = Vec::with_capacity(plan.dates.len());
        for (idx, label) in &plan.dates {
            let symbol = cell(&record, *idx);
            meals.push(map_symbol(&symbol, label, &employee.id)?);
        }

        rows.push(AttendanceRow { employee, meals });
    }

    Ok(AttendanceTable {
        dates: plan.dates.into_iter().map(|(_, label)| label).collect(),
        rows,
    })
}

/// Map one date-cell symbol to a 0/1 meal flag.
///
/// Blank cells count as absence. Anything outside the known alphabet is an
/// error naming the offending symbol, column, and employee.
fn map_symbol(symbol: &str, column: &str, employee_id: &str) -> Result<u8> {
    match symbol {
        ATTENDANCE_MARKER => Ok(1),
        ABSENCE_MARKER | "" => Ok(0),
        other => Err(AttendError::UnknownSymbol {
            column: column.to_string(),
            employee: employee_id.to_string(),
            symbol: other.to_string(),
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::io::Write;
    use tempfile::TempDir;

    const BANNER: &str = "Meal Attendance Report\nCompany X\nPeriod: August\n,,,\n,,,\n";

    fn csv_with_header(header: &str, rows: &[&str]) -> String {
        let mut out = String::from(BANNER);
        out.push_str(header);
        out.push('\n');
        for row in rows {
            out.push_str(row);
            out.push('\n');
        }
        out
    }

    fn standard_header() -> &'static str {
        "First Name,Last Name,ID,Department,Attendance Group,08-01,08-02"
    }

    fn load(content: &str) -> Result<AttendanceTable> {
        load_attendance_from_reader(Cursor::new(content.as_bytes().to_vec()))
    }

    // ── Happy path ────────────────────────────────────────────────────────────

    #[test]
    fn test_load_basic_table() {
        let content = csv_with_header(
            standard_header(),
            &[
                "Ana,Doe,E1,Sales,Shift A,A,-",
                "Budi,Roe,E2,Eng,Shift B,A,A",
            ],
        );
        let table = load(&content).unwrap();

        assert_eq!(table.dates, vec!["08-01", "08-02"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].employee.first_name, "Ana");
        assert_eq!(table.rows[0].meals, vec![1, 0]);
        assert_eq!(table.rows[1].meals, vec![1, 1]);
    }

    #[test]
    fn test_load_skips_exactly_five_banner_lines() {
        // The banner must not be interpreted as data.
        let content = csv_with_header(standard_header(), &["Ana,Doe,E1,Sales,Shift A,A,A"]);
        let table = load(&content).unwrap();
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absensi.csv");
        let mut file = File::create(&path).unwrap();
        write!(
            file,
            "{}",
            csv_with_header(standard_header(), &["Ana,Doe,E1,Sales,Shift A,A,-"])
        )
        .unwrap();

        let table = load_attendance(&path).unwrap();
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_attendance(Path::new("/nonexistent/absensi.csv")).unwrap_err();
        assert!(matches!(err, AttendError::FileRead { .. }));
    }

    // ── Column handling ───────────────────────────────────────────────────────

    #[test]
    fn test_load_drops_unnamed_columns() {
        let content = csv_with_header(
            "First Name,Last Name,ID,Department,Attendance Group,Unnamed: 5,08-01",
            &["Ana,Doe,E1,Sales,Shift A,junk,A"],
        );
        let table = load(&content).unwrap();
        assert_eq!(table.dates, vec!["08-01"]);
        assert_eq!(table.rows[0].meals, vec![1]);
    }

    #[test]
    fn test_load_ignores_non_date_extra_columns() {
        let content = csv_with_header(
            "First Name,Last Name,ID,Department,Attendance Group,Notes,08-01",
            &["Ana,Doe,E1,Sales,Shift A,on leave,A"],
        );
        let table = load(&content).unwrap();
        assert_eq!(table.dates, vec!["08-01"]);
    }

    #[test]
    fn test_load_missing_required_column() {
        let content = csv_with_header(
            "First Name,Last Name,ID,Attendance Group,08-01",
            &["Ana,Doe,E1,Shift A,A"],
        );
        let err = load(&content).unwrap_err();
        assert!(matches!(err, AttendError::MissingColumn(c) if c == "Department"));
    }

    #[test]
    fn test_load_no_date_columns() {
        let content = csv_with_header(
            "First Name,Last Name,ID,Department,Attendance Group",
            &["Ana,Doe,E1,Sales,Shift A"],
        );
        let err = load(&content).unwrap_err();
        assert!(matches!(err, AttendError::NoDateColumns));
    }

    #[test]
    fn test_load_preserves_date_column_order() {
        let content = csv_with_header(
            "First Name,Last Name,ID,Department,Attendance Group,08-03,08-01,08-02",
            &["Ana,Doe,E1,Sales,Shift A,A,-,A"],
        );
        let table = load(&content).unwrap();
        // Native file order, not chronological order.
        assert_eq!(table.dates, vec!["08-03", "08-01", "08-02"]);
        assert_eq!(table.rows[0].meals, vec![1, 0, 1]);
    }

    // ── Symbol mapping ────────────────────────────────────────────────────────

    #[test]
    fn test_blank_cell_counts_as_absence() {
        let content = csv_with_header(standard_header(), &["Ana,Doe,E1,Sales,Shift A,,A"]);
        let table = load(&content).unwrap();
        assert_eq!(table.rows[0].meals, vec![0, 1]);
    }

    #[test]
    fn test_unknown_symbol_fails_fast() {
        let content = csv_with_header(
            standard_header(),
            &[
                "Ana,Doe,E1,Sales,Shift A,A,A",
                "Budi,Roe,E2,Eng,Shift B,X,A",
            ],
        );
        let err = load(&content).unwrap_err();
        match err {
            AttendError::UnknownSymbol {
                column,
                employee,
                symbol,
            } => {
                assert_eq!(column, "08-01");
                assert_eq!(employee, "E2");
                assert_eq!(symbol, "X");
            }
            other => panic!("expected UnknownSymbol, got {other}"),
        }
    }

    #[test]
    fn test_symbols_are_trimmed() {
        let content = csv_with_header(standard_header(), &["Ana,Doe,E1,Sales,Shift A, A ,-"]);
        let table = load(&content).unwrap();
        assert_eq!(table.rows[0].meals, vec![1, 0]);
    }

    #[test]
    fn test_short_records_tolerated() {
        // flexible(true): a row missing trailing cells reads them as blank.
        let content = csv_with_header(standard_header(), &["Ana,Doe,E1,Sales,Shift A,A"]);
        let table = load(&content).unwrap();
        assert_eq!(table.rows[0].meals, vec![1, 0]);
    }
}
