//! In-memory attendance table and the selection types applied to it.
//!
//! The [`AttendanceTable`] is the single source of truth for one loaded CSV
//! export; every summary is a read-only projection computed from it together
//! with a [`FilterSelection`] and a [`DateRange`].

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{AttendError, Result};

// ── Employee / AttendanceRow ──────────────────────────────────────────────────

/// Identity columns for one employee row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub first_name: String,
    pub last_name: String,
    /// Employee identifier. Assumed unique per row; not enforced.
    pub id: String,
    pub department: String,
    pub attendance_group: String,
}

impl Employee {
    /// `"First Last"` as shown in rankings.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One table row: an employee plus one 0/1 meal flag per date column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRow {
    pub employee: Employee,
    /// `meals.len() == table.dates.len()`; every value is 0 or 1.
    pub meals: Vec<u8>,
}

// ── AttendanceTable ───────────────────────────────────────────────────────────

/// Parsed attendance export: date-column labels in native order plus one
/// row per employee.
#[derive(Debug, Clone, Default)]
pub struct AttendanceTable {
    /// Date-column labels (`MM-DD`) in the order they appear in the file.
    pub dates: Vec<String>,
    pub rows: Vec<AttendanceRow>,
}

impl AttendanceTable {
    /// Position of `label` in the native column order.
    pub fn date_index(&self, label: &str) -> Option<usize> {
        self.dates.iter().position(|d| d == label)
    }

    /// Sorted unique department names.
    pub fn departments(&self) -> Vec<String> {
        Self::unique_sorted(self.rows.iter().map(|r| r.employee.department.as_str()))
    }

    /// Sorted unique attendance-group names.
    pub fn groups(&self) -> Vec<String> {
        Self::unique_sorted(self.rows.iter().map(|r| r.employee.attendance_group.as_str()))
    }

    fn unique_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
        let mut out: Vec<String> = values.map(str::to_string).collect();
        out.sort();
        out.dedup();
        out
    }
}

// ── DateRange ─────────────────────────────────────────────────────────────────

/// Contiguous slice of a table's date columns, selected by inclusive start
/// and end labels.
///
/// Stored half-open over column indices. Resolving a selection whose end
/// label precedes its start label in column order yields a defined *empty*
/// range: every summary computed over it is empty and every headline metric
/// is zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    start: usize,
    end: usize,
}

impl DateRange {
    /// Range covering every date column of `table`.
    pub fn full(table: &AttendanceTable) -> Self {
        Self {
            start: 0,
            end: table.dates.len(),
        }
    }

    /// Resolve inclusive `start_label..=end_label` against the table's
    /// native column order. Unknown labels are an error; a reversed
    /// selection resolves to the empty range.
    pub fn resolve(table: &AttendanceTable, start_label: &str, end_label: &str) -> Result<Self> {
        let start = table
            .date_index(start_label)
            .ok_or_else(|| AttendError::UnknownDateLabel(start_label.to_string()))?;
        let end = table
            .date_index(end_label)
            .ok_or_else(|| AttendError::UnknownDateLabel(end_label.to_string()))?;
        if end < start {
            Ok(Self { start, end: start })
        } else {
            Ok(Self {
                start,
                end: end + 1,
            })
        }
    }

    /// Build directly from inclusive column indices (UI stepping).
    pub fn from_indices(start: usize, end_inclusive: usize) -> Self {
        if end_inclusive < start {
            Self { start, end: start }
        } else {
            Self {
                start,
                end: end_inclusive + 1,
            }
        }
    }

    /// Column indices covered by the range.
    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of date columns in the range.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The covered labels, in native column order.
    pub fn labels<'a>(&self, table: &'a AttendanceTable) -> &'a [String] {
        &table.dates[self.start..self.end]
    }
}

// ── FilterSelection ───────────────────────────────────────────────────────────

/// Optional equality constraints on department and attendance group.
///
/// `None` is the no-constraint sentinel; it lives outside the value domain so
/// it can never collide with a real category name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub department: Option<String>,
    pub group: Option<String>,
}

impl FilterSelection {
    /// Exact, case-sensitive match against both constraints.
    pub fn matches(&self, employee: &Employee) -> bool {
        self.department
            .as_deref()
            .map_or(true, |d| d == employee.department)
            && self
                .group
                .as_deref()
                .map_or(true, |g| g == employee.attendance_group)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(first: &str, dept: &str, group: &str) -> Employee {
        Employee {
            first_name: first.to_string(),
            last_name: "Doe".to_string(),
            id: format!("ID-{first}"),
            department: dept.to_string(),
            attendance_group: group.to_string(),
        }
    }

    fn sample_table() -> AttendanceTable {
        AttendanceTable {
            dates: vec!["08-01".into(), "08-02".into(), "08-03".into()],
            rows: vec![
                AttendanceRow {
                    employee: employee("Ana", "Sales", "Shift A"),
                    meals: vec![1, 0, 1],
                },
                AttendanceRow {
                    employee: employee("Budi", "Eng", "Shift B"),
                    meals: vec![1, 1, 0],
                },
                AttendanceRow {
                    employee: employee("Citra", "Sales", "Shift B"),
                    meals: vec![0, 1, 1],
                },
            ],
        }
    }

    // ── AttendanceTable ───────────────────────────────────────────────────────

    #[test]
    fn test_date_index() {
        let table = sample_table();
        assert_eq!(table.date_index("08-02"), Some(1));
        assert_eq!(table.date_index("09-01"), None);
    }

    #[test]
    fn test_departments_sorted_unique() {
        let table = sample_table();
        assert_eq!(table.departments(), vec!["Eng", "Sales"]);
    }

    #[test]
    fn test_groups_sorted_unique() {
        let table = sample_table();
        assert_eq!(table.groups(), vec!["Shift A", "Shift B"]);
    }

    // ── DateRange ─────────────────────────────────────────────────────────────

    #[test]
    fn test_range_full() {
        let table = sample_table();
        let range = DateRange::full(&table);
        assert_eq!(range.len(), 3);
        assert_eq!(range.labels(&table), &table.dates[..]);
    }

    #[test]
    fn test_range_resolve_inclusive() {
        let table = sample_table();
        let range = DateRange::resolve(&table, "08-01", "08-02").unwrap();
        assert_eq!(range.len(), 2);
        assert_eq!(range.labels(&table), &["08-01", "08-02"]);
    }

    #[test]
    fn test_range_resolve_single_column() {
        let table = sample_table();
        let range = DateRange::resolve(&table, "08-02", "08-02").unwrap();
        assert_eq!(range.len(), 1);
        assert_eq!(range.indices(), 1..2);
    }

    #[test]
    fn test_range_resolve_reversed_is_empty() {
        let table = sample_table();
        let range = DateRange::resolve(&table, "08-03", "08-01").unwrap();
        assert!(range.is_empty());
        assert_eq!(range.len(), 0);
        assert!(range.labels(&table).is_empty());
    }

    #[test]
    fn test_range_resolve_unknown_label() {
        let table = sample_table();
        let err = DateRange::resolve(&table, "08-01", "12-25").unwrap_err();
        assert!(matches!(err, AttendError::UnknownDateLabel(l) if l == "12-25"));
    }

    #[test]
    fn test_range_from_indices() {
        assert_eq!(DateRange::from_indices(1, 2).indices(), 1..3);
        assert!(DateRange::from_indices(2, 1).is_empty());
    }

    // ── FilterSelection ───────────────────────────────────────────────────────

    #[test]
    fn test_filter_no_constraint_passes_all() {
        let filters = FilterSelection::default();
        assert!(filters.matches(&employee("Ana", "Sales", "Shift A")));
    }

    #[test]
    fn test_filter_department_exact_match() {
        let filters = FilterSelection {
            department: Some("Sales".to_string()),
            group: None,
        };
        assert!(filters.matches(&employee("Ana", "Sales", "Shift A")));
        assert!(!filters.matches(&employee("Budi", "Eng", "Shift A")));
        // Case-sensitive by contract.
        assert!(!filters.matches(&employee("Dewi", "sales", "Shift A")));
    }

    #[test]
    fn test_filter_both_constraints_must_hold() {
        let filters = FilterSelection {
            department: Some("Sales".to_string()),
            group: Some("Shift B".to_string()),
        };
        assert!(filters.matches(&employee("Citra", "Sales", "Shift B")));
        assert!(!filters.matches(&employee("Ana", "Sales", "Shift A")));
        assert!(!filters.matches(&employee("Budi", "Eng", "Shift B")));
    }
}
