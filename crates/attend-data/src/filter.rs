//! Row and column selection over the attendance table.
//!
//! Filters never copy cell data: they yield borrowed rows and the aggregator
//! walks the selected column slice directly.

use attend_core::models::{AttendanceRow, AttendanceTable, DateRange, FilterSelection};

/// Rows passing the department/group constraints, in table order.
pub fn select_rows<'a>(
    table: &'a AttendanceTable,
    filters: &FilterSelection,
) -> Vec<&'a AttendanceRow> {
    table
        .rows
        .iter()
        .filter(|row| filters.matches(&row.employee))
        .collect()
}

/// Sum of one row's meal flags over the selected date columns.
pub fn row_total(row: &AttendanceRow, range: &DateRange) -> u64 {
    range.indices().map(|i| u64::from(row.meals[i])).sum()
}

/// Per-date column sums over `rows`, one entry per column in the range.
pub fn column_totals(rows: &[&AttendanceRow], range: &DateRange) -> Vec<u64> {
    range
        .indices()
        .map(|i| rows.iter().map(|row| u64::from(row.meals[i])).sum())
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
