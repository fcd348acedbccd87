//! Summary aggregations over a filtered attendance table.
//!
//! Seven independent reductions, all pure functions of
//! `(table, filters, date range, reference year)`: headline metrics, daily
//! and weekly totals, per-department, per-employee and per-group totals, and
//! the per-(group, week) breakdown. Re-running any of them on unchanged
//! inputs yields identical output.
//!
//! Department and group totals are computed from the *unfiltered* table on
//! purpose: those panels always show the full-organisation distribution, no
//! matter which department/group the rest of the dashboard is narrowed to.
//! Only the date range applies to them.

use std::collections::BTreeMap;

use attend_core::calendar;
use attend_core::error::Result;
use attend_core::models::{AttendanceTable, DateRange, Employee, FilterSelection};

use crate::filter::{column_totals, row_total, select_rows};

// ── Summary row types ─────────────────────────────────────────────────────────

/// The four top-level scalars shown above every dashboard tab.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlineMetrics {
    /// Sum over all cells of the filtered table within the range.
    pub total_meals: u64,
    /// Row count of the filtered table.
    pub employee_count: usize,
    /// Mean of the per-date column sums; 0.0 for an empty range.
    pub daily_average: f64,
    /// `total / (employees x dates) x 100`; 0.0 when the denominator is 0.
    pub participation_rate: f64,
}

/// Meal count for one date column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyCount {
    pub date: String,
    pub meals: u64,
}

/// Meal count for one ISO calendar week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyCount {
    pub week: u32,
    pub meals: u64,
}

/// Meal count for one category value (department or attendance group).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub name: String,
    pub meals: u64,
}

/// Meal count for one employee, identity columns retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeTotal {
    pub employee: Employee,
    pub meals: u64,
}

/// Meal count for one (attendance group, ISO week) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupWeekCount {
    pub group: String,
    pub week: u32,
    pub meals: u64,
}

/// All seven summaries for one (table, filters, range, year) input.
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub headline: HeadlineMetrics,
    pub daily: Vec<DailyCount>,
    pub weekly: Vec<WeeklyCount>,
    pub departments: Vec<CategoryCount>,
    pub employees: Vec<EmployeeTotal>,
    pub groups: Vec<CategoryCount>,
    pub group_weekly: Vec<GroupWeekCount>,
}

// ── Reductions ────────────────────────────────────────────────────────────────

/// Headline metrics over the filtered table.
pub fn headline_metrics(
    table: &AttendanceTable,
    filters: &FilterSelection,
    range: &DateRange,
) -> HeadlineMetrics {
    let rows = select_rows(table, filters);
    let per_date = column_totals(&rows, range);
    let total_meals: u64 = per_date.iter().sum();

    let daily_average = if per_date.is_empty() {
        0.0
    } else {
        total_meals as f64 / per_date.len() as f64
    };

    let cells = rows.len() * range.len();
    let participation_rate = if cells == 0 {
        0.0
    } else {
        total_meals as f64 / cells as f64 * 100.0
    };

    HeadlineMetrics {
        total_meals,
        employee_count: rows.len(),
        daily_average,
        participation_rate,
    }
}

/// Per-date column sums over the filtered table, in native column order.
pub fn daily_summary(
    table: &AttendanceTable,
    filters: &FilterSelection,
    range: &DateRange,
) -> Vec<DailyCount> {
    let rows = select_rows(table, filters);
    range
        .labels(table)
        .iter()
        .zip(column_totals(&rows, range))
        .map(|(label, meals)| DailyCount {
            date: label.clone(),
            meals,
        })
        .collect()
}

/// Daily counts folded into ISO calendar weeks of the reference year,
/// ascending by week number.
pub fn weekly_summary(daily: &[DailyCount], year: i32) -> Result<Vec<WeeklyCount>> {
    let mut weeks: BTreeMap<u32, u64> = BTreeMap::new();
    for day in daily {
        let week = calendar::iso_week(&day.date, year)?;
        *weeks.entry(week).or_insert(0) += day.meals;
    }
    Ok(weeks
        .into_iter()
        .map(|(week, meals)| WeeklyCount { week, meals })
        .collect())
}

/// Per-department totals over the **unfiltered** table, descending by total.
/// Equal totals keep first-appearance order.
pub fn department_summary(table: &AttendanceTable, range: &DateRange) -> Vec<CategoryCount> {
    category_summary(table, range, |e| &e.department)
}

/// Per-attendance-group totals over the **unfiltered** table, descending by
/// total. Equal totals keep first-appearance order.
pub fn group_summary(table: &AttendanceTable, range: &DateRange) -> Vec<CategoryCount> {
    category_summary(table, range, |e| &e.attendance_group)
}

fn category_summary<'a>(
    table: &'a AttendanceTable,
    range: &DateRange,
    key: impl Fn(&'a Employee) -> &'a str,
) -> Vec<CategoryCount> {
    // Vec instead of a map: category counts are tiny and first-appearance
    // order is the tie-break contract.
    let mut totals: Vec<CategoryCount> = Vec::new();
    for row in &table.rows {
        let meals = row_total(row, range);
        let name = key(&row.employee);
        match totals.iter_mut().find(|c| c.name == name) {
            Some(entry) => entry.meals += meals,
            None => totals.push(CategoryCount {
                name: name.to_string(),
                meals,
            }),
        }
    }
    totals.sort_by(|a, b| b.meals.cmp(&a.meals));
    totals
}

/// Per-employee totals over the filtered table, descending by total. Equal
/// totals keep table row order.
pub fn employee_summary(
    table: &AttendanceTable,
    filters: &FilterSelection,
    range: &DateRange,
) -> Vec<EmployeeTotal> {
    let mut totals: Vec<EmployeeTotal> = select_rows(table, filters)
        .into_iter()
        .map(|row| EmployeeTotal {
            employee: row.employee.clone(),
            meals: row_total(row, range),
        })
        .collect();
    totals.sort_by(|a, b| b.meals.cmp(&a.meals));
    totals
}

/// Case-insensitive substring search over first name, last name, or ID.
/// An empty (or all-whitespace) term returns the full summary.
pub fn search_employees(summary: &[EmployeeTotal], term: &str) -> Vec<EmployeeTotal> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return summary.to_vec();
    }
    summary
        .iter()
        .filter(|t| {
            let e = &t.employee;
            e.first_name.to_lowercase().contains(&needle)
                || e.last_name.to_lowercase().contains(&needle)
                || e.id.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Per-(group, week) totals over the **unfiltered** table, ascending by
/// group then week.
///
/// Reshapes the date columns into long form: every `(row, date)` cell is
/// tagged with its group and ISO week, then summed.
pub fn group_weekly_summary(
    table: &AttendanceTable,
    range: &DateRange,
    year: i32,
) -> Result<Vec<GroupWeekCount>> {
    let weeks: Vec<u32> = range
        .labels(table)
        .iter()
        .map(|label| calendar::iso_week(label, year))
        .collect::<Result<_>>()?;

    let mut totals: BTreeMap<(String, u32), u64> = BTreeMap::new();
    for row in &table.rows {
        for (offset, col) in range.indices().enumerate() {
            let key = (row.employee.attendance_group.clone(), weeks[offset]);
            *totals.entry(key).or_insert(0) += u64::from(row.meals[col]);
        }
    }

    Ok(totals
        .into_iter()
        .map(|((group, week), meals)| GroupWeekCount { group, week, meals })
        .collect())
}

/// Run all seven reductions for one input.
pub fn summarize(
    table: &AttendanceTable,
    filters: &FilterSelection,
    range: &DateRange,
    year: i32,
) -> Result<DashboardSummary> {
    let daily = daily_summary(table, filters, range);
    let weekly = weekly_summary(&daily, year)?;
    Ok(DashboardSummary {
        headline: headline_metrics(table, filters, range),
        weekly,
        daily,
        departments: department_summary(table, range),
        employees: employee_summary(table, filters, range),
        groups: group_summary(table, range),
        group_weekly: group_weekly_summary(table, range, year)?,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
