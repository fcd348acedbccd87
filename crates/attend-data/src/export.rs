//! CSV export of the dashboard summaries.
//!
//! One UTF-8 file per aggregation, with the fixed names and headers the
//! downstream report consumers expect. No computation happens here; every
//! writer serialises an already-computed summary.

use std::path::{Path, PathBuf};

use attend_core::error::Result;
use tracing::info;

use crate::aggregator::{
    CategoryCount, DailyCount, DashboardSummary, EmployeeTotal, GroupWeekCount, WeeklyCount,
};

pub const DAILY_FILE: &str = "rekap_harian.csv";
pub const WEEKLY_FILE: &str = "rekap_mingguan.csv";
pub const EMPLOYEE_FILE: &str = "rekap_karyawan.csv";
pub const DEPARTMENT_FILE: &str = "rekap_departemen.csv";
pub const GROUP_FILE: &str = "rekap_group_bulanan.csv";
pub const GROUP_WEEKLY_FILE: &str = "rekap_group_mingguan.csv";

/// Write all six summary files into `dir`, returning the written paths.
pub fn export_all(dir: &Path, summary: &DashboardSummary) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let paths = vec![
        write_daily(&dir.join(DAILY_FILE), &summary.daily)?,
        write_weekly(&dir.join(WEEKLY_FILE), &summary.weekly)?,
        write_employees(&dir.join(EMPLOYEE_FILE), &summary.employees)?,
        write_departments(&dir.join(DEPARTMENT_FILE), &summary.departments)?,
        write_groups(&dir.join(GROUP_FILE), &summary.groups)?,
        write_group_weekly(&dir.join(GROUP_WEEKLY_FILE), &summary.group_weekly)?,
    ];

    info!("Exported {} summary files to {}", paths.len(), dir.display());
    Ok(paths)
}

/// `Tanggal, Jumlah Makan` — one row per date.
pub fn write_daily(path: &Path, daily: &[DailyCount]) -> Result<PathBuf> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Tanggal", "Jumlah Makan"])?;
    for day in daily {
        writer.write_record([day.date.clone(), day.meals.to_string()])?;
    }
    writer.flush()?;
    Ok(path.to_path_buf())
}

/// `Minggu, Jumlah Makan` — one row per ISO week.
pub fn write_weekly(path: &Path, weekly: &[WeeklyCount]) -> Result<PathBuf> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Minggu", "Jumlah Makan"])?;
    for week in weekly {
        writer.write_record([week.week.to_string(), week.meals.to_string()])?;
    }
    writer.flush()?;
    Ok(path.to_path_buf())
}

/// Identity columns plus `Total Makan` — one row per employee.
pub fn write_employees(path: &Path, employees: &[EmployeeTotal]) -> Result<PathBuf> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "First Name",
        "Last Name",
        "ID",
        "Department",
        "Attendance Group",
        "Total Makan",
    ])?;
    for total in employees {
        let e = &total.employee;
        writer.write_record([
            e.first_name.clone(),
            e.last_name.clone(),
            e.id.clone(),
            e.department.clone(),
            e.attendance_group.clone(),
            total.meals.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(path.to_path_buf())
}

/// `Department, Total Makan` — one row per department.
pub fn write_departments(path: &Path, departments: &[CategoryCount]) -> Result<PathBuf> {
    write_category(path, "Department", departments)
}

/// `Attendance Group, Total Makan` — one row per group.
pub fn write_groups(path: &Path, groups: &[CategoryCount]) -> Result<PathBuf> {
    write_category(path, "Attendance Group", groups)
}

fn write_category(path: &Path, key_header: &str, rows: &[CategoryCount]) -> Result<PathBuf> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([key_header, "Total Makan"])?;
    for row in rows {
        writer.write_record([row.name.clone(), row.meals.to_string()])?;
    }
    writer.flush()?;
    Ok(path.to_path_buf())
}

/// `Attendance Group, Minggu, Makan` — one row per (group, week).
pub fn write_group_weekly(path: &Path, rows: &[GroupWeekCount]) -> Result<PathBuf> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Attendance Group", "Minggu", "Makan"])?;
    for row in rows {
        writer.write_record([
            row.group.clone(),
            row.week.to_string(),
            row.meals.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(path.to_path_buf())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
