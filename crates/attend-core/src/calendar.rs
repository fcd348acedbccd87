//! Calendar helpers for `MM-DD` date-column labels.
//!
//! Labels carry no year, so ISO week numbers are derived by combining a label
//! with an explicit reference year. The year is configuration
//! ([`crate::settings::Settings::year`]), never a hard-coded literal: the
//! numbering is only meaningful when all data falls inside that year.

use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::error::{AttendError, Result};

/// Reference year used when none is configured.
pub const DEFAULT_REFERENCE_YEAR: i32 = 2025;

fn date_label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{1,2}-\d{1,2}$").expect("static regex"))
}

/// Whether a column name looks like a date label: two hyphen-separated
/// numeric tokens, e.g. `08-01`.
pub fn is_date_label(name: &str) -> bool {
    date_label_re().is_match(name)
}

/// Split a date label into `(month, day)` without calendar validation.
pub fn parse_label(label: &str) -> Option<(u32, u32)> {
    let (month, day) = label.split_once('-')?;
    Some((month.parse().ok()?, day.parse().ok()?))
}

/// ISO calendar week number for `label` interpreted in `year`.
///
/// Fails when the label is not a valid calendar date in that year
/// (e.g. `02-30`, or `02-29` outside a leap year).
pub fn iso_week(label: &str, year: i32) -> Result<u32> {
    let invalid = || AttendError::InvalidDateLabel {
        label: label.to_string(),
        year,
    };
    let (month, day) = parse_label(label).ok_or_else(invalid)?;
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;
    Ok(date.iso_week().week())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
