//! Core types and shared utilities for the meal-attendance dashboard.
//!
//! Holds the attendance table model, the error type, CLI settings with
//! persisted last-used parameters, calendar helpers for `MM-DD` date labels,
//! and number formatting used by the UI and the CSV exports.

pub mod calendar;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
