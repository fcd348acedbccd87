//! Data layer for the meal-attendance dashboard.
//!
//! Responsible for parsing attendance CSV exports into the in-memory table,
//! applying row/column selections, computing the summary aggregations, and
//! writing the exportable summary CSV files.

pub mod aggregator;
pub mod export;
pub mod filter;
pub mod loader;

pub use attend_core as core;
