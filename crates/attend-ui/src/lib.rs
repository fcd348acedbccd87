//! Terminal UI layer for the meal-attendance dashboard.
//!
//! Provides themes, reusable components (metric boxes, ranking bars), the
//! per-tab summary views, and the main application event loop built on top
//! of [`ratatui`]. Every keystroke mutates only the selection state; the
//! aggregation pipeline is re-run as a pure function on each draw.

pub mod app;
pub mod breakdown_view;
pub mod components;
pub mod employee_view;
pub mod themes;
pub mod trend_view;
pub mod welcome_view;

pub use attend_core as core;
