//! Reusable rendering components shared by the dashboard views.

pub mod metrics;
pub mod ranking;
