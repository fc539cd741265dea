//! Per-user aggregate stats.

pub mod service;

pub use service::{StatsService, UserStats};
