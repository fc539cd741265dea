//! Scheduled background tasks for CampusVault.
//!
//! This crate provides:
//! - A cron scheduler wiring periodic maintenance tasks
//! - Built-in job implementations for backup and session cleanup

pub mod jobs;
pub mod scheduler;

pub use scheduler::CronScheduler;
