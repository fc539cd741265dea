//! # campusvault-database
//!
//! Database connection management and repository implementations for
//! CampusVault. Each repository owns all SQL for one table; nothing
//! outside this crate issues queries.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
