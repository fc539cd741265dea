//! # campusvault-entity
//!
//! Domain entity models for CampusVault. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod download;
pub mod resource;
pub mod session;
pub mod subject;
pub mod user;
