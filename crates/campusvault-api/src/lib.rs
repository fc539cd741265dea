//! # campusvault-api
//!
//! HTTP API layer for CampusVault built on Axum.
//!
//! Provides all REST endpoints, middleware (CORS, logging, body limit),
//! extractors, DTOs, and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;

/// Wrapper turning the domain [`campusvault_core::AppError`] into an axum
/// response. Handlers return `Result<_, ApiError>`; the `From` impl lets
/// `?` lift domain errors directly.
#[derive(Debug)]
pub struct ApiError(pub campusvault_core::AppError);
