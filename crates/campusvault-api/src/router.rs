//! Route definitions for the CampusVault HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState`
//! and passes it to all handlers via Axum's `State` extractor.

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(subject_routes())
        .merge(resource_routes())
        .merge(user_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        // Multipart bodies carry a little framing overhead beyond the file.
        .layer(DefaultBodyLimit::max(max_upload + 64 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: register, login, logout, current user
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/user", get(handlers::auth::current_user))
}

/// Subject directory endpoints
fn subject_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/subjects/:year/:semester",
            get(handlers::subject::list_subjects),
        )
        .route("/subject/:id", get(handlers::subject::get_subject))
        .route("/subjects", post(handlers::subject::create_subject))
        .route("/subjects/:id", put(handlers::subject::update_subject))
        .route("/subjects/:id", delete(handlers::subject::delete_subject))
}

/// Resource upload, download, listing, deletion
fn resource_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/resources/:subject_id",
            get(handlers::resource::list_resources),
        )
        .route(
            "/resources/user/:user_id",
            get(handlers::resource::list_user_resources),
        )
        .route("/resources", post(handlers::resource::upload_resource))
        .route("/resources/:id", delete(handlers::resource::delete_resource))
        .route(
            "/download/:resource_id",
            get(handlers::resource::download_resource),
        )
        .route("/stats/:user_id", get(handlers::stats::user_stats))
}

/// User profile endpoints
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user/:user_id", put(handlers::user::update_profile))
        .route(
            "/user/:user_id/password",
            put(handlers::user::change_password),
        )
}

/// Health check endpoint (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::Method;
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new().allow_headers(Any);

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<axum::http::HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    cors.max_age(std::time::Duration::from_secs(cors_config.max_age_seconds))
}
