//! # api-adapters
//!
//! The web routing and orchestration layer for report-board.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod templates;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;

pub use error::ApiError;
pub use state::AppState;

/// Path prefix every API route is mounted under.
pub const API_PREFIX: &str = "/api";

/// The report routes, without prefix or middleware.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/reports",
            get(handlers::list_reports).post(handlers::create_report),
        )
        .route("/reports/{report_id}", delete(handlers::close_report))
        .route(
            "/reports/{report_id}/comments",
            post(handlers::create_comment),
        )
        .method_not_allowed_fallback(handlers::not_found)
}

/// Assembles the full application: API under `/api`, the 404 document for
/// everything else, and the standard middleware stack.
///
/// Layers run outermost first: request id, tracing, request id propagation,
/// CORS, body limit.
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .nest(API_PREFIX, api_routes())
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(middleware::cors_policy())
        .layer(middleware::propagate_request_id())
        .layer(middleware::standard_middleware())
        .layer(middleware::request_id())
        .with_state(state)
}
