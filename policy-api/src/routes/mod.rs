//! API route handlers

pub mod app_policies;
pub mod dashboard;
pub mod health;

use axum::{
    extract::OriginalUri,
    routing::{get, put},
    Router,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Create the API router
///
/// Unknown paths and unsupported methods on known paths both answer with
/// the 404 envelope.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check).fallback(not_found))
        .route("/ready", get(health::ready_check).fallback(not_found))
        // Policy dashboard endpoints
        .route(
            "/api/policy-dashboard",
            get(dashboard::search_policies)
                .post(dashboard::create_policy)
                .fallback(not_found),
        )
        .route(
            "/api/policy-dashboard/options",
            get(dashboard::get_options).fallback(not_found),
        )
        // My-app policy endpoints
        .route(
            "/api/my-app-policies",
            get(app_policies::list_policies).fallback(not_found),
        )
        .route(
            "/api/my-app-policies/:id",
            get(app_policies::get_policy).fallback(not_found),
        )
        .route(
            "/api/my-app-policies/:id/expiration",
            put(app_policies::update_expiration).fallback(not_found),
        )
        .fallback(not_found)
        // State
        .with_state(state)
}

async fn not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::NotFound(format!("Not found: {}", uri))
}
