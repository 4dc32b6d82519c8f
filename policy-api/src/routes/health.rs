//! Health check endpoints

use axum::{extract::State, Json};

use crate::dto::HealthResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        dashboard_policies: state.dashboard.count().await,
    }))
}

/// Ready check endpoint (verifies the data directories are still there)
pub async fn ready_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let dashboard_ok = state.dashboard.is_ready().await;
    let app_ok = state.app_policies.is_ready().await;

    let status = if dashboard_ok && app_ok {
        "ready"
    } else {
        "degraded"
    };

    Ok(Json(HealthResponse {
        status: status.to_string(),
        version: state.version.clone(),
        dashboard_policies: state.dashboard.count().await,
    }))
}
