//! Policy dashboard endpoints

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};
use policy_core::{DropdownOptions, NewPolicy, Page, Policy};
use serde_json::Value;

use crate::dto::{ApiEnvelope, DashboardQuery};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const INVALID_POLICY: &str = "Invalid policy data provided.";

/// Search policies by dropdown filters, with paging and sorting
pub async fn search_policies(
    State(state): State<AppState>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> ApiResult<Json<ApiEnvelope<Page<Policy>>>> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let request = query.page_request(state.max_page_size)?;

    let page = state.dashboard.search(&query.filters(), &request).await;

    Ok(Json(ApiEnvelope::success("Policy search successful", page)))
}

/// Dropdown values for the dashboard filters
pub async fn get_options(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiEnvelope<DropdownOptions>>> {
    let options = state.dashboard.options().await;
    Ok(Json(ApiEnvelope::success("Dropdown values loaded", options)))
}

/// Add a new policy; it always starts as Pending
pub async fn create_policy(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiEnvelope<Policy>>)> {
    let Json(body) = body.map_err(|_| ApiError::BadRequest(INVALID_POLICY.to_string()))?;
    let new_policy =
        NewPolicy::from_json(&body).ok_or_else(|| ApiError::BadRequest(INVALID_POLICY.to_string()))?;

    let policy = state
        .dashboard
        .create(new_policy)
        .await
        .map_err(|e| ApiError::store("Failed to save policy data.", e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::success("Policy added successfully", policy)),
    ))
}
