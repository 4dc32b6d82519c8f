//! My-app policy endpoints

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    Json,
};
use policy_core::{AppPolicy, Page, PolicyDetails};

use crate::dto::{ApiEnvelope, ListQuery, UpdateExpirationRequest};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// List the application's policies
pub async fn list_policies(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<ApiEnvelope<Page<AppPolicy>>>> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let request = query.page_request(state.max_page_size)?;

    let page = state.app_policies.list(&request).await;

    Ok(Json(ApiEnvelope::success("Policy list loaded successfully", page)))
}

/// Get policy details by ID
pub async fn get_policy(
    State(state): State<AppState>,
    Path(policy_id): Path<String>,
) -> ApiResult<Json<ApiEnvelope<PolicyDetails>>> {
    let details = state
        .app_policies
        .details(&policy_id)
        .await
        .ok_or_else(|| policy_not_found(&policy_id))?;

    Ok(Json(ApiEnvelope::success(
        format!("Policy {} loaded successfully", policy_id),
        details,
    )))
}

/// Change a policy's expiration date
pub async fn update_expiration(
    State(state): State<AppState>,
    Path(policy_id): Path<String>,
    body: Result<Json<UpdateExpirationRequest>, JsonRejection>,
) -> ApiResult<Json<ApiEnvelope<PolicyDetails>>> {
    let expiration_date = body
        .ok()
        .and_then(|Json(req)| req.expiration_date)
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Expiration date is required".to_string()))?;

    let details = state
        .app_policies
        .update_expiration(&policy_id, &expiration_date)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                policy_not_found(&policy_id)
            } else {
                ApiError::store("Failed to update expiration date", e)
            }
        })?;

    Ok(Json(ApiEnvelope::success(
        format!("Expiration date for policy {} updated successfully", policy_id),
        details,
    )))
}

fn policy_not_found(policy_id: &str) -> ApiError {
    ApiError::NotFound(format!("Policy with ID {} not found", policy_id))
}
