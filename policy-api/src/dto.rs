//! Data Transfer Objects for API requests and responses

use policy_core::{FilterSet, PageRequest, QueryResult};
use serde::{Deserialize, Serialize};

// ============ Envelope ============

/// Body of every policy endpoint response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub message: String,
    pub status: String,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            status: "success".to_string(),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: "error".to_string(),
            data: None,
        }
    }
}

// ============ Query DTOs ============

/// Query string of the dashboard search.
///
/// Values stay raw strings so malformed paging can be reported in the
/// envelope instead of as an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    pub jurisdiction: Option<String>,
    pub business_area: Option<String>,
    pub inventory_type: Option<String>,
    pub entity_type: Option<String>,
    pub status: Option<String>,
    pub policy_parameter: Option<String>,
    pub page: Option<String>,
    pub size: Option<String>,
    pub sort_by: Option<String>,
    pub direction: Option<String>,
}

impl DashboardQuery {
    pub fn filters(&self) -> FilterSet {
        FilterSet::new()
            .with("jurisdiction", self.jurisdiction.clone())
            .with("businessArea", self.business_area.clone())
            .with("inventoryType", self.inventory_type.clone())
            .with("entityType", self.entity_type.clone())
            .with("status", self.status.clone())
            .with("policyParameter", self.policy_parameter.clone())
    }

    pub fn page_request(&self, max_page_size: usize) -> QueryResult<PageRequest> {
        PageRequest::parse(
            self.page.as_deref(),
            self.size.as_deref(),
            self.sort_by.as_deref(),
            self.direction.as_deref(),
            max_page_size,
        )
    }
}

/// Paging and ordering query string
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<String>,
    pub size: Option<String>,
    pub sort_by: Option<String>,
    pub direction: Option<String>,
}

impl ListQuery {
    pub fn page_request(&self, max_page_size: usize) -> QueryResult<PageRequest> {
        PageRequest::parse(
            self.page.as_deref(),
            self.size.as_deref(),
            self.sort_by.as_deref(),
            self.direction.as_deref(),
            max_page_size,
        )
    }
}

// ============ Policy DTOs ============

/// Update expiration request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpirationRequest {
    #[serde(default)]
    pub expiration_date: Option<String>,
}

// ============ Health DTOs ============

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub dashboard_policies: usize,
}
