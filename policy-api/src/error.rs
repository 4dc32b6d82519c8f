//! API Error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use policy_core::QueryError;
use policy_store::StoreError;
use thiserror::Error;

use crate::dto::ApiEnvelope;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid query: {0}")]
    Query(#[from] QueryError),

    #[error("{message}: {source}")]
    Store {
        message: String,
        #[source]
        source: StoreError,
    },

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    /// Persistence failure reported to the client as `message`
    pub fn store(message: impl Into<String>, source: StoreError) -> Self {
        Self::Store {
            message: message.into(),
            source,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::Query(_) => StatusCode::BAD_REQUEST,
            ApiError::Store { .. } | ApiError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "not_found",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Query(_) => "invalid_query",
            ApiError::Store { .. } => "store",
            ApiError::InternalError(_) => "internal",
        }
    }

    /// Message placed in the response envelope
    pub fn public_message(&self) -> String {
        match self {
            ApiError::NotFound(msg) | ApiError::BadRequest(msg) | ApiError::InternalError(msg) => {
                msg.clone()
            }
            ApiError::Query(e) => e.to_string(),
            ApiError::Store { message, .. } => message.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }
        crate::metrics::record_error(self.kind());

        let body = ApiEnvelope::<()>::error(self.public_message());
        (status, Json(body)).into_response()
    }
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;
