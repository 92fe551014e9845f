//! API Gateway error types.
//!
//! `ApiError` is what a handler returns; it renders as the failure envelope
//! with the matching HTTP status. `GatewayError` covers server lifecycle.

use crate::domain::types::Envelope;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fm_01_social_graph::GraphError;
use std::fmt;
use tracing::error;

/// Client-visible error: HTTP status plus `error_message`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Malformed JSON or failed field validation
    pub fn bad_request(details: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, details)
    }

    pub fn not_found(details: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, details)
    }

    /// Relationship or user already exists
    pub fn conflict(details: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, details)
    }

    /// Body exceeds the configured size
    pub fn payload_too_large(details: impl Into<String>) -> Self {
        Self::new(StatusCode::PAYLOAD_TOO_LARGE, details)
    }

    pub fn timeout(details: impl Into<String>) -> Self {
        Self::new(StatusCode::GATEWAY_TIMEOUT, details)
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, details)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(Envelope::<()>::failure(self.message))).into_response()
    }
}

impl From<GraphError> for ApiError {
    fn from(err: GraphError) -> Self {
        match &err {
            GraphError::InvalidRequest(_) => ApiError::bad_request(err.to_string()),
            GraphError::UserNotFound { .. } | GraphError::SubscriptionNotFound => {
                ApiError::not_found(err.to_string())
            }
            GraphError::AlreadyFriends
            | GraphError::AlreadySubscribed
            | GraphError::AlreadyBlocked
            | GraphError::UserAlreadyExists { .. } => ApiError::conflict(err.to_string()),
            GraphError::Timeout { .. } => {
                error!(error = %err, "[fm-02] store deadline exceeded");
                ApiError::timeout(err.to_string())
            }
            GraphError::Store { .. } => {
                // Backend detail stays in the log
                error!(error = %err, "[fm-02] store failure");
                ApiError::internal("internal storage error")
            }
        }
    }
}

/// Convenience result for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Gateway-level errors (server lifecycle, not per-request)
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),
}
