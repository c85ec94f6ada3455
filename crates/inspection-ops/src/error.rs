use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::store::StoreError;

/// Failure taxonomy shared by every service operation.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<StoreError> for DomainError {
    fn from(value: StoreError) -> Self {
        match &value {
            StoreError::NotFound { .. } => Self::NotFound(value.to_string()),
            StoreError::VersionMismatch { .. } | StoreError::PropertyInUse { .. } => {
                Self::Conflict(value.to_string())
            }
            StoreError::MissingProperty { .. } => Self::Validation(value.to_string()),
            StoreError::Unavailable(_) => Self::Storage(value.to_string()),
        }
    }
}

/// HTTP rendering of a failed operation: the mapped status code plus the
/// `{"message": ...}` envelope the UI consumes. Storage failures are logged
/// here and replaced with a generic message so internals never leak.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<DomainError> for ApiError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(message) => Self {
                status: StatusCode::BAD_REQUEST,
                message,
            },
            DomainError::NotFound(message) => Self {
                status: StatusCode::NOT_FOUND,
                message,
            },
            DomainError::Conflict(message) => Self {
                status: StatusCode::CONFLICT,
                message,
            },
            DomainError::Storage(detail) => {
                tracing::error!(%detail, "storage failure");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "operation failed, please retry later".to_string(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "message": self.message }));
        (self.status, body).into_response()
    }
}

/// Fatal startup errors for the service binary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] crate::telemetry::TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server error: {0}")]
    Server(#[from] axum::Error),
    #[error("{0}")]
    Domain(#[from] DomainError),
}
