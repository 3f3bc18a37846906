//! API Error types

use am_core::MaintenanceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("{0}")]
    Maintenance(#[from] MaintenanceError),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(code: &str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
        }
    }
}

const INTERNAL_MESSAGE: &str = "Internal server error";

fn maintenance_status(e: &MaintenanceError) -> (StatusCode, &'static str, String) {
    match e {
        MaintenanceError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", e.to_string()),
        MaintenanceError::AlreadyExists(_) => (StatusCode::CONFLICT, "CONFLICT", e.to_string()),
        MaintenanceError::Validation(msg) => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
        }
        MaintenanceError::NoChanges => (StatusCode::BAD_REQUEST, "NO_CHANGES", e.to_string()),
        MaintenanceError::InvalidCredentials => {
            (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS", e.to_string())
        }
        MaintenanceError::InvalidStateTransition(msg) => {
            (StatusCode::CONFLICT, "INVALID_STATE", msg.clone())
        }
        MaintenanceError::Credential(_) | MaintenanceError::Storage(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            INTERNAL_MESSAGE.to_string(),
        ),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            ApiError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            ),
            ApiError::Maintenance(e) => maintenance_status(e),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;
