// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chirpy_common::{ErrorDetail, ErrorResponse};
use thiserror::Error;
use tracing::error;

use crate::auth::AuthError;

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "AUTH_001",
            AppError::Forbidden => "AUTH_002",
            AppError::NotFound(_) => "NF_001",
            AppError::InvalidInput(_) => "VAL_001",
            AppError::Conflict(_) => "CONFLICT_001",
            AppError::Internal(_) => "INT_001",
        }
    }

    /// Get a sanitized message suitable for production use
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::Unauthorized => "Unauthorized".to_string(),
            AppError::Forbidden => "Forbidden".to_string(),
            AppError::NotFound(_) => "Resource not found".to_string(),
            AppError::InvalidInput(_) => "Invalid input provided".to_string(),
            AppError::Conflict(_) => "Resource already exists".to_string(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        // Use detailed messages in development, sanitized in production
        let message = if cfg!(debug_assertions) {
            self.to_string()
        } else {
            self.sanitized_message()
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
            },
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Header(_) | AuthError::Token(_) | AuthError::CredentialMismatch => {
                AppError::Unauthorized
            },
            AuthError::Forbidden => AppError::Forbidden,
            AuthError::NotFound => AppError::NotFound("resource".to_string()),
            AuthError::Hashing(detail) => {
                error!(%detail, "password hashing failed");
                AppError::Internal("failed to process password".to_string())
            },
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}
