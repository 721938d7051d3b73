//! Unified error handling for the users service.
//!
//! Provides a unified `AppError` type mapping the error taxonomy onto HTTP
//! status codes with JSON `{"error": message}` bodies. All route handlers
//! return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;

/// Application-level error type for the users service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Database(_) | Self::Internal(_)) {
            tracing::error!(error = %self, "Request error");
        }

        let status = match &self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials | AuthError::InvalidToken => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::EmailTaken => StatusCode::CONFLICT,
                AuthError::InvalidName
                | AuthError::InvalidEmail(_)
                | AuthError::InvalidPassword => StatusCode::BAD_REQUEST,
                AuthError::PasswordHash | AuthError::TokenEncoding
                | AuthError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) | Self::Internal(_) => "Server error".to_string(),
            Self::Auth(err) => match err {
                // Unknown email and wrong password are indistinguishable
                // on purpose, to avoid user enumeration
                AuthError::InvalidCredentials => "Invalid credentials".to_string(),
                AuthError::InvalidToken => "Invalid token".to_string(),
                AuthError::EmailTaken => "Email already exists".to_string(),
                AuthError::InvalidName => "Name too short".to_string(),
                AuthError::InvalidEmail(_) => "Invalid email".to_string(),
                AuthError::InvalidPassword => "Password must be 6-128 chars".to_string(),
                AuthError::PasswordHash | AuthError::TokenEncoding | AuthError::Repository(_) => {
                    "Server error".to_string()
                }
            },
            Self::BadRequest(msg) => msg.clone(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
