//! Authentication error types.

use thiserror::Error;

use quills_core::EmailError;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration name is too short after trimming.
    #[error("name too short")]
    InvalidName,

    /// Email failed validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password is outside the allowed length range.
    #[error("password must be 6-128 characters")]
    InvalidPassword,

    /// Email is already registered.
    #[error("email already registered")]
    EmailTaken,

    /// Unknown email or wrong password. Deliberately one variant for both,
    /// so callers cannot distinguish them.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Bearer token missing, malformed, or expired.
    #[error("invalid token")]
    InvalidToken,

    /// Password hashing failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// Token signing failed.
    #[error("token encoding failed")]
    TokenEncoding,

    /// Database operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
