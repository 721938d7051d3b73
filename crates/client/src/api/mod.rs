//! Service API surface.
//!
//! The application controller talks to the backend through the [`UsersApi`]
//! and [`BooksApi`] traits so state logic can be exercised against fakes.
//! [`http::GatewayClient`] is the real implementation, speaking to both
//! services through the gateway.

pub mod http;

use serde::Deserialize;
use thiserror::Error;

use chrono::{DateTime, Utc};
use quills_core::{Book, Email, FavoriteEntry, RawBook, UserId};

pub use http::GatewayClient;

/// Errors from service calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server rejected the session (401).
    #[error("{message}")]
    Unauthorized { message: String },

    /// Any other non-2xx response.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request never completed (connection refused, timeout, bad body).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Whether this error means the session is no longer valid.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// The user-facing message for this error.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// The authenticated user as returned by the users service.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub created_at: DateTime<Utc>,
}

/// A user plus the session token minted for them.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub user: SessionUser,
    pub token: String,
}

/// Users service operations (auth + favorites).
#[allow(async_fn_in_trait)]
pub trait UsersApi {
    /// Create an account and mint a session token.
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, ApiError>;

    /// Exchange credentials for a session token.
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError>;

    /// Resolve a token back to its user.
    async fn me(&self, token: &str) -> Result<SessionUser, ApiError>;

    /// List the caller's favorites, newest first.
    async fn list_favorites(&self, token: &str) -> Result<Vec<FavoriteEntry>, ApiError>;

    /// Add or refresh a favorite snapshot.
    async fn add_favorite(&self, token: &str, book: &Book) -> Result<(), ApiError>;

    /// Remove a favorite. Succeeds even if the favorite does not exist.
    async fn remove_favorite(&self, token: &str, book_id: &str) -> Result<(), ApiError>;
}

/// Book lookup service operations.
///
/// Results come back in raw wire shape; normalization to [`Book`] happens
/// in the controller.
#[allow(async_fn_in_trait)]
pub trait BooksApi {
    /// Full-text search, returning summary records.
    async fn search(&self, query: &str) -> Result<Vec<RawBook>, ApiError>;

    /// Look up one book's detail record by id.
    async fn detail(&self, id: &str) -> Result<RawBook, ApiError>;
}
