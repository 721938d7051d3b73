//! Application state shared across handlers.

use std::sync::Arc;

use secrecy::SecretString;
use sqlx::SqlitePool;

use crate::services::auth::TokenSigner;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// database pool and the token signer.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: SqlitePool,
    signer: TokenSigner,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(pool: SqlitePool, jwt_secret: &SecretString) -> Self {
        let signer = TokenSigner::new(jwt_secret);

        Self {
            inner: Arc::new(AppStateInner { pool, signer }),
        }
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get a reference to the token signer.
    #[must_use]
    pub fn signer(&self) -> &TokenSigner {
        &self.inner.signer
    }
}
