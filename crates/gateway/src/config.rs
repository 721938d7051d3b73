//! Gateway configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `QUILLS_GATEWAY_HOST` - Bind address (default: 127.0.0.1)
//! - `QUILLS_GATEWAY_PORT` - Listen port (default: 8080)
//! - `QUILLS_USERS_SERVICE_URL` - Users service base URL
//!   (default: <http://127.0.0.1:3001>)
//! - `QUILLS_BOOKS_SERVICE_URL` - Books service base URL
//!   (default: <http://127.0.0.1:5000>)

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Base URL of the users service
    pub users_service_url: Url,
    /// Base URL of the books service
    pub books_service_url: Url,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("QUILLS_GATEWAY_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("QUILLS_GATEWAY_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("QUILLS_GATEWAY_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("QUILLS_GATEWAY_PORT".to_string(), e.to_string())
            })?;
        let users_service_url =
            get_url_or_default("QUILLS_USERS_SERVICE_URL", "http://127.0.0.1:3001")?;
        let books_service_url =
            get_url_or_default("QUILLS_BOOKS_SERVICE_URL", "http://127.0.0.1:5000")?;

        Ok(Self {
            host,
            port,
            users_service_url,
            books_service_url,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an environment variable as a URL, with a default value.
fn get_url_or_default(key: &str, default: &str) -> Result<Url, ConfigError> {
    let value = get_env_or_default(key, default);
    value
        .parse::<Url>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
