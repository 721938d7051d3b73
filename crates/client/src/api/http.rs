//! Reqwest-backed implementation of the service API traits.
//!
//! All traffic goes through the gateway; users routes live under
//! `/api/users` and book lookup routes under `/api/books`.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use url::Url;

use quills_core::{Book, FavoriteEntry, RawBook};

use super::{ApiError, AuthSession, BooksApi, SessionUser, UsersApi};

/// HTTP client for both services, routed through the gateway.
#[derive(Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    base_url: Url,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: SessionUser,
}

#[derive(Deserialize)]
struct FavoritesEnvelope {
    favorites: Vec<FavoriteEntry>,
}

#[derive(Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    results: Vec<RawBook>,
}

impl GatewayClient {
    /// Create a client for the given gateway base URL.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url.join(path).map_err(|e| ApiError::Api {
            status: 0,
            message: format!("invalid request URL: {e}"),
        })
    }

    fn get(&self, path: &str) -> Result<RequestBuilder, ApiError> {
        Ok(self.client.get(self.url(path)?))
    }

    fn post(&self, path: &str) -> Result<RequestBuilder, ApiError> {
        Ok(self.client.post(self.url(path)?))
    }
}

/// Decode a response, mapping non-2xx statuses onto [`ApiError`].
///
/// Error bodies are expected to carry `{"error": message}`; anything else
/// degrades to a generic `HTTP <status>` message.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => format!("HTTP {}", status.as_u16()),
    };

    if status == StatusCode::UNAUTHORIZED {
        Err(ApiError::Unauthorized { message })
    } else {
        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Like [`decode`] but discards the success body.
async fn expect_ok(response: Response) -> Result<(), ApiError> {
    decode::<serde_json::Value>(response).await.map(|_| ())
}

impl UsersApi for GatewayClient {
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, ApiError> {
        let response = self
            .post("/api/users/auth/register")?
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await?;
        decode(response).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let response = self
            .post("/api/users/auth/login")?
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        decode(response).await
    }

    async fn me(&self, token: &str) -> Result<SessionUser, ApiError> {
        let response = self.get("/api/users/me")?.bearer_auth(token).send().await?;
        decode::<UserEnvelope>(response).await.map(|e| e.user)
    }

    async fn list_favorites(&self, token: &str) -> Result<Vec<FavoriteEntry>, ApiError> {
        let response = self
            .get("/api/users/favorites")?
            .bearer_auth(token)
            .send()
            .await?;
        decode::<FavoritesEnvelope>(response)
            .await
            .map(|e| e.favorites)
    }

    async fn add_favorite(&self, token: &str, book: &Book) -> Result<(), ApiError> {
        let response = self
            .post("/api/users/favorites")?
            .bearer_auth(token)
            .json(&json!({ "bookId": book.id, "book": book }))
            .send()
            .await?;
        expect_ok(response).await
    }

    async fn remove_favorite(&self, token: &str, book_id: &str) -> Result<(), ApiError> {
        let path = format!("/api/users/favorites/{}", urlencoding::encode(book_id));
        let response = self
            .client
            .delete(self.url(&path)?)
            .bearer_auth(token)
            .send()
            .await?;
        expect_ok(response).await
    }
}

impl BooksApi for GatewayClient {
    async fn search(&self, query: &str) -> Result<Vec<RawBook>, ApiError> {
        let response = self
            .get("/api/books/search")?
            .query(&[("q", query)])
            .send()
            .await?;
        decode::<SearchEnvelope>(response).await.map(|e| e.results)
    }

    async fn detail(&self, id: &str) -> Result<RawBook, ApiError> {
        let response = self
            .get("/api/books/detail")?
            .query(&[("id", id)])
            .send()
            .await?;

        // The detail endpoint returns the book object directly and may not
        // echo the id, so stamp the requested one on
        let mut raw: RawBook = decode(response).await?;
        raw.id = id.to_string();
        Ok(raw)
    }
}
