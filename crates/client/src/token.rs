//! Session token storage.

/// Where the single session token lives between calls.
///
/// The server never persists tokens, so this store is the only record of an
/// active session. A browser shell would back this with local storage; the
/// in-memory implementation covers tests and native use.
pub trait TokenStore {
    /// The current token, if a session is active.
    fn get(&self) -> Option<String>;

    /// Replace the stored token.
    fn set(&mut self, token: String);

    /// Drop the stored token, ending the session.
    fn clear(&mut self);
}

/// Volatile in-memory token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Option<String>,
}

impl MemoryTokenStore {
    /// Create an empty store (no active session).
    #[must_use]
    pub const fn new() -> Self {
        Self { token: None }
    }

    /// Create a store holding an existing token.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.clone()
    }

    fn set(&mut self, token: String) {
        self.token = Some(token);
    }

    fn clear(&mut self) {
        self.token = None;
    }
}
