//! Application controller.
//!
//! Owns the [`AppState`] and drives every operation against the backend,
//! including the one cross-cutting recovery rule: a 401 on any call ends
//! the session, clearing the token, the current user, and the favorites
//! map before the error reaches the caller.

use quills_core::Book;

use crate::api::{ApiError, BooksApi, UsersApi};
use crate::router::Route;
use crate::state::AppState;
use crate::token::TokenStore;

/// What a favorite toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The book was added to favorites.
    Added,
    /// The book was removed from favorites.
    Removed,
    /// No session is active; the caller should route to the login view.
    LoginRequired,
}

/// The application controller.
///
/// Generic over its API and token-store backends so the reconciliation
/// logic can run against fakes in tests and reqwest in production.
pub struct App<U, B, T> {
    users: U,
    books: B,
    tokens: T,
    state: AppState,
}

impl<U: UsersApi, B: BooksApi, T: TokenStore> App<U, B, T> {
    /// Create a controller with empty state.
    pub fn new(users: U, books: B, tokens: T) -> Self {
        Self {
            users,
            books,
            tokens,
            state: AppState::new(),
        }
    }

    /// Read-only view of the current state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Whether a token is held. Does not verify it with the server.
    pub fn is_logged_in(&self) -> bool {
        self.tokens.get().is_some()
    }

    /// End the session locally: drop the token and session-scoped state.
    fn end_session(&mut self) {
        self.tokens.clear();
        self.state.reset_session();
    }

    /// Route an API result through the session-ended transition.
    ///
    /// A 401 from any call means the token is no longer valid; the session
    /// ends here, once, instead of in each caller.
    fn absorb<V>(&mut self, result: Result<V, ApiError>) -> Result<V, ApiError> {
        if let Err(err) = &result
            && err.is_unauthorized()
        {
            tracing::debug!("session rejected by server, resetting local state");
            self.end_session();
        }
        result
    }

    /// Reconcile local session state with the server.
    ///
    /// Called on load and after every login/logout. Failures are swallowed:
    /// a 401 has already reset the session via [`Self::absorb`], and any
    /// other error leaves state unchanged (best-effort sync).
    pub async fn sync_session_and_favorites(&mut self) {
        let Some(token) = self.tokens.get() else {
            self.state.reset_session();
            return;
        };

        let me = self.users.me(&token).await;
        let Ok(user) = self.absorb(me) else {
            return;
        };
        self.state.current_user = Some(user);

        let listed = self.users.list_favorites(&token).await;
        let Ok(favorites) = self.absorb(listed) else {
            return;
        };

        self.state.favorites_map.clear();
        for entry in favorites {
            if !entry.book.id.is_empty() {
                self.state
                    .cache_by_id
                    .insert(entry.book.id.clone(), entry.book.clone());
            }
            self.state.favorites_map.insert(entry.book_id, entry.book);
        }
    }

    /// Log in and rebuild session state.
    ///
    /// On success returns the route the shell should navigate to, which is
    /// the favorites view.
    ///
    /// # Errors
    ///
    /// Returns the server's error for bad credentials or malformed input.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Route, ApiError> {
        let session = self.users.login(email, password).await?;
        self.tokens.set(session.token);
        self.state.current_user = Some(session.user);
        self.sync_session_and_favorites().await;
        Ok(Route::Favorites)
    }

    /// Register a new account and start a session with it.
    ///
    /// Like [`Self::login`], returns the post-authentication route on
    /// success.
    ///
    /// # Errors
    ///
    /// Returns the server's validation or conflict error.
    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Route, ApiError> {
        let session = self.users.register(name, email, password).await?;
        self.tokens.set(session.token);
        self.state.current_user = Some(session.user);
        self.sync_session_and_favorites().await;
        Ok(Route::Favorites)
    }

    /// Log out. Purely local; the server holds no session state.
    pub fn logout(&mut self) {
        self.end_session();
    }

    /// Run a search and replace the result list.
    ///
    /// An empty trimmed query short-circuits to an empty result set without
    /// a network call.
    ///
    /// # Errors
    ///
    /// Returns the lookup service's error; local state keeps the previous
    /// results in that case.
    pub async fn search(&mut self, query: &str) -> Result<&[Book], ApiError> {
        let trimmed = query.trim().to_string();

        if trimmed.is_empty() {
            self.state.last_query.clear();
            self.state.results.clear();
            return Ok(&self.state.results);
        }

        let found = self.books.search(&trimmed).await;
        let raw = self.absorb(found)?;

        let results: Vec<Book> = raw.into_iter().map(Book::from_summary).collect();
        self.state.cache_books(&results);
        self.state.last_query = trimmed;
        self.state.results = results;

        Ok(&self.state.results)
    }

    /// Resolve the record to show for a book view, fetching detail if the
    /// cached record's description is missing or still the loading
    /// placeholder.
    ///
    /// Detail fields merge into the known record with summary-derived
    /// author/year winning over the detail's. If the book is favorited and
    /// a session is active, the merged record is pushed back to refresh the
    /// stored snapshot.
    ///
    /// Lookup failures fall back to the best known record; a view always
    /// has something to render.
    pub async fn view_book(&mut self, id: &str) -> Book {
        let current = self
            .state
            .known_book(id)
            .cloned()
            .unwrap_or_else(|| Book::loading_placeholder(id));

        if !current.needs_detail() {
            return current;
        }

        let fetched = self.books.detail(id).await;
        let Ok(raw) = self.absorb(fetched) else {
            return current;
        };

        let merged = current.merge_detail(&Book::from_detail(raw));
        self.state
            .cache_by_id
            .insert(merged.id.clone(), merged.clone());

        if self.state.is_favorite(id)
            && let Some(token) = self.tokens.get()
        {
            let pushed = self.users.add_favorite(&token, &merged).await;
            if self.absorb(pushed).is_ok() {
                self.state
                    .favorites_map
                    .insert(id.to_string(), merged.clone());
            }
        }

        merged
    }

    /// Toggle a book's favorite status, writing through to the server.
    ///
    /// Without a session no write happens and the outcome is
    /// [`ToggleOutcome::LoginRequired`]. A failed write leaves local state
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the write fails.
    pub async fn toggle_favorite(&mut self, id: &str) -> Result<ToggleOutcome, ApiError> {
        let Some(token) = self.tokens.get() else {
            return Ok(ToggleOutcome::LoginRequired);
        };

        if self.state.is_favorite(id) {
            let removed = self.users.remove_favorite(&token, id).await;
            self.absorb(removed)?;
            self.state.favorites_map.remove(id);
            Ok(ToggleOutcome::Removed)
        } else {
            let book = self
                .state
                .cache_by_id
                .get(id)
                .cloned()
                .unwrap_or_else(|| Book::loading_placeholder(id));

            let added = self.users.add_favorite(&token, &book).await;
            self.absorb(added)?;
            self.state.favorites_map.insert(id.to_string(), book);
            Ok(ToggleOutcome::Added)
        }
    }
}
