//! Client-side application state.
//!
//! Entirely ephemeral: rebuilt from server calls on load and after every
//! login or logout. Nothing here is persisted.

use std::collections::HashMap;

use quills_core::Book;

use crate::api::SessionUser;

/// All client-side state.
#[derive(Debug, Default)]
pub struct AppState {
    /// The last search the user ran, trimmed.
    pub last_query: String,
    /// Results of the last search, in server order.
    pub results: Vec<Book>,
    /// Most complete known record per book id.
    pub cache_by_id: HashMap<String, Book>,
    /// The logged-in user, when a session is active and verified.
    pub current_user: Option<SessionUser>,
    /// Server-authoritative favorites, book id to snapshot.
    pub favorites_map: HashMap<String, Book>,
}

impl AppState {
    /// Create empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the given book is currently favorited.
    #[must_use]
    pub fn is_favorite(&self, book_id: &str) -> bool {
        self.favorites_map.contains_key(book_id)
    }

    /// Cache each book by id, replacing any earlier record.
    pub fn cache_books<'a>(&mut self, books: impl IntoIterator<Item = &'a Book>) {
        for book in books {
            self.cache_by_id.insert(book.id.clone(), book.clone());
        }
    }

    /// The best known record for a book: favorite snapshot first, then cache.
    #[must_use]
    pub fn known_book(&self, book_id: &str) -> Option<&Book> {
        self.favorites_map
            .get(book_id)
            .or_else(|| self.cache_by_id.get(book_id))
    }

    /// Clear session-scoped state (user and favorites).
    ///
    /// The book cache and search results survive; they carry no
    /// user-specific data.
    pub fn reset_session(&mut self) {
        self.current_user = None;
        self.favorites_map.clear();
    }
}
