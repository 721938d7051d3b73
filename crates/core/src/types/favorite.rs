//! Favorites wire shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Book;

/// One favorite as returned by `GET /favorites`.
///
/// The `book` field is a point-in-time snapshot taken when the book was
/// favorited (or last re-favorited), not a live reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    pub book_id: String,
    pub book: Book,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::RawBook;

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let entry = FavoriteEntry {
            book_id: "/works/OL1W".to_string(),
            book: Book::from_summary(RawBook {
                id: "/works/OL1W".to_string(),
                ..RawBook::default()
            }),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("bookId").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("book").is_some());
    }
}
