//! Favorites repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use quills_core::{Book, FavoriteEntry, UserId};

use super::RepositoryError;

/// Repository for favorite database operations.
pub struct FavoriteRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FavoriteRepository<'a> {
    /// Create a new favorite repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert or refresh a favorite.
    ///
    /// The (user, book) pair is unique; re-adding replaces the stored
    /// snapshot but keeps the original creation timestamp, so list
    /// ordering stays stable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the snapshot cannot be
    /// serialized, or `RepositoryError::Database` if the query fails.
    pub async fn upsert(
        &self,
        user_id: UserId,
        book_id: &str,
        snapshot: &Book,
    ) -> Result<(), RepositoryError> {
        let snapshot_json = serde_json::to_string(snapshot).map_err(|e| {
            RepositoryError::DataCorruption(format!("failed to serialize snapshot: {e}"))
        })?;

        sqlx::query(
            r"
            INSERT INTO favorites (user_id, book_id, book_snapshot)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (user_id, book_id)
            DO UPDATE SET book_snapshot = excluded.book_snapshot
            ",
        )
        .bind(user_id)
        .bind(book_id)
        .bind(snapshot_json)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// List all favorites for a user, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored snapshot is invalid.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<FavoriteEntry>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct Row {
            book_id: String,
            book_snapshot: String,
            created_at: DateTime<Utc>,
        }

        let rows: Vec<Row> = sqlx::query_as(
            r"
            SELECT book_id, book_snapshot, created_at
            FROM favorites
            WHERE user_id = ?1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        let mut favorites = Vec::with_capacity(rows.len());
        for row in rows {
            let book: Book = serde_json::from_str(&row.book_snapshot).map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid book snapshot: {e}"))
            })?;

            favorites.push(FavoriteEntry {
                book_id: row.book_id,
                book,
                created_at: row.created_at,
            });
        }

        Ok(favorites)
    }

    /// Delete a favorite if present.
    ///
    /// # Returns
    ///
    /// Returns `true` if a row was deleted, `false` if the pair was absent.
    /// Deleting an absent pair is not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, user_id: UserId, book_id: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM favorites
            WHERE user_id = ?1 AND book_id = ?2
            ",
        )
        .bind(user_id)
        .bind(book_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
