//! Favorite repository contract and SQLite implementation.
//!
//! # Invariants
//! - Inserts never check that the referenced quote exists.
//! - Listing is an inner join: favorites pointing at missing quotes are
//!   silently excluded.

use crate::model::favorite::{Favorite, FavoriteQuote};
use crate::model::quote::QuoteId;
use crate::repo::RepoResult;
use rusqlite::{params, Connection};

/// Bookmark persistence.
pub trait FavoriteRepository {
    /// Inserts one favorite row unconditionally.
    fn add_favorite(&self, quote_id: QuoteId, category: &str) -> RepoResult<Favorite>;
    /// Lists quotes bookmarked under `category`, in bookmark order.
    fn favorites_by_category(&self, category: &str) -> RepoResult<Vec<FavoriteQuote>>;
}

impl<T: FavoriteRepository + ?Sized> FavoriteRepository for &T {
    fn add_favorite(&self, quote_id: QuoteId, category: &str) -> RepoResult<Favorite> {
        (**self).add_favorite(quote_id, category)
    }

    fn favorites_by_category(&self, category: &str) -> RepoResult<Vec<FavoriteQuote>> {
        (**self).favorites_by_category(category)
    }
}

/// SQLite-backed favorite repository over a borrowed connection.
pub struct SqliteFavoriteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFavoriteRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl FavoriteRepository for SqliteFavoriteRepository<'_> {
    fn add_favorite(&self, quote_id: QuoteId, category: &str) -> RepoResult<Favorite> {
        self.conn.execute(
            "INSERT INTO favorites (quote_id, category) VALUES (?1, ?2);",
            params![quote_id, category],
        )?;

        Ok(Favorite {
            id: self.conn.last_insert_rowid(),
            quote_id,
            category: category.to_string(),
        })
    }

    fn favorites_by_category(&self, category: &str) -> RepoResult<Vec<FavoriteQuote>> {
        let mut stmt = self.conn.prepare(
            "SELECT q.id, q.text, q.author
             FROM favorites f
             INNER JOIN quotes q ON q.id = f.quote_id
             WHERE f.category = ?1
             ORDER BY f.id ASC;",
        )?;
        let favorites = stmt
            .query_map([category], |row| {
                Ok(FavoriteQuote {
                    id: row.get(0)?,
                    text: row.get(1)?,
                    author: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(favorites)
    }
}
