//! Quote repository contract and SQLite implementation.
//!
//! # Invariants
//! - Random selection is uniform over the (optionally filtered) row set.
//! - Listing is ordered by ascending id.
//! - Category filters are exact, case-sensitive matches.

use crate::model::quote::Quote;
use crate::repo::RepoResult;
use log::debug;
use rand::Rng;
use rusqlite::{params, Connection, OptionalExtension, Row};

const QUOTE_SELECT_SQL: &str = "SELECT id, text, author, category FROM quotes";
const CATEGORY_FILTER_SQL: &str = "WHERE (?1 IS NULL OR category = ?1)";

/// Read-only access to seeded quotes.
pub trait QuoteRepository {
    /// Picks one quote uniformly at random, optionally within `category`.
    fn random_quote(&self, category: Option<&str>) -> RepoResult<Option<Quote>>;
    /// Returns every quote ordered by ascending id.
    fn list_quotes(&self) -> RepoResult<Vec<Quote>>;
    /// Counts quotes, optionally within `category`.
    fn count_quotes(&self, category: Option<&str>) -> RepoResult<u64>;
}

impl<T: QuoteRepository + ?Sized> QuoteRepository for &T {
    fn random_quote(&self, category: Option<&str>) -> RepoResult<Option<Quote>> {
        (**self).random_quote(category)
    }

    fn list_quotes(&self) -> RepoResult<Vec<Quote>> {
        (**self).list_quotes()
    }

    fn count_quotes(&self, category: Option<&str>) -> RepoResult<u64> {
        (**self).count_quotes(category)
    }
}

/// SQLite-backed quote repository over a borrowed connection.
pub struct SqliteQuoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteQuoteRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl QuoteRepository for SqliteQuoteRepository<'_> {
    fn random_quote(&self, category: Option<&str>) -> RepoResult<Option<Quote>> {
        // Count and pick must observe the same snapshot.
        let tx = self.conn.unchecked_transaction()?;
        let count: i64 = tx.query_row(
            &format!("SELECT COUNT(*) FROM quotes {CATEGORY_FILTER_SQL};"),
            params![category],
            |row| row.get(0),
        )?;
        if count == 0 {
            debug!("event=quote_random module=repo status=empty filtered={}", category.is_some());
            return Ok(None);
        }

        let offset = pick_offset(&mut rand::thread_rng(), count);
        let quote = tx
            .query_row(
                &format!(
                    "{QUOTE_SELECT_SQL} {CATEGORY_FILTER_SQL} ORDER BY id ASC LIMIT 1 OFFSET ?2;"
                ),
                params![category, offset],
                parse_quote_row,
            )
            .optional()?;
        tx.commit()?;

        debug!(
            "event=quote_random module=repo status=ok filtered={} candidates={count}",
            category.is_some()
        );
        Ok(quote)
    }

    fn list_quotes(&self) -> RepoResult<Vec<Quote>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{QUOTE_SELECT_SQL} ORDER BY id ASC;"))?;
        let quotes = stmt
            .query_map([], parse_quote_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(quotes)
    }

    fn count_quotes(&self, category: Option<&str>) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM quotes {CATEGORY_FILTER_SQL};"),
            params![category],
            |row| row.get(0),
        )?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}

/// Draws a row offset uniformly from `0..count`. `count` must be positive.
fn pick_offset<R: Rng + ?Sized>(rng: &mut R, count: i64) -> i64 {
    rng.gen_range(0..count)
}

fn parse_quote_row(row: &Row<'_>) -> rusqlite::Result<Quote> {
    Ok(Quote {
        id: row.get("id")?,
        text: row.get("text")?,
        author: row.get("author")?,
        category: row.get("category")?,
    })
}

#[cfg(test)]
mod tests {
    use super::pick_offset;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn pick_offset_covers_full_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 5];
        for _ in 0..500 {
            let offset = pick_offset(&mut rng, 5);
            assert!((0..5).contains(&offset));
            seen[offset as usize] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }

    #[test]
    fn single_candidate_always_picks_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            assert_eq!(pick_offset(&mut rng, 1), 0);
        }
    }
}
