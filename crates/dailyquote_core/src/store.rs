//! Process-wide store handle shared by every handler.
//!
//! # Responsibility
//! - Own the single SQLite connection for the process.
//! - Expose the three repository contracts as one [`Store`].
//!
//! # Invariants
//! - Each operation holds the connection guard for exactly one unit of work
//!   and releases it on every exit path.
//! - A poisoned guard fails the request with `RepoError::Unavailable`.

use crate::config::CoreConfig;
use crate::db::{open_db, open_db_in_memory, schema, seed_quotes, SeedPolicy};
use crate::model::diary::{DiaryEntry, DiaryEntryId};
use crate::model::favorite::{Favorite, FavoriteQuote};
use crate::model::quote::{Quote, QuoteId};
use crate::repo::diary_repo::{DiaryRepository, SqliteDiaryRepository};
use crate::repo::favorite_repo::{FavoriteRepository, SqliteFavoriteRepository};
use crate::repo::quote_repo::{QuoteRepository, SqliteQuoteRepository};
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDate;
use log::info;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Every entity operation group behind one explicitly passed handle.
pub trait Store: QuoteRepository + FavoriteRepository + DiaryRepository {}

impl<T: QuoteRepository + FavoriteRepository + DiaryRepository + ?Sized> Store for T {}

/// SQLite-backed [`Store`].
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) the database file and seeds it.
    pub fn open(path: impl AsRef<Path>, seed_policy: SeedPolicy) -> RepoResult<Self> {
        let store = Self::from_connection(open_db(path)?);
        store.seed(seed_policy)?;
        Ok(store)
    }

    /// Opens a private in-memory database and seeds it.
    pub fn open_in_memory(seed_policy: SeedPolicy) -> RepoResult<Self> {
        let store = Self::from_connection(open_db_in_memory()?);
        store.seed(seed_policy)?;
        Ok(store)
    }

    /// Opens the database named by `config`.
    pub fn from_config(config: &CoreConfig) -> RepoResult<Self> {
        Self::open(&config.db_path, config.seed_policy)
    }

    /// Wraps an open connection. Call [`SqliteStore::initialize`] when the
    /// connection did not come from `open_db`.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Re-applies the schema and loads seed quotes per `seed_policy`.
    ///
    /// Safe to call on a live store, including one built with
    /// [`SqliteStore::from_connection`] over a bare connection. The `open*`
    /// constructors skip the schema step because `open_db` already ran it.
    ///
    /// Returns the number of seed rows inserted by this call.
    pub fn initialize(&self, seed_policy: SeedPolicy) -> RepoResult<usize> {
        schema::apply_schema(&mut *self.acquire()?)?;
        self.seed(seed_policy)
    }

    fn seed(&self, seed_policy: SeedPolicy) -> RepoResult<usize> {
        let mut conn = self.acquire()?;
        let inserted = seed_quotes(&mut conn, seed_policy)?;
        let total = SqliteQuoteRepository::new(&conn).count_quotes(None)?;
        info!(
            "event=store_init module=store status=ok seed_policy={seed_policy} \
             inserted={inserted} total_quotes={total}"
        );
        Ok(inserted)
    }

    fn acquire(&self) -> RepoResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| RepoError::Unavailable("connection guard poisoned".to_string()))
    }
}

impl QuoteRepository for SqliteStore {
    fn random_quote(&self, category: Option<&str>) -> RepoResult<Option<Quote>> {
        let conn = self.acquire()?;
        SqliteQuoteRepository::new(&conn).random_quote(category)
    }

    fn list_quotes(&self) -> RepoResult<Vec<Quote>> {
        let conn = self.acquire()?;
        SqliteQuoteRepository::new(&conn).list_quotes()
    }

    fn count_quotes(&self, category: Option<&str>) -> RepoResult<u64> {
        let conn = self.acquire()?;
        SqliteQuoteRepository::new(&conn).count_quotes(category)
    }
}

impl FavoriteRepository for SqliteStore {
    fn add_favorite(&self, quote_id: QuoteId, category: &str) -> RepoResult<Favorite> {
        let conn = self.acquire()?;
        SqliteFavoriteRepository::new(&conn).add_favorite(quote_id, category)
    }

    fn favorites_by_category(&self, category: &str) -> RepoResult<Vec<FavoriteQuote>> {
        let conn = self.acquire()?;
        SqliteFavoriteRepository::new(&conn).favorites_by_category(category)
    }
}

impl DiaryRepository for SqliteStore {
    fn add_diary_entry(&self, entry_date: NaiveDate, content: &str) -> RepoResult<DiaryEntryId> {
        let conn = self.acquire()?;
        SqliteDiaryRepository::new(&conn).add_diary_entry(entry_date, content)
    }

    fn diary_entries_for(&self, entry_date: NaiveDate) -> RepoResult<Vec<DiaryEntry>> {
        let conn = self.acquire()?;
        SqliteDiaryRepository::new(&conn).diary_entries_for(entry_date)
    }

    fn update_diary_content(&self, entry_date: NaiveDate, content: &str) -> RepoResult<usize> {
        let conn = self.acquire()?;
        SqliteDiaryRepository::new(&conn).update_diary_content(entry_date, content)
    }

    fn delete_diary_entries(&self, entry_date: NaiveDate) -> RepoResult<usize> {
        let conn = self.acquire()?;
        SqliteDiaryRepository::new(&conn).delete_diary_entries(entry_date)
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteStore;
    use crate::db::SeedPolicy;
    use crate::repo::RepoError;
    use crate::service::quote_service::QuoteService;
    use crate::service::ServiceError;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    #[test]
    fn poisoned_guard_surfaces_as_store_unavailable() {
        let store = SqliteStore::open_in_memory(SeedPolicy::IfEmpty).unwrap();
        let _ = catch_unwind(AssertUnwindSafe(|| {
            let _guard = store.conn.lock().unwrap();
            panic!("writer died holding the connection");
        }));

        let err = QuoteService::new(&store).daily_quote(None).unwrap_err();
        assert_eq!(err.kind(), "store_unavailable");
        assert!(matches!(
            err,
            ServiceError::StoreUnavailable(RepoError::Unavailable(_))
        ));
    }

    #[test]
    fn initialize_applies_schema_to_bare_connection() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let store = SqliteStore::from_connection(conn);

        assert_eq!(store.initialize(SeedPolicy::IfEmpty).unwrap(), 35);
    }
}
