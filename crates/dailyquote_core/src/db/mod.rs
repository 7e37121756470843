//! SQLite storage bootstrap, schema and seed data.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the quote store.
//! - Create the `quotes`, `favorites` and `diary` relations when absent.
//! - Load the sample quote set according to a [`SeedPolicy`].
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - No application data is read or written before the schema is applied.
//! - Bootstrap writes take the write lock up front so the busy timeout
//!   applies when several processes open the same file.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;
pub mod seed;

pub use open::{open_db, open_db_in_memory};
pub use seed::{seed_quotes, SeedPolicy, SEED_QUOTES};

pub type DbResult<T> = Result<T, DbError>;

/// Store lifecycle step during which a SQLite call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStep {
    Open,
    Configure,
    Schema,
    Seed,
    Statement,
}

impl StoreStep {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Configure => "configure",
            Self::Schema => "schema",
            Self::Seed => "seed",
            Self::Statement => "statement",
        }
    }
}

#[derive(Debug)]
pub enum DbError {
    /// SQLite rejected a call made during `step`.
    Sqlite {
        step: StoreStep,
        source: rusqlite::Error,
    },
    /// The file was written by a newer build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl DbError {
    /// Adapter for `map_err` that tags a SQLite error with its step.
    pub fn at(step: StoreStep) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| Self::Sqlite { step, source }
    }

    /// Step that failed; `Schema` for a version mismatch.
    pub fn step(&self) -> StoreStep {
        match self {
            Self::Sqlite { step, .. } => *step,
            Self::UnsupportedSchemaVersion { .. } => StoreStep::Schema,
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite { step, source } => {
                write!(f, "sqlite {} failed: {source}", step.as_str())
            }
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite { source, .. } => Some(source),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}
