//! Repository contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define one data-access contract per entity group.
//! - Keep SQL inside the persistence boundary.
//!
//! # Invariants
//! - "Nothing matched" is an empty result or a zero count, never an error.
//! - Read paths reject malformed persisted rows instead of masking them.

use crate::db::{DbError, StoreStep};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod diary_repo;
pub mod favorite_repo;
pub mod quote_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence-layer failure.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// A stored row could not be decoded into its domain record.
    InvalidData(String),
    /// The storage handle could not be acquired.
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::Unavailable(message) => write!(f, "store unavailable: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) | Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite {
            step: StoreStep::Statement,
            source: value,
        })
    }
}
