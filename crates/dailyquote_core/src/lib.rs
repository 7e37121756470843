//! Core of the daily quote service: seeded quotes, favorites and a
//! date-keyed diary over a local SQLite store.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{ConfigError, CoreConfig};
pub use db::{DbError, SeedPolicy, StoreStep};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::diary::{DiaryEntry, DiaryEntryId};
pub use model::favorite::{Favorite, FavoriteId, FavoriteQuote};
pub use model::quote::{Quote, QuoteId};
pub use model::validation::InputValidationError;
pub use repo::diary_repo::{DiaryRepository, SqliteDiaryRepository};
pub use repo::favorite_repo::{FavoriteRepository, SqliteFavoriteRepository};
pub use repo::quote_repo::{QuoteRepository, SqliteQuoteRepository};
pub use repo::{RepoError, RepoResult};
pub use service::diary_service::{DiaryEntriesResponse, DiaryService};
pub use service::favorite_service::{FavoriteService, FavoritesResponse};
pub use service::quote_service::{
    NotificationResponse, QuoteLibraryResponse, QuoteResponse, QuoteService,
};
pub use service::{Acknowledgement, ServiceError, ServiceResult};
pub use store::{SqliteStore, Store};
