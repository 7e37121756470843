//! Favorite bookmarks.

use crate::model::quote::QuoteId;
use serde::{Deserialize, Serialize};

pub type FavoriteId = i64;

/// One bookmark row. Several rows may point at the same quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: FavoriteId,
    pub quote_id: QuoteId,
    /// User-chosen organizing label, independent of the quote's own category.
    pub category: String,
}

/// Partial quote projection returned when listing favorites.
///
/// `id` is the referenced quote's id, not the favorite row id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteQuote {
    pub id: QuoteId,
    pub text: String,
    pub author: String,
}
