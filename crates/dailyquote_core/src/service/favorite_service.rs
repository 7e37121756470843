//! Favorite handlers.

use crate::model::favorite::FavoriteQuote;
use crate::model::quote::QuoteId;
use crate::model::validation::validate_category;
use crate::repo::favorite_repo::FavoriteRepository;
use crate::service::{Acknowledgement, ServiceResult};
use log::debug;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<FavoriteQuote>,
}

pub struct FavoriteService<R: FavoriteRepository> {
    repo: R,
}

impl<R: FavoriteRepository> FavoriteService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Bookmarks `quote_id` under `category`.
    ///
    /// The quote is not required to exist, and repeated calls create
    /// duplicate bookmarks.
    pub fn add_favorite(
        &self,
        quote_id: QuoteId,
        category: &str,
    ) -> ServiceResult<Acknowledgement> {
        validate_category("category", category)?;
        let favorite = self.repo.add_favorite(quote_id, category)?;
        debug!(
            "event=favorite_add module=service status=ok favorite_id={} quote_id={}",
            favorite.id, favorite.quote_id
        );
        Ok(Acknowledgement::created("Quote added to favorites", favorite.id))
    }

    /// Lists bookmarked quotes for `category`; empty when none match.
    pub fn favorites_by_category(&self, category: &str) -> ServiceResult<FavoritesResponse> {
        validate_category("category", category)?;
        let favorites = self.repo.favorites_by_category(category)?;
        Ok(FavoritesResponse { favorites })
    }
}
