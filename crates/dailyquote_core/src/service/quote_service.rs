//! Quote handlers: daily quote, notification, category pick and library.

use crate::model::quote::Quote;
use crate::model::validation::{normalize_optional_category, validate_category};
use crate::repo::quote_repo::QuoteRepository;
use crate::service::{ServiceError, ServiceResult};
use log::{debug, info};
use serde::Serialize;

const NO_QUOTES_MESSAGE: &str = "No quotes available";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteResponse {
    pub quote: Quote,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteLibraryResponse {
    pub quotes: Vec<Quote>,
}

/// Read-only quote use-cases.
pub struct QuoteService<R: QuoteRepository> {
    repo: R,
}

impl<R: QuoteRepository> QuoteService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns one random quote, optionally within `category`.
    ///
    /// A blank `category` means no filter.
    pub fn daily_quote(&self, category: Option<&str>) -> ServiceResult<QuoteResponse> {
        let quote = self.pick(category, "daily_quote")?;
        Ok(QuoteResponse { quote })
    }

    /// Simulates the daily push by rendering an announcement line.
    ///
    /// Nothing is scheduled or delivered.
    pub fn quote_notification(
        &self,
        category: Option<&str>,
    ) -> ServiceResult<NotificationResponse> {
        let quote = self.pick(category, "quote_notification")?;
        Ok(NotificationResponse {
            message: quote.announcement(),
        })
    }

    /// Returns one random quote from a required `category`.
    pub fn random_quote_by_category(&self, category: &str) -> ServiceResult<QuoteResponse> {
        validate_category("category", category)?;
        match self.repo.random_quote(Some(category))? {
            Some(quote) => Ok(QuoteResponse { quote }),
            None => {
                info!("event=random_quote module=service status=not_found");
                Err(ServiceError::NotFound(format!(
                    "No quotes available in the {category} category"
                )))
            }
        }
    }

    /// Lists the whole library by ascending id. An empty store is not an error.
    pub fn quote_library(&self) -> ServiceResult<QuoteLibraryResponse> {
        let quotes = self.repo.list_quotes()?;
        debug!(
            "event=quote_library module=service status=ok count={}",
            quotes.len()
        );
        Ok(QuoteLibraryResponse { quotes })
    }

    fn pick(&self, category: Option<&str>, event: &'static str) -> ServiceResult<Quote> {
        let category = normalize_optional_category(category)?;
        self.repo.random_quote(category)?.ok_or_else(|| {
            info!(
                "event={event} module=service status=not_found filtered={}",
                category.is_some()
            );
            ServiceError::NotFound(NO_QUOTES_MESSAGE.to_string())
        })
    }
}
