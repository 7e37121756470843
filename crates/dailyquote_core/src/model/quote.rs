//! Quote records.

use serde::{Deserialize, Serialize};

/// Store-assigned, monotonically increasing quote identity.
pub type QuoteId = i64;

/// Immutable seeded reference quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub text: String,
    pub author: String,
    /// Open label set; not enforced as an enum by the store.
    pub category: String,
}

impl Quote {
    /// Renders the announcement line used by the notification handler.
    pub fn announcement(&self) -> String {
        format!("Daily Quote: '{}' - {}", self.text, self.author)
    }
}
