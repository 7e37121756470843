//! Diary entries keyed by calendar date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type DiaryEntryId = i64;

/// Storage format of `diary.entry_date`.
pub const ENTRY_DATE_FORMAT: &str = "%Y-%m-%d";

/// One diary row. `entry_date` is the lookup key but is not unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: DiaryEntryId,
    pub entry_date: NaiveDate,
    pub content: String,
}

/// Formats a date the way it is persisted (`YYYY-MM-DD`).
pub fn entry_date_key(date: NaiveDate) -> String {
    date.format(ENTRY_DATE_FORMAT).to_string()
}
