//! Diary handlers.
//!
//! Dates arrive as text and are parsed before the store is touched. Update
//! and delete act on every row stored for the date.

use crate::model::validation::{parse_entry_date, validate_diary_content};
use crate::repo::diary_repo::DiaryRepository;
use crate::service::{Acknowledgement, ServiceResult};
use log::debug;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiaryEntriesResponse {
    pub entries: Vec<String>,
}

pub struct DiaryService<R: DiaryRepository> {
    repo: R,
}

impl<R: DiaryRepository> DiaryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn add_diary_entry(
        &self,
        entry_date: &str,
        content: &str,
    ) -> ServiceResult<Acknowledgement> {
        let date = parse_entry_date(entry_date)?;
        validate_diary_content(content)?;
        let id = self.repo.add_diary_entry(date, content)?;
        debug!("event=diary_add module=service status=ok entry_id={id} date={date}");
        Ok(Acknowledgement::created("Diary entry added", id))
    }

    /// Returns content strings stored for the date, oldest first.
    pub fn diary_entries(&self, entry_date: &str) -> ServiceResult<DiaryEntriesResponse> {
        let date = parse_entry_date(entry_date)?;
        let entries = self
            .repo
            .diary_entries_for(date)?
            .into_iter()
            .map(|entry| entry.content)
            .collect();
        Ok(DiaryEntriesResponse { entries })
    }

    /// Replaces content for the date. Absent or empty content is a no-op.
    pub fn update_diary_entry(
        &self,
        entry_date: &str,
        content: Option<&str>,
    ) -> ServiceResult<Acknowledgement> {
        let date = parse_entry_date(entry_date)?;
        let affected = match content.filter(|value| !value.is_empty()) {
            Some(content) => {
                validate_diary_content(content)?;
                self.repo.update_diary_content(date, content)?
            }
            None => 0,
        };
        debug!("event=diary_update module=service status=ok date={date} affected={affected}");
        Ok(Acknowledgement::affected("Diary entry updated", affected))
    }

    pub fn delete_diary_entry(&self, entry_date: &str) -> ServiceResult<Acknowledgement> {
        let date = parse_entry_date(entry_date)?;
        let affected = self.repo.delete_diary_entries(date)?;
        debug!("event=diary_delete module=service status=ok date={date} affected={affected}");
        Ok(Acknowledgement::affected("Diary entry deleted", affected))
    }
}
