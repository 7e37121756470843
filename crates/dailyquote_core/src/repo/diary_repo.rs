//! Diary repository contract and SQLite implementation.
//!
//! # Invariants
//! - Rows are addressed by `entry_date`; update and delete touch every row
//!   stored for that date and report how many matched.
//! - Dates are persisted as `YYYY-MM-DD` text.

use crate::model::diary::{entry_date_key, DiaryEntry, DiaryEntryId, ENTRY_DATE_FORMAT};
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

/// Date-keyed diary persistence.
pub trait DiaryRepository {
    fn add_diary_entry(&self, entry_date: NaiveDate, content: &str) -> RepoResult<DiaryEntryId>;
    /// Returns rows stored for `entry_date` in insertion order.
    fn diary_entries_for(&self, entry_date: NaiveDate) -> RepoResult<Vec<DiaryEntry>>;
    /// Replaces content on every row for `entry_date`; returns matched rows.
    fn update_diary_content(&self, entry_date: NaiveDate, content: &str) -> RepoResult<usize>;
    /// Removes every row for `entry_date`; returns removed rows.
    fn delete_diary_entries(&self, entry_date: NaiveDate) -> RepoResult<usize>;
}

impl<T: DiaryRepository + ?Sized> DiaryRepository for &T {
    fn add_diary_entry(&self, entry_date: NaiveDate, content: &str) -> RepoResult<DiaryEntryId> {
        (**self).add_diary_entry(entry_date, content)
    }

    fn diary_entries_for(&self, entry_date: NaiveDate) -> RepoResult<Vec<DiaryEntry>> {
        (**self).diary_entries_for(entry_date)
    }

    fn update_diary_content(&self, entry_date: NaiveDate, content: &str) -> RepoResult<usize> {
        (**self).update_diary_content(entry_date, content)
    }

    fn delete_diary_entries(&self, entry_date: NaiveDate) -> RepoResult<usize> {
        (**self).delete_diary_entries(entry_date)
    }
}

/// SQLite-backed diary repository over a borrowed connection.
pub struct SqliteDiaryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDiaryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DiaryRepository for SqliteDiaryRepository<'_> {
    fn add_diary_entry(&self, entry_date: NaiveDate, content: &str) -> RepoResult<DiaryEntryId> {
        self.conn.execute(
            "INSERT INTO diary (entry_date, content) VALUES (?1, ?2);",
            params![entry_date_key(entry_date), content],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn diary_entries_for(&self, entry_date: NaiveDate) -> RepoResult<Vec<DiaryEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, entry_date, content
             FROM diary
             WHERE entry_date = ?1
             ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([entry_date_key(entry_date)])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_diary_row(row)?);
        }
        Ok(entries)
    }

    fn update_diary_content(&self, entry_date: NaiveDate, content: &str) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "UPDATE diary SET content = ?1 WHERE entry_date = ?2;",
            params![content, entry_date_key(entry_date)],
        )?;
        Ok(changed)
    }

    fn delete_diary_entries(&self, entry_date: NaiveDate) -> RepoResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM diary WHERE entry_date = ?1;",
            [entry_date_key(entry_date)],
        )?;
        Ok(removed)
    }
}

fn parse_diary_row(row: &Row<'_>) -> RepoResult<DiaryEntry> {
    let date_text: String = row.get("entry_date")?;
    let entry_date = NaiveDate::parse_from_str(&date_text, ENTRY_DATE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid date value `{date_text}` in diary.entry_date"
        ))
    })?;

    Ok(DiaryEntry {
        id: row.get("id")?,
        entry_date,
        content: row.get("content")?,
    })
}
