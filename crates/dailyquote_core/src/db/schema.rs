//! Schema creation and version guard.
//!
//! # Invariants
//! - Applying the schema is idempotent (`CREATE ... IF NOT EXISTS`).
//! - `PRAGMA user_version` mirrors [`SCHEMA_VERSION`] after a successful apply.
//! - A database stamped with a newer version is refused, never downgraded.
//! - The version check and the DDL share one IMMEDIATE transaction.

use crate::db::{DbError, DbResult, StoreStep};
use rusqlite::{Connection, TransactionBehavior};

/// Schema version written by this binary.
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Relations owned by the store.
pub const TABLES: [&str; 3] = ["quotes", "favorites", "diary"];

/// Creates all relations and indexes that do not exist yet.
pub fn apply_schema(conn: &mut Connection) -> DbResult<()> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(DbError::at(StoreStep::Schema))?;

    let current_version = current_user_version(&tx)?;
    if current_version > SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: SCHEMA_VERSION,
        });
    }

    tx.execute_batch(SCHEMA_SQL)
        .map_err(DbError::at(StoreStep::Schema))?;
    if current_version < SCHEMA_VERSION {
        tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))
            .map_err(DbError::at(StoreStep::Schema))?;
    }
    tx.commit().map_err(DbError::at(StoreStep::Schema))
}

/// Reads the schema version stamped on the connection's main database.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))
        .map_err(DbError::at(StoreStep::Schema))
}
