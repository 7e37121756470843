use dailyquote_core::db::schema::{SCHEMA_VERSION, TABLES};
use dailyquote_core::db::{
    open_db, open_db_in_memory, seed_quotes, DbError, SeedPolicy, StoreStep,
};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_all_relations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), SCHEMA_VERSION);
    for table in TABLES {
        assert_table_exists(&conn, table);
    }
    assert_eq!(row_count(&conn, "quotes"), 0);
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("daily_quote.db");

    let mut first = open_db(&path).unwrap();
    seed_quotes(&mut first, SeedPolicy::IfEmpty).unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second), SCHEMA_VERSION);
    assert_eq!(row_count(&second, "quotes"), 35);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, SCHEMA_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn seed_if_empty_runs_once_and_always_appends() {
    let mut conn = open_db_in_memory().unwrap();

    assert_eq!(seed_quotes(&mut conn, SeedPolicy::IfEmpty).unwrap(), 35);
    assert_eq!(seed_quotes(&mut conn, SeedPolicy::IfEmpty).unwrap(), 0);
    assert_eq!(row_count(&conn, "quotes"), 35);

    assert_eq!(seed_quotes(&mut conn, SeedPolicy::Always).unwrap(), 35);
    assert_eq!(row_count(&conn, "quotes"), 70);
}

#[test]
fn favorites_accept_unknown_quote_ids_with_foreign_keys_on() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);

    conn.execute(
        "INSERT INTO favorites (quote_id, category) VALUES (9999, 'Later');",
        [],
    )
    .unwrap();
    assert_eq!(row_count(&conn, "favorites"), 1);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn row_count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}

#[test]
fn open_failures_name_the_failing_step() {
    let dir = tempfile::tempdir().unwrap();

    let err = open_db(dir.path().join("missing").join("daily_quote.db")).unwrap_err();
    assert_eq!(err.step(), StoreStep::Open);
    assert!(err.to_string().starts_with("sqlite open failed"));

    let path = dir.path().join("future.db");
    Connection::open(&path)
        .unwrap()
        .execute_batch("PRAGMA user_version = 7;")
        .unwrap();
    assert_eq!(open_db(&path).unwrap_err().step(), StoreStep::Schema);
}
