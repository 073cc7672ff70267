use resume_core::db::migrations::latest_version;
use resume_core::db::{open_db, open_db_in_memory, DbError};
use resume_core::{SlotStore, SqliteSlotStore};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "slots");
}

#[test]
fn reopening_database_keeps_slot_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slots.db");

    let conn_first = open_db(&path).unwrap();
    SqliteSlotStore::new(&conn_first)
        .write_slot("doc", "{\"sections\":[]}")
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_eq!(
        SqliteSlotStore::new(&conn_second)
            .read_slot("doc")
            .unwrap()
            .as_deref(),
        Some("{\"sections\":[]}")
    );
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn sqlite_slot_overwrite_and_clear() {
    let conn = open_db_in_memory().unwrap();
    let slots = SqliteSlotStore::new(&conn);

    slots.write_slot("k", "v1").unwrap();
    slots.write_slot("k", "v2").unwrap();
    assert_eq!(slots.read_slot("k").unwrap().as_deref(), Some("v2"));

    slots.clear_slot("k").unwrap();
    slots.clear_slot("k").unwrap();
    assert_eq!(slots.read_slot("k").unwrap(), None);
    assert_eq!(slots.read_slot("never-written").unwrap(), None);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
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
