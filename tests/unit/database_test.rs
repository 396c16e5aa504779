//! Unit tests for the translator database layer (connection + migrations + key/value storage).

use tempfile::TempDir;

use translator_client::database::migrations::{get_schema_version, CURRENT_SCHEMA_VERSION};
use translator_client::database::{Database, DurableStorage};

#[test]
fn test_open_in_memory_succeeds() {
    let db = Database::open_in_memory();
    assert!(db.is_ok(), "open_in_memory should succeed");
}

#[test]
fn test_migrations_create_local_storage_table() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let exists: bool = db
        .connection()
        .query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='local_storage'",
            [],
            |row| row.get(0),
        )
        .unwrap_or(false);
    assert!(exists, "local_storage should exist after migrations");
}

#[test]
fn test_schema_version_is_current() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    assert_eq!(get_schema_version(db.connection()), CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_migrations_are_idempotent() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    translator_client::database::migrations::run_all(db.connection())
        .expect("second run should succeed");
    let count: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, CURRENT_SCHEMA_VERSION as i64);
}

#[test]
fn test_get_missing_key_is_none() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.get_item("translator_data").unwrap(), None);
}

#[test]
fn test_set_then_get() {
    let mut db = Database::open_in_memory().unwrap();
    db.set_item("k", r#"{"history":[]}"#).unwrap();
    assert_eq!(db.get_item("k").unwrap().as_deref(), Some(r#"{"history":[]}"#));
}

#[test]
fn test_set_overwrites_previous_value() {
    let mut db = Database::open_in_memory().unwrap();
    db.set_item("k", "first").unwrap();
    db.set_item("k", "second").unwrap();
    assert_eq!(db.get_item("k").unwrap().as_deref(), Some("second"));

    let rows: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM local_storage", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn test_values_survive_reopen() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nested").join("translator.db");

    {
        let mut db = Database::open(&path).expect("open should create parent dir");
        db.set_item("translator_data", "你好").unwrap();
    }

    let db = Database::open(&path).unwrap();
    assert_eq!(db.get_item("translator_data").unwrap().as_deref(), Some("你好"));
    assert_eq!(get_schema_version(db.connection()), CURRENT_SCHEMA_VERSION);
}
