#![allow(clippy::unwrap_used)]

use super::*;

// ── MemoryStorage ─────────────────────────────────────────────

#[test]
fn test_memory_get_missing() {
    let storage = MemoryStorage::default();
    assert!(storage.get("nothing").unwrap().is_none());
}

#[test]
fn test_memory_read_your_writes() {
    let mut storage = MemoryStorage::default();
    storage.set("k", "one").unwrap();
    assert_eq!(storage.get("k").unwrap().as_deref(), Some("one"));
    storage.set("k", "two").unwrap();
    assert_eq!(storage.get("k").unwrap().as_deref(), Some("two"));
}

#[test]
fn test_boxed_storage_delegates() {
    let mut storage: Box<dyn Storage> = Box::new(MemoryStorage::default());
    storage.set("k", "v").unwrap();
    assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
}

// ── SqliteStorage ─────────────────────────────────────────────

#[test]
fn test_sqlite_schema_version() {
    let storage = SqliteStorage::open_in_memory().unwrap();
    assert_eq!(storage.schema_version().unwrap(), schema::CURRENT_VERSION);
}

#[test]
fn test_sqlite_get_missing() {
    let storage = SqliteStorage::open_in_memory().unwrap();
    assert!(storage.get("expense-tracker-data").unwrap().is_none());
}

#[test]
fn test_sqlite_upsert() {
    let mut storage = SqliteStorage::open_in_memory().unwrap();
    storage.set("expense-tracker-data", r#"{"a":1}"#).unwrap();
    storage.set("expense-tracker-data", r#"{"a":2}"#).unwrap();
    assert_eq!(
        storage.get("expense-tracker-data").unwrap().as_deref(),
        Some(r#"{"a":2}"#)
    );
}

#[test]
fn test_sqlite_keys_are_independent() {
    let mut storage = SqliteStorage::open_in_memory().unwrap();
    storage.set("a", "1").unwrap();
    storage.set("b", "2").unwrap();
    assert_eq!(storage.get("a").unwrap().as_deref(), Some("1"));
    assert_eq!(storage.get("b").unwrap().as_deref(), Some("2"));
}

#[test]
fn test_sqlite_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.db");
    {
        let mut storage = SqliteStorage::open(&path).unwrap();
        storage.set("k", "kept").unwrap();
    }
    let storage = SqliteStorage::open(&path).unwrap();
    assert_eq!(storage.get("k").unwrap().as_deref(), Some("kept"));
    assert_eq!(storage.schema_version().unwrap(), schema::CURRENT_VERSION);
}

#[test]
fn test_sqlite_reopen_keeps_one_version_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.db");
    for _ in 0..3 {
        let storage = SqliteStorage::open(&path).unwrap();
        assert_eq!(storage.schema_version_rows().unwrap(), 1);
        assert_eq!(storage.schema_version().unwrap(), schema::CURRENT_VERSION);
    }
}

// ── JsonFileStorage ───────────────────────────────────────────

#[test]
fn test_json_file_get_missing() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(dir.path());
    assert!(storage.get("expense-tracker-data").unwrap().is_none());
}

#[test]
fn test_json_file_roundtrip_creates_dir() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("nested").join("data");
    let mut storage = JsonFileStorage::new(&nested);
    storage.set("expense-tracker-data", "{}").unwrap();

    assert_eq!(storage.dir(), nested.as_path());
    assert!(nested.join("expense-tracker-data.json").exists());
    assert!(!nested.join("expense-tracker-data.json.tmp").exists());
    assert_eq!(storage.get("expense-tracker-data").unwrap().as_deref(), Some("{}"));
}

#[test]
fn test_json_file_rejects_path_keys() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = JsonFileStorage::new(dir.path());
    assert!(matches!(
        storage.set("../escape", "x"),
        Err(StorageError::InvalidKey(_))
    ));
    assert!(matches!(storage.get(""), Err(StorageError::InvalidKey(_))));
}
