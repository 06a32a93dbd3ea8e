//! Key-value persistence used by the store.
//!
//! The store only needs `get`/`set` on string values with read-your-writes
//! consistency. Backends: SQLite (default), a directory of JSON files, and an
//! in-memory map.

mod json_file;
mod schema;
mod sqlite;

use std::collections::HashMap;

use thiserror::Error;

pub(crate) use json_file::JsonFileStorage;
pub(crate) use sqlite::SqliteStorage;

pub(crate) type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Error)]
pub(crate) enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

pub(crate) trait Storage {
    /// Value stored under `key`, or `None` when nothing was written yet.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Process-local storage. Nothing survives the process.
#[derive(Debug, Default)]
pub(crate) struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests;
