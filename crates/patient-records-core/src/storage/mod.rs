//! Key/value storage backends for the record store.
//!
//! The store persists each collection as one JSON document under a fixed key,
//! so a backend only needs string get/set/remove.

mod detached;
mod memory;
mod schema;
mod sqlite;

pub use detached::DetachedStorage;
pub use memory::MemoryStorage;
pub use schema::SCHEMA;
pub use sqlite::SqliteStorage;

use thiserror::Error;

/// Storage backend errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Storage area unavailable")]
    Unavailable,
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A string key/value area that outlives a single store handle.
pub trait KeyValueStorage {
    /// Whether a storage area is attached at all.
    fn is_available(&self) -> bool {
        true
    }

    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Removing a missing key is not an error.
    fn remove_item(&mut self, key: &str) -> StorageResult<()>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Box<T> {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove_item(key)
    }
}
