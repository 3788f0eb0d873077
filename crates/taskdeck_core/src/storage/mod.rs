//! Key-value persistence collaborator.
//!
//! # Responsibility
//! - Define the minimal `get`/`set` contract the task store persists through.
//! - Provide in-memory and SQLite-backed implementations.
//!
//! # Invariants
//! - `set` overwrites the whole value stored under `key`.
//! - `get` of a never-written key returns `Ok(None)`, not an error.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure reported by a storage backend.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Backend(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Backend(message) => write!(f, "storage backend failure: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Backend(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String key-value store used to persist the serialized task collection.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}
