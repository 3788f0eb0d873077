//! In-memory key-value store.

use super::{KeyValueStore, StorageError, StorageResult};
use std::collections::HashMap;

/// `HashMap`-backed store for tests and ephemeral sessions.
///
/// Writes can be switched to fail to exercise "changes not saved" paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: HashMap<String, String>,
    fail_writes: bool,
    write_count: usize,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut store = Self::default();
        store.entries.insert(key.into(), value.into());
        store
    }

    /// Makes every subsequent `set` fail (or succeed again).
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.write_count
    }

    /// Raw stored value, bypassing the trait.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if self.fail_writes {
            return Err(StorageError::Backend("quota exceeded".to_string()));
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.write_count += 1;
        Ok(())
    }
}
