//! Core domain logic for taskdeck.
//! This crate is the single source of truth for task invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;
pub mod view;

pub use config::{DeadlinePolicy, StoreConfig, DEFAULT_STORAGE_KEY};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Category, Deadline, Task, TaskId, TaskValidationError};
pub use service::task_store::{
    decode_collection, encode_collection, DecodedCollection, SaveStatus, StoreResult, TaskStore,
    TaskStoreError,
};
pub use storage::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageResult,
};
pub use view::board::{render_board, BoardView, Partition, PartitionBody, TaskCard};
pub use view::html::{escape_html, render_html, HtmlBoard};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
