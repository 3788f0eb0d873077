//! Domain model for to-do tasks.
//!
//! # Responsibility
//! - Define the task record shared by the store, storage and view layers.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Deletion is a hard removal from the collection.

pub mod task;
