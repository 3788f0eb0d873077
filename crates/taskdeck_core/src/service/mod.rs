//! Core use-case services.
//!
//! # Responsibility
//! - Own the task collection and expose its mutation operations.
//! - Keep front ends decoupled from storage details.

pub mod task_store;
