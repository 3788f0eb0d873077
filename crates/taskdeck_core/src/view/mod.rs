//! View derivation and presentation adapters.
//!
//! # Responsibility
//! - Derive a pure, partitioned view model from a task snapshot.
//! - Render that model to HTML; escaping belongs to the adapter only.

pub mod board;
pub mod html;
