//! Store configuration.
//!
//! # Responsibility
//! - Hold the knobs a front end may set when opening a `TaskStore`.
//!
//! # Invariants
//! - `storage_key` is the single key the whole collection lives under.

/// Default key, compatible with collections saved by the browser app.
pub const DEFAULT_STORAGE_KEY: &str = "todoTasks";

/// Whether add/edit must carry a deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeadlinePolicy {
    /// Tasks may have no deadline; they render without a badge.
    #[default]
    Optional,
    /// Add and edit reject a missing deadline with `MissingDeadline`.
    Required,
}

/// Options used by `TaskStore::open`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub storage_key: String,
    pub deadline_policy: DeadlinePolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            deadline_policy: DeadlinePolicy::default(),
        }
    }
}

impl StoreConfig {
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_deadline_policy(mut self, policy: DeadlinePolicy) -> Self {
        self.deadline_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{DeadlinePolicy, StoreConfig, DEFAULT_STORAGE_KEY};

    #[test]
    fn default_config_uses_browser_key_and_optional_deadline() {
        let config = StoreConfig::default();
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.deadline_policy, DeadlinePolicy::Optional);
    }

    #[test]
    fn builders_override_fields() {
        let config = StoreConfig::default()
            .with_storage_key("alt")
            .with_deadline_policy(DeadlinePolicy::Required);
        assert_eq!(config.storage_key, "alt");
        assert_eq!(config.deadline_policy, DeadlinePolicy::Required);
    }
}
