//! Task store: the owner of the task collection.
//!
//! # Responsibility
//! - Load the collection once from the key-value collaborator.
//! - Enforce text/duplicate/deadline rules on every mutation.
//! - Write the full collection back after every successful mutation.
//!
//! # Invariants
//! - No two tasks share the same normalized (trimmed, lowercased) text.
//! - No task has empty text or an empty id.
//! - A rejected operation leaves the collection unchanged.
//! - A failed write never rolls back the in-memory change; it is reported
//!   through `save_status()` instead.

use crate::config::{DeadlinePolicy, StoreConfig};
use crate::model::task::{
    normalize_text, Category, Deadline, Task, TaskId, TaskValidationError,
};
use crate::storage::KeyValueStore;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub type StoreResult<T> = Result<T, TaskStoreError>;

/// Rejection reasons for store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStoreError {
    /// Field values break a record rule.
    Validation(TaskValidationError),
    /// Another task already uses this text (case-insensitive).
    Duplicate(String),
    /// Operation referenced an unknown id.
    NotFound(TaskId),
}

impl Display for TaskStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Duplicate(text) => write!(f, "duplicate task: `{text}` already exists"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
        }
    }
}

impl Error for TaskStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Duplicate(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<TaskValidationError> for TaskStoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Outcome of the most recent write attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SaveStatus {
    /// Storage holds the current collection.
    #[default]
    Saved,
    /// The last write failed; in-memory state is ahead of storage.
    NotSaved(String),
}

impl SaveStatus {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// Result of decoding a stored collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodedCollection {
    /// Tasks that passed decoding and invariant checks, in stored order.
    pub tasks: Vec<Task>,
    /// Number of stored records skipped.
    pub dropped: usize,
}

/// Serializes the collection as one JSON array.
pub fn encode_collection(tasks: &[Task]) -> Result<String, serde_json::Error> {
    serde_json::to_string(tasks)
}

/// Decodes a stored JSON array of tasks.
///
/// Records that fail to decode, fail `Task::validate`, or repeat an earlier
/// id or normalized text are skipped and counted in `dropped`. An
/// unreadable deadline only clears that field.
///
/// # Errors
/// - Returns an error when `raw` is not a JSON array.
pub fn decode_collection(raw: &str) -> Result<DecodedCollection, serde_json::Error> {
    let records: Vec<serde_json::Value> = serde_json::from_str(raw)?;
    let mut decoded = DecodedCollection::default();
    let mut seen_ids = HashSet::new();
    let mut seen_texts = HashSet::new();

    for mut record in records {
        clear_unreadable_deadline(&mut record);
        let mut task = match serde_json::from_value::<Task>(record) {
            Ok(task) => task,
            Err(err) => {
                debug!("event=task_decode module=store status=skipped reason={err}");
                decoded.dropped += 1;
                continue;
            }
        };
        task.text = task.text.trim().to_string();

        if task.validate().is_err()
            || !seen_ids.insert(task.id.clone())
            || !seen_texts.insert(task.normalized_text())
        {
            decoded.dropped += 1;
            continue;
        }
        decoded.tasks.push(task);
    }

    Ok(decoded)
}

/// Replaces a stored deadline that cannot be parsed with `null`, so the
/// record survives without a deadline instead of being dropped.
fn clear_unreadable_deadline(record: &mut serde_json::Value) {
    let Some(deadline) = record.get_mut("deadline") else {
        return;
    };
    let unreadable = match deadline.as_str() {
        Some(raw) => Deadline::parse(raw).is_err(),
        None => !deadline.is_null(),
    };
    if unreadable {
        warn!("event=task_decode module=store status=deadline_cleared");
        *deadline = serde_json::Value::Null;
    }
}

/// In-memory task collection persisted through a `KeyValueStore`.
pub struct TaskStore<S: KeyValueStore> {
    storage: S,
    config: StoreConfig,
    tasks: Vec<Task>,
    save_status: SaveStatus,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Opens a store, loading the collection saved under `config.storage_key`.
    ///
    /// Missing, unreadable or malformed data yields an empty collection.
    pub fn open(storage: S, config: StoreConfig) -> Self {
        let tasks = load_tasks(&storage, &config.storage_key);
        Self {
            storage,
            config,
            tasks,
            save_status: SaveStatus::Saved,
        }
    }

    /// Adds a new active task.
    ///
    /// # Errors
    /// - `Validation(EmptyText)` when `text` is blank.
    /// - `Validation(MissingDeadline)` when the policy requires a deadline.
    /// - `Duplicate` when another task has the same normalized text.
    pub fn add(
        &mut self,
        text: &str,
        category: Category,
        deadline: Option<Deadline>,
    ) -> StoreResult<Task> {
        let text = self.check_fields(text, deadline, None)?;
        let task = Task::new(&text, category, deadline);
        self.tasks.push(task.clone());
        info!(
            "event=task_add module=store status=ok task_id={} category={}",
            task.id, task.category
        );
        self.persist();
        Ok(task)
    }

    /// Adds a task from raw selector/input values.
    ///
    /// An empty `category` means the default; an empty `deadline` means none.
    pub fn add_raw(&mut self, text: &str, category: &str, deadline: &str) -> StoreResult<Task> {
        let (category, deadline) = parse_raw_fields(text, category, deadline)?;
        self.add(text, category, deadline)
    }

    /// Replaces text, category and deadline of an existing task.
    ///
    /// `id` and `completed` are kept.
    ///
    /// # Errors
    /// - `NotFound` when `id` is unknown.
    /// - Same validation and duplicate rules as [`TaskStore::add`], with the
    ///   edited task excluded from the duplicate check.
    pub fn edit(
        &mut self,
        id: &TaskId,
        text: &str,
        category: Category,
        deadline: Option<Deadline>,
    ) -> StoreResult<Task> {
        let index = self.position(id)?;
        let text = self.check_fields(text, deadline, Some(id))?;

        let task = &mut self.tasks[index];
        task.text = text;
        task.category = category;
        task.deadline = deadline;
        let updated = task.clone();

        info!(
            "event=task_edit module=store status=ok task_id={} category={}",
            updated.id, updated.category
        );
        self.persist();
        Ok(updated)
    }

    /// Edits a task from raw selector/input values.
    pub fn edit_raw(
        &mut self,
        id: &TaskId,
        text: &str,
        category: &str,
        deadline: &str,
    ) -> StoreResult<Task> {
        self.position(id)?;
        let (category, deadline) = parse_raw_fields(text, category, deadline)?;
        self.edit(id, text, category, deadline)
    }

    /// Flips the completed flag.
    ///
    /// # Errors
    /// - `NotFound` when `id` is unknown.
    pub fn toggle_completed(&mut self, id: &TaskId) -> StoreResult<Task> {
        let index = self.position(id)?;
        let task = &mut self.tasks[index];
        task.completed = !task.completed;
        let toggled = task.clone();

        info!(
            "event=task_toggle module=store status=ok task_id={} completed={}",
            toggled.id, toggled.completed
        );
        self.persist();
        Ok(toggled)
    }

    /// Removes one task and returns it.
    ///
    /// # Errors
    /// - `NotFound` when `id` is unknown.
    pub fn delete(&mut self, id: &TaskId) -> StoreResult<Task> {
        let index = self.position(id)?;
        let removed = self.tasks.remove(index);
        info!(
            "event=task_delete module=store status=ok task_id={}",
            removed.id
        );
        self.persist();
        Ok(removed)
    }

    /// Removes every active task; returns how many were removed.
    pub fn delete_all_active(&mut self) -> usize {
        self.delete_where("active", |task| !task.completed)
    }

    /// Removes every completed task; returns how many were removed.
    pub fn delete_all_completed(&mut self) -> usize {
        self.delete_where("completed", |task| task.completed)
    }

    /// Re-attempts a full write of the current collection.
    pub fn flush(&mut self) -> &SaveStatus {
        self.persist();
        &self.save_status
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|task| !task.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }

    pub fn save_status(&self) -> &SaveStatus {
        &self.save_status
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns whether another task already uses `text` (case-insensitive).
    pub fn is_duplicate(&self, text: &str, exclude: Option<&TaskId>) -> bool {
        let candidate = normalize_text(text);
        self.tasks
            .iter()
            .filter(|task| Some(&task.id) != exclude)
            .any(|task| task.normalized_text() == candidate)
    }

    fn position(&self, id: &TaskId) -> StoreResult<usize> {
        self.tasks
            .iter()
            .position(|task| &task.id == id)
            .ok_or_else(|| TaskStoreError::NotFound(id.clone()))
    }

    fn check_fields(
        &self,
        text: &str,
        deadline: Option<Deadline>,
        exclude: Option<&TaskId>,
    ) -> StoreResult<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TaskValidationError::EmptyText.into());
        }
        if deadline.is_none() && self.config.deadline_policy == DeadlinePolicy::Required {
            return Err(TaskValidationError::MissingDeadline.into());
        }
        if self.is_duplicate(trimmed, exclude) {
            return Err(TaskStoreError::Duplicate(trimmed.to_string()));
        }
        Ok(trimmed.to_string())
    }

    fn delete_where(&mut self, scope: &'static str, predicate: impl Fn(&Task) -> bool) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| !predicate(task));
        let removed = before - self.tasks.len();

        if removed == 0 {
            debug!("event=task_bulk_delete module=store status=noop scope={scope}");
            return 0;
        }

        info!(
            "event=task_bulk_delete module=store status=ok scope={scope} removed={removed}"
        );
        self.persist();
        removed
    }

    fn persist(&mut self) {
        let encoded = match encode_collection(&self.tasks) {
            Ok(encoded) => encoded,
            Err(err) => {
                self.mark_not_saved(format!("failed to encode tasks: {err}"));
                return;
            }
        };

        match self.storage.set(&self.config.storage_key, &encoded) {
            Ok(()) => {
                debug!(
                    "event=tasks_save module=store status=ok count={}",
                    self.tasks.len()
                );
                self.save_status = SaveStatus::Saved;
            }
            Err(err) => self.mark_not_saved(format!("failed to write tasks: {err}")),
        }
    }

    fn mark_not_saved(&mut self, message: String) {
        warn!(
            "event=tasks_save module=store status=error count={} error={}",
            self.tasks.len(),
            message
        );
        self.save_status = SaveStatus::NotSaved(message);
    }
}

fn parse_raw_fields(
    text: &str,
    category: &str,
    deadline: &str,
) -> StoreResult<(Category, Option<Deadline>)> {
    if text.trim().is_empty() {
        return Err(TaskValidationError::EmptyText.into());
    }
    let category = Category::from_str(category)?;
    let deadline = Deadline::parse(deadline)?;
    Ok((category, deadline))
}

fn load_tasks(storage: &impl KeyValueStore, key: &str) -> Vec<Task> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            info!("event=tasks_load module=store status=empty reason=absent");
            return Vec::new();
        }
        Err(err) => {
            warn!("event=tasks_load module=store status=error reason=read_failed error={err}");
            return Vec::new();
        }
    };

    match decode_collection(&raw) {
        Ok(decoded) => {
            if decoded.dropped > 0 {
                warn!(
                    "event=tasks_load module=store status=partial count={} dropped={}",
                    decoded.tasks.len(),
                    decoded.dropped
                );
            } else {
                info!(
                    "event=tasks_load module=store status=ok count={}",
                    decoded.tasks.len()
                );
            }
            decoded.tasks
        }
        Err(err) => {
            warn!("event=tasks_load module=store status=error reason=malformed error={err}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_collection, encode_collection, TaskStore};
    use crate::config::StoreConfig;
    use crate::model::task::Category;
    use crate::storage::MemoryKeyValueStore;

    #[test]
    fn decode_skips_invalid_and_duplicate_records() {
        let raw = r#"[
            {"id":"a","text":"Read","category":"reading","deadline":"","completed":false},
            {"id":"b","text":"  read ","category":"study","deadline":null,"completed":true},
            {"id":"a","text":"Other text","category":"study","completed":false},
            {"id":"c","text":"   ","category":"study","completed":false},
            {"id":"d","text":"Lab report","category":"chores","completed":false},
            {"id":"e","text":"Lab notes","category":"lab","deadline":"2025-01-01T10:00","completed":false}
        ]"#;
        let decoded = decode_collection(raw).unwrap();
        let ids: Vec<&str> = decoded.tasks.iter().map(|task| task.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "e"]);
        assert_eq!(decoded.dropped, 4);
    }

    #[test]
    fn decode_keeps_record_with_unreadable_deadline() {
        let raw = r#"[
            {"id":"a","text":"Iso deadline","category":"exam","deadline":"2025-12-30T14:30:00.000Z","completed":false},
            {"id":"b","text":"Garbage deadline","category":"lab","deadline":"next friday","completed":false},
            {"id":"c","text":"Numeric deadline","category":"lab","deadline":1735689600000,"completed":true}
        ]"#;
        let decoded = decode_collection(raw).unwrap();
        assert_eq!(decoded.dropped, 0);
        assert_eq!(decoded.tasks.len(), 3);
        assert!(decoded.tasks[0].deadline.is_some());
        assert_eq!(decoded.tasks[1].deadline, None);
        assert_eq!(decoded.tasks[1].text, "Garbage deadline");
        assert_eq!(decoded.tasks[2].deadline, None);
        assert!(decoded.tasks[2].completed);
    }

    #[test]
    fn decode_rejects_non_array_values() {
        assert!(decode_collection("{\"id\":\"a\"}").is_err());
        assert!(decode_collection("not json").is_err());
    }

    #[test]
    fn encode_emits_null_for_missing_deadline() {
        let mut store = TaskStore::open(MemoryKeyValueStore::new(), StoreConfig::default());
        store.add("Read Ch.1", Category::Reading, None).unwrap();
        let json = encode_collection(store.tasks()).unwrap();
        assert!(json.contains("\"deadline\":null"));
        assert!(json.contains("\"category\":\"reading\""));
    }

    #[test]
    fn is_duplicate_honours_exclusion() {
        let mut store = TaskStore::open(MemoryKeyValueStore::new(), StoreConfig::default());
        let task = store.add("Essay", Category::Assignment, None).unwrap();
        assert!(store.is_duplicate(" ESSAY ", None));
        assert!(!store.is_duplicate("essay", Some(&task.id)));
    }
}
