//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record persisted and rendered by core.
//! - Parse raw UI field values (category, deadline) into typed values.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `text` is trimmed and never empty.
//! - `deadline = None` means "no deadline"; such a task is never overdue.

use chrono::{DateTime, Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

const DEADLINE_MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M";
const DEADLINE_SECOND_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DEADLINE_DISPLAY_FORMAT: &str = "%b %-d, %I:%M %p";

/// Opaque task identifier.
///
/// New ids are UUID v4 strings; ids loaded from storage are kept verbatim so
/// records written by other front ends keep their identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generates a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Task category shown as a colored badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Study,
    Assignment,
    Project,
    Exam,
    Lab,
    Reading,
    Other,
}

impl Category {
    /// All categories in selector order.
    pub const ALL: [Category; 7] = [
        Category::Study,
        Category::Assignment,
        Category::Project,
        Category::Exam,
        Category::Lab,
        Category::Reading,
        Category::Other,
    ];

    /// Stable lowercase name used on the wire and in selectors.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Study => "study",
            Self::Assignment => "assignment",
            Self::Project => "project",
            Self::Exam => "exam",
            Self::Lab => "lab",
            Self::Reading => "reading",
            Self::Other => "other",
        }
    }

    /// Human label with its leading emoji.
    pub fn label(self) -> &'static str {
        match self {
            Self::Study => "\u{1F4DA} Study",
            Self::Assignment => "\u{1F4DD} Assignment",
            Self::Project => "\u{1F4BC} Project",
            Self::Exam => "\u{1F4D6} Exam Prep",
            Self::Lab => "\u{1F52C} Lab Work",
            Self::Reading => "\u{1F4D5} Reading",
            Self::Other => "\u{1F4CC} Other",
        }
    }

    /// Style tag consumed by presentation adapters.
    pub fn style_class(self) -> &'static str {
        match self {
            Self::Study => "cat-study",
            Self::Assignment => "cat-assignment",
            Self::Project => "cat-project",
            Self::Exam => "cat-exam",
            Self::Lab => "cat-lab",
            Self::Reading => "cat-reading",
            Self::Other => "cat-other",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = TaskValidationError;

    /// Parses a selector value. Empty input falls back to the default category.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Ok(Self::default());
        }
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| TaskValidationError::UnknownCategory(value.trim().to_string()))
    }
}

/// Local date-time deadline with minute (or second) precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Deadline(NaiveDateTime);

impl Deadline {
    /// Wraps a date-time, dropping sub-second precision.
    pub fn new(value: NaiveDateTime) -> Self {
        Self(value.with_nanosecond(0).unwrap_or(value))
    }

    /// Parses a `datetime-local` style value.
    ///
    /// Returns `Ok(None)` for empty input ("no deadline").
    ///
    /// RFC 3339 values with an offset (e.g. `2025-12-30T14:30:00.000Z`, as
    /// written by `Date.toISOString()`) are converted to local time.
    ///
    /// # Errors
    /// - `InvalidDeadline` when the value is neither `YYYY-MM-DDTHH:MM`,
    ///   `YYYY-MM-DDTHH:MM:SS` nor RFC 3339.
    pub fn parse(value: &str) -> Result<Option<Self>, TaskValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        NaiveDateTime::parse_from_str(trimmed, DEADLINE_MINUTE_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(trimmed, DEADLINE_SECOND_FORMAT))
            .or_else(|_| {
                DateTime::parse_from_rfc3339(trimmed)
                    .map(|value| value.with_timezone(&Local).naive_local())
            })
            .map(|value| Some(Self::new(value)))
            .map_err(|_| TaskValidationError::InvalidDeadline(trimmed.to_string()))
    }

    pub fn as_datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// Short display form, e.g. `Dec 30, 02:30 PM`.
    pub fn display(&self) -> String {
        self.0.format(DEADLINE_DISPLAY_FORMAT).to_string()
    }

    /// Returns whether this deadline lies strictly before `now`.
    pub fn is_before(&self, now: NaiveDateTime) -> bool {
        self.0 < now
    }
}

impl Display for Deadline {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let format = if self.0.second() == 0 {
            DEADLINE_MINUTE_FORMAT
        } else {
            DEADLINE_SECOND_FORMAT
        };
        write!(f, "{}", self.0.format(format))
    }
}

impl Serialize for Deadline {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Reads an optional deadline where `null`, a missing field and `""` all
/// mean "no deadline".
fn deserialize_optional_deadline<'de, D>(deserializer: D) -> Result<Option<Deadline>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw {
        Some(value) => Deadline::parse(&value).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Validation failures for task field values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyText,
    MissingDeadline,
    UnknownCategory(String),
    InvalidDeadline(String),
    EmptyId,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task name is required"),
            Self::MissingDeadline => write!(f, "deadline is required"),
            Self::UnknownCategory(value) => write!(f, "unknown category `{value}`"),
            Self::InvalidDeadline(value) => write!(
                f,
                "invalid deadline `{value}`; expected YYYY-MM-DDTHH:MM"
            ),
            Self::EmptyId => write!(f, "task id cannot be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// One to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default, deserialize_with = "deserialize_optional_deadline")]
    pub deadline: Option<Deadline>,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Creates an active task with a generated id.
    ///
    /// `text` is trimmed; call [`Task::validate`] before persisting.
    pub fn new(text: &str, category: Category, deadline: Option<Deadline>) -> Self {
        Self::with_id(TaskId::generate(), text, category, deadline)
    }

    /// Creates an active task with a caller-provided id.
    pub fn with_id(
        id: TaskId,
        text: &str,
        category: Category,
        deadline: Option<Deadline>,
    ) -> Self {
        Self {
            id,
            text: text.trim().to_string(),
            category,
            deadline,
            completed: false,
        }
    }

    /// Checks record-level invariants.
    ///
    /// # Errors
    /// - `EmptyId` when `id` is blank.
    /// - `EmptyText` when `text` is blank after trimming.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.as_str().trim().is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        if self.text.trim().is_empty() {
            return Err(TaskValidationError::EmptyText);
        }
        Ok(())
    }

    /// Case-insensitive key used by the duplicate check.
    pub fn normalized_text(&self) -> String {
        normalize_text(&self.text)
    }

    /// Returns whether the task counts as overdue at `now`.
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        !self.completed
            && self
                .deadline
                .is_some_and(|deadline| deadline.is_before(now))
    }
}

/// Normalizes user text for duplicate comparison (trim + lowercase).
pub fn normalize_text(text: &str) -> String {
    text.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::{normalize_text, Category, Deadline, TaskValidationError};
    use std::str::FromStr;

    #[test]
    fn normalize_text_trims_and_lowercases() {
        assert_eq!(normalize_text("  Finish HomeWork "), "finish homework");
    }

    #[test]
    fn category_parse_accepts_case_and_empty() {
        assert_eq!(Category::from_str(" LAB ").unwrap(), Category::Lab);
        assert_eq!(Category::from_str("").unwrap(), Category::Study);
        assert_eq!(
            Category::from_str("chores").unwrap_err(),
            TaskValidationError::UnknownCategory("chores".to_string())
        );
    }

    #[test]
    fn deadline_parse_handles_both_precisions() {
        let minute = Deadline::parse("2025-12-30T14:30").unwrap().unwrap();
        assert_eq!(minute.to_string(), "2025-12-30T14:30");

        let second = Deadline::parse("2025-12-30T14:30:15").unwrap().unwrap();
        assert_eq!(second.to_string(), "2025-12-30T14:30:15");

        assert_eq!(Deadline::parse("   ").unwrap(), None);
        assert!(matches!(
            Deadline::parse("tomorrow"),
            Err(TaskValidationError::InvalidDeadline(_))
        ));
    }

    #[test]
    fn deadline_parse_accepts_rfc3339_with_offset() {
        let iso = Deadline::parse("2025-12-30T14:30:00.000Z").unwrap();
        assert!(iso.is_some());
        let offset = Deadline::parse("2025-12-30T14:30:00+02:00").unwrap();
        assert!(offset.is_some());
    }

    #[test]
    fn deadline_display_uses_short_month_and_twelve_hour_clock() {
        let deadline = Deadline::parse("2025-12-30T14:30").unwrap().unwrap();
        assert_eq!(deadline.display(), "Dec 30, 02:30 PM");

        let morning = Deadline::parse("2025-01-05T09:05").unwrap().unwrap();
        assert_eq!(morning.display(), "Jan 5, 09:05 AM");
    }
}
