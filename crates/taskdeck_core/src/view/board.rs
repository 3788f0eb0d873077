//! Board view model.
//!
//! # Responsibility
//! - Partition tasks into active/completed lists with counts.
//! - Compute per-task display fields (category label, deadline text, overdue).
//!
//! # Invariants
//! - Derivation is pure: same tasks and `now` always give the same board.
//! - Insertion order is preserved within each partition.
//! - Completed tasks are never overdue.

use crate::model::task::{Category, Deadline, Task, TaskId};
use chrono::NaiveDateTime;
use serde::Serialize;

pub const EMPTY_ACTIVE_MESSAGE: &str = "No active tasks. Add one above!";
pub const EMPTY_COMPLETED_MESSAGE: &str = "No completed tasks yet.";

/// Display record for one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskCard {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    pub category: Category,
    pub category_label: &'static str,
    pub category_class: &'static str,
    pub deadline: Option<Deadline>,
    /// Empty when the task has no deadline.
    pub deadline_display: String,
    pub is_overdue: bool,
}

impl TaskCard {
    pub fn from_task(task: &Task, now: NaiveDateTime) -> Self {
        Self {
            id: task.id.clone(),
            text: task.text.clone(),
            completed: task.completed,
            category: task.category,
            category_label: task.category.label(),
            category_class: task.category.style_class(),
            deadline: task.deadline,
            deadline_display: task
                .deadline
                .map(|deadline| deadline.display())
                .unwrap_or_default(),
            is_overdue: task.is_overdue(now),
        }
    }

    pub fn has_deadline(&self) -> bool {
        self.deadline.is_some()
    }
}

/// Body of one list: either a placeholder or the task cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PartitionBody {
    Empty { message: &'static str },
    Items { cards: Vec<TaskCard> },
}

/// One rendered list with its count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partition {
    pub count: usize,
    pub body: PartitionBody,
}

impl Partition {
    fn build(cards: Vec<TaskCard>, empty_message: &'static str) -> Self {
        let count = cards.len();
        let body = if cards.is_empty() {
            PartitionBody::Empty {
                message: empty_message,
            }
        } else {
            PartitionBody::Items { cards }
        };
        Self { count, body }
    }

    /// Cards in display order; empty for the placeholder.
    pub fn cards(&self) -> &[TaskCard] {
        match &self.body {
            PartitionBody::Empty { .. } => &[],
            PartitionBody::Items { cards } => cards.as_slice(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Full two-list view derived from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    pub active: Partition,
    pub completed: Partition,
}

impl BoardView {
    pub fn active_count(&self) -> usize {
        self.active.count
    }

    pub fn completed_count(&self) -> usize {
        self.completed.count
    }
}

/// Derives the board from a task snapshot at time `now`.
pub fn render_board(tasks: &[Task], now: NaiveDateTime) -> BoardView {
    let (completed, active): (Vec<&Task>, Vec<&Task>) =
        tasks.iter().partition(|task| task.completed);

    let to_cards = |tasks: Vec<&Task>| -> Vec<TaskCard> {
        tasks
            .into_iter()
            .map(|task| TaskCard::from_task(task, now))
            .collect()
    };

    BoardView {
        active: Partition::build(to_cards(active), EMPTY_ACTIVE_MESSAGE),
        completed: Partition::build(to_cards(completed), EMPTY_COMPLETED_MESSAGE),
    }
}
