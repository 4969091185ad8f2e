//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and the draft submitted for creation.
//! - Provide the one mutation helper the UI exercises (completion toggle).
//!
//! # Invariants
//! - `id` is stable for the task lifetime and never assigned client-side.
//! - Updates replace the whole record; there is no partial-field update.

use serde::{Deserialize, Serialize};

/// Stable identifier assigned by the store at creation time.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = i64;

/// Fixed ordered category labels recognized by the application.
///
/// Rendering preserves this order; the list is a constant, not persisted and
/// not user-editable.
pub const DEFAULT_CATEGORIES: [&str; 3] = ["Важные", "Не срочные", "Личные"];

/// A persisted task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned primary key.
    pub id: TaskId,
    /// Non-empty display title. Enforced by the presentation layer before
    /// submission, not by the store.
    pub title: String,
    /// Optional free-form text; `None` and empty render identically.
    pub description: Option<String>,
    /// Plain label; one of the recognized categories at creation time.
    pub category: String,
    /// Completion flag, `false` at creation.
    pub is_completed: bool,
}

impl Task {
    /// Returns a copy of this task with the completion flag inverted.
    ///
    /// This is the only mutation the UI performs on an existing task; the
    /// copy is submitted as a full-record update.
    pub fn toggled(&self) -> Task {
        let mut task = self.clone();
        task.is_completed = !task.is_completed;
        task
    }
}

/// A task without identity, as submitted for creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
}

impl TaskDraft {
    /// Creates a draft; an empty description collapses to `None`.
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.filter(|text| !text.is_empty()),
            category: category.into(),
        }
    }

    /// Materializes the persisted record for a store-assigned id.
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            is_completed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskDraft};

    #[test]
    fn toggled_flips_only_completion() {
        let task = Task {
            id: 7,
            title: "Buy milk".to_string(),
            description: None,
            category: "Личные".to_string(),
            is_completed: false,
        };

        let toggled = task.toggled();
        assert!(toggled.is_completed);
        assert_eq!(toggled.id, task.id);
        assert_eq!(toggled.title, task.title);
        assert_eq!(toggled.category, task.category);
        assert_eq!(toggled.toggled(), task);
    }

    #[test]
    fn draft_collapses_empty_description() {
        let draft = TaskDraft::new("title", Some(String::new()), "Важные");
        assert_eq!(draft.description, None);

        let draft = TaskDraft::new("title", Some("details".to_string()), "Важные");
        assert_eq!(draft.description.as_deref(), Some("details"));
    }

    #[test]
    fn into_task_starts_uncompleted() {
        let task = TaskDraft::new("call home", None, "Личные").into_task(3);
        assert_eq!(task.id, 3);
        assert!(!task.is_completed);
    }
}
