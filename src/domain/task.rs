//! Task domain model
//!
//! A task is a named, categorized block of work with a duration in hours.
//! Its due date is derived from the creation time and the duration.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a task draft cannot become a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing name")]
    MissingName,

    #[error("missing type")]
    MissingType,

    #[error("missing length")]
    MissingLength,

    #[error("length must be at least one hour")]
    InvalidLength,

    #[error("length puts the due date out of range")]
    DueOutOfRange,
}

/// Unvalidated task input, as collected from a form or a command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub name: String,
    pub task_type: Option<String>,
    pub length_hours: Option<u32>,
}

impl TaskDraft {
    /// Creates a fully populated draft
    pub fn new(name: impl Into<String>, task_type: impl Into<String>, length_hours: u32) -> Self {
        Self {
            name: name.into(),
            task_type: Some(task_type.into()),
            length_hours: Some(length_hours),
        }
    }

    /// Checks the draft field by field; the first missing field wins.
    ///
    /// A name made only of whitespace is accepted.
    pub fn validate(&self) -> Result<ValidTask<'_>, ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        let task_type = self
            .task_type
            .as_deref()
            .ok_or(ValidationError::MissingType)?;
        let length_hours = self.length_hours.ok_or(ValidationError::MissingLength)?;
        if length_hours == 0 {
            return Err(ValidationError::InvalidLength);
        }

        Ok(ValidTask {
            name: &self.name,
            task_type,
            length_hours,
        })
    }
}

/// Borrowed view of a draft that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidTask<'a> {
    pub name: &'a str,
    pub task_type: &'a str,
    pub length_hours: u32,
}

/// A pending or completed task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Name shown in the lists
    pub name: String,

    /// Category, e.g. "Study"
    #[serde(rename = "type")]
    pub task_type: String,

    /// When the task was enqueued
    pub created_at: DateTime<Utc>,

    /// Duration the task was created with
    pub length_hours: u32,

    /// When the task is due
    pub due_at: DateTime<Utc>,

    /// When the task was dequeued (completed tasks only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a pending task due `length_hours` after `created_at`
    pub fn new(
        name: impl Into<String>,
        task_type: impl Into<String>,
        created_at: DateTime<Utc>,
        length_hours: u32,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: name.into(),
            task_type: task_type.into(),
            created_at,
            length_hours,
            due_at: due_from(created_at, length_hours)?,
            completed_at: None,
        })
    }

    /// Moves the due date to `length_hours` after creation.
    ///
    /// `length_hours` itself is not updated. On error the task is unchanged.
    pub fn reschedule(&mut self, length_hours: u32) -> Result<(), ValidationError> {
        self.due_at = due_from(self.created_at, length_hours)?;
        Ok(())
    }

    /// Returns a completed copy stamped with `at`
    pub fn completed(&self, at: DateTime<Utc>) -> Self {
        Self {
            completed_at: Some(at),
            ..self.clone()
        }
    }
}

fn due_from(
    created_at: DateTime<Utc>,
    length_hours: u32,
) -> Result<DateTime<Utc>, ValidationError> {
    Duration::try_hours(i64::from(length_hours))
        .and_then(|length| created_at.checked_add_signed(length))
        .ok_or(ValidationError::DueOutOfRange)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, hour, 0, 0).unwrap()
    }

    #[test]
    fn new_task_is_due_after_length() {
        let task = Task::new("Essay", "Study", at(9), 3).unwrap();

        assert_eq!(task.due_at, at(12));
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn reschedule_keeps_created_at_and_length() {
        let mut task = Task::new("Essay", "Study", at(9), 3).unwrap();
        task.reschedule(5).unwrap();

        assert_eq!(task.created_at, at(9));
        assert_eq!(task.due_at, at(14));
        assert_eq!(task.length_hours, 3);
    }

    #[test]
    fn due_date_past_calendar_end_is_rejected() {
        assert_eq!(
            Task::new("Forever", "Sleep", at(9), u32::MAX),
            Err(ValidationError::DueOutOfRange)
        );
    }

    #[test]
    fn failed_reschedule_leaves_task_alone() {
        let mut task = Task::new("Essay", "Study", at(9), 3).unwrap();

        assert_eq!(
            task.reschedule(u32::MAX),
            Err(ValidationError::DueOutOfRange)
        );
        assert_eq!(task.due_at, at(12));
    }

    #[test]
    fn completed_copy_keeps_fields() {
        let task = Task::new("Groceries", "Shop", at(9), 1).unwrap();
        let done = task.completed(at(11));

        assert_eq!(done.name, task.name);
        assert_eq!(done.task_type, task.task_type);
        assert_eq!(done.due_at, task.due_at);
        assert_eq!(done.completed_at, Some(at(11)));
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn validation_order_name_first() {
        let draft = TaskDraft::default();
        assert_eq!(draft.validate(), Err(ValidationError::MissingName));
    }

    #[test]
    fn validation_order_type_before_length() {
        let draft = TaskDraft {
            name: "Essay".to_string(),
            task_type: None,
            length_hours: None,
        };
        assert_eq!(draft.validate(), Err(ValidationError::MissingType));
    }

    #[test]
    fn validation_missing_length() {
        let draft = TaskDraft {
            name: "Essay".to_string(),
            task_type: Some("Study".to_string()),
            length_hours: None,
        };
        assert_eq!(draft.validate(), Err(ValidationError::MissingLength));
    }

    #[test]
    fn validation_rejects_zero_length() {
        let draft = TaskDraft::new("Essay", "Study", 0);
        assert_eq!(draft.validate(), Err(ValidationError::InvalidLength));
    }

    #[test]
    fn validation_accepts_any_type_string() {
        let draft = TaskDraft::new("Nap", "Relax", 1);
        let valid = draft.validate().unwrap();

        assert_eq!(valid.task_type, "Relax");
        assert_eq!(valid.length_hours, 1);
    }

    #[test]
    fn whitespace_name_is_accepted() {
        let draft = TaskDraft::new("   ", "Cook", 2);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn serde_uses_type_key() {
        let task = Task::new("Essay", "Study", at(9), 3).unwrap();
        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(json["type"], "Study");
        assert!(json.get("completed_at").is_none());

        let parsed: Task = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, task);
    }
}
