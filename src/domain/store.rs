//! In-memory task queue
//!
//! Holds the pending queue and the completed list for one session.
//! Nothing here touches the filesystem.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use super::task::{Task, TaskDraft, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnqueueError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("task already exists: {name}")]
    Duplicate { name: String },
}

/// Result of a successful enqueue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enqueued {
    /// A new task was appended to the queue
    Created(Task),
    /// An existing pending task got a new due date
    Merged(Task),
}

/// Live counters for the two lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub remaining: usize,
    pub completed: usize,
}

/// Pending queue plus completed list
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    pending: VecDeque<Task>,
    completed: Vec<Task>,
    revision: u64,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a draft using the current time
    pub fn enqueue(&mut self, draft: &TaskDraft) -> Result<Enqueued, EnqueueError> {
        self.enqueue_at(draft, Utc::now())
    }

    /// Enqueues a draft as of `now`.
    ///
    /// Only the first pending task with the same name is considered. Same
    /// type with a different length reschedules that task; any other name
    /// match is a duplicate.
    pub fn enqueue_at(
        &mut self,
        draft: &TaskDraft,
        now: DateTime<Utc>,
    ) -> Result<Enqueued, EnqueueError> {
        let valid = draft.validate()?;

        let Some(index) = self.pending.iter().position(|t| t.name == valid.name) else {
            let task = Task::new(valid.name, valid.task_type, now, valid.length_hours)?;
            self.pending.push_back(task.clone());
            self.revision += 1;
            return Ok(Enqueued::Created(task));
        };

        let existing = &mut self.pending[index];
        if existing.task_type != valid.task_type || existing.length_hours == valid.length_hours {
            return Err(EnqueueError::Duplicate {
                name: existing.name.clone(),
            });
        }

        existing.reschedule(valid.length_hours)?;
        let merged = existing.clone();
        self.revision += 1;
        Ok(Enqueued::Merged(merged))
    }

    /// Completes the front task using the current time
    pub fn dequeue(&mut self) -> Option<Task> {
        self.dequeue_at(Utc::now())
    }

    /// Moves the front pending task to the completed list, stamped with `now`.
    ///
    /// Returns `None` and changes nothing when the queue is empty.
    pub fn dequeue_at(&mut self, now: DateTime<Utc>) -> Option<Task> {
        let front = self.pending.pop_front()?;
        let done = front.completed(now);
        self.completed.push(done.clone());
        self.revision += 1;
        Some(done)
    }

    /// Pending tasks in queue order
    pub fn pending(&self) -> &VecDeque<Task> {
        &self.pending
    }

    /// Completed tasks in completion order
    pub fn completed(&self) -> &[Task] {
        &self.completed
    }

    pub fn counts(&self) -> Counts {
        Counts {
            remaining: self.pending.len(),
            completed: self.completed.len(),
        }
    }

    /// Increments on every successful mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns true if neither list holds a task
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.completed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 0, 0).unwrap()
    }

    fn draft(name: &str, task_type: &str, hours: u32) -> TaskDraft {
        TaskDraft::new(name, task_type, hours)
    }

    #[test]
    fn enqueue_appends_new_task() {
        let mut store = TaskStore::new();

        let result = store.enqueue_at(&draft("Essay", "Study", 3), t0()).unwrap();

        assert!(matches!(result, Enqueued::Created(_)));
        assert_eq!(store.pending().len(), 1);
        assert!(store.completed().is_empty());
        assert_eq!(store.pending()[0].due_at, t0() + Duration::hours(3));
        assert!(store.pending()[0].completed_at.is_none());
    }

    #[test]
    fn enqueue_keeps_insertion_order() {
        let mut store = TaskStore::new();
        store.enqueue_at(&draft("A", "Study", 1), t0()).unwrap();
        store.enqueue_at(&draft("B", "Shop", 2), t0()).unwrap();
        store.enqueue_at(&draft("C", "Cook", 3), t0()).unwrap();

        let names: Vec<_> = store.pending().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn enqueue_same_name_type_length_is_duplicate() {
        let mut store = TaskStore::new();
        store.enqueue_at(&draft("Essay", "Study", 3), t0()).unwrap();
        let revision = store.revision();

        let err = store
            .enqueue_at(&draft("Essay", "Study", 3), t0() + Duration::minutes(5))
            .unwrap_err();

        assert_eq!(
            err,
            EnqueueError::Duplicate {
                name: "Essay".to_string()
            }
        );
        assert_eq!(store.pending().len(), 1);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn enqueue_different_length_merges() {
        let mut store = TaskStore::new();
        store.enqueue_at(&draft("Essay", "Study", 3), t0()).unwrap();

        let later = t0() + Duration::minutes(30);
        let result = store.enqueue_at(&draft("Essay", "Study", 5), later).unwrap();

        let Enqueued::Merged(task) = result else {
            panic!("expected merge");
        };
        assert_eq!(task.created_at, t0());
        assert_eq!(task.due_at, t0() + Duration::hours(5));
        assert_eq!(task.length_hours, 3);
        assert_eq!(store.pending().len(), 1);
        assert_eq!(store.pending()[0], task);
    }

    #[test]
    fn first_length_after_merge_is_duplicate() {
        let mut store = TaskStore::new();
        store.enqueue_at(&draft("Essay", "Study", 3), t0()).unwrap();
        store.enqueue_at(&draft("Essay", "Study", 5), t0()).unwrap();

        let err = store.enqueue_at(&draft("Essay", "Study", 3), t0()).unwrap_err();
        assert!(matches!(err, EnqueueError::Duplicate { .. }));
        assert_eq!(store.pending()[0].due_at, t0() + Duration::hours(5));
    }

    #[test]
    fn same_name_different_type_is_duplicate() {
        let mut store = TaskStore::new();
        store.enqueue_at(&draft("Dinner", "Cook", 2), t0()).unwrap();

        for hours in [1, 2, 5] {
            let err = store
                .enqueue_at(&draft("Dinner", "Shop", hours), t0())
                .unwrap_err();
            assert!(matches!(err, EnqueueError::Duplicate { .. }));
        }
        assert_eq!(store.pending().len(), 1);
        assert_eq!(store.pending()[0].task_type, "Cook");
    }

    #[test]
    fn validation_error_does_not_mutate() {
        let mut store = TaskStore::new();
        let bad = TaskDraft {
            name: "Essay".to_string(),
            task_type: None,
            length_hours: Some(3),
        };

        let err = store.enqueue_at(&bad, t0()).unwrap_err();

        assert_eq!(err, EnqueueError::Validation(ValidationError::MissingType));
        assert!(store.is_empty());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn out_of_range_due_date_is_rejected_on_create() {
        let mut store = TaskStore::new();

        let err = store
            .enqueue_at(&draft("Forever", "Sleep", u32::MAX), t0())
            .unwrap_err();

        assert_eq!(err, EnqueueError::Validation(ValidationError::DueOutOfRange));
        assert!(store.is_empty());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn out_of_range_due_date_is_rejected_on_merge() {
        let mut store = TaskStore::new();
        store.enqueue_at(&draft("Essay", "Study", 3), t0()).unwrap();
        let revision = store.revision();

        let err = store
            .enqueue_at(&draft("Essay", "Study", 2_500_000_000), t0())
            .unwrap_err();

        assert_eq!(err, EnqueueError::Validation(ValidationError::DueOutOfRange));
        assert_eq!(store.pending()[0].due_at, t0() + Duration::hours(3));
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn completed_name_can_be_enqueued_again() {
        let mut store = TaskStore::new();
        store.enqueue_at(&draft("Sleep", "Sleep", 5), t0()).unwrap();
        store.dequeue_at(t0()).unwrap();

        let result = store.enqueue_at(&draft("Sleep", "Sleep", 5), t0()).unwrap();
        assert!(matches!(result, Enqueued::Created(_)));
        assert_eq!(store.counts(), Counts { remaining: 1, completed: 1 });
    }

    #[test]
    fn dequeue_empty_is_noop() {
        let mut store = TaskStore::new();

        assert!(store.dequeue_at(t0()).is_none());
        assert_eq!(store.counts(), Counts::default());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn dequeue_moves_front_task() {
        let mut store = TaskStore::new();
        store.enqueue_at(&draft("First", "Study", 1), t0()).unwrap();
        store.enqueue_at(&draft("Second", "Shop", 2), t0()).unwrap();

        let done_at = t0() + Duration::hours(2);
        let done = store.dequeue_at(done_at).unwrap();

        assert_eq!(done.name, "First");
        assert_eq!(done.completed_at, Some(done_at));
        assert_eq!(store.pending().len(), 1);
        assert_eq!(store.pending()[0].name, "Second");
        assert_eq!(store.completed(), &[done]);
        assert!(!store.is_empty());
    }

    #[test]
    fn dequeue_with_wall_clock_stamps_after_creation() {
        let mut store = TaskStore::new();
        store.enqueue(&draft("Essay", "Study", 3)).unwrap();

        let done = store.dequeue().unwrap();
        let completed_at = done.completed_at.unwrap();
        assert!(completed_at >= done.created_at);
    }

    #[test]
    fn essay_scenario() {
        let mut store = TaskStore::new();

        store.enqueue_at(&draft("Essay", "Study", 3), t0()).unwrap();
        assert_eq!(store.pending().len(), 1);

        assert!(store.enqueue_at(&draft("Essay", "Study", 3), t0()).is_err());
        assert_eq!(store.pending().len(), 1);

        store.enqueue_at(&draft("Essay", "Study", 5), t0()).unwrap();
        assert_eq!(store.pending()[0].due_at, t0() + Duration::hours(5));

        let done = store.dequeue_at(t0() + Duration::hours(1)).unwrap();
        assert!(store.pending().is_empty());
        assert_eq!(store.completed().len(), 1);
        assert_eq!(done.name, "Essay");
        assert!(done.completed_at.is_some());
    }

    proptest! {
        #[test]
        fn unique_names_each_add_one(names in proptest::collection::hash_set("[a-z]{1,8}", 1..20)) {
            let mut store = TaskStore::new();
            for (i, name) in names.iter().enumerate() {
                let before = store.counts();
                store.enqueue_at(&draft(name, "Study", 1 + (i as u32 % 5)), t0()).unwrap();
                let after = store.counts();
                prop_assert_eq!(after.remaining, before.remaining + 1);
                prop_assert_eq!(after.completed, before.completed);
            }
        }

        #[test]
        fn dequeue_conserves_tasks(count in 0usize..10, dequeues in 0usize..15) {
            let mut store = TaskStore::new();
            for i in 0..count {
                store.enqueue_at(&draft(&format!("task-{}", i), "Cook", 2), t0()).unwrap();
            }
            for _ in 0..dequeues {
                store.dequeue_at(t0());
            }
            let counts = store.counts();
            prop_assert_eq!(counts.remaining + counts.completed, count);
            prop_assert_eq!(counts.completed, count.min(dequeues));
            prop_assert!(store.pending().iter().all(|t| t.completed_at.is_none()));
            prop_assert!(store.completed().iter().all(|t| t.completed_at.is_some()));
        }
    }
}
