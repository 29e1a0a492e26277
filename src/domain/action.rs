//! Discrete user actions and their outcomes
//!
//! Front ends translate their input into an [`Action`] and hand it to
//! [`TaskStore::apply`].

use serde::Serialize;

use super::store::{EnqueueError, Enqueued, TaskStore};
use super::task::{Task, TaskDraft};

/// A store mutation requested by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Enqueue(TaskDraft),
    Dequeue,
}

/// What an applied action did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "task", rename_all = "snake_case")]
pub enum Outcome {
    Created(Task),
    Merged(Task),
    Completed(Task),
    NothingPending,
}

impl Outcome {
    /// Short label for status lines and JSON output
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Created(_) => "created",
            Outcome::Merged(_) => "merged",
            Outcome::Completed(_) => "completed",
            Outcome::NothingPending => "nothing_pending",
        }
    }

    pub fn task(&self) -> Option<&Task> {
        match self {
            Outcome::Created(t) | Outcome::Merged(t) | Outcome::Completed(t) => Some(t),
            Outcome::NothingPending => None,
        }
    }
}

impl From<Enqueued> for Outcome {
    fn from(enqueued: Enqueued) -> Self {
        match enqueued {
            Enqueued::Created(t) => Outcome::Created(t),
            Enqueued::Merged(t) => Outcome::Merged(t),
        }
    }
}

impl TaskStore {
    /// Runs an action against the store
    pub fn apply(&mut self, action: &Action) -> Result<Outcome, EnqueueError> {
        match action {
            Action::Enqueue(draft) => self.enqueue(draft).map(Outcome::from),
            Action::Dequeue => Ok(self
                .dequeue()
                .map(Outcome::Completed)
                .unwrap_or(Outcome::NothingPending)),
        }
    }
}
