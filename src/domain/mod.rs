//! Domain models for the to-do queue
//!
//! Contains the core business logic without any I/O concerns.

mod action;
mod store;
mod task;

pub use action::{Action, Outcome};
pub use store::{Counts, EnqueueError, Enqueued, TaskStore};
pub use task::{Task, TaskDraft, ValidTask, ValidationError};
