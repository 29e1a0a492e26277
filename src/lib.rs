//! todo-queue - a terminal to-do list
//!
//! Tasks are enqueued with a name, a category and a length in hours, and
//! dequeued in order into a completed list. Due dates and completion times
//! are computed automatically. State lives for one session only.

pub mod cli;
pub mod config;
pub mod domain;

pub use config::{Config, ConfigError};
pub use domain::{Action, EnqueueError, Outcome, Task, TaskDraft, TaskStore, ValidationError};
