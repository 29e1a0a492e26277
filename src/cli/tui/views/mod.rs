//! TUI views

pub mod queue;
