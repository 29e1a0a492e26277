//! # Command-Line Interface
//!
//! User-facing commands and output formatting.
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `tui` (default) | Interactive to-do list with an input form |
//! | `run [FILE]` | Execute a session script against a fresh queue |
//! | `config` | Show the effective configuration |
//!
//! ## Output Formats
//!
//! `run` and `config` support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON, one document per line
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! todoq --verbose run tasks.txt
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod session;
mod tui;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
