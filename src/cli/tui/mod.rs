//! Interactive TUI for the to-do queue
//!
//! A single screen with the pending and completed tables, live counters,
//! and an input form, built on ratatui.

mod app;
mod event;
mod ui;
mod utils;
mod views;

use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use anyhow::{anyhow, Result};

use super::Output;
use crate::config::Config;
use app::App;
use event::EventHandler;

/// Launch the TUI
pub fn run(output: &Output, config: Config) -> Result<()> {
    output.verbose_ctx("tui", "Initializing TUI application");

    let tick_rate = Duration::from_millis(config.tick_rate_ms);
    let mut app = App::new(config);
    let mut terminal = ui::init_terminal()?;
    let event_handler = EventHandler::new(tick_rate);

    // The terminal must be restored even if the loop panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        app.run(&mut terminal, event_handler)
    }));

    let restore_result = ui::restore_terminal();

    match result {
        Ok(inner_result) => {
            restore_result?;
            inner_result?;
        }
        Err(panic_payload) => {
            let _ = restore_result;
            return Err(if let Some(s) = panic_payload.downcast_ref::<&str>() {
                anyhow!("TUI panicked: {}", s)
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                anyhow!("TUI panicked: {}", s)
            } else {
                anyhow!("TUI panicked with unknown error")
            });
        }
    }

    let counts = app.store().counts();
    output.verbose_ctx(
        "tui",
        &format!(
            "Session ended after {} changes: {} remaining, {} completed",
            app.store().revision(),
            counts.remaining,
            counts.completed
        ),
    );
    Ok(())
}
