//! Interactive terminal UI for sorting sessions
//!
//! Shows the current pair side by side using ratatui and answers with the
//! arrow keys, the configured keys, or a mouse click.

mod app;
mod event;
mod ui;
mod utils;
mod views;

use std::panic::{self, AssertUnwindSafe};

use anyhow::{anyhow, Result};

use super::Output;
use crate::domain::{sort_with, OrderEngine, SortOutcome};
use crate::storage::Config;
use app::CompareApp;
use event::EventHandler;

/// Run a sorting session in the terminal UI
pub fn run(engine: &mut OrderEngine, config: &Config, output: &Output) -> Result<SortOutcome> {
    output.verbose_ctx("tui", "Initializing terminal UI");

    // Initialize terminal
    let terminal = ui::init_terminal()?;

    // Create event handler
    let event_handler = EventHandler::new(250);

    let mut app = CompareApp::new(
        terminal,
        event_handler,
        config.keys.clone(),
        config.display.show_progress,
    );

    // Run the session with panic safety
    // This ensures terminal is restored even if the app panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| sort_with(engine, &mut app)));

    // Always restore terminal, even on panic
    let restore_result = ui::restore_terminal();

    // Handle the result
    match result {
        Ok(inner_result) => {
            restore_result?;
            Ok(inner_result?)
        }
        Err(panic_payload) => {
            // Terminal restore is best effort here; the panic is the real error
            let _ = restore_result;
            if let Some(s) = panic_payload.downcast_ref::<&str>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else {
                Err(anyhow!("TUI panicked with unknown error"))
            }
        }
    }
}
