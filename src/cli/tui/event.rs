//! Event handling for the TUI

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{
    self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseButton, MouseEventKind,
};

use crate::domain::OracleError;

/// Terminal events
#[derive(Debug)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Left mouse button pressed at (column, row)
    Click(u16, u16),
    /// Terminal resize event
    Resize,
    /// Tick event for periodic redraws
    Tick,
}

/// Handles terminal events in a separate thread
pub struct EventHandler {
    /// Event receiver
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate in milliseconds
    pub fn new(tick_rate_ms: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate_ms);
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || loop {
            // Poll for events with timeout
            let evt = if event::poll(tick_rate).unwrap_or(false) {
                match event::read() {
                    // Only key presses, not releases or repeats
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        Event::Key(key)
                    }
                    Ok(CrosstermEvent::Mouse(mouse))
                        if mouse.kind == MouseEventKind::Down(MouseButton::Left) =>
                    {
                        Event::Click(mouse.column, mouse.row)
                    }
                    Ok(CrosstermEvent::Resize(_, _)) => Event::Resize,
                    _ => continue,
                }
            } else {
                Event::Tick
            };

            // Receiver gone: the session is over
            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }

    /// Receive the next event (blocking)
    pub fn next(&self) -> Result<Event, OracleError> {
        self.rx
            .recv()
            .map_err(|_| OracleError::Other("terminal event stream closed".to_string()))
    }
}
