//! TUI application state and input handling
//!
//! The app is an [`Oracle`]: each `choose` call redraws the current pair and
//! blocks on terminal events until the user picks a side or quits.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Position;

use super::event::{Event, EventHandler};
use super::ui::Terminal;
use super::views::compare::{self, CompareView, PanelAreas};
use crate::domain::{Choice, Decision, Oracle, OracleError, Pair, Progress};
use crate::storage::KeyConfig;

/// Maps a key press to a decision, if it is one
pub fn key_decision(key: &KeyEvent, keys: &KeyConfig) -> Option<Decision> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Decision::Abandon);
    }

    match key.code {
        KeyCode::Left | KeyCode::Char('1') => Some(Decision::Choose(Choice::First)),
        KeyCode::Right | KeyCode::Char('2') => Some(Decision::Choose(Choice::Second)),
        KeyCode::Char('q') | KeyCode::Esc => Some(Decision::Abandon),
        KeyCode::Char(c) if c == keys.first => Some(Decision::Choose(Choice::First)),
        KeyCode::Char(c) if c == keys.second => Some(Decision::Choose(Choice::Second)),
        _ => None,
    }
}

/// Maps a click position to the panel under it
pub fn click_decision(column: u16, row: u16, areas: &PanelAreas) -> Option<Decision> {
    let position = Position::new(column, row);
    if areas.first.contains(position) {
        Some(Decision::Choose(Choice::First))
    } else if areas.second.contains(position) {
        Some(Decision::Choose(Choice::Second))
    } else {
        None
    }
}

/// Application state
pub struct CompareApp {
    terminal: Terminal,
    events: EventHandler,
    keys: KeyConfig,
    show_progress: bool,

    /// Panel positions from the last draw
    areas: PanelAreas,

    /// Status message to display
    status_message: Option<String>,
}

impl CompareApp {
    pub fn new(
        terminal: Terminal,
        events: EventHandler,
        keys: KeyConfig,
        show_progress: bool,
    ) -> Self {
        Self {
            terminal,
            events,
            keys,
            show_progress,
            areas: PanelAreas::default(),
            status_message: None,
        }
    }

    fn draw(&mut self, pair: &Pair, progress: Progress) -> Result<(), OracleError> {
        let view = CompareView {
            pair,
            progress: self.show_progress.then_some(progress),
            keys: &self.keys,
            status: self.status_message.as_deref(),
        };

        let mut areas = PanelAreas::default();
        self.terminal
            .draw(|frame| areas = compare::draw(frame, &view))?;
        self.areas = areas;
        Ok(())
    }
}

impl Oracle for CompareApp {
    fn choose(&mut self, pair: &Pair, progress: Progress) -> Result<Decision, OracleError> {
        loop {
            self.draw(pair, progress)?;

            let decision = match self.events.next()? {
                Event::Key(key) => {
                    let decision = key_decision(&key, &self.keys);
                    if decision.is_none() {
                        self.status_message = Some(format!(
                            "Use ←/→, 1/2 or {}/{} to choose, q to quit",
                            self.keys.first, self.keys.second
                        ));
                    }
                    decision
                }
                Event::Click(column, row) => click_decision(column, row, &self.areas),
                Event::Resize | Event::Tick => None,
            };

            if let Some(decision) = decision {
                self.status_message = None;
                return Ok(decision);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_digits_choose() {
        let keys = KeyConfig::default();
        assert_eq!(
            key_decision(&press(KeyCode::Left), &keys),
            Some(Decision::Choose(Choice::First))
        );
        assert_eq!(
            key_decision(&press(KeyCode::Char('2')), &keys),
            Some(Decision::Choose(Choice::Second))
        );
    }

    #[test]
    fn configured_keys_choose() {
        let keys = KeyConfig {
            first: 'a',
            second: 'd',
        };
        assert_eq!(
            key_decision(&press(KeyCode::Char('a')), &keys),
            Some(Decision::Choose(Choice::First))
        );
        assert_eq!(
            key_decision(&press(KeyCode::Char('d')), &keys),
            Some(Decision::Choose(Choice::Second))
        );
        assert_eq!(key_decision(&press(KeyCode::Char('h')), &keys), None);
    }

    #[test]
    fn quit_keys_abandon() {
        let keys = KeyConfig::default();
        assert_eq!(
            key_decision(&press(KeyCode::Esc), &keys),
            Some(Decision::Abandon)
        );
        assert_eq!(
            key_decision(&press(KeyCode::Char('q')), &keys),
            Some(Decision::Abandon)
        );
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_decision(&ctrl_c, &keys), Some(Decision::Abandon));
    }

    #[test]
    fn clicks_hit_panels() {
        let areas = PanelAreas {
            first: Rect::new(0, 3, 40, 10),
            second: Rect::new(40, 3, 40, 10),
        };

        assert_eq!(
            click_decision(5, 5, &areas),
            Some(Decision::Choose(Choice::First))
        );
        assert_eq!(
            click_decision(79, 12, &areas),
            Some(Decision::Choose(Choice::Second))
        );
        assert_eq!(click_decision(10, 1, &areas), None);
    }
}
