//! Event handling
//!
//! Keybindings: Enter submits, Alt+1..3 submits a suggestion, Esc stops
//! the active reveal, Ctrl+L clears the conversation, Ctrl+C quits.

use std::io;
use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::state::App;
use crate::suggest::MAX_SUGGESTIONS;

impl App {
    /// Polls the terminal for at most `timeout` and dispatches one event.
    pub fn handle_events(&mut self, timeout: Duration) -> io::Result<()> {
        if !event::poll(timeout)? {
            return Ok(());
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Resize(_, _) => self.mark_dirty(),
            _ => {}
        }
        Ok(())
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('l') => {
                    self.clear_conversation();
                    return;
                }
                _ => {}
            }
        }

        // Direct suggestion submit (Alt+1..3)
        if key.modifiers.contains(KeyModifiers::ALT)
            && let KeyCode::Char(c) = key.code
            && let Some(digit) = c.to_digit(10)
        {
            if (1..=MAX_SUGGESTIONS as u32).contains(&digit) {
                self.submit_suggestion((digit - 1) as usize);
            }
            return;
        }

        match key.code {
            KeyCode::Enter => {
                let text = self.input.text().to_string();
                self.input.clear();
                self.submit(&text);
            }
            KeyCode::Esc => self.stop_reveal(),
            KeyCode::Up => self.scroll_up(1),
            KeyCode::Down => self.scroll_down(1),
            KeyCode::PageUp => self.scroll_up(10),
            KeyCode::PageDown => self.scroll_down(10),
            _ => {
                if self.input.textarea.input(key) {
                    self.mark_dirty();
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod events_tests;
