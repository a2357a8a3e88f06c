//! Progressive answer reveal
//!
//! The answer text is fully known before the reveal begins; the
//! controller discloses it a few characters per tick so the exchange
//! reads like live output. At most one reveal is active at a time, and
//! the follow-up suggestions for a message are computed exactly once, on
//! the transition out of `Revealing`.
//!
//! Timer ticks are driven by the event loop: `tick_due` tells the loop
//! when to call `tick`, and `next_deadline` bounds its poll timeout.
//! Tests call `tick` directly.

use std::time::{Duration, Instant};

use crate::chat::{MessageState, MessageStore};
use crate::suggest::SuggestionEngine;

/// Delay between reveal ticks.
pub const REVEAL_INTERVAL: Duration = Duration::from_millis(8);

/// Characters disclosed per tick.
pub const REVEAL_STEP: usize = 2;

struct ActiveReveal {
    message_id: u64,
    question: String,
    full_text: String,
    total_chars: usize,
    revealed: usize,
    next_tick: Instant,
}

#[derive(Default)]
pub struct StreamController {
    active: Option<ActiveReveal>,
}

impl StreamController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins revealing `full_text` into the given message. Any reveal
    /// still active is dropped without finalizing: the superseded message
    /// keeps its partial text and never receives suggestions.
    pub fn start(
        &mut self,
        store: &mut MessageStore,
        engine: &mut SuggestionEngine,
        message_id: u64,
        question: &str,
        full_text: &str,
    ) {
        self.active = None;

        let Some(message) = store.get_mut(message_id) else {
            log::debug!("reveal target {} not in store", message_id);
            return;
        };
        message.state = MessageState::Revealing;
        message.text = Some(full_text.to_string());
        message.revealed = 0;

        let total_chars = full_text.chars().count();
        if total_chars == 0 {
            // Nothing to disclose; finalize in zero ticks
            let suggestions = engine.select_suggestions(question, full_text);
            if let Some(message) = store.get_mut(message_id) {
                message.state = MessageState::Completed;
                message.suggestions = suggestions;
            }
            return;
        }

        self.active = Some(ActiveReveal {
            message_id,
            question: question.to_string(),
            full_text: full_text.to_string(),
            total_chars,
            revealed: 0,
            next_tick: Instant::now() + REVEAL_INTERVAL,
        });
    }

    /// Advances the active reveal by one step. On reaching the end of the
    /// text the message is completed and its suggestions are computed from
    /// the full answer. Returns true when anything changed.
    pub fn tick(&mut self, store: &mut MessageStore, engine: &mut SuggestionEngine) -> bool {
        let Some(mut active) = self.active.take() else {
            return false;
        };

        active.revealed = (active.revealed + REVEAL_STEP).min(active.total_chars);
        if let Some(message) = store.get_mut(active.message_id) {
            message.revealed = active.revealed;
        }

        if active.revealed >= active.total_chars {
            let suggestions = engine.select_suggestions(&active.question, &active.full_text);
            if let Some(message) = store.get_mut(active.message_id) {
                message.state = MessageState::Completed;
                message.suggestions = suggestions;
            }
        } else {
            active.next_tick = Instant::now() + REVEAL_INTERVAL;
            self.active = Some(active);
        }
        true
    }

    /// Cancels the active reveal and finalizes its message as stopped.
    /// Suggestions are computed from the prefix revealed so far, not the
    /// full answer. No-op when nothing is revealing.
    pub fn stop(&mut self, store: &mut MessageStore, engine: &mut SuggestionEngine) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };

        let prefix: String = active.full_text.chars().take(active.revealed).collect();
        let suggestions = engine.select_suggestions(&active.question, &prefix);
        if let Some(message) = store.get_mut(active.message_id) {
            message.state = MessageState::Stopped;
            message.suggestions = suggestions;
        }
        true
    }

    /// Drops the active reveal without finalizing it (conversation reset).
    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_message_id(&self) -> Option<u64> {
        self.active.as_ref().map(|a| a.message_id)
    }

    /// Whether the next tick is due at `now`.
    pub fn tick_due(&self, now: Instant) -> bool {
        self.active.as_ref().is_some_and(|a| now >= a.next_tick)
    }

    /// Deadline of the next tick, for event-loop poll timeouts.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.active.as_ref().map(|a| a.next_tick)
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod controller_tests;
