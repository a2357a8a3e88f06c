//! Application state and the submission flow
//!
//! Ties the conversation log, the suggestion engine, the reveal
//! controller, and the ask worker channels together. All mutation happens
//! on the UI thread; the worker only ever talks back over its channel.

use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::catalog;
use crate::chat::{MessageState, MessageStore};
use crate::config::Config;
use crate::service::{AskRequest, AskResponse};
use crate::stream::{REVEAL_INTERVAL, StreamController};
use crate::suggest::SuggestionEngine;

use super::input_state::InputState;

/// Shown in place of an answer when the service call did not complete.
pub const UNREACHABLE_FALLBACK: &str = "Unable to reach the server.";

/// An ask request awaiting its response.
struct InFlightAsk {
    request_id: u64,
    message_id: u64,
    question: String,
    cancel_token: CancellationToken,
}

pub struct App {
    pub input: InputState,
    pub store: MessageStore,
    pub engine: SuggestionEngine,
    pub stream: StreamController,
    pub should_quit: bool,
    /// Lines scrolled up from the bottom of the chat log (0 = following)
    pub scroll_from_bottom: u16,
    /// Upper bound for scrolling, refreshed during render
    pub max_scroll: u16,
    dirty: bool,
    request_tx: Option<Sender<AskRequest>>,
    response_rx: Option<Receiver<AskResponse>>,
    request_id: u64,
    in_flight: Option<InFlightAsk>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let prompts = catalog::session_catalog(Some(&config.catalog.prompts));
        Self {
            input: InputState::new(),
            store: MessageStore::new(),
            engine: SuggestionEngine::new(prompts),
            stream: StreamController::new(),
            should_quit: false,
            scroll_from_bottom: 0,
            max_scroll: 0,
            dirty: true,
            request_tx: None,
            response_rx: None,
            request_id: 0,
            in_flight: None,
        }
    }

    /// Wires up the ask worker channels.
    pub fn set_channels(&mut self, request_tx: Sender<AskRequest>, response_rx: Receiver<AskResponse>) {
        self.request_tx = Some(request_tx);
        self.response_rx = Some(response_rx);
    }

    /// Submits a question: marks consumed prompts, appends the user
    /// message and an assistant placeholder, and dispatches the ask.
    /// A new submission supersedes whatever is still revealing or pending.
    pub fn submit(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        self.engine.note_submission(text);

        self.stream.cancel();
        self.cancel_in_flight();

        self.store.push_user(text);
        let placeholder_id = self.store.push_placeholder();

        self.request_id = self.request_id.wrapping_add(1);
        let cancel_token = CancellationToken::new();
        let sent = self.request_tx.as_ref().is_some_and(|tx| {
            tx.send(AskRequest::Ask {
                question: text.to_string(),
                request_id: self.request_id,
                cancel_token: cancel_token.clone(),
            })
            .is_ok()
        });

        if sent {
            self.in_flight = Some(InFlightAsk {
                request_id: self.request_id,
                message_id: placeholder_id,
                question: text.to_string(),
                cancel_token,
            });
        } else {
            // No worker to ask; same outcome as an unreachable server
            self.finalize_unreachable(placeholder_id);
        }

        self.scroll_from_bottom = 0;
        self.mark_dirty();
    }

    /// Submits one of the currently offered follow-up suggestions.
    pub fn submit_suggestion(&mut self, index: usize) {
        let prompt = self
            .store
            .last_suggesting()
            .and_then(|m| m.suggestions.get(index))
            .cloned();
        if let Some(prompt) = prompt {
            self.submit(&prompt);
        }
    }

    /// Drains the worker response channel. Returns true if state changed.
    pub fn poll_answer_channel(&mut self) -> bool {
        if self.response_rx.is_none() {
            return false;
        }

        let mut responses = Vec::new();
        let mut disconnected = false;

        if let Some(ref rx) = self.response_rx {
            loop {
                match rx.try_recv() {
                    Ok(response) => responses.push(response),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        disconnected = true;
                        break;
                    }
                }
            }
        }

        let had_responses = !responses.is_empty();
        for response in responses {
            self.process_response(response);
        }

        if disconnected && let Some(in_flight) = self.in_flight.take() {
            log::error!("ask worker disconnected unexpectedly");
            self.finalize_unreachable(in_flight.message_id);
        }

        if had_responses || disconnected {
            self.mark_dirty();
        }
        had_responses || disconnected
    }

    /// Advances the reveal when its tick is due.
    pub fn drive_reveal(&mut self, now: Instant) {
        if self.stream.tick_due(now) && self.stream.tick(&mut self.store, &mut self.engine) {
            self.mark_dirty();
        }
    }

    /// Stops the active reveal, finalizing its message with suggestions
    /// computed from the revealed prefix.
    pub fn stop_reveal(&mut self) {
        if self.stream.stop(&mut self.store, &mut self.engine) {
            self.mark_dirty();
        }
    }

    /// Discards the conversation and restores session-start state.
    pub fn clear_conversation(&mut self) {
        self.stream.cancel();
        self.cancel_in_flight();
        self.store.clear();
        self.engine.reset();
        self.scroll_from_bottom = 0;
        self.max_scroll = 0;
        self.mark_dirty();
    }

    /// How long the event loop may sleep before something needs doing.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        if let Some(deadline) = self.stream.next_deadline() {
            return deadline.saturating_duration_since(now).min(REVEAL_INTERVAL);
        }
        if self.in_flight.is_some() {
            // Poll the response channel promptly while an ask is pending
            return Duration::from_millis(25);
        }
        Duration::from_millis(250)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn should_render(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_from_bottom = self
            .scroll_from_bottom
            .saturating_add(lines)
            .min(self.max_scroll);
        self.mark_dirty();
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(lines);
        self.mark_dirty();
    }

    fn process_response(&mut self, response: AskResponse) {
        match response {
            AskResponse::Answer { request_id, text } => {
                let Some(in_flight) = self.take_in_flight(request_id) else {
                    return;
                };
                self.stream.start(
                    &mut self.store,
                    &mut self.engine,
                    in_flight.message_id,
                    &in_flight.question,
                    &text,
                );
            }
            AskResponse::Failed { request_id, error } => {
                let Some(in_flight) = self.take_in_flight(request_id) else {
                    return;
                };
                log::error!("ask request {} failed: {}", request_id, error);
                self.finalize_unreachable(in_flight.message_id);
            }
            AskResponse::Cancelled { request_id } => {
                log::debug!("ask request {} cancelled", request_id);
            }
        }
    }

    /// Claims the in-flight ask matching this response id; stale ids from
    /// superseded requests are dropped.
    fn take_in_flight(&mut self, request_id: u64) -> Option<InFlightAsk> {
        match &self.in_flight {
            Some(in_flight) if in_flight.request_id == request_id => self.in_flight.take(),
            _ => {
                log::debug!("ignoring stale response for request {}", request_id);
                None
            }
        }
    }

    fn cancel_in_flight(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.cancel_token.cancel();
            // Its placeholder stays pending, frozen; a newer exchange owns
            // the conversation tail now.
        }
    }

    /// Finalizes a placeholder directly to completed with the fallback
    /// text. No reveal, no suggestions: there is no answer context.
    fn finalize_unreachable(&mut self, message_id: u64) {
        if let Some(message) = self.store.get_mut(message_id) {
            message.state = MessageState::Completed;
            message.text = Some(UNREACHABLE_FALLBACK.to_string());
            message.revealed = UNREACHABLE_FALLBACK.chars().count();
        }
        self.mark_dirty();
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod state_tests;
