//! Append-only conversation log
//!
//! Owns every message for the session. Messages are never removed
//! individually; `clear` discards the whole log on conversation reset.

use super::message::{Message, Role};

#[derive(Default)]
pub struct MessageStore {
    messages: Vec<Message>,
    next_id: u64,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a user message and returns its id.
    pub fn push_user(&mut self, text: &str) -> u64 {
        let id = self.alloc_id();
        self.messages.push(Message::user(id, text));
        id
    }

    /// Appends a pending assistant placeholder and returns its id.
    pub fn push_placeholder(&mut self) -> u64 {
        let id = self.alloc_id();
        self.messages.push(Message::placeholder(id));
        id
    }

    pub fn get(&self, id: u64) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Message> {
        self.messages.iter_mut().find(|m| m.id == id)
    }

    /// Most recent message satisfying the predicate.
    pub fn find_last(&self, predicate: impl Fn(&Message) -> bool) -> Option<&Message> {
        self.messages.iter().rev().find(|m| predicate(m))
    }

    /// Text of the most recent user message, if any.
    pub fn last_user_text(&self) -> Option<&str> {
        self.find_last(|m| m.role == Role::User)
            .and_then(|m| m.text.as_deref())
    }

    /// The most recent finalized assistant message carrying suggestions.
    pub fn last_suggesting(&self) -> Option<&Message> {
        self.find_last(|m| {
            m.role == Role::Assistant && m.state.is_terminal() && !m.suggestions.is_empty()
        })
    }

    /// Read-only ordered view for the renderer.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Discards the whole log (conversation reset).
    pub fn clear(&mut self) {
        self.messages.clear();
        self.next_id = 0;
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
