//! Conversation message entity

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// Lifecycle of an assistant message. User messages are born `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageState {
    /// Waiting for the answer service
    Pending,
    /// Answer known, being progressively revealed
    Revealing,
    Completed,
    Stopped,
}

impl MessageState {
    /// Completed and Stopped are terminal; no further mutation happens.
    pub fn is_terminal(&self) -> bool {
        matches!(self, MessageState::Completed | MessageState::Stopped)
    }
}

#[derive(Debug, Clone)]
pub struct Message {
    pub id: u64,
    pub role: Role,
    /// Final answer text; absent until the answer service resolves.
    pub text: Option<String>,
    /// Number of characters currently disclosed (chars, not bytes).
    pub revealed: usize,
    pub state: MessageState,
    /// Follow-up prompts, attached at most once on finalization.
    pub suggestions: Vec<String>,
}

impl Message {
    pub fn user(id: u64, text: &str) -> Self {
        Self {
            id,
            role: Role::User,
            text: Some(text.to_string()),
            revealed: text.chars().count(),
            state: MessageState::Completed,
            suggestions: Vec::new(),
        }
    }

    pub fn placeholder(id: u64) -> Self {
        Self {
            id,
            role: Role::Assistant,
            text: None,
            revealed: 0,
            state: MessageState::Pending,
            suggestions: Vec::new(),
        }
    }

    /// The portion of the text currently on screen: the full text once
    /// completed, otherwise the revealed prefix.
    pub fn visible_text(&self) -> String {
        let Some(text) = self.text.as_deref() else {
            return String::new();
        };
        match self.state {
            MessageState::Completed => text.to_string(),
            _ => text.chars().take(self.revealed).collect(),
        }
    }
}
