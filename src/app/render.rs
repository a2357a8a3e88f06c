//! Chat rendering
//!
//! Presentation only: a bordered scrollable conversation pane over the
//! input bar. The reveal state is read straight off the messages; nothing
//! here mutates engine or stream state.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::state::App;
use crate::chat::{Message, MessageState, Role};

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        let chunks =
            Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).split(frame.area());
        self.render_chat(frame, chunks[0]);
        frame.render_widget(&self.input.textarea, chunks[1]);
    }

    fn render_chat(&mut self, frame: &mut Frame, area: Rect) {
        let width = area.width.saturating_sub(2).max(1) as usize;
        let latest_suggesting = self.store.last_suggesting().map(|m| m.id);

        let mut lines: Vec<Line> = Vec::new();
        for message in self.store.messages() {
            render_message(&mut lines, message, width, latest_suggesting);
            lines.push(Line::default());
        }

        let viewport = area.height.saturating_sub(2);
        let total = lines.len() as u16;
        self.max_scroll = total.saturating_sub(viewport);
        if self.scroll_from_bottom > self.max_scroll {
            self.scroll_from_bottom = self.max_scroll;
        }
        let offset = self.max_scroll - self.scroll_from_bottom;

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Conversation "))
            .scroll((offset, 0));
        frame.render_widget(paragraph, area);
    }
}

fn render_message(
    lines: &mut Vec<Line<'_>>,
    message: &Message,
    width: usize,
    latest_suggesting: Option<u64>,
) {
    match message.role {
        Role::User => {
            lines.push(Line::from(Span::styled(
                "You",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )));
            for row in wrap_text(&message.visible_text(), width) {
                lines.push(Line::from(row));
            }
        }
        Role::Assistant => {
            lines.push(Line::from(Span::styled(
                "Assistant",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
            if message.state == MessageState::Pending {
                lines.push(Line::from(Span::styled(
                    "· · ·",
                    Style::default().add_modifier(Modifier::DIM),
                )));
            } else {
                for row in wrap_text(&message.visible_text(), width) {
                    lines.push(Line::from(row));
                }
            }
            if message.state.is_terminal() && !message.suggestions.is_empty() {
                // Only the newest trio is addressable via Alt+1..3
                let numbered = Some(message.id) == latest_suggesting;
                for (i, suggestion) in message.suggestions.iter().enumerate() {
                    let label = if numbered {
                        format!("[{}] {}", i + 1, suggestion)
                    } else {
                        format!("    {}", suggestion)
                    };
                    lines.push(Line::from(Span::styled(
                        label,
                        Style::default().fg(Color::Yellow),
                    )));
                }
            }
        }
    }
}

/// Word-wraps text to the viewport width, counting chars. Words wider
/// than the viewport are hard-split so nothing disappears off-screen.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();

    for raw_line in text.split('\n') {
        let rows_before = rows.len();
        let mut current = String::new();
        let mut current_len = 0usize;

        for word in raw_line.split_whitespace() {
            let mut word = word.to_string();
            let mut word_len = word.chars().count();

            while word_len > width {
                if current_len > 0 {
                    rows.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let head: String = word.chars().take(width).collect();
                word = word.chars().skip(width).collect();
                word_len = word.chars().count();
                rows.push(head);
            }
            if word.is_empty() {
                continue;
            }

            if current_len == 0 {
                current = word;
                current_len = word_len;
            } else if current_len + 1 + word_len <= width {
                current.push(' ');
                current.push_str(&word);
                current_len += 1 + word_len;
            } else {
                rows.push(std::mem::take(&mut current));
                current = word;
                current_len = word_len;
            }
        }

        if !current.is_empty() || rows.len() == rows_before {
            rows.push(current);
        }
    }
    rows
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
