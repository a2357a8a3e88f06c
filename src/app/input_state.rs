use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};
use tui_textarea::TextArea;

/// Single-line question input backed by a TextArea.
pub struct InputState {
    pub textarea: TextArea<'static>,
}

impl InputState {
    pub fn new() -> Self {
        let mut textarea = TextArea::default();
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Ask a question "),
        );
        textarea.set_cursor_line_style(Style::default());
        textarea.set_placeholder_text("Ask a question…");
        Self { textarea }
    }

    pub fn text(&self) -> &str {
        self.textarea.lines()[0].as_ref()
    }

    pub fn clear(&mut self) {
        self.textarea.select_all();
        self.textarea.cut();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
