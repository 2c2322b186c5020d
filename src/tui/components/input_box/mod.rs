//! # InputBox Component
//!
//! Single-line text entry used for chat messages and for pasting the
//! sign-in callback address. Long input wraps onto extra rows.
//!
//! ## State Management
//!
//! The buffer and cursor are internal state. `disabled` is a prop: while set,
//! Enter does nothing and the text is kept.

mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use text_wrap::{
    CONTENT_OFFSET, MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, cursor_row_col, inner_width,
    next_char_boundary, prev_char_boundary, wrap_hard,
};

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed)
    Submit(String),
    /// Text or cursor changed
    ContentChanged,
}

pub struct InputBox {
    buffer: String,
    /// Byte offset into `buffer`
    cursor: usize,
    title: &'static str,
    placeholder: &'static str,
    /// Prop: set while a reply is pending
    pub disabled: bool,
}

impl InputBox {
    pub fn new(title: &'static str, placeholder: &'static str) -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            title,
            placeholder,
            disabled: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Whether Enter would submit right now.
    pub fn can_submit(&self) -> bool {
        !self.disabled && !self.buffer.trim().is_empty()
    }

    /// Required height for the current buffer, clamped to the visible maximum.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        let width = inner_width(area_width);
        let rows = wrap_hard(&self.buffer, width).len() as u16;
        let (cursor_row, _) = cursor_row_col(&self.buffer, self.cursor, width);
        rows.max(cursor_row + 1).min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = inner_width(area.width);
        let (cursor_row, cursor_col) = cursor_row_col(&self.buffer, self.cursor, width);

        // Scroll so the cursor row stays visible
        let visible = area.height.saturating_sub(VERTICAL_OVERHEAD).max(1);
        let first_row = cursor_row.saturating_sub(visible - 1);

        let hint = if self.disabled {
            " waiting for reply… "
        } else if self.can_submit() {
            " Enter → send "
        } else {
            ""
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .padding(Padding::horizontal(1))
            .title(self.title)
            .title_bottom(Line::from(hint).right_aligned())
            .border_style(if self.disabled {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::Magenta)
            });

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(self.placeholder)
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
        } else {
            let lines: Vec<Line> = wrap_hard(&self.buffer, width)
                .into_iter()
                .skip(first_row as usize)
                .map(Line::from)
                .collect();
            Paragraph::new(lines).style(Style::default().fg(Color::White))
        };

        frame.render_widget(paragraph.block(block), area);

        let x = area.x + CONTENT_OFFSET + cursor_col;
        let y = area.y + 1 + (cursor_row - first_row);
        frame.set_cursor_position((x.min(area.right().saturating_sub(2)), y));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut tmp = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut tmp));
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Single-line field: fold pasted newlines into spaces
                let flat: String = text
                    .chars()
                    .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                    .collect();
                self.insert_str(&flat);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => (self.cursor != 0).then(|| {
                self.cursor = 0;
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor != self.buffer.len()).then(|| {
                self.cursor = self.buffer.len();
                InputEvent::ContentChanged
            }),
            TuiEvent::Submit => {
                if !self.can_submit() {
                    return None;
                }
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn chat_input() -> InputBox {
        InputBox::new("Ask", "Type a math expression or question...")
    }

    fn type_str(input: &mut InputBox, text: &str) {
        for c in text.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_handle_input() {
        let mut input = chat_input();

        assert_eq!(
            input.handle_event(&TuiEvent::InputChar('a')),
            Some(InputEvent::ContentChanged)
        );
        type_str(&mut input, "b");
        assert_eq!(input.buffer, "ab");

        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn test_cursor_editing_in_middle() {
        let mut input = chat_input();
        type_str(&mut input, "x+6=0");
        input.handle_event(&TuiEvent::CursorHome);
        type_str(&mut input, "2");
        assert_eq!(input.buffer, "2x+6=0");

        input.handle_event(&TuiEvent::CursorEnd);
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "2x+6=");
    }

    #[test]
    fn test_submit_takes_buffer() {
        let mut input = chat_input();
        type_str(&mut input, "what is 2+2?");

        match input.handle_event(&TuiEvent::Submit) {
            Some(InputEvent::Submit(text)) => assert_eq!(text, "what is 2+2?"),
            other => panic!("Expected Submit event, got {:?}", other),
        }
        assert!(input.buffer.is_empty(), "Buffer should be cleared after submit");
    }

    #[test]
    fn test_whitespace_does_not_submit() {
        let mut input = chat_input();
        type_str(&mut input, "   ");
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert_eq!(input.buffer, "   ");
    }

    #[test]
    fn test_disabled_keeps_text() {
        let mut input = chat_input();
        type_str(&mut input, "cube of 3");
        input.disabled = true;
        assert!(!input.can_submit());
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert_eq!(input.buffer, "cube of 3");
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut input = chat_input();
        input.handle_event(&TuiEvent::Paste("http://x/auth/success?\ntoken=abc".to_string()));
        assert_eq!(input.buffer, "http://x/auth/success? token=abc");
    }

    #[test]
    fn test_height_grows_and_clamps() {
        let mut input = chat_input();
        assert_eq!(input.calculate_height(24), 3);

        // 20 columns inside a 24-wide box: 39 chars fill two rows
        type_str(&mut input, &"a".repeat(39));
        assert_eq!(input.calculate_height(24), 4);

        type_str(&mut input, &"a".repeat(400));
        assert_eq!(input.calculate_height(24), MAX_VISIBLE_LINES + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_render_shows_placeholder() {
        let backend = TestBackend::new(50, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut input = chat_input();

        terminal.draw(|f| input.render(f, f.area())).unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer.content().iter().map(|c| c.symbol()).collect::<String>();
        assert!(text.contains("Type a math expression"));
    }
}
