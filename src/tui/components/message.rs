use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::message::{ChatMessage, NETWORK_ERROR_NOTICE, Role};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders one transcript entry.
///
/// Created fresh each frame by `MessageList`. User messages are cyan,
/// assistant replies magenta, and the network-error notice red. The send
/// time is shown in the bottom border.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub message: &'a ChatMessage,
}

impl<'a> Message<'a> {
    pub fn new(message: &'a ChatMessage) -> Self {
        Self { message }
    }

    /// Height this message needs at `width`, without rendering it.
    ///
    /// The wrap options must match what `Paragraph` with `Wrap { trim: true }`
    /// does so the scroll math lines up with the drawn output.
    pub fn calculate_height(message: &ChatMessage, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }

        let content = message.text.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }

    fn label(&self) -> &'static str {
        match self.message.role {
            Role::User => " you ",
            Role::Assistant => " formulaverse ",
        }
    }

    fn style(&self) -> Style {
        match self.message.role {
            Role::User => Style::default().fg(Color::Cyan),
            Role::Assistant if self.message.text == NETWORK_ERROR_NOTICE => {
                Style::default().fg(Color::Red)
            }
            Role::Assistant => Style::default().fg(Color::Magenta),
        }
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = self.style();
        let timestamp = self.message.created_at.format(" %H:%M:%S ").to_string();

        let title = Line::from(self.label());
        let title = match self.message.role {
            Role::User => title.right_aligned(),
            Role::Assistant => title.left_aligned(),
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(style.add_modifier(Modifier::DIM))
            .title(title)
            .title_style(style.add_modifier(Modifier::BOLD))
            .title_bottom(Line::from(timestamp).right_aligned().style(Style::default().fg(Color::DarkGray)))
            .padding(Padding::horizontal(CONTENT_PAD_H));

        Paragraph::new(self.message.text.trim())
            .block(block)
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
