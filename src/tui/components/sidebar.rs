//! # Sidebar Component
//!
//! Left column of the chat screen:
//!
//! ```text
//! ╭ Account ─────────╮
//! │ Guest User       │   identity card (or "Loading..." while resolving)
//! │ avatar: https:…  │
//! ╰──────────────────╯
//!  Ctrl+N  New Chat
//!  Recent Chats
//!   Linear Algebra…
//!     2 hours ago
//!  Ctrl+X  Logout
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::core::identity::UserIdentity;
use crate::core::state::RecentChat;
use crate::tui::component::Component;

pub const SIDEBAR_WIDTH: u16 = 32;

pub struct Sidebar<'a> {
    pub identity: Option<&'a UserIdentity>,
    pub recent_chats: &'a [RecentChat],
}

impl<'a> Sidebar<'a> {
    pub fn new(identity: Option<&'a UserIdentity>, recent_chats: &'a [RecentChat]) -> Self {
        Self {
            identity,
            recent_chats,
        }
    }

    fn identity_lines(&self) -> Vec<Line<'a>> {
        let dim = Style::default().fg(Color::DarkGray);
        match self.identity {
            None => vec![Line::from(Span::styled("Loading...", dim))],
            Some(user) => {
                let mut lines = vec![Line::from(Span::styled(
                    user.name.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                ))];
                if user.guest {
                    lines.push(Line::from(Span::styled("Not signed in", dim)));
                } else if let Some(email) = &user.email {
                    lines.push(Line::from(Span::styled(email.as_str(), dim)));
                }
                lines.push(Line::from(Span::styled(user.avatar_url.as_str(), dim)));
                lines
            }
        }
    }
}

impl<'a> Component for Sidebar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let key = Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD);
        let dim = Style::default().fg(Color::DarkGray);

        let frame_block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(dim);
        let inner = frame_block.inner(area);
        frame.render_widget(frame_block, area);

        let [card_area, new_chat_area, history_area, logout_area] = Layout::vertical([
            Constraint::Length(5),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        let card = Paragraph::new(self.identity_lines()).block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(dim)
                .title(" Account "),
        );
        frame.render_widget(card, card_area);

        frame.render_widget(
            Line::from(vec![Span::styled(" Ctrl+N", key), Span::raw("  New Chat")]),
            new_chat_area,
        );

        let mut history = vec![Line::from(Span::styled(
            " Recent Chats",
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        for chat in self.recent_chats {
            history.push(Line::from(format!("  {}", chat.title)));
            history.push(Line::from(Span::styled(format!("    {}", chat.timestamp), dim)));
        }
        frame.render_widget(Paragraph::new(history), history_area);

        frame.render_widget(
            Line::from(vec![Span::styled(" Ctrl+X", key), Span::raw("  Logout")]),
            logout_area,
        );
    }
}
