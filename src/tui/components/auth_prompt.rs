//! # AuthPrompt Component
//!
//! The auth-completion screen. A terminal can't receive the browser redirect,
//! so the user opens the login address, finishes sign-in, and pastes the
//! address they land on. The pasted text is submitted as
//! `Action::CallbackReceived`.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::tui::component::Component;
use crate::tui::components::input_box::InputBox;

pub const CALLBACK_PLACEHOLDER: &str = "http://localhost:3000/auth/success?token=...";

pub struct AuthPrompt<'a> {
    pub login_url: &'a str,
    pub status_message: &'a str,
    pub input: &'a mut InputBox,
}

impl<'a> AuthPrompt<'a> {
    pub fn new(login_url: &'a str, status_message: &'a str, input: &'a mut InputBox) -> Self {
        Self {
            login_url,
            status_message,
            input,
        }
    }
}

impl<'a> Component for AuthPrompt<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let accent = Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD);
        let lines = vec![
            Line::from(Span::styled("Sign in with Google", accent)),
            Line::from(""),
            Line::from("1. Open this address in your browser:"),
            Line::from(Span::styled(
                self.login_url,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
            )),
            Line::from("2. Finish signing in."),
            Line::from("3. Paste the address you land on below and press Enter."),
            Line::from(""),
            Line::from(Span::styled(
                self.status_message,
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                "Esc → back",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let width = area.width.min(80);
        let text_height = lines.len() as u16;
        let input_height = self.input.calculate_height(width);

        let [column] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);
        let [text_area, _, input_area] = Layout::vertical([
            Constraint::Length(text_height),
            Constraint::Length(1),
            Constraint::Length(input_height),
        ])
        .flex(Flex::Center)
        .areas(column);

        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            text_area,
        );
        self.input.render(frame, input_area);
    }
}
