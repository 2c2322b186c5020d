//! # TitleBar Component
//!
//! Header row of the chat screen: product name, tagline and the current
//! status message.
//!
//! Purely presentational. All data comes in as props, so the same struct is
//! built fresh every frame:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(app.status_message.clone());
//! title_bar.render(frame, title_area);
//! ```
//!
//! Narrow terminals cut the line from the right, so the status goes last.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub const PRODUCT_NAME: &str = "FormulaVerse";
pub const TAGLINE: &str = "AI-Powered Mathematical Assistant";

pub struct TitleBar {
    /// Status message (e.g., "Thinking...", "Guest mode")
    pub status_message: String,
}

impl TitleBar {
    pub fn new(status_message: String) -> Self {
        Self { status_message }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                PRODUCT_NAME,
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" · "),
            Span::styled(TAGLINE, Style::default().fg(Color::Gray)),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                self.status_message.as_str(),
                Style::default().fg(Color::DarkGray),
            ));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
