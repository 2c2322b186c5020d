//! # MessageList Component
//!
//! Scrollable view of the transcript.
//!
//! - Empty transcript: a welcome panel with example questions.
//! - Pending reply: an animated typing indicator below the last message.
//! - Otherwise: messages stacked in a `ScrollView` that sticks to the bottom
//!   until the user scrolls up.
//!
//! `MessageList` is a transient component (created each frame) wrapping
//! `&'a mut MessageListState` (persistent state) and the transcript (props).

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::message::Transcript;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;

pub const EXAMPLE_QUESTIONS: &[&str] = &[
    "Solve x² + 5x + 6 = 0",
    "Explain derivatives",
    "What is the integral of sin(x)?",
];

/// Rows reserved under the last message for the typing indicator.
const TYPING_ROWS: u16 = 2;

/// Persistent scroll and layout state. Lives in `TuiState`.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    /// Cached per-message heights from the last render
    pub heights: Vec<u16>,
    /// Width the cached heights were computed for
    cached_width: u16,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            heights: Vec::new(),
            cached_width: 0,
            stick_to_bottom: true,
            viewport_height: 0,
        }
    }

    fn total_height(&self) -> u16 {
        self.heights.iter().sum()
    }

    fn max_offset(&self) -> u16 {
        self.total_height().saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }

    /// Re-engage auto-scroll once the user scrolls back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        if self.scroll_state.offset().y >= self.max_offset() {
            self.stick_to_bottom = true;
        }
    }

    /// Bring cached heights in line with the transcript. Heights of messages
    /// already measured at this width are reused.
    fn sync_layout(&mut self, transcript: &Transcript, width: u16) {
        let items = transcript.items();
        if width != self.cached_width || self.heights.len() > items.len() {
            self.heights.clear();
            self.cached_width = width;
        }
        for message in items.iter().skip(self.heights.len()) {
            self.heights.push(Message::calculate_height(message, width));
        }
    }
}

impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        let page = self.viewport_height.saturating_sub(2).max(1);
        match event {
            TuiEvent::ScrollUp => {
                self.stick_to_bottom = false;
                self.scroll_state.scroll_up();
            }
            TuiEvent::ScrollPageUp => {
                self.stick_to_bottom = false;
                for _ in 0..page {
                    self.scroll_state.scroll_up();
                }
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.clamp_scroll();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageDown => {
                for _ in 0..page {
                    self.scroll_state.scroll_down();
                }
                self.clamp_scroll();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
                self.scroll_state.scroll_to_bottom();
            }
            _ => return None,
        }
        Some(())
    }
}

pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub transcript: &'a Transcript,
    pub is_loading: bool,
    pub frame_index: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        transcript: &'a Transcript,
        is_loading: bool,
        frame_index: usize,
    ) -> Self {
        Self {
            state,
            transcript,
            is_loading,
            frame_index,
        }
    }

    fn render_welcome(frame: &mut Frame, area: Rect) {
        let accent = Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD);
        let mut lines = vec![
            Line::from(vec![
                Span::styled("Welcome to Formula", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled("Verse!", accent),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Ask me anything about mathematics - from basic algebra to advanced calculus.",
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
        ];
        lines.extend(EXAMPLE_QUESTIONS.iter().map(|q| {
            Line::from(Span::styled(
                format!("Try: \"{q}\""),
                Style::default().fg(Color::DarkGray),
            ))
        }));

        let height = lines.len() as u16;
        let [centered] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            centered,
        );
    }
}

/// Three dots with one lit, cycling with the frame counter.
pub fn typing_indicator(frame_index: usize) -> String {
    let lit = (frame_index / 3) % 3;
    (0..3)
        .map(|i| if i == lit { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.transcript.is_empty() && !self.is_loading {
            self.state.heights.clear();
            Self::render_welcome(frame, area);
            return;
        }

        let content_width = area.width.saturating_sub(1); // scrollbar column
        self.state.sync_layout(self.transcript, content_width);
        self.state.viewport_height = area.height;

        let typing_rows = if self.is_loading { TYPING_ROWS } else { 0 };
        let canvas_height = self.state.total_height() + typing_rows;

        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (message, &height) in self.transcript.items().iter().zip(&self.state.heights) {
            scroll_view.render_widget(
                Message::new(message),
                Rect::new(0, y_offset, content_width, height),
            );
            y_offset += height;
        }

        if self.is_loading {
            let indicator = Paragraph::new(format!(" {}", typing_indicator(self.frame_index)))
                .style(Style::default().fg(Color::Magenta));
            scroll_view.render_widget(indicator, Rect::new(0, y_offset, content_width, 1));
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
