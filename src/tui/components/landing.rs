//! # Landing Page Component
//!
//! Entry screen: floating math symbols behind a centred hero with the two
//! entry points (sign in, quick chat).
//!

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};

use crate::tui::component::Component;

pub const MATH_SYMBOLS: &[&str] = &["∑", "√", "π", "∞", "∫", "∆", "≈", "∇"];

pub const SUBTITLE: &str =
    "A Deep-Dive into contextual scenario generation from mathematical expressions";

/// How many symbols float around the hero.
const SYMBOL_COUNT: usize = 16;

pub struct LandingPage<'a> {
    frame_index: usize,
    status_message: &'a str,
}

impl<'a> LandingPage<'a> {
    pub fn new(frame_index: usize, status_message: &'a str) -> Self {
        Self {
            frame_index,
            status_message,
        }
    }

    fn hero_lines(&self) -> Vec<Line<'a>> {
        let key = Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD);
        vec![
            Line::from(vec![
                Span::styled("Formula", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled("Verse", key),
            ]),
            Line::from(""),
            Line::from(Span::styled(SUBTITLE, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("[s]", key),
                Span::raw(" Sign in with Google    "),
                Span::styled("[c]", key),
                Span::raw(" Quick Chat →    "),
                Span::styled("[q]", key),
                Span::raw(" Quit"),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                self.status_message,
                Style::default().fg(Color::DarkGray),
            )),
        ]
    }
}

/// Cheap integer hash so symbol placement is stable between frames.
fn scatter(seed: usize) -> usize {
    let mut x = seed.wrapping_mul(0x9E37_79B9).wrapping_add(0x7F4A_7C15);
    x ^= x >> 15;
    x = x.wrapping_mul(0x2C1B_3C6D);
    x ^ (x >> 12)
}

/// Draw the symbol field. Each symbol drifts upward at its own pace and
/// wraps around the top edge.
fn render_symbols(buf: &mut Buffer, area: Rect, frame_index: usize) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    for i in 0..SYMBOL_COUNT {
        let h = scatter(i);
        let x = area.x + (h % area.width as usize) as u16;
        let speed = 1 + (h >> 8) % 3;
        let drift = (frame_index / (speed * 4)) % area.height as usize;
        let base = (h >> 4) % area.height as usize;
        let y = area.y + ((base + area.height as usize - drift) % area.height as usize) as u16;
        let symbol = MATH_SYMBOLS[i % MATH_SYMBOLS.len()];
        buf.set_string(x, y, symbol, Style::default().fg(Color::DarkGray));
    }
}

impl<'a> Component for LandingPage<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        render_symbols(frame.buffer_mut(), area, self.frame_index);

        let lines = self.hero_lines();
        let height = lines.len() as u16;
        let width = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16;

        let [row] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        let [hero] = Layout::horizontal([Constraint::Length(width.min(area.width))])
            .flex(Flex::Center)
            .areas(row);

        // Keep symbols out from under the text
        frame.render_widget(Clear, hero);
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            hero,
        );
    }
}
