//! # CounterButton Component
//!
//! The click counter, drawn centred in its area from a [`ButtonDescriptor`].
//! Emphasized buttons switch from the muted to the accent palette.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::projection::ButtonDescriptor;
use crate::tui::component::Component;

/// Border (2) plus one column of padding either side.
const HORIZONTAL_OVERHEAD: u16 = 4;
pub const BUTTON_HEIGHT: u16 = 3;

pub struct CounterButton<'a> {
    pub button: &'a ButtonDescriptor,
    pub focused: bool,
}

impl<'a> CounterButton<'a> {
    pub fn new(button: &'a ButtonDescriptor, focused: bool) -> Self {
        Self { button, focused }
    }

    /// The rect the button occupies when centred in `area`.
    ///
    /// Also used for hit testing, so it must match what `render` draws.
    pub fn bounds(button: &ButtonDescriptor, area: Rect) -> Rect {
        let wanted = (button.text.width() as u16).saturating_add(HORIZONTAL_OVERHEAD);
        let width = wanted.min(area.width);
        let height = BUTTON_HEIGHT.min(area.height);
        Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        )
    }

    fn style(&self) -> Style {
        if self.button.emphasized {
            Style::default()
                .fg(Color::White)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Black).bg(Color::Gray)
        }
    }
}

impl<'a> Component for CounterButton<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let bounds = Self::bounds(self.button, area);
        let border_style = if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style);

        let paragraph = Paragraph::new(self.button.text.as_str())
            .alignment(Alignment::Center)
            .style(self.style())
            .block(block);
        frame.render_widget(paragraph, bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::projection::render_counter;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(button: &ButtonDescriptor, focused: bool) -> ratatui::buffer::Buffer {
        let backend = TestBackend::new(60, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| CounterButton::new(button, focused).render(f, f.area()))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    #[test]
    fn test_bounds_are_centred() {
        let button = render_counter(3);
        let bounds = CounterButton::bounds(&button, Rect::new(0, 0, 60, 3));
        assert_eq!(bounds.width, "I've been clicked 3 times".len() as u16 + 4);
        assert_eq!(bounds.x, (60 - bounds.width) / 2);
        assert_eq!(bounds.height, 3);
    }

    #[test]
    fn test_bounds_clamped_to_narrow_area() {
        let button = render_counter(3);
        let bounds = CounterButton::bounds(&button, Rect::new(5, 2, 10, 1));
        assert_eq!(bounds, Rect::new(5, 2, 10, 1));
    }

    #[test]
    fn test_renders_counter_text() {
        let buf = draw(&render_counter(3), false);
        let text = buf.content().iter().map(|c| c.symbol()).collect::<String>();
        assert!(text.contains("I've been clicked 3 times"));
    }

    #[test]
    fn test_emphasis_switches_palette() {
        let bounds = CounterButton::bounds(&render_counter(6), Rect::new(0, 0, 60, 3));
        let inner = (bounds.x + 2, 1);

        assert_eq!(draw(&render_counter(5), false)[inner].bg, Color::Gray);
        assert_eq!(draw(&render_counter(6), false)[inner].bg, Color::Magenta);
    }
}
