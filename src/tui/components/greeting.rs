use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Padding, Paragraph, Widget, Wrap};

use crate::core::projection::RowDescriptor;
use crate::tui::component::Component;

/// Horizontal padding (per side) around the greeting text.
const CONTENT_PAD_H: u16 = 2;
/// Width of the cursor gutter on the left edge.
const GUTTER_WIDTH: u16 = 1;
/// Total horizontal space consumed by the gutter and padding.
const HORIZONTAL_OVERHEAD: u16 = GUTTER_WIDTH + CONTENT_PAD_H * 2;
/// The divider line under every row.
const VERTICAL_OVERHEAD: u16 = 1;

/// A stateless component that renders one greeting row from its descriptor.
///
/// # Design
///
/// `Greeting` is a **transient component**: it's created fresh each frame
/// for visible rows only. What it shows comes entirely from the
/// [`RowDescriptor`]; the only extra prop is whether the keyboard cursor sits
/// on it.
///
/// # Styling
///
/// - **Emphasized** (selected): cyan background, bold black text
/// - **Plain**: default background, white text
/// - **Cursor**: yellow bar in the gutter
///
/// # Height Calculation
///
/// [`calculate_height`](Self::calculate_height) predicts rendered height with
/// `textwrap` options that match Ratatui's `Paragraph` wrapping, so the list
/// can lay out rows without rendering them.
#[derive(Clone, Copy)]
pub struct Greeting<'a> {
    pub row: &'a RowDescriptor,
    pub is_cursor: bool,
}

impl<'a> Greeting<'a> {
    pub fn new(row: &'a RowDescriptor, is_cursor: bool) -> Self {
        Self { row, is_cursor }
    }

    /// Calculate the height required for a row of `text` at `width`.
    pub fn calculate_height(text: &str, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Degenerate case: terminal too narrow for gutter + padding.
            return 1;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(text.trim(), options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }

    fn text_style(&self) -> Style {
        if self.row.emphasized {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        }
    }
}

impl<'a> Widget for Greeting<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let style = self.text_style();
        let content_height = area.height.saturating_sub(VERTICAL_OVERHEAD).max(1);

        let gutter = Rect::new(area.x, area.y, GUTTER_WIDTH.min(area.width), content_height);
        let body = Rect::new(
            area.x + gutter.width,
            area.y,
            area.width - gutter.width,
            content_height,
        );

        if self.is_cursor {
            let bar: Vec<Line> = (0..gutter.height)
                .map(|_| Line::from(Span::styled("▌", Style::default().fg(Color::Yellow))))
                .collect();
            Paragraph::new(bar).render(gutter, buf);
        }

        Paragraph::new(self.row.text.trim())
            .style(style)
            .block(ratatui::widgets::Block::default().padding(Padding::horizontal(CONTENT_PAD_H)))
            .wrap(Wrap { trim: true })
            .render(body, buf);

        if area.height > content_height {
            let divider_area = Rect::new(area.x, area.y + content_height, area.width, 1);
            Line::from(Span::styled(
                "─".repeat(area.width as usize),
                Style::default().fg(Color::DarkGray),
            ))
            .render(divider_area, buf);
        }
    }
}

/// Note: `Greeting` is stateless; rendering is delegated to the [`Widget`] impl.
impl<'a> Component for Greeting<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
