//! # TitleBar Component
//!
//! Top status bar showing where the greetings came from and the latest
//! status text.
//!
//! ## Design Decisions
//!
//! ### Stateless Component
//!
//! TitleBar is purely presentational: it receives all data as props and has no
//! internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(
//!     app.seed_description.clone(),
//!     app.status_message.clone(),
//!     app.store.selected_count(),
//! );
//! title_bar.render(frame, area);
//! ```
//!
//! ## Conditional Formatting
//!
//! 1. **Status message**: `"greetlist (1000 generated labels) | 2 selected · 0 clicks"`
//! 2. **Default**: `"greetlist (1000 generated labels)"`
//!
//! A `★ N` badge is appended while anything is selected.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    /// Origin of the labels (e.g. "1000 generated labels")
    pub seed_description: String,
    /// Status message (e.g. "Selection and counter reset")
    pub status_message: String,
    /// How many rows are currently selected
    pub selected_count: usize,
}

impl TitleBar {
    pub fn new(seed_description: String, status_message: String, selected_count: usize) -> Self {
        Self {
            seed_description,
            status_message,
            selected_count,
        }
    }

    fn title_text(&self) -> String {
        if self.status_message.is_empty() {
            format!("greetlist ({})", self.seed_description)
        } else {
            format!("greetlist ({}) | {}", self.seed_description, self.status_message)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            self.title_text(),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if self.selected_count > 0 {
            spans.push(Span::styled(
                format!("  ★ {}", self.selected_count),
                Style::default().fg(Color::Cyan),
            ));
        }
        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let mut title_bar = TitleBar::new(
            "1000 generated labels".to_string(),
            "Selection and counter reset".to_string(),
            0,
        );
        let text = rendered(&mut title_bar);

        assert!(text.contains("greetlist"));
        assert!(text.contains("1000 generated labels"));
        assert!(text.contains("Selection and counter reset"));
        assert!(!text.contains('★'));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let mut title_bar = TitleBar::new("labels.txt".to_string(), String::new(), 0);
        let text = rendered(&mut title_bar);

        assert!(text.contains("greetlist (labels.txt)"));
        assert!(!text.contains('|'));
    }

    #[test]
    fn test_title_bar_selection_badge() {
        let mut title_bar = TitleBar::new("seed".to_string(), String::new(), 3);
        let text = rendered(&mut title_bar);

        assert!(text.contains("★ 3"));
    }
}
