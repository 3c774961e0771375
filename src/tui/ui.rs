use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::projection::ButtonDescriptor;
use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::counter_button::BUTTON_HEIGHT;
use crate::tui::components::{CounterButton, GreetingList, TitleBar};
use crate::tui::{Focus, TuiState};

pub struct AppLayout {
    pub title: Rect,
    pub list: Rect,
    pub counter: Rect,
    pub help: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(BUTTON_HEIGHT + 2), Length(1)]);
    let [title, list, counter, help] = layout.areas(area);
    AppLayout {
        title,
        list,
        counter,
        help,
    }
}

/// What a click at a screen position lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Row at this position in the projection
    Row(usize),
    Counter,
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let layout = compute_layout(frame.area());

    let mut title_bar = TitleBar::new(
        app.seed_description.clone(),
        app.status_message.clone(),
        app.store.selected_count(),
    );
    title_bar.render(frame, layout.title);

    let projection = tui.projection.borrow();
    GreetingList::new(&mut tui.list, projection.rows(), projection.generation())
        .render(frame, layout.list);

    CounterButton::new(projection.counter(), tui.focus == Focus::Counter)
        .render(frame, layout.counter);

    frame.render_widget(help_line(), layout.help);
}

fn help_line() -> Line<'static> {
    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let text = Style::default().fg(Color::DarkGray);
    Line::from(vec![
        Span::styled(" ↑↓", key),
        Span::styled(" Move  ", text),
        Span::styled("Space", key),
        Span::styled(" Select  ", text),
        Span::styled("+", key),
        Span::styled(" Click  ", text),
        Span::styled("Tab", key),
        Span::styled(" Focus  ", text),
        Span::styled("r", key),
        Span::styled(" Reset  ", text),
        Span::styled("q", key),
        Span::styled(" Quit", text),
    ])
}

/// Resolve a click at (`col`, `row`) against the last drawn frame.
pub fn hit_test(
    col: u16,
    row: u16,
    frame_area: Rect,
    tui: &TuiState,
    counter: &ButtonDescriptor,
) -> Option<Hit> {
    let layout = compute_layout(frame_area);

    let button = CounterButton::bounds(counter, layout.counter);
    if button.contains((col, row).into()) {
        return Some(Hit::Counter);
    }

    // The rightmost column of the list is the scrollbar
    let list = layout.list;
    if row < list.y || row >= list.y + list.height || col >= list.x + list.width.saturating_sub(1) {
        return None;
    }
    tui.list.hit_test(row - list.y).map(Hit::Row)
}
