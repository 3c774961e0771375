//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Data Flow
//!
//! ```text
//! crossterm event → TuiEvent → Action::Intent(row.on_activate) → update()
//!                                                                  │
//!                       ItemStore mutates, notifies observers ◄────┘
//!                                  │
//!            ViewProjection::apply (re-renders only the changed row)
//!                                  │
//!                               draw_ui
//! ```
//!
//! The projection is shared between the store observer and the renderer
//! through `Rc<RefCell<_>>`. Everything runs on the UI thread, so observer
//! callbacks never overlap a draw.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 500ms and only redraws after
//! an event or a terminal resize.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::cell::RefCell;
use std::io::stdout;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::layout::Rect;

use crate::core::action::{Action, Effect, update};
use crate::core::projection::{Intent, ViewProjection};
use crate::core::state::App;
use crate::core::store::SubscriptionId;
use crate::tui::component::EventHandler;
use crate::tui::components::{GreetingListState, ListEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::ui::Hit;

/// Which widget receives Space/Enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Counter,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::List => Focus::Counter,
            Focus::Counter => Focus::List,
        }
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    /// Kept current by a store observer; read by the renderer
    pub projection: Rc<RefCell<ViewProjection>>,
    pub list: GreetingListState,
    pub focus: Focus,
}

impl TuiState {
    pub fn new(projection: ViewProjection) -> Self {
        Self {
            projection: Rc::new(RefCell::new(projection)),
            list: GreetingListState::new(),
            focus: Focus::List,
        }
    }

    /// Project the store's current contents and subscribe to its changes.
    pub fn attach(app: &mut App) -> (Self, SubscriptionId) {
        let tui = Self::new(ViewProjection::from_snapshot(&app.store.snapshot()));
        let projection = Rc::clone(&tui.projection);
        let subscription = app.store.subscribe(move |snapshot, change| {
            projection.borrow_mut().apply(snapshot, change);
        });
        (tui, subscription)
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

pub fn run(mut app: App) -> std::io::Result<()> {
    let (mut tui, subscription) = TuiState::attach(&mut app);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut frame_area = Rect::default();
    let mut needs_redraw = true; // Force first frame

    let result = loop {
        if needs_redraw {
            match terminal.draw(|f| ui::draw_ui(f, &app, &mut tui)) {
                Ok(completed) => frame_area = completed.area,
                Err(e) => break Err(e),
            }
            needs_redraw = false;
        }

        let first_event = match poll_event_timeout(Duration::from_millis(500)) {
            Ok(event) => event,
            Err(e) => break Err(e),
        };
        if first_event.is_none() {
            continue;
        }
        needs_redraw = true;

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        let pending = std::iter::from_fn(|| poll_event_immediate().ok().flatten());
        for event in first_event.into_iter().chain(pending) {
            if handle_event(&mut app, &mut tui, event, frame_area) == Effect::Quit {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break Ok(());
        }
    };

    app.store.unsubscribe(subscription);
    info!(
        "Shutting down after {} row renders",
        tui.projection.borrow().rows_rendered()
    );

    ratatui::restore();
    result
}

/// Route one input event. Returns `Effect::Quit` when the loop should end.
fn handle_event(app: &mut App, tui: &mut TuiState, event: TuiEvent, frame_area: Rect) -> Effect {
    match event {
        // Resize just needs a redraw (already flagged by the caller)
        TuiEvent::Resize => Effect::None,
        TuiEvent::Quit | TuiEvent::ForceQuit => update(app, Action::Quit),
        TuiEvent::Reset => {
            let effect = update(app, Action::Reset);
            tui.list.clamp_cursor();
            effect
        }
        TuiEvent::Increment => dispatch_counter(app, tui),
        TuiEvent::CycleFocus => {
            tui.focus = tui.focus.next();
            debug!("Focus moved to {:?}", tui.focus);
            Effect::None
        }
        TuiEvent::Activate if tui.focus == Focus::Counter => dispatch_counter(app, tui),
        TuiEvent::MouseClick(col, row) => {
            let counter = tui.projection.borrow().counter().clone();
            match ui::hit_test(col, row, frame_area, tui, &counter) {
                Some(Hit::Row(pos)) => {
                    tui.focus = Focus::List;
                    tui.list.cursor = Some(pos);
                    dispatch_row(app, tui, pos)
                }
                Some(Hit::Counter) => {
                    tui.focus = Focus::Counter;
                    dispatch_counter(app, tui)
                }
                None => Effect::None,
            }
        }
        other => match tui.list.handle_event(&other) {
            Some(ListEvent::Activate(pos)) => dispatch_row(app, tui, pos),
            None => Effect::None,
        },
    }
}

/// Run the intent bound to the row at `pos`, if there is one.
fn dispatch_row(app: &mut App, tui: &TuiState, pos: usize) -> Effect {
    // Release the borrow before the store notifies the projection
    let intent = tui.projection.borrow().row(pos).map(|row| row.on_activate);
    match intent {
        Some(intent) => update(app, Action::Intent(intent)),
        None => {
            warn!("Activation at position {} has no row", pos);
            Effect::None
        }
    }
}

fn dispatch_counter(app: &mut App, tui: &TuiState) -> Effect {
    let intent: Intent = tui.projection.borrow().counter().on_activate;
    update(app, Action::Intent(intent))
}
