//! # Actions
//!
//! Everything that can happen in greetlist becomes an `Action`.
//! User clicks a row? That's `Action::Intent(Intent::ToggleItem(id))`.
//! User presses `r`? That's `Action::Reset`.
//!
//! The `update()` function applies an action to the state and returns an
//! `Effect` telling the event loop what to do next. No terminal I/O here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{info, warn};

use crate::core::projection::Intent;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Intent(Intent),
    /// Re-initialize the store with its current labels.
    Reset,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Intent(intent) => {
            match intent.dispatch(&mut app.store) {
                Ok(()) => {
                    app.status_message = format!(
                        "{} selected · {} clicks",
                        app.store.selected_count(),
                        app.store.counter()
                    );
                }
                Err(e) => {
                    warn!("Intent {:?} rejected: {}", intent, e);
                    app.status_message = format!("Ignored: {e}");
                }
            }
            Effect::None
        }
        Action::Reset => {
            let labels: Vec<String> = app
                .store
                .snapshot()
                .items
                .iter()
                .map(|item| item.label.clone())
                .collect();
            info!("Resetting store ({} items)", labels.len());
            app.store.initialize(labels);
            app.status_message = String::from("Selection and counter reset");
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
