//! # Application State
//!
//! Core business state for greetlist. No TUI types here; presentation
//! state (scroll offsets, cursor, focus) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── store: ItemStore          // items + counter, the source of truth
//! ├── seed_description: String  // where the labels came from
//! └── status_message: String    // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::store::ItemStore;

pub struct App {
    pub store: ItemStore,
    pub seed_description: String,
    pub status_message: String,
}

impl App {
    pub fn new(store: ItemStore, seed_description: String) -> Self {
        Self {
            store,
            seed_description,
            status_message: String::from("Click a greeting to select it"),
        }
    }
}
