//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::state::App;
use crate::core::store::ItemStore;

/// Creates a test App seeded with the first two reference labels.
pub fn test_app() -> App {
    let store = ItemStore::with_labels(["Hello Android #0", "Hello Android #1"]);
    App::new(store, "test seed".to_string())
}
