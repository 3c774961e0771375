//! # View Projection
//!
//! Turns store snapshots into renderer-agnostic descriptors and maps
//! gestures back onto store intents.
//!
//! ```text
//! Snapshot ──render_row / render_counter──▶ RowDescriptor / ButtonDescriptor
//!                                                 │ on_activate
//!                                                 ▼
//! ItemStore ◀──────────Intent::dispatch────────── Intent
//! ```
//!
//! The free functions are pure. [`ViewProjection`] adds a row cache keyed by
//! [`ItemId`], so a single toggle in a 1000-row list re-renders one row.

use std::collections::HashMap;

use log::trace;

use crate::core::store::{Change, Item, ItemId, ItemStore, Snapshot, StoreError};

/// The counter button is emphasized once it has been clicked more than this.
pub const COUNTER_EMPHASIS_THRESHOLD: u64 = 5;

/// A named mutation the view may request from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    ToggleItem(ItemId),
    IncrementCounter,
}

impl Intent {
    pub fn dispatch(self, store: &mut ItemStore) -> Result<(), StoreError> {
        match self {
            Intent::ToggleItem(id) => store.toggle_item(id).map(|_| ()),
            Intent::IncrementCounter => {
                store.increment_counter();
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDescriptor {
    pub id: ItemId,
    pub text: String,
    pub emphasized: bool,
    pub on_activate: Intent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonDescriptor {
    pub text: String,
    pub emphasized: bool,
    pub on_activate: Intent,
}

pub fn render_row(item: &Item) -> RowDescriptor {
    RowDescriptor {
        id: item.id,
        text: format!("Hello {}!", item.label),
        emphasized: item.selected,
        on_activate: Intent::ToggleItem(item.id),
    }
}

pub fn render_counter(counter: u64) -> ButtonDescriptor {
    ButtonDescriptor {
        text: format!("I've been clicked {counter} times"),
        emphasized: counter > COUNTER_EMPHASIS_THRESHOLD,
        on_activate: Intent::IncrementCounter,
    }
}

pub fn render_list(snapshot: &Snapshot) -> Vec<RowDescriptor> {
    snapshot.items.iter().map(render_row).collect()
}

/// Keyed, incrementally maintained projection of the store.
///
/// Rows are kept in snapshot order; `positions` maps an id to its row so a
/// toggle can be patched in place.
#[derive(Debug)]
pub struct ViewProjection {
    rows: Vec<RowDescriptor>,
    positions: HashMap<ItemId, usize>,
    counter: ButtonDescriptor,
    generation: u64,
    rows_rendered: u64,
}

impl Default for ViewProjection {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewProjection {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            positions: HashMap::new(),
            counter: render_counter(0),
            generation: 0,
            rows_rendered: 0,
        }
    }

    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let mut projection = Self::new();
        projection.rebuild(snapshot);
        projection
    }

    /// Apply a store notification, re-rendering only what `change` touched.
    pub fn apply(&mut self, snapshot: &Snapshot, change: &Change) {
        if snapshot.generation != self.generation {
            self.rebuild(snapshot);
            return;
        }
        match *change {
            Change::Initialized => self.rebuild(snapshot),
            Change::ItemToggled(id) => {
                if !self.patch_row(snapshot, id) {
                    self.rebuild(snapshot);
                }
            }
            Change::CounterIncremented => self.counter = render_counter(snapshot.counter),
        }
    }

    /// Bring the projection up to date without a change hint.
    ///
    /// Rows are compared by id; only rows whose item differs are re-rendered.
    pub fn sync(&mut self, snapshot: &Snapshot) {
        if snapshot.generation != self.generation || snapshot.len() != self.rows.len() {
            self.rebuild(snapshot);
            return;
        }
        for item in snapshot.items.iter() {
            let stale = match self.positions.get(&item.id) {
                Some(&pos) => self.rows[pos].emphasized != item.selected,
                None => true,
            };
            if stale && !self.patch_row(snapshot, item.id) {
                self.rebuild(snapshot);
                return;
            }
        }
        if self.counter != render_counter(snapshot.counter) {
            self.counter = render_counter(snapshot.counter);
        }
    }

    pub fn rows(&self) -> &[RowDescriptor] {
        &self.rows
    }

    pub fn row(&self, position: usize) -> Option<&RowDescriptor> {
        self.rows.get(position)
    }

    pub fn row_by_id(&self, id: ItemId) -> Option<&RowDescriptor> {
        self.positions.get(&id).map(|&pos| &self.rows[pos])
    }

    pub fn position_of(&self, id: ItemId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    pub fn counter(&self) -> &ButtonDescriptor {
        &self.counter
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total rows produced since construction. Used to verify incrementality.
    pub fn rows_rendered(&self) -> u64 {
        self.rows_rendered
    }

    fn rebuild(&mut self, snapshot: &Snapshot) {
        self.rows = render_list(snapshot);
        self.positions = self
            .rows
            .iter()
            .enumerate()
            .map(|(pos, row)| (row.id, pos))
            .collect();
        self.counter = render_counter(snapshot.counter);
        self.generation = snapshot.generation;
        self.rows_rendered += self.rows.len() as u64;
        trace!(
            "Projection rebuilt: {} rows (generation {})",
            self.rows.len(),
            self.generation
        );
    }

    /// Returns false when the id is unknown to either side.
    fn patch_row(&mut self, snapshot: &Snapshot, id: ItemId) -> bool {
        let Some(&pos) = self.positions.get(&id) else {
            return false;
        };
        let Some(item) = snapshot.item(pos).filter(|item| item.id == id) else {
            return false;
        };
        self.rows[pos] = render_row(item);
        self.rows_rendered += 1;
        true
    }
}
