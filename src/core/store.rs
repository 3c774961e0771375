//! # Item Store
//!
//! Single source of truth for the greeting list and the click counter.
//!
//! ```text
//! ItemStore
//! ├── items: Arc<Vec<Item>>      // shared with every snapshot handed out
//! ├── counter: u64               // click counter
//! ├── generation: u64            // bumps on every initialize()
//! ├── index: HashMap<ItemId, usize>
//! └── observers: Vec<(SubscriptionId, Observer)>
//! ```
//!
//! Mutations are copy-on-write: a snapshot taken before a toggle keeps
//! seeing the old selection. Observers run synchronously, in subscription
//! order, before the mutating call returns.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::{debug, warn};
use thiserror::Error;

/// Stable identifier of an item. Assigned sequentially from 0 at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row's data. `selected` is the only field that changes after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub label: String,
    pub selected: bool,
}

/// Immutable point-in-time view of the store.
///
/// Cloning is O(1): the item slice is reference counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub items: Arc<Vec<Item>>,
    pub counter: u64,
    pub generation: u64,
}

impl Snapshot {
    pub fn item(&self, position: usize) -> Option<&Item> {
        self.items.get(position)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// What the last mutation touched, delivered alongside the new snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Initialized,
    ItemToggled(ItemId),
    CounterIncremented,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("no item with id {0}")]
    InvalidId(ItemId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&Snapshot, &Change)>;

pub struct ItemStore {
    items: Arc<Vec<Item>>,
    counter: u64,
    generation: u64,
    index: HashMap<ItemId, usize>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ItemStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemStore")
            .field("items", &self.items.len())
            .field("counter", &self.counter)
            .field("generation", &self.generation)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl ItemStore {
    /// An empty store: no items, counter 0, generation 0.
    pub fn new() -> Self {
        Self {
            items: Arc::new(Vec::new()),
            counter: 0,
            generation: 0,
            index: HashMap::new(),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn with_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut store = Self::new();
        store.initialize(labels);
        store
    }

    /// Replace all state with one unselected item per label and reset the counter.
    pub fn initialize<I, S>(&mut self, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<Item> = labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| Item {
                id: ItemId(i as u32),
                label: label.into(),
                selected: false,
            })
            .collect();

        self.index = items
            .iter()
            .enumerate()
            .map(|(pos, item)| (item.id, pos))
            .collect();
        self.items = Arc::new(items);
        self.counter = 0;
        self.generation += 1;

        debug!(
            "Store initialized: {} items (generation {})",
            self.items.len(),
            self.generation
        );
        self.notify(Change::Initialized);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            items: Arc::clone(&self.items),
            counter: self.counter,
            generation: self.generation,
        }
    }

    /// Flip the selection of `id`, returning its new value.
    ///
    /// Unknown ids are rejected and leave the store (and observers) untouched.
    pub fn toggle_item(&mut self, id: ItemId) -> Result<bool, StoreError> {
        let Some(&pos) = self.index.get(&id) else {
            warn!("Rejected toggle for unknown item {}", id);
            return Err(StoreError::InvalidId(id));
        };

        // Clones the list only while a snapshot still holds it.
        let items = Arc::make_mut(&mut self.items);
        items[pos].selected = !items[pos].selected;
        let selected = items[pos].selected;

        debug!("Item {} selected={}", id, selected);
        self.notify(Change::ItemToggled(id));
        Ok(selected)
    }

    pub fn increment_counter(&mut self) -> u64 {
        self.counter = self.counter.saturating_add(1);
        debug!("Counter incremented to {}", self.counter);
        self.notify(Change::CounterIncremented);
        self.counter
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&Snapshot, &Change) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.index.get(&id).map(|&pos| &self.items[pos])
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected_count(&self) -> usize {
        self.items.iter().filter(|item| item.selected).count()
    }

    fn notify(&mut self, change: Change) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for (_, observer) in self.observers.iter_mut() {
            observer(&snapshot, &change);
        }
    }
}
