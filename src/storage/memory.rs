//! In-memory store accessor.

use std::cell::{Cell, RefCell};

use crate::storage::{LoadStatus, Loaded, Store, StoreAccessor};

/// Keeps the store in process memory.
///
/// Loads hand out a copy, so callers see exactly the load/mutate/save cycle
/// they would see against a file.
#[derive(Debug, Default)]
pub struct MemoryStore {
    store: RefCell<Option<Store>>,
    saves: Cell<usize>,
}

impl MemoryStore {
    /// Creates an empty store; loads report `Missing` until the first save.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `store`.
    pub fn with_contents(store: Store) -> Self {
        Self {
            store: RefCell::new(Some(store)),
            saves: Cell::new(0),
        }
    }

    /// Current contents, without going through a load.
    pub fn snapshot(&self) -> Store {
        self.store.borrow().clone().unwrap_or_default()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl StoreAccessor for MemoryStore {
    fn load_with_status(&self) -> Loaded {
        match self.store.borrow().as_ref() {
            Some(store) => Loaded::fresh(store.clone()),
            None => Loaded::recovered(LoadStatus::Missing),
        }
    }

    fn save(&self, store: &Store) -> bool {
        *self.store.borrow_mut() = Some(store.clone());
        self.saves.set(self.saves.get() + 1);
        true
    }
}
