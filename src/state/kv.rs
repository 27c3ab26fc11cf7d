use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Internal HashMap type.
pub type InnerMap = HashMap<String, String>;

/// Shared store handle passed to the HTTP layer.
pub type SharedStore = Arc<KvStore>;

/// In-memory key/value mapping guarded by its own reader/writer lock.
///
/// Readers (GET, EXISTS) may run in parallel; writers (SET, DELETE) hold the
/// lock exclusively for the whole check-then-mutate sequence.
#[derive(Debug, Default)]
pub struct KvStore {
    map: RwLock<InnerMap>,
}

impl KvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new, empty store ready to be shared across handlers.
    pub fn shared() -> SharedStore {
        Arc::new(Self::new())
    }

    // Every operation leaves the map consistent before it can panic, so a
    // poisoned lock still guards valid data.
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, InnerMap> {
        self.map.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, InnerMap> {
        self.map.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return number of stored keys.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
