use std::collections::HashMap;

use log::debug;
use parking_lot::Mutex;

use cordial_shared::Snowflake;

/// What kind of entity a deferred event is waiting on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeferKind {
    Guild,
    Channel,
    User,
    /// Not a missing entity: the guild scope is locked while it bulk-loads
    ScopeLock,
}

pub type DeferKey = (DeferKind, Snowflake);

/// Holding area for events that reference an entity the cache does not know
/// yet.
///
/// Items are queued under the missing reference and handed back, in arrival
/// order and exactly once, by [`resolve`](Self::resolve). Unresolved entries
/// are kept until their reference appears or the owning scope is torn down.
pub struct EventCache<T> {
    entries: Mutex<HashMap<DeferKey, Vec<T>>>,
}

impl<T> EventCache<T> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Queues `item` behind the `(kind, id)` reference.
    pub fn cache(&self, kind: DeferKind, id: Snowflake, item: T) {
        debug!("Deferring event until {:?} {} is available", kind, id);
        self.entries.lock().entry((kind, id)).or_default().push(item);
    }

    /// Removes and returns everything queued behind `(kind, id)`, oldest
    /// first. The lock is released before returning, so replaying the items
    /// may queue new ones (even under the same key) without deadlocking.
    pub fn resolve(&self, kind: DeferKind, id: Snowflake) -> Vec<T> {
        let items = self.entries.lock().remove(&(kind, id)).unwrap_or_default();
        if !items.is_empty() {
            debug!("Replaying {} deferred event(s) for {:?} {}", items.len(), kind, id);
        }
        items
    }

    /// Drops everything queued behind `(kind, id)` without replaying it.
    pub fn discard(&self, kind: DeferKind, id: Snowflake) -> usize {
        self.entries
            .lock()
            .remove(&(kind, id))
            .map(|items| items.len())
            .unwrap_or(0)
    }

    pub fn pending(&self, kind: DeferKind, id: Snowflake) -> usize {
        self.entries
            .lock()
            .get(&(kind, id))
            .map(|items| items.len())
            .unwrap_or(0)
    }

    /// Total number of queued items across every key.
    pub fn len(&self) -> usize {
        self.entries.lock().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl<T> Default for EventCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
