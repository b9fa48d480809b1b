use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use parking_lot::RwLock;

use cordial_shared::Snowflake;

/// Shared, mutable reference to a cached entity. Two handles refer to the
/// same live entry iff `Arc::ptr_eq` holds.
pub type Handle<T> = Arc<RwLock<T>>;

pub fn new_handle<T>(entity: T) -> Handle<T> {
    Arc::new(RwLock::new(entity))
}

/// Outcome of a full-replacement [`EntityMap::reconcile`].
pub struct ReconcileReport<T> {
    /// Ids that had no entry before and were constructed from their snapshot
    pub added: Vec<Snowflake>,
    /// Ids that were kept and whose fields changed in place
    pub updated: Vec<Snowflake>,
    /// Ids that were kept untouched
    pub unchanged: Vec<Snowflake>,
    /// Entries that are no longer present, with the handle they had
    pub removed: Vec<(Snowflake, Handle<T>)>,
}

impl<T> ReconcileReport<T> {
    fn new() -> Self {
        Self {
            added: Vec::new(),
            updated: Vec::new(),
            unchanged: Vec::new(),
            removed: Vec::new(),
        }
    }

    /// True when the map's membership did not change. Retained entries may
    /// still have been updated in place.
    pub fn membership_unchanged(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn is_noop(&self) -> bool {
        self.membership_unchanged() && self.updated.is_empty()
    }

    pub fn removed_ids(&self) -> Vec<Snowflake> {
        self.removed.iter().map(|(id, _)| *id).collect()
    }
}

/// Identifier-keyed map of entity handles for one scope and one entity kind.
///
/// Readers never block each other. Writers take the map lock for the
/// duration of a single operation; ordering between writers of the same scope
/// is the caller's responsibility (see `EntityCache::scope_writer`).
pub struct EntityMap<T> {
    inner: RwLock<HashMap<Snowflake, Handle<T>>>,
}

impl<T> EntityMap<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, id: &Snowflake) -> Option<Handle<T>> {
        self.inner.read().get(id).cloned()
    }

    pub fn contains(&self, id: &Snowflake) -> bool {
        self.inner.read().contains_key(id)
    }

    /// Inserts a new entry, replacing (and returning) any previous one.
    pub fn put(&self, id: Snowflake, entity: T) -> Option<Handle<T>> {
        self.inner.write().insert(id, new_handle(entity))
    }

    pub fn put_handle(&self, id: Snowflake, handle: Handle<T>) -> Option<Handle<T>> {
        self.inner.write().insert(id, handle)
    }

    /// Returns the live entry for `id`, constructing it if absent. The bool
    /// is true when a new entry was created.
    pub fn get_or_insert_with<F: FnOnce() -> T>(&self, id: Snowflake, create: F) -> (Handle<T>, bool) {
        if let Some(handle) = self.get(&id) {
            return (handle, false);
        }
        let mut map = self.inner.write();
        if let Some(handle) = map.get(&id) {
            return (handle.clone(), false);
        }
        let handle = new_handle(create());
        map.insert(id, handle.clone());
        (handle, true)
    }

    pub fn remove(&self, id: &Snowflake) -> Option<Handle<T>> {
        self.inner.write().remove(id)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn ids(&self) -> Vec<Snowflake> {
        self.inner.read().keys().copied().collect()
    }

    pub fn values(&self) -> Vec<Handle<T>> {
        self.inner.read().values().cloned().collect()
    }

    /// Drops every entry, returning the handles that were live.
    pub fn clear(&self) -> Vec<Handle<T>> {
        self.inner.write().drain().map(|(_, handle)| handle).collect()
    }

    /// Replaces the contents of this map with exactly the entities described
    /// by `snapshots`.
    ///
    /// Entries whose id appears in `snapshots` keep their handle and are
    /// mutated in place through `update` (which reports whether anything
    /// changed). Ids seen for the first time are built with `create`. Entries
    /// whose id does not appear are removed. The whole pass runs under the
    /// map's write lock, so readers observe either the old or the new
    /// membership. `create`/`update` must not touch this same map.
    pub fn reconcile<S, I, C, U>(
        &self,
        snapshots: &[S],
        id_of: I,
        mut create: C,
        mut update: U,
    ) -> ReconcileReport<T>
    where
        I: Fn(&S) -> Snowflake,
        C: FnMut(&S) -> T,
        U: FnMut(&mut T, &S) -> bool,
    {
        let mut report = ReconcileReport::new();
        let mut map = self.inner.write();
        let mut to_remove: HashSet<Snowflake> = map.keys().copied().collect();

        for snapshot in snapshots {
            let id = id_of(snapshot);
            match map.get(&id) {
                Some(handle) => {
                    let changed = update(&mut handle.write(), snapshot);
                    // a repeated id in `snapshots` is folded into the first occurrence
                    if to_remove.remove(&id) {
                        if changed {
                            report.updated.push(id);
                        } else {
                            report.unchanged.push(id);
                        }
                    } else if changed && !report.added.contains(&id) && !report.updated.contains(&id) {
                        report.unchanged.retain(|unchanged| *unchanged != id);
                        report.updated.push(id);
                    }
                }
                None => {
                    map.insert(id, new_handle(create(snapshot)));
                    report.added.push(id);
                }
            }
        }

        let mut stale: Vec<Snowflake> = to_remove.into_iter().collect();
        stale.sort();
        for id in stale {
            if let Some(handle) = map.remove(&id) {
                report.removed.push((id, handle));
            }
        }

        report
    }
}

impl<T> Default for EntityMap<T> {
    fn default() -> Self {
        Self::new()
    }
}
