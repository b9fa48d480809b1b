use std::{collections::HashSet, hash::Hash};

/// Result of reconciling a set-valued field against its incoming snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetDiff<T> {
    pub added: Vec<T>,
    pub removed: Vec<T>,
}

impl<T> SetDiff<T> {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Mutates `current` in place so it equals `incoming`.
///
/// `added = incoming - current`, `removed = current - incoming`; members
/// present in both are left untouched. Both lists are sorted.
pub fn reconcile_set<T, I>(current: &mut HashSet<T>, incoming: I) -> SetDiff<T>
where
    T: Copy + Eq + Hash + Ord,
    I: IntoIterator<Item = T>,
{
    let mut to_remove: HashSet<T> = current.clone();
    let mut added = Vec::new();

    for item in incoming {
        if current.insert(item) {
            added.push(item);
        } else {
            to_remove.remove(&item);
        }
    }

    let mut removed: Vec<T> = to_remove.into_iter().collect();
    for item in &removed {
        current.remove(item);
    }

    added.sort();
    removed.sort();

    SetDiff { added, removed }
}
