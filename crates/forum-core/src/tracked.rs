//! Change-tracking collection for aggregate children
//!
//! A [`TrackedCollection`] owns the live items of one aggregate relation and
//! remembers, relative to the snapshot it was loaded from, which items were
//! added and which were removed. A persistence layer reads
//! [`new_items`](TrackedCollection::new_items) and
//! [`removed_items`](TrackedCollection::removed_items) after a unit of work
//! and turns them into inserts and deletes.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

/// An entity with a stable identity
pub trait Identified {
    type Key: Clone + Eq + Hash;

    /// The identity used to compare items in a collection
    fn key(&self) -> &Self::Key;
}

/// Owned live items plus new/removed bookkeeping
///
/// Invariants:
/// - every new key is live
/// - no removed item is live
/// - no key is both new and removed
#[derive(Debug, Clone)]
pub struct TrackedCollection<T: Identified> {
    items: Vec<T>,
    added: HashSet<T::Key>,
    removed: Vec<T>,
}

impl<T: Identified> TrackedCollection<T> {
    /// Create an empty collection; everything added is new
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            added: HashSet::new(),
            removed: Vec::new(),
        }
    }

    /// Create from persisted items with no pending changes
    pub fn from_snapshot(items: impl IntoIterator<Item = T>) -> Self {
        let mut collection = Self::new();
        for item in items {
            if !collection.exists(&item) {
                collection.items.push(item);
            }
        }
        collection
    }

    /// Check if an item with the same identity is live
    pub fn exists(&self, item: &T) -> bool {
        self.position(item.key()).is_some()
    }

    /// Add an item, or replace the live item with the same identity
    pub fn add(&mut self, item: T) {
        let key = item.key().clone();
        if self.unmark_removed(&key) {
            self.items.push(item);
            return;
        }
        match self.position(&key) {
            Some(pos) => self.items[pos] = item,
            None => {
                self.added.insert(key);
                self.items.push(item);
            }
        }
    }

    /// Remove an item by identity
    ///
    /// Removing an item that was added in this unit of work cancels the
    /// addition. Anything else is recorded as removed, including items the
    /// caller knows from storage but never loaded into this collection.
    pub fn remove(&mut self, item: &T)
    where
        T: Clone,
    {
        let key = item.key();
        let live = self.position(key).map(|pos| self.items.remove(pos));
        if self.added.remove(key) {
            return;
        }
        if !self.removed.iter().any(|r| r.key() == key) {
            self.removed.push(live.unwrap_or_else(|| item.clone()));
        }
    }

    fn unmark_removed(&mut self, key: &T::Key) -> bool {
        match self.removed.iter().position(|r| r.key() == key) {
            Some(pos) => {
                self.removed.remove(pos);
                true
            }
            None => false,
        }
    }

    fn position(&self, key: &T::Key) -> Option<usize> {
        self.items.iter().position(|i| i.key() == key)
    }

    /// Live items in insertion order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Live items added since the snapshot, in insertion order
    pub fn new_items(&self) -> Vec<&T> {
        self.items
            .iter()
            .filter(|i| self.added.contains(i.key()))
            .collect()
    }

    /// Items removed since the snapshot
    pub fn removed_items(&self) -> &[T] {
        &self.removed
    }

    /// Get a live item by key
    pub fn get(&self, key: &T::Key) -> Option<&T> {
        self.items.iter().find(|i| i.key() == key)
    }

    /// Get a mutable live item by key
    pub fn get_mut(&mut self, key: &T::Key) -> Option<&mut T> {
        self.items.iter_mut().find(|i| i.key() == key)
    }

    /// Check whether a live item was added since the snapshot
    pub fn is_new(&self, key: &T::Key) -> bool {
        self.added.contains(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check if there is anything to persist
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }

    /// Accept the current live items as the new snapshot
    pub fn commit(&mut self) {
        self.added.clear();
        self.removed.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Mutable access that bypasses change tracking
    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }
}

impl<T: Identified> Default for TrackedCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Identified> IntoIterator for &'a TrackedCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// Serialized form is the live snapshot only
impl<T: Identified + Serialize> Serialize for TrackedCollection<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.items.serialize(serializer)
    }
}

impl<'de, T: Identified + Deserialize<'de>> Deserialize<'de> for TrackedCollection<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let items = Vec::<T>::deserialize(deserializer)?;
        Ok(Self::from_snapshot(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Item {
        id: u32,
        label: String,
    }

    impl Identified for Item {
        type Key = u32;

        fn key(&self) -> &u32 {
            &self.id
        }
    }

    fn item(id: u32) -> Item {
        Item {
            id,
            label: "x".to_string(),
        }
    }

    fn ids(items: &[&Item]) -> Vec<u32> {
        items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_add_to_empty_marks_new() {
        let mut list = TrackedCollection::new();
        list.add(item(1));
        list.add(item(2));

        assert_eq!(list.len(), 2);
        assert_eq!(ids(&list.new_items()), vec![1, 2]);
        assert!(list.removed_items().is_empty());
    }

    #[test]
    fn test_snapshot_has_no_changes() {
        let list = TrackedCollection::from_snapshot(vec![item(1), item(2), item(1)]);
        assert_eq!(list.len(), 2);
        assert!(!list.has_changes());
    }

    #[test]
    fn test_add_then_remove_cancels() {
        let mut list = TrackedCollection::from_snapshot(vec![item(1)]);
        let new_before = list.new_items().len();
        let removed_before = list.removed_items().len();

        list.add(item(2));
        assert_eq!(list.new_items().len(), new_before + 1);
        assert_eq!(list.len(), 2);

        list.remove(&item(2));
        assert_eq!(list.new_items().len(), new_before);
        assert_eq!(list.removed_items().len(), removed_before);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_snapshot_item_is_recorded() {
        let mut list = TrackedCollection::from_snapshot(vec![item(1), item(2)]);
        list.remove(&item(1));

        assert_eq!(list.len(), 1);
        assert!(!list.exists(&item(1)));
        assert_eq!(list.removed_items(), &[item(1)]);
        assert!(list.new_items().is_empty());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut list = TrackedCollection::from_snapshot(vec![item(1)]);
        list.remove(&item(1));
        list.remove(&item(1));
        assert_eq!(list.removed_items().len(), 1);
    }

    #[test]
    fn test_remove_unloaded_item_is_recorded() {
        let mut list: TrackedCollection<Item> = TrackedCollection::new();
        list.remove(&item(7));

        assert!(list.is_empty());
        assert_eq!(list.removed_items(), &[item(7)]);
    }

    #[test]
    fn test_readd_removed_item_clears_removal() {
        let mut list = TrackedCollection::from_snapshot(vec![item(1)]);
        list.remove(&item(1));
        list.add(item(1));

        assert!(list.exists(&item(1)));
        assert!(list.removed_items().is_empty());
        assert!(list.new_items().is_empty());
        assert!(!list.has_changes());
    }

    #[test]
    fn test_duplicate_add_is_idempotent() {
        let mut list = TrackedCollection::new();
        list.add(item(1));
        list.add(item(1));

        assert_eq!(list.len(), 1);
        assert_eq!(list.new_items().len(), 1);
    }

    #[test]
    fn test_add_existing_replaces_value() {
        let mut list = TrackedCollection::from_snapshot(vec![item(1)]);
        list.add(Item {
            id: 1,
            label: "updated".to_string(),
        });

        assert_eq!(list.get(&1).unwrap().label, "updated");
        assert!(!list.has_changes());
    }

    #[test]
    fn test_new_and_removed_are_disjoint() {
        let mut list = TrackedCollection::from_snapshot(vec![item(1)]);
        list.add(item(2));
        list.remove(&item(1));
        list.add(item(1));
        list.remove(&item(2));
        list.add(item(2));

        for new in list.new_items() {
            assert!(list.exists(new));
            assert!(!list.removed_items().iter().any(|r| r.id == new.id));
        }
        for removed in list.removed_items() {
            assert!(!list.exists(removed));
        }
    }

    #[test]
    fn test_commit_clears_marks() {
        let mut list = TrackedCollection::from_snapshot(vec![item(1)]);
        list.add(item(2));
        list.remove(&item(1));
        assert!(list.has_changes());

        list.commit();
        assert!(!list.has_changes());
        assert_eq!(list.len(), 1);
        assert!(!list.is_new(&2));
    }

    #[test]
    fn test_serialization_is_snapshot() {
        let mut list = TrackedCollection::new();
        list.add(item(1));

        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"[{"id":1,"label":"x"}]"#);
    }
}
