//! Generic keyed in-memory collection, instantiated once per entity kind.
//!
//! Every method takes the collection lock exactly once, so each call is
//! atomic with respect to every other call on the same collection.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::hash::Hash;
use umbra_types::Timestamp;

/// A storable record.
pub trait Entity: Clone + Send + Sync + 'static {
    type Key: Clone + Eq + Hash + Send + Sync + 'static;

    fn key(&self) -> Self::Key;

    /// The instant used for feed ordering.
    fn created_at(&self) -> Timestamp;
}

/// Listing order, by [`Entity::created_at`] then insertion sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    NewestFirst,
    OldestFirst,
}

struct Slot<E> {
    seq: u64,
    entity: E,
}

struct Inner<E: Entity> {
    slots: HashMap<E::Key, Slot<E>>,
    next_seq: u64,
}

impl<E: Entity> Inner<E> {
    fn put(&mut self, entity: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.slots.insert(entity.key(), Slot { seq, entity });
    }
}

pub struct Collection<E: Entity> {
    inner: RwLock<Inner<E>>,
}

impl<E: Entity> Collection<E> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                slots: HashMap::new(),
                next_seq: 0,
            }),
        }
    }

    /// Store `entity`, replacing any entity with the same key.
    pub fn insert(&self, entity: E) -> E {
        self.inner.write().put(entity.clone());
        entity
    }

    /// Store `entity` unless an existing entity satisfies `conflicts`,
    /// in which case that entity is returned as the error.
    pub fn insert_unless(&self, entity: E, conflicts: impl Fn(&E) -> bool) -> Result<E, E> {
        let mut inner = self.inner.write();
        if let Some(existing) = inner.slots.values().find(|s| conflicts(&s.entity)) {
            return Err(existing.entity.clone());
        }
        inner.put(entity.clone());
        Ok(entity)
    }

    pub fn get(&self, key: &E::Key) -> Option<E> {
        self.inner.read().slots.get(key).map(|s| s.entity.clone())
    }

    pub fn any(&self, pred: impl Fn(&E) -> bool) -> bool {
        self.inner.read().slots.values().any(|s| pred(&s.entity))
    }

    /// Every entity matching `pred`, in the given order.
    pub fn list(&self, pred: impl Fn(&E) -> bool, order: Order) -> Vec<E> {
        let inner = self.inner.read();
        let mut matching: Vec<&Slot<E>> =
            inner.slots.values().filter(|s| pred(&s.entity)).collect();
        matching.sort_by(|a, b| {
            let ka = (a.entity.created_at(), a.seq);
            let kb = (b.entity.created_at(), b.seq);
            match order {
                Order::OldestFirst => ka.cmp(&kb),
                Order::NewestFirst => kb.cmp(&ka),
            }
        });
        matching.into_iter().map(|s| s.entity.clone()).collect()
    }

    /// Mutate the entity under `key` in place and return the result.
    /// `None` when absent, in which case `f` is not called.
    pub fn update_with(&self, key: &E::Key, f: impl FnOnce(&mut E)) -> Option<E> {
        let mut inner = self.inner.write();
        let slot = inner.slots.get_mut(key)?;
        f(&mut slot.entity);
        Some(slot.entity.clone())
    }

    /// Create-or-replace under `key`, computed from the existing entity.
    /// An updated entity keeps its original insertion sequence.
    pub fn upsert(&self, key: &E::Key, write: impl FnOnce(Option<&E>) -> E) -> E {
        let mut inner = self.inner.write();
        match inner.slots.get_mut(key) {
            Some(slot) => {
                slot.entity = write(Some(&slot.entity));
                slot.entity.clone()
            }
            None => {
                let entity = write(None);
                let seq = inner.next_seq;
                inner.next_seq += 1;
                inner.slots.insert(
                    key.clone(),
                    Slot {
                        seq,
                        entity: entity.clone(),
                    },
                );
                entity
            }
        }
    }

    pub fn remove(&self, key: &E::Key) -> Option<E> {
        self.inner.write().slots.remove(key).map(|s| s.entity)
    }

    pub fn len(&self) -> usize {
        self.inner.read().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().slots.is_empty()
    }
}

impl<E: Entity> Default for Collection<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Item {
        key: u32,
        at: i64,
        label: &'static str,
    }

    impl Entity for Item {
        type Key = u32;

        fn key(&self) -> u32 {
            self.key
        }

        fn created_at(&self) -> Timestamp {
            Timestamp::from_millis(self.at).unwrap()
        }
    }

    fn item(key: u32, at: i64) -> Item {
        Item {
            key,
            at,
            label: "x",
        }
    }

    #[test]
    fn list_orders_by_time_then_insertion() {
        let c = Collection::new();
        c.insert(item(1, 10));
        c.insert(item(2, 30));
        c.insert(item(3, 30));
        c.insert(item(4, 20));

        let newest: Vec<u32> = c.list(|_| true, Order::NewestFirst).iter().map(|i| i.key).collect();
        assert_eq!(newest, vec![3, 2, 4, 1]);

        let oldest: Vec<u32> = c.list(|_| true, Order::OldestFirst).iter().map(|i| i.key).collect();
        assert_eq!(oldest, vec![1, 4, 2, 3]);
    }

    #[test]
    fn insert_unless_reports_the_conflict() {
        let c = Collection::new();
        c.insert(item(1, 0));
        let err = c.insert_unless(item(2, 0), |e| e.key == 1).unwrap_err();
        assert_eq!(err.key, 1);
        assert_eq!(c.len(), 1);
        assert!(c.insert_unless(item(2, 0), |e| e.key == 9).is_ok());
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn update_with_missing_key_does_nothing() {
        let c: Collection<Item> = Collection::new();
        let mut called = false;
        assert!(c.update_with(&7, |_| called = true).is_none());
        assert!(!called);
    }

    #[test]
    fn upsert_creates_then_overwrites() {
        let c = Collection::new();
        let first = c.upsert(&5, |existing| {
            assert!(existing.is_none());
            item(5, 1)
        });
        assert_eq!(first.label, "x");

        let second = c.upsert(&5, |existing| Item {
            label: "y",
            ..existing.cloned().unwrap()
        });
        assert_eq!(second.label, "y");
        assert_eq!(c.len(), 1);
        assert_eq!(c.get(&5).unwrap().label, "y");
    }

    #[test]
    fn remove_returns_the_entity() {
        let c = Collection::new();
        c.insert(item(1, 0));
        assert_eq!(c.remove(&1).map(|i| i.key), Some(1));
        assert!(c.is_empty());
        assert!(c.remove(&1).is_none());
    }
}
