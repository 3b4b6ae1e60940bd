//! Entry API for in-place access and defaulting insert.
//!
//! [`SkipMap::entry`](crate::SkipMap::entry) runs one search and keeps the
//! predecessor array, so the follow-up insert or remove does not search again.
//!
//! ```
//! use nexus_skipmap::SkipMap;
//!
//! let mut counts: SkipMap<&str, u32> = SkipMap::new(4);
//! for word in ["a", "b", "a"] {
//!     *counts.entry(word).or_default() += 1;
//! }
//! assert_eq!(counts["a"], 2);
//! ```

use core::fmt;
use core::mem;

use rand_core::RngCore;

use crate::SkipMap;
use crate::link::Link;
use crate::node::Node;
use crate::raw::{Preds, RawSkipList};

/// A view into a single entry, which may be occupied or vacant.
pub enum Entry<'a, K, V, R> {
    /// The key is present.
    Occupied(OccupiedEntry<'a, K, V>),
    /// The key is absent.
    Vacant(VacantEntry<'a, K, V, R>),
}

/// An entry whose key is present.
pub struct OccupiedEntry<'a, K, V> {
    list: &'a mut RawSkipList<K, V>,
    link: Link,
    update: Preds,
}

/// An entry whose key is absent.
pub struct VacantEntry<'a, K, V, R> {
    map: &'a mut SkipMap<K, V, R>,
    key: K,
    update: Preds,
}

impl<'a, K, V, R> Entry<'a, K, V, R> {
    /// Returns a reference to the key.
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(e) => e.key(),
            Entry::Vacant(e) => &e.key,
        }
    }

    /// Modifies an existing entry before any insert.
    pub fn and_modify<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        if let Entry::Occupied(ref mut e) = self {
            f(e.get_mut());
        }
        self
    }
}

impl<'a, K: Ord, V, R: RngCore> Entry<'a, K, V, R> {
    /// Ensures a value is in the entry by inserting `default` if empty.
    pub fn or_insert(self, default: V) -> &'a mut V {
        self.or_insert_with(|| default)
    }

    /// Ensures a value is in the entry by inserting the result of `f` if empty.
    pub fn or_insert_with<F: FnOnce() -> V>(self, f: F) -> &'a mut V {
        match self {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => e.insert(f()),
        }
    }

    /// Like [`or_insert_with`](Self::or_insert_with), but `f` receives the key.
    pub fn or_insert_with_key<F: FnOnce(&K) -> V>(self, f: F) -> &'a mut V {
        match self {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                let value = f(&e.key);
                e.insert(value)
            }
        }
    }

    /// Ensures a value is in the entry by inserting `V::default()` if empty.
    pub fn or_default(self) -> &'a mut V
    where
        V: Default,
    {
        self.or_insert_with(V::default)
    }
}

impl<'a, K, V> OccupiedEntry<'a, K, V> {
    pub(crate) fn new(list: &'a mut RawSkipList<K, V>, link: Link, update: Preds) -> Self {
        debug_assert!(link.is_some());
        Self { list, link, update }
    }

    #[inline]
    fn node(&self) -> &Node<K, V> {
        self.list.node(self.link).expect("invalid index")
    }

    /// Returns a reference to the stored key.
    #[inline]
    pub fn key(&self) -> &K {
        &self.node().key
    }

    /// Gets a reference to the value.
    #[inline]
    pub fn get(&self) -> &V {
        &self.node().value
    }

    /// Gets a mutable reference to the value.
    #[inline]
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.list.node_mut(self.link).expect("invalid index").value
    }

    /// Converts to a mutable reference to the value.
    pub fn into_mut(self) -> &'a mut V {
        let list = self.list;
        &mut list.node_mut(self.link).expect("invalid index").value
    }

    /// Replaces the value, returning the old one. The key is kept.
    pub fn insert(&mut self, value: V) -> V {
        mem::replace(self.get_mut(), value)
    }

    /// Removes the entry and returns the value.
    pub fn remove(self) -> V {
        self.remove_entry().1
    }

    /// Removes the entry and returns the stored key and value.
    pub fn remove_entry(self) -> (K, V) {
        let (_, node) = self.list.unlink(self.link, &self.update);
        (node.key, node.value)
    }
}

impl<'a, K, V, R> VacantEntry<'a, K, V, R> {
    pub(crate) fn new(map: &'a mut SkipMap<K, V, R>, key: K, update: Preds) -> Self {
        Self { map, key, update }
    }

    /// Returns a reference to the key that would be inserted.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Takes ownership of the key.
    pub fn into_key(self) -> K {
        self.key
    }
}

impl<'a, K: Ord, V, R: RngCore> VacantEntry<'a, K, V, R> {
    /// Inserts a value, reusing the predecessors from the lookup.
    pub fn insert(self, value: V) -> &'a mut V {
        let VacantEntry { map, key, update } = self;
        let link = map.link_new(key, value, &update);
        &mut map.raw.node_mut(link).expect("just inserted").value
    }
}

impl<K: fmt::Debug, V: fmt::Debug, R> fmt::Debug for Entry<'_, K, V, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Occupied(e) => f.debug_tuple("Entry").field(e).finish(),
            Entry::Vacant(e) => f.debug_tuple("Entry").field(e).finish(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OccupiedEntry<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OccupiedEntry")
            .field("key", self.key())
            .field("value", self.get())
            .finish()
    }
}

impl<K: fmt::Debug, V, R> fmt::Debug for VacantEntry<'_, K, V, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VacantEntry").field(&self.key).finish()
    }
}
