//! Cursors: positions in the level-0 chain.
//!
//! A cursor points at one entry or at the end. Lookups return cursors so
//! that presence and position come back together:
//!
//! ```
//! use nexus_skipmap::SkipMap;
//!
//! let mut map: SkipMap<u32, &str> = SkipMap::new(4);
//! map.insert(1, "a");
//! map.insert(2, "b");
//!
//! let mut cursor = map.find(&1);
//! assert!(cursor.is_valid());
//! cursor.move_next();
//! assert_eq!(cursor.key(), &2);
//! cursor.move_next();
//! assert!(cursor.is_end());
//! ```
//!
//! Cursors borrow the map, so an entry cannot be removed while a cursor to
//! it is alive.

use core::fmt;

use crate::error::SkipMapError;
use crate::iter::Iter;
use crate::link::Link;
use crate::raw::RawSkipList;

const END_DEREF: &str = "dereferenced end cursor";

// ============================================================================
// Cursor
// ============================================================================

/// A read-only cursor.
///
/// Two cursors compare equal when they point at the same entry of the same
/// map, or are both at the end of the same map.
pub struct Cursor<'a, K, V> {
    list: &'a RawSkipList<K, V>,
    current: Link,
}

impl<'a, K, V> Cursor<'a, K, V> {
    #[inline]
    pub(crate) fn new(list: &'a RawSkipList<K, V>, current: Link) -> Self {
        Self { list, current }
    }

    /// Returns `true` if the cursor points at an entry.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.current.is_some()
    }

    /// Returns `true` if the cursor is past the last entry.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Returns the current entry, or `None` at the end.
    #[inline]
    pub fn get(&self) -> Option<(&'a K, &'a V)> {
        self.list.node(self.current).map(|n| (&n.key, &n.value))
    }

    /// Returns the current entry, or [`SkipMapError::EmptyCursor`] at the end.
    #[inline]
    pub fn try_get(&self) -> Result<(&'a K, &'a V), SkipMapError> {
        self.get().ok_or(SkipMapError::EmptyCursor)
    }

    /// Returns the current key.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end.
    #[inline]
    pub fn key(&self) -> &'a K {
        self.get().expect(END_DEREF).0
    }

    /// Returns the current value.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end.
    #[inline]
    pub fn value(&self) -> &'a V {
        self.get().expect(END_DEREF).1
    }

    /// Number of levels the current entry participates in.
    #[inline]
    pub fn height(&self) -> Option<usize> {
        self.list.node(self.current).map(|n| n.height())
    }

    /// Advances to the next entry. No-op at the end.
    #[inline]
    pub fn move_next(&mut self) {
        if let Some(node) = self.list.node(self.current) {
            self.current = node.next();
        }
    }

    /// Returns the entry after the current one without advancing.
    #[inline]
    pub fn peek_next(&self) -> Option<(&'a K, &'a V)> {
        let node = self.list.node(self.current)?;
        self.list.node(node.next()).map(|n| (&n.key, &n.value))
    }
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Cursor<'_, K, V> {}

impl<K, V> PartialEq for Cursor<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.list, other.list) && self.current == other.current
    }
}

impl<K, V> Eq for Cursor<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Cursor<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get()).finish()
    }
}

impl<'a, K, V> IntoIterator for Cursor<'a, K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    /// Iterates from the current entry to the end.
    ///
    /// O(n): the entries left are counted up front so the iterator can
    /// report an exact length.
    fn into_iter(self) -> Self::IntoIter {
        let remaining = self.list.count_from(self.current);
        Iter::new(self.list, self.current, remaining)
    }
}

// ============================================================================
// CursorMut
// ============================================================================

/// A cursor that can modify values and remove entries.
pub struct CursorMut<'a, K, V> {
    list: &'a mut RawSkipList<K, V>,
    current: Link,
}

impl<'a, K, V> CursorMut<'a, K, V> {
    #[inline]
    pub(crate) fn new(list: &'a mut RawSkipList<K, V>, current: Link) -> Self {
        Self { list, current }
    }

    /// Returns `true` if the cursor points at an entry.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.current.is_some()
    }

    /// Returns `true` if the cursor is past the last entry.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Reborrows as a read-only cursor at the same position.
    #[inline]
    pub fn as_cursor(&self) -> Cursor<'_, K, V> {
        Cursor::new(self.list, self.current)
    }

    /// Returns the current entry, or `None` at the end.
    #[inline]
    pub fn get(&self) -> Option<(&K, &V)> {
        self.list.node(self.current).map(|n| (&n.key, &n.value))
    }

    /// Returns the current entry with a mutable value, or `None` at the end.
    #[inline]
    pub fn get_mut(&mut self) -> Option<(&K, &mut V)> {
        self.list
            .node_mut(self.current)
            .map(|n| (&n.key, &mut n.value))
    }

    /// Returns the current value mutably, or [`SkipMapError::EmptyCursor`].
    #[inline]
    pub fn try_value_mut(&mut self) -> Result<&mut V, SkipMapError> {
        self.get_mut().map(|(_, v)| v).ok_or(SkipMapError::EmptyCursor)
    }

    /// Returns the current key.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end.
    #[inline]
    pub fn key(&self) -> &K {
        self.get().expect(END_DEREF).0
    }

    /// Returns the current value.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end.
    #[inline]
    pub fn value(&self) -> &V {
        self.get().expect(END_DEREF).1
    }

    /// Returns the current value mutably.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end.
    #[inline]
    pub fn value_mut(&mut self) -> &mut V {
        self.get_mut().expect(END_DEREF).1
    }

    /// Converts into a mutable reference to the current value, living as long
    /// as the map borrow.
    #[inline]
    pub fn into_value_mut(self) -> Option<&'a mut V> {
        let list = self.list;
        list.node_mut(self.current).map(|n| &mut n.value)
    }

    /// Number of levels the current entry participates in.
    #[inline]
    pub fn height(&self) -> Option<usize> {
        self.list.node(self.current).map(|n| n.height())
    }

    /// Advances to the next entry. No-op at the end.
    #[inline]
    pub fn move_next(&mut self) {
        if let Some(node) = self.list.node(self.current) {
            self.current = node.next();
        }
    }

    /// Returns the entry after the current one without advancing.
    #[inline]
    pub fn peek_next(&self) -> Option<(&K, &V)> {
        self.as_cursor().peek_next()
    }
}

impl<K: Ord, V> CursorMut<'_, K, V> {
    /// Removes the current entry and advances to its successor.
    ///
    /// Returns `None` if the cursor is at the end.
    ///
    /// O(log n): predecessors are found by searching for the current key.
    pub fn remove_current(&mut self) -> Option<(K, V)> {
        let (next, node) = self.list.remove_at(self.current)?;
        self.current = next;
        Some((node.key, node.value))
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for CursorMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.get()).finish()
    }
}
