//! Iterators over a [`SkipMap`](crate::SkipMap), all in ascending key order.

use core::fmt;
use core::iter::FusedIterator;

use crate::link::Link;
use crate::node::Node;
use crate::raw::RawSkipList;

// ============================================================================
// Borrowing iterators
// ============================================================================

/// An iterator over key-value pairs in sorted order.
pub struct Iter<'a, K, V> {
    list: &'a RawSkipList<K, V>,
    current: Link,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    /// `remaining` must equal the number of entries from `start` to the end.
    #[inline]
    pub(crate) fn new(list: &'a RawSkipList<K, V>, start: Link, remaining: usize) -> Self {
        Self {
            list,
            current: start,
            remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.current)?;
        self.current = node.next();
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            current: self.current,
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// A mutable iterator over key-value pairs in sorted order.
pub struct IterMut<'a, K, V> {
    list: &'a mut RawSkipList<K, V>,
    current: Link,
    remaining: usize,
}

impl<'a, K, V> IterMut<'a, K, V> {
    #[inline]
    pub(crate) fn new(list: &'a mut RawSkipList<K, V>) -> Self {
        let current = list.front();
        let remaining = list.len();
        Self {
            list,
            current,
            remaining,
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current;
        let node = self.list.node_mut(current)? as *mut Node<K, V>;

        // SAFETY: each node is yielded at most once, since `current` advances
        // along level 0 before returning. The arena is exclusively borrowed
        // for 'a and nothing links or unlinks while this iterator lives, so
        // the node stays in place for 'a.
        let node: &'a mut Node<K, V> = unsafe { &mut *node };

        self.current = node.next();
        self.remaining -= 1;
        Some((&node.key, &mut node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// An iterator over keys in sorted order.
#[derive(Clone)]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V> {
    #[inline]
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over values in sorted order by key.
#[derive(Clone)]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    #[inline]
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

/// A mutable iterator over values in sorted order by key.
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> ValuesMut<'a, K, V> {
    #[inline]
    pub(crate) fn new(inner: IterMut<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

// ============================================================================
// Owning iterator
// ============================================================================

/// An owning iterator over key-value pairs in sorted order.
///
/// Entries not yet yielded are dropped with the iterator.
pub struct IntoIter<K, V> {
    list: RawSkipList<K, V>,
}

impl<K, V> IntoIter<K, V> {
    #[inline]
    pub(crate) fn new(list: RawSkipList<K, V>) -> Self {
        Self { list }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front().map(|n| (n.key, n.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.list.len();
        (len, Some(len))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}
