//! Skip map - an ordered map backed by a probabilistic skip list.
//!
//! A skip list provides O(log n) expected time for insert, lookup, and
//! removal without rebalancing. Nodes live in a slab arena owned by the map;
//! links between them are arena indices.
//!
//! # Example
//!
//! ```
//! use nexus_skipmap::SkipMap;
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let mut map: SkipMap<u64, String, _> = SkipMap::with_rng(8, SmallRng::seed_from_u64(1));
//!
//! map.insert(100, "first".into());
//! map.insert(50, "second".into());
//!
//! assert_eq!(map.get(&50), Some(&"second".into()));
//! assert_eq!(map.first(), Some((&50, &"second".into())));
//!
//! let cursor = map.find(&100);
//! assert!(cursor.is_valid());
//! assert_eq!(cursor.value(), "first");
//! ```

use core::borrow::Borrow;
use core::fmt;
use core::ops::Index;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand_core::RngCore;

use crate::config::{DEFAULT_MAX_LEVEL, validate_max_level};
use crate::cursor::{Cursor, CursorMut};
use crate::dump::LevelDump;
use crate::entry::{Entry, OccupiedEntry, VacantEntry};
use crate::error::SkipMapError;
use crate::iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
use crate::level::LevelGenerator;
use crate::link::Link;
use crate::node::Node;
use crate::raw::RawSkipList;

/// An ordered map with unique keys, backed by a skip list.
///
/// # Type Parameters
///
/// - `K`: Key type, must implement `Ord` for lookups and mutation
/// - `V`: Value type
/// - `R`: Random number generator for level assignment, defaults to `SmallRng`
///
/// The map exclusively owns every entry. Moving the map moves the whole
/// chain; it is never implicitly copied. [`Clone`] is a deep copy.
#[derive(Clone)]
pub struct SkipMap<K, V, R = SmallRng> {
    pub(crate) raw: RawSkipList<K, V>,
    pub(crate) levels: LevelGenerator<R>,
}

// ============================================================================
// Construction
// ============================================================================

impl<K: Ord, V> SkipMap<K, V, SmallRng> {
    /// Creates an empty map with `max_level` levels, seeded from OS entropy.
    ///
    /// # Panics
    ///
    /// Panics if `max_level` is 0 or exceeds [`MAX_LEVEL_LIMIT`](crate::MAX_LEVEL_LIMIT).
    pub fn new(max_level: usize) -> Self {
        Self::with_rng(max_level, SmallRng::from_entropy())
    }

    /// Fallible variant of [`new`](Self::new).
    pub fn try_new(max_level: usize) -> Result<Self, SkipMapError> {
        Self::try_with_rng(max_level, SmallRng::from_entropy())
    }
}

impl<K: Ord, V, R: RngCore> SkipMap<K, V, R> {
    /// Creates an empty map drawing levels from `rng`.
    ///
    /// # Panics
    ///
    /// Panics if `max_level` is 0 or exceeds [`MAX_LEVEL_LIMIT`](crate::MAX_LEVEL_LIMIT).
    pub fn with_rng(max_level: usize, rng: R) -> Self {
        Self::with_level_ratio(max_level, rng, 2)
    }

    /// Fallible variant of [`with_rng`](Self::with_rng).
    pub fn try_with_rng(max_level: usize, rng: R) -> Result<Self, SkipMapError> {
        validate_max_level(max_level)?;
        Ok(Self::from_parts(max_level, rng, 2))
    }

    /// Creates an empty map with a custom level ratio.
    ///
    /// `level_ratio` controls memory vs search speed:
    /// - 2: standard (p=0.5), ~2 links per node
    /// - 4: Redis-style (p=0.25), ~1.33 links per node
    ///
    /// Rounded up to a power of two, minimum 2.
    ///
    /// # Panics
    ///
    /// Panics if `max_level` is 0 or exceeds [`MAX_LEVEL_LIMIT`](crate::MAX_LEVEL_LIMIT).
    pub fn with_level_ratio(max_level: usize, rng: R, level_ratio: u32) -> Self {
        if let Err(e) = validate_max_level(max_level) {
            panic!("invalid max_level: {e}");
        }
        Self::from_parts(max_level, rng, level_ratio)
    }

    /// Assembles a map from a validated level count.
    pub(crate) fn from_parts(max_level: usize, rng: R, level_ratio: u32) -> Self {
        let levels = LevelGenerator::with_ratio(rng, max_level, level_ratio);
        log::debug!(
            "skip map created: max_level={max_level}, level_ratio={}",
            levels.level_ratio()
        );
        Self {
            raw: RawSkipList::new(max_level),
            levels,
        }
    }
}

// ============================================================================
// Order-independent operations
// ============================================================================

impl<K, V, R> SkipMap<K, V, R> {
    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.len() == 0
    }

    /// Number of levels, fixed at construction.
    #[inline]
    pub fn max_level(&self) -> usize {
        self.raw.max_level()
    }

    /// Effective level ratio of the height policy.
    #[inline]
    pub fn level_ratio(&self) -> u32 {
        self.levels.level_ratio()
    }

    /// Returns the first (smallest) entry, or `None` if empty.
    #[inline]
    pub fn first(&self) -> Option<(&K, &V)> {
        self.cursor_front().get()
    }

    /// Returns the first entry with a mutable value.
    #[inline]
    pub fn first_mut(&mut self) -> Option<(&K, &mut V)> {
        let front = self.raw.front();
        self.raw.node_mut(front).map(|n| (&n.key, &mut n.value))
    }

    /// Returns the last (largest) entry, or `None` if empty.
    ///
    /// O(log n): descends the express lanes to the tail.
    #[inline]
    pub fn last(&self) -> Option<(&K, &V)> {
        self.raw.node(self.raw.back()).map(|n| (&n.key, &n.value))
    }

    /// Returns the last entry with a mutable value.
    #[inline]
    pub fn last_mut(&mut self) -> Option<(&K, &mut V)> {
        let back = self.raw.back();
        self.raw.node_mut(back).map(|n| (&n.key, &mut n.value))
    }

    /// Removes and returns the first entry.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.raw.pop_front().map(|n| (n.key, n.value))
    }

    /// Keeps only the entries for which `f` returns `true`.
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let removed = self.raw.retain(f);
        log::trace!("retain removed {removed} entries");
    }

    /// Removes every entry, releasing each exactly once.
    pub fn clear(&mut self) {
        let released = self.raw.clear();
        log::debug!("skip map cleared: {released} entries released");
    }

    // ========================================================================
    // Cursors and iteration
    // ========================================================================

    /// Cursor at the first entry (the end cursor if empty).
    #[inline]
    pub fn cursor_front(&self) -> Cursor<'_, K, V> {
        Cursor::new(&self.raw, self.raw.front())
    }

    /// Mutable cursor at the first entry.
    #[inline]
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, K, V> {
        let front = self.raw.front();
        CursorMut::new(&mut self.raw, front)
    }

    /// The end cursor: points at no entry.
    #[inline]
    pub fn cursor_end(&self) -> Cursor<'_, K, V> {
        Cursor::new(&self.raw, Link::NONE)
    }

    /// Returns an iterator over entries in key order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.raw, self.raw.front(), self.raw.len())
    }

    /// Returns an iterator over entries in key order, with mutable values.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&mut self.raw)
    }

    /// Returns an iterator over keys in order.
    #[inline]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// Returns an iterator over values in key order.
    #[inline]
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    /// Returns an iterator over mutable values in key order.
    #[inline]
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut::new(self.iter_mut())
    }

    /// Renders each level of the structure, for debugging.
    ///
    /// ```
    /// use nexus_skipmap::SkipMap;
    ///
    /// let mut map: SkipMap<&str, i32> = SkipMap::new(2);
    /// map.insert("a", 1);
    /// println!("{}", map.dump());
    /// ```
    #[inline]
    pub fn dump(&self) -> LevelDump<'_, K, V> {
        LevelDump::new(self.cursor_front(), self.max_level())
    }
}

// ============================================================================
// Lookup and removal
// ============================================================================

impl<K: Ord, V, R> SkipMap<K, V, R> {
    /// Returns a cursor at `key`, or the end cursor if absent.
    #[inline]
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Cursor::new(&self.raw, self.raw.find(key))
    }

    /// Returns a mutable cursor at `key`, or the end cursor if absent.
    #[inline]
    pub fn find_mut<Q>(&mut self, key: &Q) -> CursorMut<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let found = self.raw.find(key);
        CursorMut::new(&mut self.raw, found)
    }

    /// Returns a reference to the value for `key`.
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.raw.node(self.raw.find(key)).map(|n| &n.value)
    }

    /// Returns the stored key and value for `key`.
    #[inline]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).get()
    }

    /// Returns a mutable reference to the value for `key`.
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let found = self.raw.find(key);
        self.raw.node_mut(found).map(|n| &mut n.value)
    }

    /// Read-only lookup that reports absence as [`SkipMapError::KeyNotFound`].
    #[inline]
    pub fn try_get<Q>(&self, key: &Q) -> Result<&V, SkipMapError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).ok_or(SkipMapError::KeyNotFound)
    }

    /// Returns `true` if the map contains `key`.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.raw.find(key).is_some()
    }

    /// Removes `key` and returns a cursor at its successor.
    ///
    /// Returns the end cursor if `key` was absent or was the last entry.
    /// Use [`remove_entry`](Self::remove_entry) or [`take`](Self::take) to
    /// get the removed value back.
    pub fn remove<Q>(&mut self, key: &Q) -> CursorMut<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let successor = match self.raw.remove(key) {
            Some((successor, _node)) => successor,
            None => Link::NONE,
        };
        CursorMut::new(&mut self.raw, successor)
    }

    /// Removes `key`, returning the stored key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.raw.remove(key).map(|(_, n)| (n.key, n.value))
    }

    /// Removes `key`, returning its value.
    #[inline]
    pub fn take<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes and returns the last entry.
    ///
    /// O(log n): the tail's predecessors have to be searched for.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.raw.pop_back().map(|n| (n.key, n.value))
    }
}

// ============================================================================
// Insertion
// ============================================================================

impl<K: Ord, V, R: RngCore> SkipMap<K, V, R> {
    /// Inserts or overwrites the value for `key`, returning a cursor at it.
    ///
    /// Keys are unique: an existing entry keeps its node and key, and only
    /// its value is replaced.
    pub fn insert(&mut self, key: K, value: V) -> CursorMut<'_, K, V> {
        let mut update = self.raw.preds();
        let found = self.raw.search(&key, &mut update);

        if let Some(node) = self.raw.node_mut(found) {
            node.value = value;
            return CursorMut::new(&mut self.raw, found);
        }

        let link = self.link_new(key, value, &update);
        CursorMut::new(&mut self.raw, link)
    }

    /// Inserts or overwrites the value for `key`, returning the previous value.
    pub fn replace(&mut self, key: K, value: V) -> Option<V> {
        let mut update = self.raw.preds();
        let found = self.raw.search(&key, &mut update);

        if let Some(node) = self.raw.node_mut(found) {
            return Some(core::mem::replace(&mut node.value, value));
        }

        self.link_new(key, value, &update);
        None
    }

    /// Gets the entry for `key`.
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, R> {
        let mut update = self.raw.preds();
        let found = self.raw.search(&key, &mut update);

        if found.is_some() {
            Entry::Occupied(OccupiedEntry::new(&mut self.raw, found, update))
        } else {
            Entry::Vacant(VacantEntry::new(self, key, update))
        }
    }

    /// Returns the value for `key`, inserting `V::default()` first if absent.
    #[inline]
    pub fn get_or_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.entry(key).or_default()
    }

    /// Draws a height and splices a new node after the predecessors in `update`.
    pub(crate) fn link_new(&mut self, key: K, value: V, update: &[Link]) -> Link {
        let height = self.levels.next_height();
        self.raw.link_node(Node::new(key, value, height), update)
    }
}

// ============================================================================
// Trait impls
// ============================================================================

impl<K: Ord, V> Default for SkipMap<K, V, SmallRng> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LEVEL)
    }
}

impl<K, V, R> fmt::Debug for SkipMap<K, V, R>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, R, R2> PartialEq<SkipMap<K, V, R2>> for SkipMap<K, V, R>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &SkipMap<K, V, R2>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, R> Eq for SkipMap<K, V, R> {}

impl<K, Q, V, R> Index<&Q> for SkipMap<K, V, R>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    type Output = V;

    /// Returns the value for `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present. Use [`SkipMap::get`] or
    /// [`SkipMap::try_get`] for a fallible lookup.
    #[inline]
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("key not found in SkipMap")
    }
}

impl<K: Ord, V, R: RngCore> Extend<(K, V)> for SkipMap<K, V, R> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V, R> Extend<(&'a K, &'a V)> for SkipMap<K, V, R>
where
    K: Ord + Copy,
    V: Copy,
    R: RngCore,
{
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        self.extend(iter.into_iter().map(|(k, v)| (*k, *v)));
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for SkipMap<K, V, SmallRng> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, R> IntoIterator for SkipMap<K, V, R> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.raw)
    }
}

impl<'a, K, V, R> IntoIterator for &'a SkipMap<K, V, R> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, R> IntoIterator for &'a mut SkipMap<K, V, R> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestMap = SkipMap<u64, String, SmallRng>;

    fn make_rng() -> SmallRng {
        SmallRng::seed_from_u64(12345)
    }

    fn make_map() -> TestMap {
        SkipMap::with_rng(8, make_rng())
    }

    // ========================================================================
    // Basic operations
    // ========================================================================

    #[test]
    fn new_is_empty() {
        let map = make_map();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert_eq!(map.max_level(), 8);
        assert_eq!(map.first(), None);
        assert_eq!(map.last(), None);
        assert!(!map.cursor_front().is_valid());
        assert_eq!(map.cursor_front(), map.cursor_end());
    }

    #[test]
    fn insert_single() {
        let mut map = make_map();
        let cursor = map.insert(100, "hello".into());
        assert_eq!(cursor.key(), &100);
        assert_eq!(cursor.value(), "hello");

        assert_eq!(map.len(), 1);
        assert!(!map.is_empty());
        assert_eq!(map.get(&100), Some(&"hello".into()));
        assert_eq!(map.first(), Some((&100, &"hello".into())));
        assert_eq!(map.last(), Some((&100, &"hello".into())));
        map.raw.assert_invariants();
    }

    #[test]
    fn insert_overwrites_existing() {
        let mut map = make_map();
        map.insert(100, "first".into());
        let cursor = map.insert(100, "second".into());
        assert_eq!(cursor.value(), "second");

        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&100), Some(&"second".into()));
    }

    #[test]
    fn insert_keeps_node_identity() {
        let mut map = make_map();
        map.insert(1, "a".into());
        let before = map.find(&1).height();
        map.insert(1, "b".into());
        assert_eq!(map.find(&1).height(), before);
    }

    #[test]
    fn replace_returns_previous() {
        let mut map = make_map();
        assert_eq!(map.replace(1, "one".into()), None);
        assert_eq!(map.replace(1, "uno".into()), Some("one".into()));
        assert_eq!(map.len(), 1);
        assert_eq!(map[&1], "uno");
    }

    #[test]
    fn insert_multiple_maintains_order() {
        let mut map = make_map();
        for k in [50, 10, 90, 30, 70] {
            map.insert(k, format!("v{k}"));
        }

        assert_eq!(map.len(), 5);
        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, vec![10, 30, 50, 70, 90]);
        assert_eq!(map.first(), Some((&10, &"v10".into())));
        assert_eq!(map.last(), Some((&90, &"v90".into())));
        map.raw.assert_invariants();
    }

    #[test]
    fn get_and_get_mut() {
        let mut map = make_map();
        map.insert(100, "hello".into());

        assert_eq!(map.get(&999), None);
        if let Some(v) = map.get_mut(&100) {
            *v = "world".into();
        }
        assert_eq!(map.get(&100), Some(&"world".into()));
        assert_eq!(map.get_key_value(&100), Some((&100, &"world".into())));
    }

    #[test]
    fn borrowed_key_lookup() {
        let mut map: SkipMap<String, u32> = SkipMap::with_rng(4, make_rng());
        map.insert("alpha".into(), 1);
        map.insert("beta".into(), 2);

        assert_eq!(map.get("beta"), Some(&2));
        assert!(map.contains_key("alpha"));
        assert_eq!(map["alpha"], 1);
        assert_eq!(map.take("alpha"), Some(1));
        assert!(!map.contains_key("alpha"));
    }

    #[test]
    fn try_get_reports_missing() {
        let mut map = make_map();
        map.insert(1, "one".into());
        assert_eq!(map.try_get(&1), Ok(&"one".to_string()));
        assert_eq!(map.try_get(&2), Err(SkipMapError::KeyNotFound));
    }

    #[test]
    #[should_panic(expected = "key not found")]
    fn index_missing_panics() {
        let map = make_map();
        let _ = &map[&7];
    }

    // ========================================================================
    // Remove operations
    // ========================================================================

    #[test]
    fn remove_returns_successor() {
        let mut map = make_map();
        for k in [10, 20, 30] {
            map.insert(k, k.to_string());
        }

        let succ = map.remove(&20);
        assert_eq!(succ.key(), &30);
        assert_eq!(map.len(), 2);
        assert!(!map.contains_key(&20));
        map.raw.assert_invariants();
    }

    #[test]
    fn remove_last_returns_end() {
        let mut map = make_map();
        map.insert(10, "ten".into());
        map.insert(20, "twenty".into());
        assert!(map.remove(&20).is_end());
        assert_eq!(map.last(), Some((&10, &"ten".into())));
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut map = make_map();
        map.insert(10, "ten".into());
        assert!(map.remove(&99).is_end());
        assert_eq!(map.len(), 1);
        assert_eq!(map.remove_entry(&99), None);
    }

    #[test]
    fn remove_entry_returns_pair() {
        let mut map = make_map();
        map.insert(10, "ten".into());
        assert_eq!(map.remove_entry(&10), Some((10, "ten".into())));
        assert!(map.is_empty());
    }

    #[test]
    fn pop_first_and_last() {
        let mut map = make_map();
        for k in [10, 20, 30] {
            map.insert(k, k.to_string());
        }

        assert_eq!(map.pop_first(), Some((10, "10".into())));
        assert_eq!(map.pop_last(), Some((30, "30".into())));
        assert_eq!(map.pop_last(), Some((20, "20".into())));
        assert_eq!(map.pop_first(), None);
        assert_eq!(map.pop_last(), None);
        assert!(map.is_empty());
    }

    #[test]
    fn first_mut_and_last_mut() {
        let mut map = make_map();
        map.insert(10, "ten".into());
        map.insert(20, "twenty".into());

        if let Some((_, v)) = map.first_mut() {
            *v = "TEN".into();
        }
        if let Some((_, v)) = map.last_mut() {
            *v = "TWENTY".into();
        }
        assert_eq!(map[&10], "TEN");
        assert_eq!(map[&20], "TWENTY");
    }

    #[test]
    fn retain_even() {
        let mut map = make_map();
        for k in 1..=10 {
            map.insert(k, k.to_string());
        }
        map.retain(|k, _| k % 2 == 0);
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![2, 4, 6, 8, 10]);
        map.raw.assert_invariants();
    }

    // ========================================================================
    // Clear
    // ========================================================================

    #[test]
    fn clear() {
        let mut map = make_map();
        map.insert(10, "ten".into());
        map.insert(20, "twenty".into());

        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.first(), None);
        assert_eq!(map.iter().count(), 0);
        map.raw.assert_invariants();

        map.insert(5, "five".into());
        assert_eq!(map.len(), 1);
    }

    // ========================================================================
    // Entry / defaulting access
    // ========================================================================

    #[test]
    fn get_or_default_inserts_once() {
        let mut map: SkipMap<&str, u32> = SkipMap::with_rng(3, make_rng());
        *map.get_or_default("kewuaa") += 1;
        *map.get_or_default("kewuaa") += 1;
        assert_eq!(map.len(), 1);
        assert_eq!(map["kewuaa"], 2);
        assert_eq!(*map.get_or_default("fresh"), 0);
        assert_eq!(map.len(), 2);
    }

    // ========================================================================
    // Trait impls
    // ========================================================================

    #[test]
    fn clone_is_deep() {
        let mut map = make_map();
        map.insert(1, "one".into());
        let mut copy = map.clone();
        copy.insert(2, "two".into());
        *copy.get_mut(&1).unwrap() = "uno".into();

        assert_eq!(map.len(), 1);
        assert_eq!(map[&1], "one");
        assert_eq!(copy.len(), 2);
        copy.raw.assert_invariants();
    }

    #[test]
    fn equality_ignores_structure() {
        let mut a: SkipMap<u32, u32> = SkipMap::with_rng(2, SmallRng::seed_from_u64(1));
        let mut b: SkipMap<u32, u32> = SkipMap::with_rng(6, SmallRng::seed_from_u64(2));
        for i in 0..20 {
            a.insert(i, i);
            b.insert(19 - i, 19 - i);
        }
        assert_eq!(a, b);
        b.insert(0, 100);
        assert_ne!(a, b);
    }

    #[test]
    fn from_iter_and_extend() {
        let mut map: SkipMap<u32, &str> = [(3, "c"), (1, "a")].into_iter().collect();
        map.extend([(2, "b"), (1, "A")]);
        let pairs: Vec<_> = map.into_iter().collect();
        assert_eq!(pairs, vec![(1, "A"), (2, "b"), (3, "c")]);
    }

    #[test]
    fn debug_renders_as_map() {
        let mut map = make_map();
        map.insert(2, "b".into());
        map.insert(1, "a".into());
        assert_eq!(format!("{map:?}"), r#"{1: "a", 2: "b"}"#);
    }

    #[test]
    fn move_out_leaves_empty() {
        let mut map: SkipMap<u32, u32> = SkipMap::default();
        map.insert(1, 1);
        let moved = core::mem::take(&mut map);
        assert!(map.is_empty());
        assert_eq!(moved.len(), 1);
    }

    #[test]
    fn constructors_validate() {
        assert_eq!(
            SkipMap::<u32, u32>::try_new(0).unwrap_err(),
            SkipMapError::ZeroMaxLevel
        );
        assert!(SkipMap::<u32, u32, _>::try_with_rng(1, make_rng()).is_ok());
    }

    #[test]
    fn with_level_ratio_caps_oversized_ratio() {
        let mut map: SkipMap<u32, u32, _> =
            SkipMap::with_level_ratio(4, make_rng(), (1 << 31) + 1);
        assert_eq!(map.level_ratio(), 1 << 31);
        map.insert(1, 1);
        assert_eq!(map[&1], 1);
    }

    #[test]
    #[should_panic(expected = "invalid max_level")]
    fn zero_levels_panics() {
        let _: SkipMap<u32, u32> = SkipMap::new(0);
    }

    #[test]
    fn single_level_is_a_sorted_list() {
        let mut map: SkipMap<u32, u32, _> = SkipMap::with_rng(1, make_rng());
        for k in [5, 3, 9, 1, 7] {
            map.insert(k, k);
        }
        map.remove(&3);
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 5, 7, 9]);
        map.raw.assert_invariants();
    }

    #[test]
    fn randomized_against_btree() {
        use rand::Rng;
        use std::collections::BTreeMap;

        let mut rng = SmallRng::seed_from_u64(7);
        let mut map: SkipMap<u16, u32, _> = SkipMap::with_rng(6, make_rng());
        let mut model = BTreeMap::new();

        for step in 0..5_000u32 {
            let key: u16 = rng.gen_range(0..500);
            match rng.gen_range(0..3) {
                0 | 1 => {
                    map.insert(key, step);
                    model.insert(key, step);
                }
                _ => {
                    assert_eq!(map.take(&key), model.remove(&key));
                }
            }
        }

        map.raw.assert_invariants();
        assert_eq!(map.len(), model.len());
        assert!(map.iter().eq(model.iter()));
    }
}
