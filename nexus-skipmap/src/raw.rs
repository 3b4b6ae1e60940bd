//! Skip list engine over a slab arena.
//!
//! ```text
//! Level 2:  HEAD ─────────────────► 50 ─────────────────► NIL
//! Level 1:  HEAD ────────► 20 ─────► 50 ─────────────────► NIL
//! Level 0:  HEAD ──► 10 ──► 20 ──► 30 ──► 50 ──► 60 ──► NIL
//! ```
//!
//! The arena owns every node. Forward links, including the head sentinel's
//! `max_level` slots, are [`Link`] indices into it, so a node can only be
//! released by taking it out of the arena, and that happens exactly once.
//!
//! Predecessor arrays use [`Link::NONE`] to mean "the head sentinel".

use core::borrow::Borrow;
use core::cmp::Ordering;

use slab::Slab;
use smallvec::SmallVec;

use crate::link::Link;
use crate::node::Node;

/// Predecessor at each level, top levels included. Inline up to 16 levels.
pub(crate) type Preds = SmallVec<[Link; 16]>;

#[derive(Debug, Clone)]
pub(crate) struct RawSkipList<K, V> {
    nodes: Slab<Node<K, V>>,
    /// Head sentinel: one slot per level, never removed.
    head: Box<[Link]>,
}

impl<K, V> RawSkipList<K, V> {
    pub(crate) fn new(max_level: usize) -> Self {
        debug_assert!(max_level > 0);
        Self {
            nodes: Slab::new(),
            head: vec![Link::NONE; max_level].into_boxed_slice(),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub(crate) fn max_level(&self) -> usize {
        self.head.len()
    }

    /// First node on level 0.
    #[inline]
    pub(crate) fn front(&self) -> Link {
        self.head[0]
    }

    #[inline]
    pub(crate) fn node(&self, link: Link) -> Option<&Node<K, V>> {
        link.index().map(|i| &self.nodes[i])
    }

    /// Number of nodes from `start` to the end of level 0. Walks the list.
    pub(crate) fn count_from(&self, start: Link) -> usize {
        let mut count = 0;
        let mut link = start;
        while let Some(node) = self.node(link) {
            count += 1;
            link = node.next();
        }
        count
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, link: Link) -> Option<&mut Node<K, V>> {
        link.index().map(|i| &mut self.nodes[i])
    }

    /// An empty predecessor array (every level points at head).
    #[inline]
    pub(crate) fn preds(&self) -> Preds {
        SmallVec::from_elem(Link::NONE, self.max_level())
    }

    /// Forward array of a predecessor, where `NONE` is the head sentinel.
    #[inline]
    fn forward(&self, pred: Link) -> &[Link] {
        match pred.index() {
            None => &self.head[..],
            Some(i) => &self.nodes[i].forward[..],
        }
    }

    #[inline]
    fn forward_mut(&mut self, pred: Link) -> &mut [Link] {
        match pred.index() {
            None => &mut self.head[..],
            Some(i) => &mut self.nodes[i].forward[..],
        }
    }

    /// Last node on level 0, found by riding the express lanes.
    pub(crate) fn back(&self) -> Link {
        let mut current = Link::NONE;
        for level in (0..self.max_level()).rev() {
            loop {
                let next = self.forward(current)[level];
                if next.is_none() {
                    break;
                }
                current = next;
            }
        }
        current
    }

    /// Stores `node` and splices it after `update[l]` on each level it spans.
    ///
    /// `update` must hold, for every level below the node's height, the last
    /// node whose key is less than the new key.
    pub(crate) fn link_node(&mut self, node: Node<K, V>, update: &[Link]) -> Link {
        let height = node.height();
        debug_assert!(height <= self.max_level());
        let idx = self.nodes.insert(node);
        let link = Link::new(idx);

        for (level, &pred) in update.iter().enumerate().take(height) {
            let next = self.forward(pred)[level];
            self.nodes[idx].forward[level] = next;
            self.forward_mut(pred)[level] = link;
        }

        log::trace!("linked node {idx} at height {height}");
        link
    }

    /// Unlinks `target` on every level it spans and releases it from the
    /// arena. Returns the level-0 successor and the node.
    pub(crate) fn unlink(&mut self, target: Link, update: &[Link]) -> (Link, Node<K, V>) {
        let idx = target.index().expect("unlink of empty link");
        let height = self.nodes[idx].height();

        for (level, &pred) in update.iter().enumerate().take(height) {
            let next = self.nodes[idx].forward[level];
            let slot = &mut self.forward_mut(pred)[level];
            debug_assert_eq!(*slot, target, "stale predecessor at level {level}");
            *slot = next;
        }

        let node = self.nodes.remove(idx);
        log::trace!("unlinked node {idx} of height {height}");
        (node.next(), node)
    }

    /// Removes the first node. Its predecessor on every level is head.
    pub(crate) fn pop_front(&mut self) -> Option<Node<K, V>> {
        let first = self.front();
        if first.is_none() {
            return None;
        }
        let update = self.preds();
        Some(self.unlink(first, &update).1)
    }

    /// Releases every node, walking level 0 so each is dropped exactly once.
    ///
    /// Returns the number of nodes released.
    pub(crate) fn clear(&mut self) -> usize {
        let mut released = 0;
        let mut current = self.head[0];
        while let Some(idx) = current.index() {
            let node = self.nodes.remove(idx);
            current = node.next();
            released += 1;
        }

        debug_assert!(self.nodes.is_empty(), "nodes unreachable from head");
        self.nodes.clear();
        self.head.fill(Link::NONE);
        released
    }

    /// Keeps only the entries for which `keep` returns `true`.
    ///
    /// Single level-0 pass. `prev` tracks the last kept node at every level,
    /// which is exactly the predecessor needed to unlink the current one.
    pub(crate) fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let mut prev = self.preds();
        let mut removed = 0;
        let mut current = self.head[0];

        while let Some(idx) = current.index() {
            let node = &mut self.nodes[idx];
            if keep(&node.key, &mut node.value) {
                let height = node.height();
                let next = node.next();
                for slot in prev.iter_mut().take(height) {
                    *slot = current;
                }
                current = next;
            } else {
                current = self.unlink(current, &prev).0;
                removed += 1;
            }
        }
        removed
    }
}

impl<K: Ord, V> RawSkipList<K, V> {
    /// Locates `key` without recording predecessors.
    ///
    /// Descends from the top level, advancing while the next key is smaller
    /// and returning as soon as an exact match is seen on any level.
    pub(crate) fn find<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut forward: &[Link] = &self.head[..];
        for level in (0..self.max_level()).rev() {
            let mut next = forward[level];
            while let Some(node) = self.node(next) {
                let k: &Q = node.key.borrow();
                match k.cmp(key) {
                    Ordering::Less => {
                        forward = &node.forward[..];
                        next = node.forward[level];
                    }
                    Ordering::Equal => return next,
                    Ordering::Greater => break,
                }
            }
        }
        Link::NONE
    }

    /// Locates `key`, filling `update[l]` with the last node on level `l`
    /// whose key is less than `key`. Returns the matching node, if any.
    pub(crate) fn search<Q>(&self, key: &Q, update: &mut [Link]) -> Link
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        debug_assert_eq!(update.len(), self.max_level());
        let mut current = Link::NONE;

        for level in (0..self.max_level()).rev() {
            let mut next = self.forward(current)[level];
            while let Some(node) = self.node(next) {
                let k: &Q = node.key.borrow();
                if k >= key {
                    break;
                }
                current = next;
                next = node.forward[level];
            }
            update[level] = current;
        }

        let next = self.forward(current)[0];
        match self.node(next) {
            Some(node) if Borrow::<Q>::borrow(&node.key) == key => next,
            _ => Link::NONE,
        }
    }

    /// Removes the node for `key`. Returns its level-0 successor and the node.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<(Link, Node<K, V>)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut update = self.preds();
        let found = self.search(key, &mut update);
        if found.is_none() {
            return None;
        }
        Some(self.unlink(found, &update))
    }

    /// Removes the node at `target`, re-deriving its predecessors by key.
    pub(crate) fn remove_at(&mut self, target: Link) -> Option<(Link, Node<K, V>)> {
        let idx = target.index()?;
        let mut update = self.preds();
        let found = self.search(&self.nodes[idx].key, &mut update);
        debug_assert_eq!(found, target);
        Some(self.unlink(target, &update))
    }

    /// Removes the last node.
    pub(crate) fn pop_back(&mut self) -> Option<Node<K, V>> {
        let last = self.back();
        self.remove_at(last).map(|(_, node)| node)
    }

    /// Checks every structural invariant, panicking on the first violation.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        // Level 0 reaches every node, in strictly increasing key order.
        let mut count = 0;
        let mut current = self.head[0];
        let mut prev_key: Option<&K> = None;
        while let Some(node) = self.node(current) {
            if let Some(prev) = prev_key {
                assert!(prev < &node.key, "level 0 out of order");
            }
            assert!(node.height() >= 1 && node.height() <= self.max_level());
            prev_key = Some(&node.key);
            count += 1;
            current = node.next();
        }
        assert_eq!(count, self.len(), "len disagrees with level 0");

        // Each level is exactly the subsequence of nodes taller than it.
        for level in 1..self.max_level() {
            let expected: Vec<Link> = {
                let mut out = Vec::new();
                let mut current = self.head[0];
                while let Some(node) = self.node(current) {
                    if node.height() > level {
                        out.push(current);
                    }
                    current = node.next();
                }
                out
            };
            let mut actual = Vec::new();
            let mut current = self.head[level];
            while let Some(node) = self.node(current) {
                assert!(node.height() > level, "short node on level {level}");
                actual.push(current);
                current = node.forward[level];
            }
            assert_eq!(actual, expected, "level {level} chain mismatch");
        }
    }
}
