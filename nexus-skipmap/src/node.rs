//! Skip list node.

use crate::link::Link;

/// A single entry: key, value, and one forward link per level it spans.
///
/// `forward.len()` is the node's participation height, fixed at creation.
/// `forward[l]` is the next node whose height is also greater than `l`.
#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) forward: Box<[Link]>,
}

impl<K, V> Node<K, V> {
    /// Creates an unlinked node spanning `height` levels.
    #[inline]
    pub(crate) fn new(key: K, value: V, height: usize) -> Self {
        debug_assert!(height >= 1, "node must span level 0");
        Self {
            key,
            value,
            forward: vec![Link::NONE; height].into_boxed_slice(),
        }
    }

    /// Number of levels this node participates in.
    #[inline]
    pub(crate) fn height(&self) -> usize {
        self.forward.len()
    }

    /// Successor on the base level.
    #[inline]
    pub(crate) fn next(&self) -> Link {
        self.forward[0]
    }
}
