//! Sentinel-encoded forward links.
//!
//! A [`Link`] is a slab index with a reserved `usize::MAX` sentinel instead of
//! `Option<usize>`, which halves the size of every forward array. The sentinel
//! means "empty" in a forward slot and "head" when recorded as a predecessor.

/// An index into the node arena, or [`Link::NONE`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub(crate) struct Link(usize);

impl Link {
    /// Sentinel value: no node.
    pub(crate) const NONE: Link = Link(usize::MAX);

    /// Wraps a slab key.
    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        debug_assert_ne!(index, usize::MAX, "slab key collides with sentinel");
        Link(index)
    }

    #[inline]
    pub(crate) fn is_none(self) -> bool {
        self == Self::NONE
    }

    #[inline]
    pub(crate) fn is_some(self) -> bool {
        !self.is_none()
    }

    /// Returns the slab key, or `None` for the sentinel.
    #[inline]
    pub(crate) fn index(self) -> Option<usize> {
        if self.is_none() { None } else { Some(self.0) }
    }
}
