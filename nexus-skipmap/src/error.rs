//! Error types.

use thiserror::Error;

/// Errors returned by fallible skip map operations.
///
/// Absence of a key from `find` or `remove` is not an error: those report it
/// through an end cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SkipMapError {
    /// `max_level` was zero. The head sentinel needs at least level 0.
    #[error("max_level must be at least 1")]
    ZeroMaxLevel,
    /// `max_level` exceeds the supported number of levels.
    #[error("max_level ({max_level}) exceeds limit ({limit})")]
    MaxLevelTooLarge {
        /// The requested level count.
        max_level: usize,
        /// Largest accepted level count.
        limit: usize,
    },
    /// An end cursor was dereferenced.
    #[error("cursor does not point at an entry")]
    EmptyCursor,
    /// Read-only lookup of a key that is not present.
    #[error("key not found")]
    KeyNotFound,
}
