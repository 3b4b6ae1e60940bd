//! Ordered map backed by a probabilistic skip list.
//!
//! A skip list keeps every entry on a sorted base list and promotes a random
//! subset onto sparser "express lanes" above it. Search starts on the top lane
//! and drops down whenever the next key would overshoot, giving expected
//! O(log n) lookup, insert, and removal with no rebalancing.
//!
//! ```text
//! Level 2:  HEAD ─────────────────► 50 ─────────────────► NIL
//! Level 1:  HEAD ────────► 20 ─────► 50 ─────────────────► NIL
//! Level 0:  HEAD ──► 10 ──► 20 ──► 30 ──► 50 ──► 60 ──► NIL
//! ```
//!
//! # Quick Start
//!
//! ```
//! use nexus_skipmap::SkipMap;
//!
//! let mut map: SkipMap<String, i32> = SkipMap::new(3);
//!
//! *map.get_or_default("kewuaa".into()) = 1;
//! map.insert("1".into(), 111);
//! map.insert("9".into(), 999);
//! map.insert("5".into(), 555);
//!
//! assert_eq!(map.find("5").value(), &555);
//!
//! // remove hands back a cursor at the successor
//! assert_eq!(map.remove("5").key(), "9");
//! assert!(map.find("5").is_end());
//!
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, ["1", "9", "kewuaa"]);
//! ```
//!
//! # Ownership
//!
//! Nodes live in a slab arena owned by the map, and forward links are arena
//! indices. Removing a node takes it out of the arena, so every entry is
//! released exactly once whether it leaves through `remove`, `clear`, or
//! dropping the map. Cursors borrow the map and cannot outlive a removal.
//!
//! # Level Policy
//!
//! Each new node's height is drawn once, from the map's own RNG:
//!
//! | `level_ratio` | P(extra level) | Links per node |
//! |---------------|----------------|----------------|
//! | 2 (default)   | 1/2            | ~2             |
//! | 4             | 1/4            | ~1.33          |
//!
//! Supply a seeded RNG through [`SkipMap::with_rng`] or
//! [`SkipMapBuilder::seed`] for reproducible structure.
//!
//! # Logging
//!
//! Emits through the [`log`] facade: `debug` on construction and `clear`,
//! `trace` per node link and unlink. No logger is installed.

#![warn(missing_docs)]

pub mod config;
pub mod cursor;
pub mod dump;
pub mod entry;
pub mod error;
pub mod iter;
pub mod level;
pub mod map;

mod link;
mod node;
mod raw;

pub use config::{DEFAULT_MAX_LEVEL, MAX_LEVEL_LIMIT, SkipMapBuilder};
pub use cursor::{Cursor, CursorMut};
pub use dump::LevelDump;
pub use entry::{Entry, OccupiedEntry, VacantEntry};
pub use error::SkipMapError;
pub use iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
pub use level::LevelGenerator;
pub use map::SkipMap;
