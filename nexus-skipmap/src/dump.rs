//! Human-readable rendering of the level structure.
//!
//! ```text
//! level   3:                       |    5    |
//! level   2: |    1    |           |    5    |
//! level   1: |    1    ||    3    ||    5    |
//! value    : |   111   ||   333   ||   555   |
//! ```
//!
//! Each column is one entry in key order. A key is drawn on every level the
//! entry participates in and left blank above that.

use core::fmt;
use core::fmt::Write as _;

use crate::cursor::Cursor;

/// Width of one rendered cell, including the two `|` borders.
const CELL: usize = 11;

/// Display adapter returned by [`SkipMap::dump`](crate::SkipMap::dump).
pub struct LevelDump<'a, K, V> {
    front: Cursor<'a, K, V>,
    max_level: usize,
}

impl<'a, K, V> LevelDump<'a, K, V> {
    pub(crate) fn new(front: Cursor<'a, K, V>, max_level: usize) -> Self {
        Self { front, max_level }
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for LevelDump<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = vec![String::new(); self.max_level];
        let mut values = String::new();

        let mut cursor = self.front;
        while let (Some((key, value)), Some(height)) = (cursor.get(), cursor.height()) {
            // Display impls are not required to honor width, so pad the
            // rendered text instead.
            let key = key.to_string();
            for (level, line) in lines.iter_mut().enumerate() {
                if level < height {
                    write!(line, "|{key:^9}|")?;
                } else {
                    write!(line, "{:width$}", "", width = CELL)?;
                }
            }
            write!(values, "|{:^9}|", value.to_string())?;
            cursor.move_next();
        }

        for (level, line) in lines.iter().enumerate().rev() {
            writeln!(f, "level {:3}: {line}", level + 1)?;
        }
        writeln!(f, "value    : {values}")
    }
}

impl<K, V> fmt::Debug for LevelDump<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelDump")
            .field("max_level", &self.max_level)
            .finish_non_exhaustive()
    }
}
