//! Construction parameters.
//!
//! ```
//! use nexus_skipmap::{SkipMap, SkipMapBuilder};
//!
//! let map: SkipMap<u64, String> = SkipMapBuilder::default()
//!     .max_level(8)
//!     .level_ratio(4)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(map.max_level(), 8);
//! ```

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand_core::RngCore;

use crate::SkipMap;
use crate::error::SkipMapError;

/// Level count used by [`SkipMap::default`] and [`SkipMapBuilder::default`].
///
/// Efficient up to roughly 2^16 entries at the standard ratio.
pub const DEFAULT_MAX_LEVEL: usize = 16;

/// Largest accepted `max_level`. A height draw uses one `u64`, so taller
/// towers are unreachable.
pub const MAX_LEVEL_LIMIT: usize = 64;

/// Rejects level counts outside `1..=MAX_LEVEL_LIMIT`.
pub(crate) fn validate_max_level(max_level: usize) -> Result<(), SkipMapError> {
    if max_level == 0 {
        return Err(SkipMapError::ZeroMaxLevel);
    }
    if max_level > MAX_LEVEL_LIMIT {
        return Err(SkipMapError::MaxLevelTooLarge {
            max_level,
            limit: MAX_LEVEL_LIMIT,
        });
    }
    Ok(())
}

/// Builder for [`SkipMap`].
#[derive(Clone, Debug)]
pub struct SkipMapBuilder {
    max_level: usize,
    level_ratio: u32,
    seed: Option<u64>,
}

impl Default for SkipMapBuilder {
    fn default() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
            level_ratio: 2,
            seed: None,
        }
    }
}

impl SkipMapBuilder {
    /// Number of levels, fixed for the map's lifetime. Default: 16.
    pub fn max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    /// Inverse probability of granting each extra level. Default: 2 (p=0.5).
    ///
    /// - 2: standard, ~2 links per node
    /// - 4: Redis-style, ~1.33 links per node
    ///
    /// Rounded up to a power of two.
    pub fn level_ratio(mut self, ratio: u32) -> Self {
        self.level_ratio = ratio;
        self
    }

    /// Seed for the default `SmallRng`. Default: seeded from OS entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds a map using `SmallRng`.
    pub fn build<K: Ord, V>(self) -> Result<SkipMap<K, V, SmallRng>, SkipMapError> {
        let rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        self.build_with_rng(rng)
    }

    /// Builds a map using a caller-supplied RNG. Any configured seed is ignored.
    pub fn build_with_rng<K: Ord, V, R: RngCore>(
        self,
        rng: R,
    ) -> Result<SkipMap<K, V, R>, SkipMapError> {
        validate_max_level(self.max_level)?;
        Ok(SkipMap::from_parts(self.max_level, rng, self.level_ratio))
    }
}
