//! Level-height policy.
//!
//! Every new node draws a height in `1..=max_level`. The draw is geometric:
//! with the default ratio of 2, each level beyond the first is granted with
//! probability 1/2. Heights are computed from the trailing ones of a single
//! random `u64`, so a draw costs one RNG call regardless of the outcome.
//!
//! The generator owns its RNG. Two maps never share a random sequence, and
//! nothing is reseeded after construction.

use rand_core::RngCore;

/// Largest level ratio that is still a `u32` power of two.
const MAX_LEVEL_RATIO: u32 = 1 << 31;

/// Draws participation heights for new nodes.
///
/// # Example
///
/// ```
/// use nexus_skipmap::LevelGenerator;
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
///
/// let mut levels = LevelGenerator::new(SmallRng::seed_from_u64(7), 4);
/// for _ in 0..100 {
///     let h = levels.next_height();
///     assert!((1..=4).contains(&h));
/// }
/// ```
#[derive(Debug, Clone)]
pub struct LevelGenerator<R> {
    rng: R,
    max_level: usize,
    /// log2 of the level ratio. A draw needs this many trailing ones per
    /// extra level.
    level_divisor: u32,
}

impl<R: RngCore> LevelGenerator<R> {
    /// Creates a generator with the standard ratio (p = 1/2).
    ///
    /// # Panics
    ///
    /// Panics if `max_level` is 0.
    pub fn new(rng: R, max_level: usize) -> Self {
        Self::with_ratio(rng, max_level, 2)
    }

    /// Creates a generator where each extra level is granted with
    /// probability `1 / level_ratio`.
    ///
    /// `level_ratio` must be a power of two in `2..=2^31`. Smaller values and
    /// non-powers are rounded up to the next valid one, larger values are
    /// capped at 2^31.
    ///
    /// # Panics
    ///
    /// Panics if `max_level` is 0.
    pub fn with_ratio(rng: R, max_level: usize, level_ratio: u32) -> Self {
        assert!(max_level > 0, "max_level must be > 0");
        let level_ratio = level_ratio.clamp(2, MAX_LEVEL_RATIO).next_power_of_two();
        Self {
            rng,
            max_level,
            level_divisor: level_ratio.trailing_zeros(),
        }
    }

    /// Draws the next height, in `1..=max_level`.
    #[inline]
    pub fn next_height(&mut self) -> usize {
        let r = self.rng.next_u64();
        let extra = (r.trailing_ones() / self.level_divisor) as usize;
        (extra + 1).min(self.max_level)
    }
}

impl<R> LevelGenerator<R> {
    /// Highest height this generator can produce.
    #[inline]
    pub fn max_level(&self) -> usize {
        self.max_level
    }

    /// The effective level ratio (always a power of two).
    #[inline]
    pub fn level_ratio(&self) -> u32 {
        1 << self.level_divisor
    }
}
