//! Hit/miss accounting.

/// Hit and miss counters shared by both cache directions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Casts answered from a cached slot.
    pub hits: u64,
    /// Casts that needed a fresh parse or format.
    pub misses: u64,
}

impl CacheStats {
    #[inline(always)]
    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    #[inline(always)]
    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Total number of recorded casts.
    #[inline]
    pub fn total(&self) -> u64 {
        self.hits + self.misses
    }

    /// `misses / (hits + misses) * 100`.
    ///
    /// The division is not special-cased: with no recorded casts this is `0 / 0`, i.e. NaN.
    #[inline]
    pub fn miss_ratio(&self) -> f64 {
        self.misses as f64 / self.total() as f64 * 100.0
    }

    /// Zeroes both counters.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
