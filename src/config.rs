//! Cache configuration.

use core::num::NonZeroUsize;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::compare::DEFAULT_MAX_ULPS;
use crate::error::{CacheError, Result};
use crate::{EvictionPolicy, TextFormat};

/// Slots per direction when no capacity is given.
pub const DEFAULT_CAPACITY: usize = 10;

pub(crate) const DEFAULT_NONZERO_CAPACITY: NonZeroUsize = match NonZeroUsize::new(DEFAULT_CAPACITY) {
    Some(capacity) => capacity,
    None => panic!("default capacity must be non-zero"),
};

/// Value the logical clock starts from; the first write is stamped one above it.
pub const DEFAULT_CLOCK_ORIGIN: u64 = 100;

/// Largest accepted clock origin. Eviction compares raw timestamps, so the clock must not
/// wrap; starting at or below this leaves `2^63` writes of headroom.
pub const MAX_CLOCK_ORIGIN: u64 = u64::MAX / 2;

/// Construction parameters for a [`LexicalCache`](crate::LexicalCache).
///
/// ```rust
/// use lexical_cache::{CacheConfig, EvictionPolicy, LexicalCache, TextFormat};
///
/// let config = CacheConfig::default()
///     .with_capacity(64)
///     .with_policy(EvictionPolicy::LeastRecentlyUsed)
///     .with_text_format(TextFormat::Plain(15));
/// let cache: LexicalCache<f64> = LexicalCache::from_config(config).unwrap();
/// assert_eq!(cache.capacity(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CacheConfig {
    /// Slots per direction. Must be at least 1.
    pub capacity: usize,
    /// Eviction policy applied to both directions.
    pub policy: EvictionPolicy,
    /// ULP bound for reverse-cache matching.
    pub max_ulps: u32,
    /// Formatting used on reverse-cache misses.
    pub text_format: TextFormat,
    /// Starting value of the shared write clock. At most [`MAX_CLOCK_ORIGIN`].
    pub clock_origin: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            policy: EvictionPolicy::default(),
            max_ulps: DEFAULT_MAX_ULPS,
            text_format: TextFormat::default(),
            clock_origin: DEFAULT_CLOCK_ORIGIN,
        }
    }
}

impl CacheConfig {
    /// Sets the number of slots per direction.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the eviction policy.
    pub fn with_policy(mut self, policy: EvictionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the ULP bound for reverse lookups.
    pub fn with_max_ulps(mut self, max_ulps: u32) -> Self {
        self.max_ulps = max_ulps;
        self
    }

    /// Sets the reverse-cache text format.
    pub fn with_text_format(mut self, text_format: TextFormat) -> Self {
        self.text_format = text_format;
        self
    }

    /// Sets the clock origin.
    pub fn with_clock_origin(mut self, clock_origin: u64) -> Self {
        self.clock_origin = clock_origin;
        self
    }

    /// Checks the configuration and returns the capacity as a `NonZeroUsize`.
    ///
    /// # Errors
    /// - [`CacheError::Capacity`] if `capacity` is zero.
    /// - [`CacheError::ClockOrigin`] if `clock_origin` exceeds [`MAX_CLOCK_ORIGIN`].
    pub fn validate(&self) -> Result<NonZeroUsize> {
        if self.clock_origin > MAX_CLOCK_ORIGIN {
            return Err(CacheError::ClockOrigin {
                origin: self.clock_origin,
                max: MAX_CLOCK_ORIGIN,
            });
        }
        NonZeroUsize::new(self.capacity).ok_or(CacheError::Capacity {
            requested: self.capacity,
        })
    }
}
