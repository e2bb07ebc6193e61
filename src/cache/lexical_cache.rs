//! Bounded two-way cache between decimal text and floating-point values.
//!
//! Provides [`LexicalCache`]: a forward store (text to value, exact text match) and a
//! reverse store (value to text, approximate value match), each holding at most
//! `capacity` conversions, with shared hit/miss statistics.

use core::fmt;
use core::num::NonZeroUsize;

use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cache::eviction::EvictionPolicy;
use crate::cache::index::{TextIndex, ValueIndex};
use crate::cache::slot_store::{CachedItem, LogicalClock, SlotStore};
use crate::config::{CacheConfig, DEFAULT_NONZERO_CAPACITY};
use crate::error::{CacheError, Result};
use crate::stats::CacheStats;
use crate::{Real, TextFormat};

/// Selects one or both halves of a [`LexicalCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    /// Text to value.
    Forward,
    /// Value to text.
    Reverse,
    /// Both directions.
    #[default]
    Both,
}

impl Direction {
    #[inline(always)]
    fn includes_forward(self) -> bool {
        matches!(self, Direction::Forward | Direction::Both)
    }

    #[inline(always)]
    fn includes_reverse(self) -> bool {
        matches!(self, Direction::Reverse | Direction::Both)
    }
}

/// A **bounded, bidirectional memo** of text <-> float conversions.
///
/// # Architecture & Pseudocode
/// Two independent [`SlotStore`]s of `capacity` slots share one [`LogicalClock`] and one
/// set of [`CacheStats`].
///
/// ## Forward cast
/// ```text
/// 1. slot = forward.find(text)              (exact, hashed)
/// 2. hit:  hits += 1, return slots[slot].value
/// 3. miss: misses += 1
///          value = parse(text)?              (error leaves the slots untouched)
///          forward.insert({text, value, clock.tick()})
///          return value
/// ```
///
/// ## Reverse cast
/// ```text
/// 1. slot = reverse.find(value)             (scan with almost_equal)
/// 2. hit:  hits += 1, return slots[slot].text
/// 3. miss: misses += 1
///          reverse.insert_formatted(value, clock.tick())
///              (text rendered into the claimed slot's buffer)
///          return text
/// ```
///
/// Under [`EvictionPolicy::OldestWrite`] a hit leaves timestamps alone, so a slot that is
/// read constantly but written once is still the next victim once it is the oldest write.
///
/// # Example
/// ```rust
/// use lexical_cache::{Direction, LexicalCache};
///
/// let mut cache: LexicalCache<f64> = LexicalCache::with_capacity(4).unwrap();
/// assert_eq!(cache.cast_to_real("1.25").unwrap(), 1.25);
/// assert_eq!(cache.cast_to_real("1.25").unwrap(), 1.25);
/// assert_eq!(cache.cast_to_str(0.1 + 0.2), "0.300000");
/// assert_eq!(cache.cast_to_str(0.3), "0.300000");
///
/// assert_eq!(cache.size(Direction::Both), 2);
/// assert_eq!(cache.miss_ratio(), 50.0);
/// ```
pub struct LexicalCache<F: Real> {
    forward: SlotStore<F, TextIndex>,
    reverse: SlotStore<F, ValueIndex<F>>,
    clock: LogicalClock,
    stats: CacheStats,
    policy: EvictionPolicy,
    text_format: TextFormat,
}

impl<F: Real> LexicalCache<F> {
    /// Creates a cache with the default configuration (10 slots per direction).
    pub fn new() -> Self {
        Self::build(&CacheConfig::default(), DEFAULT_NONZERO_CAPACITY)
    }

    /// Creates a cache with `capacity` slots per direction.
    ///
    /// # Errors
    /// [`CacheError::Capacity`] if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::from_config(CacheConfig::default().with_capacity(capacity))
    }

    /// Creates a cache from a full configuration.
    ///
    /// # Errors
    /// Whatever [`CacheConfig::validate`] rejects: a zero capacity or a clock origin too
    /// close to wrapping.
    pub fn from_config(config: CacheConfig) -> Result<Self> {
        let capacity = config.validate()?;
        Ok(Self::build(&config, capacity))
    }

    fn build(config: &CacheConfig, capacity: NonZeroUsize) -> Self {
        debug!(
            capacity = capacity.get(),
            policy = ?config.policy,
            max_ulps = config.max_ulps,
            "creating lexical cache"
        );
        Self {
            forward: SlotStore::new("forward", capacity, TextIndex::with_capacity(capacity.get())),
            reverse: SlotStore::new(
                "reverse",
                capacity,
                ValueIndex::with_capacity(capacity.get(), config.max_ulps),
            ),
            clock: LogicalClock::starting_at(config.clock_origin),
            stats: CacheStats::default(),
            policy: config.policy,
            text_format: config.text_format,
        }
    }

    /// Converts `text` to a value, answering from the forward cache when possible.
    ///
    /// # Errors
    /// [`CacheError::Parse`] if `text` is not a valid literal for `F`. The miss is
    /// counted, but no slot, index entry or timestamp changes.
    pub fn cast_to_real(&mut self, text: &str) -> Result<F> {
        if let Some(slot) = self.forward.find(text) {
            self.stats.record_hit();
            if self.policy.refreshes_on_read() {
                self.forward.touch(slot, self.clock.tick());
            }
            return Ok(self.forward.item(slot).value);
        }

        self.stats.record_miss();
        let value = F::parse_text(text).map_err(|source| {
            trace!(text, "rejecting unparsable literal");
            CacheError::Parse {
                text: text.to_owned(),
                source,
            }
        })?;

        self.forward.insert(
            CachedItem {
                text: text.to_owned(),
                value,
                timestamp: self.clock.tick(),
            },
            self.policy,
        );
        Ok(value)
    }

    /// Converts `value` to decimal text, answering from the reverse cache when an
    /// approximately equal value is cached.
    ///
    /// On a hit the returned text is the one cached for the matching value, which may
    /// differ from `value` in its last few ULPs.
    pub fn cast_to_str(&mut self, value: F) -> &str {
        let slot = match self.reverse.find(&value) {
            Some(slot) => {
                self.stats.record_hit();
                if self.policy.refreshes_on_read() {
                    self.reverse.touch(slot, self.clock.tick());
                }
                slot
            }
            None => {
                self.stats.record_miss();
                let text_format = self.text_format;
                self.reverse.insert_formatted(value, self.clock.tick(), self.policy, |out| {
                    text_format.write_into(value, out)
                })
            }
        };
        &self.reverse.item(slot).text
    }

    /// Number of populated slots in the selected direction(s).
    pub fn size(&self, direction: Direction) -> usize {
        let mut size = 0;
        if direction.includes_forward() {
            size += self.forward.len();
        }
        if direction.includes_reverse() {
            size += self.reverse.len();
        }
        size
    }

    /// Returns `true` if the selected direction(s) hold no entries.
    pub fn is_empty(&self, direction: Direction) -> bool {
        self.size(direction) == 0
    }

    /// Drops every entry in the selected direction(s). Statistics are kept.
    pub fn clear(&mut self, direction: Direction) {
        debug!(?direction, "clearing lexical cache");
        if direction.includes_forward() {
            self.forward.clear();
        }
        if direction.includes_reverse() {
            self.reverse.clear();
        }
    }

    /// Slots per direction.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.forward.capacity().get()
    }

    /// Active eviction policy.
    #[inline]
    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    /// Percentage of casts that missed: `misses / (hits + misses) * 100`.
    ///
    /// Not special-cased: before any cast (or right after [`reset_stats`](Self::reset_stats))
    /// this is NaN.
    #[inline]
    pub fn miss_ratio(&self) -> f64 {
        self.stats.miss_ratio()
    }

    /// Snapshot of the hit/miss counters.
    #[inline]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Zeroes the hit/miss counters; entries are kept.
    #[inline]
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Iterates over the live entries of the selected direction(s) in slot order,
    /// forward entries first.
    pub fn iter(&self, direction: Direction) -> impl Iterator<Item = &CachedItem<F>> + '_ {
        let forward = direction.includes_forward().then(|| self.forward.iter());
        let reverse = direction.includes_reverse().then(|| self.reverse.iter());
        forward
            .into_iter()
            .flatten()
            .chain(reverse.into_iter().flatten())
    }

    /// Checks both stores' slot/index correspondence.
    ///
    /// # Panics
    /// Panics on any mismatch.
    pub fn debug_validate_invariants(&self) {
        self.forward.debug_validate_invariants();
        self.reverse.debug_validate_invariants();
    }
}

impl<F: Real> Default for LexicalCache<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Real> Clone for LexicalCache<F> {
    fn clone(&self) -> Self {
        Self {
            forward: self.forward.clone(),
            reverse: self.reverse.clone(),
            clock: self.clock,
            stats: self.stats,
            policy: self.policy,
            text_format: self.text_format,
        }
    }
}

impl<F: Real> fmt::Debug for LexicalCache<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexicalCache")
            .field("capacity", &self.capacity())
            .field("forward_len", &self.forward.len())
            .field("reverse_len", &self.reverse.len())
            .field("clock", &self.clock.now())
            .field("stats", &self.stats)
            .field("policy", &self.policy)
            .finish()
    }
}

/// Diagnostic dump: every live slot of both directions, then the miss ratio.
impl<F: Real> fmt::Display for LexicalCache<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "text -> real cached:")?;
        for (slot, item) in self.forward.iter().enumerate() {
            writeln!(
                f,
                "  slot: {slot}, real: {}, timestamp: {}, string: {:?}",
                item.value, item.timestamp, item.text
            )?;
        }
        writeln!(f, "real -> text cached:")?;
        for (slot, item) in self.reverse.iter().enumerate() {
            writeln!(
                f,
                "  slot: {slot}, real: {}, timestamp: {}, string: {:?}",
                item.value, item.timestamp, item.text
            )?;
        }
        writeln!(f, "cache miss ratio: {}%", self.miss_ratio())
    }
}
