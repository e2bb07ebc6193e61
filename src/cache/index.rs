//! Key-to-slot indices for the two cache directions.
//!
//! [`SlotStore`](super::slot_store::SlotStore) owns the slots and the eviction logic once;
//! the [`SlotIndex`] implementation decides how a query finds its slot:
//!
//! - [`TextIndex`]: exact text match, FNV-hashed, $O(1)$.
//! - [`ValueIndex`]: approximate value match via [`almost_equal`], linear scan, $O(N)$.

// FNV for short text and bit-pattern keys, same hasher as the heapless maps.
use fnv::FnvBuildHasher;
use hashbrown::HashMap;

use crate::cache::slot_store::CachedItem;
use crate::compare::{almost_equal, DEFAULT_MAX_ULPS};
use crate::Real;

/// Maps the keys of populated slots to their slot numbers.
///
/// Implementations keep one entry per populated slot. The slot store guarantees it removes
/// an item's entry before overwriting that item.
pub trait SlotIndex<F: Real> {
    /// What callers look slots up by.
    type Query: ?Sized;

    /// Returns the slot matching `query`, if any.
    fn find(&self, query: &Self::Query) -> Option<usize>;

    /// Returns the slot indexed under exactly `item`'s key.
    fn slot_of(&self, item: &CachedItem<F>) -> Option<usize>;

    /// Indexes `item` at `slot`, replacing any entry with the same exact key.
    fn insert(&mut self, item: &CachedItem<F>, slot: usize);

    /// Removes the entry for `item`'s key and returns its slot.
    fn remove(&mut self, item: &CachedItem<F>) -> Option<usize>;

    /// Number of indexed slots.
    fn len(&self) -> usize;

    /// Returns `true` if nothing is indexed.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every entry.
    fn clear(&mut self);
}

/// Forward index: text to slot, exact content equality.
#[derive(Debug, Clone, Default)]
pub struct TextIndex {
    map: HashMap<Box<str>, usize, FnvBuildHasher>,
}

impl TextIndex {
    /// Creates an index pre-sized for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, FnvBuildHasher::default()),
        }
    }
}

impl<F: Real> SlotIndex<F> for TextIndex {
    type Query = str;

    #[inline]
    fn find(&self, query: &str) -> Option<usize> {
        self.map.get(query).copied()
    }

    #[inline]
    fn slot_of(&self, item: &CachedItem<F>) -> Option<usize> {
        self.map.get(item.text.as_str()).copied()
    }

    #[inline]
    fn insert(&mut self, item: &CachedItem<F>, slot: usize) {
        self.map.insert(item.text.as_str().into(), slot);
    }

    #[inline]
    fn remove(&mut self, item: &CachedItem<F>) -> Option<usize> {
        self.map.remove(item.text.as_str())
    }

    #[inline]
    fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    fn clear(&mut self) {
        self.map.clear();
    }
}

/// Reverse index: value to slot, approximate equality.
///
/// Entries are keyed by the exact bit pattern so an evicted value can be removed
/// precisely; lookups scan every key with [`almost_equal`].
#[derive(Debug, Clone)]
pub struct ValueIndex<F: Real> {
    map: HashMap<F::Bits, usize, FnvBuildHasher>,
    max_ulps: u32,
}

impl<F: Real> ValueIndex<F> {
    /// Creates an index pre-sized for `capacity` entries, matching within `max_ulps`.
    pub fn with_capacity(capacity: usize, max_ulps: u32) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, FnvBuildHasher::default()),
            max_ulps,
        }
    }

    /// Returns the slot indexed under exactly `value`'s bit pattern.
    #[inline]
    pub fn slot_of_value(&self, value: F) -> Option<usize> {
        self.map.get(&value.to_raw_bits()).copied()
    }

    /// ULP bound used for lookups.
    #[inline]
    pub fn max_ulps(&self) -> u32 {
        self.max_ulps
    }
}

impl<F: Real> Default for ValueIndex<F> {
    fn default() -> Self {
        Self::with_capacity(0, DEFAULT_MAX_ULPS)
    }
}

impl<F: Real> SlotIndex<F> for ValueIndex<F> {
    type Query = F;

    fn find(&self, query: &F) -> Option<usize> {
        self.map
            .iter()
            .find(|(bits, _)| almost_equal(F::from_raw_bits(**bits), *query, self.max_ulps))
            .map(|(_, &slot)| slot)
    }

    #[inline]
    fn slot_of(&self, item: &CachedItem<F>) -> Option<usize> {
        self.slot_of_value(item.value)
    }

    #[inline]
    fn insert(&mut self, item: &CachedItem<F>, slot: usize) {
        self.map.insert(item.value.to_raw_bits(), slot);
    }

    #[inline]
    fn remove(&mut self, item: &CachedItem<F>) -> Option<usize> {
        self.map.remove(&item.value.to_raw_bits())
    }

    #[inline]
    fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    fn clear(&mut self) {
        self.map.clear();
    }
}
