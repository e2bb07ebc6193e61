//! Fixed-capacity slot storage shared by both cache directions.

use core::fmt;
use core::num::NonZeroUsize;

use tracing::trace;

use crate::cache::eviction::EvictionPolicy;
use crate::cache::index::{SlotIndex, ValueIndex};
use crate::Real;

/// One cached conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedItem<F> {
    /// Decimal text of the entry.
    pub text: String,
    /// Numeric value of the entry.
    pub value: F,
    /// Logical time of the last write to this slot.
    pub timestamp: u64,
}

/// Monotonic write counter shared by both directions of one cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalClock {
    now: u64,
}

impl LogicalClock {
    /// Starts the clock at `origin`; the first tick returns `origin + 1`.
    pub const fn starting_at(origin: u64) -> Self {
        Self { now: origin }
    }

    /// Advances the clock and returns the new time.
    ///
    /// Wraps on overflow. Eviction assumes it never does, so caches only start clocks at or
    /// below [`MAX_CLOCK_ORIGIN`](crate::config::MAX_CLOCK_ORIGIN).
    #[inline(always)]
    pub fn tick(&mut self) -> u64 {
        self.now = self.now.wrapping_add(1);
        self.now
    }

    /// The most recently issued time.
    #[inline(always)]
    pub fn now(&self) -> u64 {
        self.now
    }
}

/// A **fixed-capacity slot array** plus the index that locates its slots.
///
/// Generic over the lookup strategy `X` so the fill/evict/overwrite logic exists once and
/// serves both the exact text index and the approximate value index.
///
/// # Architecture & Pseudocode
/// - `slots`: populated slots `0..len`. Slots fill in order and are never freed one by
///   one, so the populated set is always a prefix of the capacity.
/// - `index`: one entry per populated slot.
///
/// ## Insert Algorithm
/// ```text
/// 1. If the index already holds item's exact key at `idx` (only a NaN can get here):
///    overwrite slots[idx] in place, keep the entry.
/// 2. Else if len < capacity: idx = len, push item.
/// 3. Else:
///    a. idx = policy.select_victim(slots)   (oldest timestamp, lowest index on ties)
///    b. index.remove(slots[idx])
///    c. overwrite slots[idx] with item
/// 4. index.insert(slots[idx], idx)
/// ```
///
/// The reverse store also has `insert_formatted`, which takes the same steps but renders
/// the text straight into the chosen slot's existing buffer.
pub struct SlotStore<F: Real, X: SlotIndex<F>> {
    label: &'static str,
    slots: Vec<CachedItem<F>>,
    capacity: NonZeroUsize,
    index: X,
}

impl<F: Real, X: SlotIndex<F>> SlotStore<F, X> {
    /// Creates an empty store of `capacity` slots located through `index`.
    ///
    /// `label` names the store in log events.
    pub fn new(label: &'static str, capacity: NonZeroUsize, index: X) -> Self {
        Self {
            label,
            slots: Vec::with_capacity(capacity.get()),
            capacity,
            index,
        }
    }

    /// Returns the number of populated slots.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no slot is populated.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns `true` once every slot is populated.
    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity.get()
    }

    /// Returns the number of slots.
    #[inline(always)]
    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    /// Returns the slot matching `query`.
    #[inline]
    pub fn find(&self, query: &X::Query) -> Option<usize> {
        let slot = self.index.find(query)?;
        debug_assert!(slot < self.slots.len(), "index points past the populated slots");
        Some(slot)
    }

    /// Returns the item in `slot`.
    ///
    /// # Panics
    /// Panics if `slot` is not populated.
    #[inline(always)]
    pub fn item(&self, slot: usize) -> &CachedItem<F> {
        &self.slots[slot]
    }

    /// Re-stamps `slot` without touching its contents.
    ///
    /// # Panics
    /// Panics if `slot` is not populated.
    #[inline]
    pub fn touch(&mut self, slot: usize, timestamp: u64) {
        self.slots[slot].timestamp = timestamp;
    }

    /// Writes `item` into a free slot, or over the policy's victim when full, and returns
    /// the slot it landed in.
    pub fn insert(&mut self, item: CachedItem<F>, policy: EvictionPolicy) -> usize {
        let existing = self.index.slot_of(&item);
        let slot = match self.reclaim(existing, policy) {
            Some(slot) => {
                self.slots[slot] = item;
                slot
            }
            None => {
                self.slots.push(item);
                self.slots.len() - 1
            }
        };
        self.index.insert(&self.slots[slot], slot);
        slot
    }

    /// Picks the populated slot a new entry overwrites, or `None` when it goes into the next
    /// free slot. A victim's index entry is removed here; `existing` keeps its entry, which
    /// the caller's index insert replaces.
    fn reclaim(&mut self, existing: Option<usize>, policy: EvictionPolicy) -> Option<usize> {
        // Exact key indexed but missed by `find`: only NaN, which never matches itself.
        if existing.is_some() {
            return existing;
        }
        if !self.is_full() {
            return None;
        }

        let victim = policy.select_victim(&self.slots);
        let removed = self.index.remove(&self.slots[victim]);
        debug_assert_eq!(removed, Some(victim), "evicted slot was not indexed");
        trace!(
            store = self.label,
            slot = victim,
            timestamp = self.slots[victim].timestamp,
            text = %self.slots[victim].text,
            "evicting slot"
        );
        Some(victim)
    }

    /// Empties the store; the next insert goes to slot 0.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
    }

    /// Iterates over populated slots in slot order.
    pub fn iter(&self) -> core::slice::Iter<'_, CachedItem<F>> {
        self.slots.iter()
    }

    /// Checks that populated slots and index entries are in one-to-one correspondence.
    ///
    /// # Panics
    /// Panics on any mismatch.
    pub fn debug_validate_invariants(&self) {
        assert!(self.slots.len() <= self.capacity.get(), "store over capacity");
        assert_eq!(
            self.index.len(),
            self.slots.len(),
            "index size differs from populated slot count"
        );
        for (slot, item) in self.slots.iter().enumerate() {
            assert_eq!(
                self.index.slot_of(item),
                Some(slot),
                "slot {slot} is not indexed under its own key"
            );
        }
    }
}

impl<F: Real> SlotStore<F, ValueIndex<F>> {
    /// Writes an entry for `value` whose text `write_text` renders into the slot's buffer.
    ///
    /// An overwritten slot hands its own text buffer to `write_text`, so steady-state misses
    /// on a full store reuse allocations instead of dropping them.
    pub fn insert_formatted(
        &mut self,
        value: F,
        timestamp: u64,
        policy: EvictionPolicy,
        write_text: impl FnOnce(&mut String),
    ) -> usize {
        let existing = self.index.slot_of_value(value);
        let slot = match self.reclaim(existing, policy) {
            Some(slot) => {
                let item = &mut self.slots[slot];
                write_text(&mut item.text);
                item.value = value;
                item.timestamp = timestamp;
                slot
            }
            None => {
                let mut text = String::new();
                write_text(&mut text);
                self.slots.push(CachedItem {
                    text,
                    value,
                    timestamp,
                });
                self.slots.len() - 1
            }
        };
        self.index.insert(&self.slots[slot], slot);
        slot
    }
}

impl<F: Real, X: SlotIndex<F> + Clone> Clone for SlotStore<F, X> {
    fn clone(&self) -> Self {
        Self {
            label: self.label,
            slots: self.slots.clone(),
            capacity: self.capacity,
            index: self.index.clone(),
        }
    }
}

impl<F: Real, X: SlotIndex<F>> fmt::Debug for SlotStore<F, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotStore")
            .field("label", &self.label)
            .field("len", &self.slots.len())
            .field("capacity", &self.capacity)
            .field("slots", &self.slots)
            .finish()
    }
}

impl<'a, F: Real, X: SlotIndex<F>> IntoIterator for &'a SlotStore<F, X> {
    type Item = &'a CachedItem<F>;
    type IntoIter = core::slice::Iter<'a, CachedItem<F>>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::index::{TextIndex, ValueIndex};

    fn cap(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn text_store(n: usize) -> SlotStore<f64, TextIndex> {
        SlotStore::new("forward", cap(n), TextIndex::with_capacity(n))
    }

    fn item(text: &str, value: f64, timestamp: u64) -> CachedItem<f64> {
        CachedItem {
            text: text.to_string(),
            value,
            timestamp,
        }
    }

    #[test]
    fn test_clock_ticks_from_origin() {
        let mut clock = LogicalClock::starting_at(100);
        assert_eq!(clock.now(), 100);
        assert_eq!(clock.tick(), 101);
        assert_eq!(clock.tick(), 102);
        assert_eq!(clock.now(), 102);
    }

    #[test]
    fn test_clock_wraps() {
        let mut clock = LogicalClock::starting_at(u64::MAX);
        assert_eq!(clock.tick(), 0);
    }

    #[test]
    fn test_fills_slots_in_order() {
        let mut store = text_store(3);
        let policy = EvictionPolicy::OldestWrite;
        assert_eq!(store.insert(item("a", 1.0, 1), policy), 0);
        assert_eq!(store.insert(item("b", 2.0, 2), policy), 1);
        assert_eq!(store.insert(item("c", 3.0, 3), policy), 2);
        assert!(store.is_full());
        assert_eq!(store.find("b"), Some(1));
        assert_eq!(store.item(1).value, 2.0);
        store.debug_validate_invariants();
    }

    #[test]
    fn test_evicts_oldest_timestamp() {
        let mut store = text_store(3);
        let policy = EvictionPolicy::OldestWrite;
        store.insert(item("a", 1.0, 10), policy);
        store.insert(item("b", 2.0, 5), policy);
        store.insert(item("c", 3.0, 12), policy);

        assert_eq!(store.insert(item("d", 4.0, 13), policy), 1);
        assert_eq!(store.len(), 3);
        assert_eq!(store.find("b"), None);
        assert_eq!(store.find("d"), Some(1));
        store.debug_validate_invariants();

        // "a" is now the oldest.
        assert_eq!(store.insert(item("e", 5.0, 14), policy), 0);
        assert_eq!(store.find("a"), None);
        store.debug_validate_invariants();
    }

    #[test]
    fn test_touch_changes_victim() {
        let mut store = text_store(2);
        let policy = EvictionPolicy::LeastRecentlyUsed;
        store.insert(item("a", 1.0, 1), policy);
        store.insert(item("b", 2.0, 2), policy);
        store.touch(0, 3);
        assert_eq!(store.insert(item("c", 3.0, 4), policy), 1);
        assert_eq!(store.find("a"), Some(0));
        assert_eq!(store.find("b"), None);
    }

    #[test]
    fn test_clear_restarts_at_slot_zero() {
        let mut store = text_store(2);
        let policy = EvictionPolicy::OldestWrite;
        store.insert(item("a", 1.0, 1), policy);
        store.insert(item("b", 2.0, 2), policy);
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.find("a"), None);
        assert_eq!(store.insert(item("c", 3.0, 3), policy), 0);
        store.debug_validate_invariants();
    }

    #[test]
    fn test_duplicate_nan_key_reuses_its_slot() {
        let mut store: SlotStore<f64, ValueIndex<f64>> =
            SlotStore::new("reverse", cap(3), ValueIndex::default());
        let policy = EvictionPolicy::OldestWrite;
        store.insert(item("NaN", f64::NAN, 1), policy);
        store.insert(item("1.0", 1.0, 2), policy);
        assert_eq!(store.find(&f64::NAN), None);
        assert_eq!(store.insert(item("NaN", f64::NAN, 3), policy), 0);
        assert_eq!(store.len(), 2);
        assert_eq!(store.item(0).timestamp, 3);
        store.debug_validate_invariants();
    }

    #[test]
    fn test_insert_formatted_writes_into_victim_buffer() {
        let mut store: SlotStore<f64, ValueIndex<f64>> =
            SlotStore::new("reverse", cap(2), ValueIndex::default());
        let policy = EvictionPolicy::OldestWrite;
        let write = |text: &'static str| {
            move |out: &mut String| {
                out.clear();
                out.push_str(text);
            }
        };
        assert_eq!(store.insert_formatted(1.0, 1, policy, write("one")), 0);
        assert_eq!(store.insert_formatted(2.0, 2, policy, write("two")), 1);
        let buffer = store.item(0).text.as_ptr();

        assert_eq!(store.insert_formatted(3.0, 3, policy, write("six")), 0);
        assert_eq!(store.item(0), &item("six", 3.0, 3));
        assert_eq!(store.item(0).text.as_ptr(), buffer);
        assert_eq!(store.find(&1.0), None);
        assert_eq!(store.find(&3.0), Some(0));
        store.debug_validate_invariants();
    }

    #[test]
    fn test_insert_formatted_duplicate_nan_reuses_its_slot() {
        let mut store: SlotStore<f64, ValueIndex<f64>> =
            SlotStore::new("reverse", cap(2), ValueIndex::default());
        let policy = EvictionPolicy::OldestWrite;
        let nan = |out: &mut String| {
            out.clear();
            out.push_str("NaN");
        };
        store.insert_formatted(f64::NAN, 1, policy, nan);
        store.insert_formatted(5.0, 2, policy, |out| out.push_str("5"));
        assert_eq!(store.insert_formatted(f64::NAN, 3, policy, nan), 0);
        assert_eq!(store.len(), 2);
        assert_eq!(store.item(0).text, "NaN");
        assert_eq!(store.item(0).timestamp, 3);
        store.debug_validate_invariants();
    }

    #[test]
    fn test_iter_in_slot_order() {
        let mut store = text_store(4);
        let policy = EvictionPolicy::OldestWrite;
        for (i, text) in ["x", "y", "z"].into_iter().enumerate() {
            store.insert(item(text, i as f64, i as u64), policy);
        }
        let texts: Vec<&str> = store.iter().map(|item| item.text.as_str()).collect();
        assert_eq!(texts, ["x", "y", "z"]);
        assert_eq!((&store).into_iter().count(), 3);
    }
}
