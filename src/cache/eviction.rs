//! Victim selection for full slot stores.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cache::slot_store::CachedItem;

/// Which slot a full store gives up on a miss.
///
/// Both policies evict the slot with the smallest timestamp. They differ only in whether a
/// cache hit re-stamps the slot it read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EvictionPolicy {
    /// Timestamps only change when a slot is written, so the victim is the slot written
    /// longest ago, however often it has been read since. FIFO-like.
    #[default]
    OldestWrite,
    /// Hits re-stamp the slot they read, giving classic least-recently-used eviction.
    LeastRecentlyUsed,
}

impl EvictionPolicy {
    /// Returns `true` if a hit should refresh the slot's timestamp.
    #[inline(always)]
    pub fn refreshes_on_read(self) -> bool {
        matches!(self, EvictionPolicy::LeastRecentlyUsed)
    }

    /// Picks the slot to overwrite in a full store.
    ///
    /// # Pseudo Code:
    /// ```text
    /// victim = 0
    /// for i in 1..len:
    ///     if slots[i].timestamp < slots[victim].timestamp:
    ///         victim = i
    /// return victim      (ties keep the lowest index)
    /// ```
    ///
    /// `slots` must not be empty.
    pub fn select_victim<F>(self, slots: &[CachedItem<F>]) -> usize {
        debug_assert!(!slots.is_empty(), "eviction from an empty slot store");
        let mut victim = 0;
        for (idx, item) in slots.iter().enumerate().skip(1) {
            if item.timestamp < slots[victim].timestamp {
                victim = idx;
            }
        }
        victim
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(stamps: &[u64]) -> Vec<CachedItem<f64>> {
        stamps
            .iter()
            .map(|&timestamp| CachedItem {
                text: String::new(),
                value: 0.0,
                timestamp,
            })
            .collect()
    }

    #[test]
    fn test_selects_minimum_timestamp() {
        let policy = EvictionPolicy::default();
        assert_eq!(policy.select_victim(&items(&[105, 102, 109, 103])), 1);
        assert_eq!(policy.select_victim(&items(&[101])), 0);
        assert_eq!(policy.select_victim(&items(&[110, 111, 112, 104])), 3);
    }

    #[test]
    fn test_ties_pick_lowest_index() {
        let policy = EvictionPolicy::LeastRecentlyUsed;
        assert_eq!(policy.select_victim(&items(&[7, 3, 3, 3])), 1);
        assert_eq!(policy.select_victim(&items(&[2, 2])), 0);
    }

    #[test]
    fn test_read_refresh_flag() {
        assert!(!EvictionPolicy::OldestWrite.refreshes_on_read());
        assert!(EvictionPolicy::LeastRecentlyUsed.refreshes_on_read());
        assert_eq!(EvictionPolicy::default(), EvictionPolicy::OldestWrite);
    }
}
