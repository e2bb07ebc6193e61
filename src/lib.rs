//! # Lexical Cache
//!
//! A small, bounded memo for converting decimal text to floating-point values and back.
//!
//! Numeric ingestion (log lines, CSV fields, market data) tends to see the same literals
//! over and over. [`LexicalCache`] keeps the last few conversions in each direction so a
//! repeated literal costs one hash lookup instead of a parse, and a repeated value costs a
//! short scan instead of a format.
//!
//! ## Key Features
//!
//! * **Fixed footprint:** Each direction holds at most `capacity` entries (default 10) in a
//!   flat slot array. Full stores overwrite the slot written longest ago.
//! * **Exact forward lookup:** `text -> value` is keyed by the literal text, FNV-hashed.
//! * **Approximate reverse lookup:** `value -> text` matches values within 4 ULPs (or within
//!   single-precision epsilon near zero), so `0.1 + 0.2` finds the entry for `0.3`.
//! * **Statistics:** Hit/miss counters and a miss ratio across both directions.
//! * **Single-threaded:** No internal locking. Keep one cache per thread or wrap it yourself.
//!
//! ## Eviction
//!
//! The default [`EvictionPolicy::OldestWrite`] does **not** refresh an entry when it is
//! read: the victim is the oldest *write*, not the least recently *used* entry.
//! [`EvictionPolicy::LeastRecentlyUsed`] is available as an opt-in.
//!
//! ## Examples
//!
//! ```rust
//! use lexical_cache::{Direction, LexicalCache};
//!
//! let mut cache: LexicalCache<f64> = LexicalCache::with_capacity(4).unwrap();
//!
//! for text in ["1.0", "2.0", "3.0", "4.0"] {
//!     cache.cast_to_real(text).unwrap();
//! }
//! assert_eq!(cache.size(Direction::Forward), 4);
//!
//! // Reading "1.0" is a hit but does not protect it...
//! assert_eq!(cache.cast_to_real("1.0").unwrap(), 1.0);
//!
//! // ...so the next new literal evicts it.
//! cache.cast_to_real("5.2").unwrap();
//! assert_eq!(cache.size(Direction::Forward), 4);
//! assert!(cache.iter(Direction::Forward).all(|item| item.text != "1.0"));
//!
//! // Malformed text is an error and leaves the cache as it was.
//! assert!(cache.cast_to_real("1.0.0").is_err());
//! ```

// --- Module Declarations ---

pub mod cache;
pub mod compare;
pub mod config;
pub mod error;
pub mod format;
pub mod stats;
pub mod utils;

// --- Re-exports ---

pub use cache::eviction::EvictionPolicy;
pub use cache::index::{SlotIndex, TextIndex, ValueIndex};
pub use cache::lexical_cache::{Direction, LexicalCache};
pub use cache::slot_store::{CachedItem, LogicalClock, SlotStore};
pub use compare::{almost_eq, almost_equal, DEFAULT_MAX_ULPS};
pub use config::{CacheConfig, DEFAULT_CAPACITY, MAX_CLOCK_ORIGIN};
pub use error::{CacheError, Result};
pub use format::TextFormat;
pub use stats::CacheStats;
pub use utils::real::Real;
