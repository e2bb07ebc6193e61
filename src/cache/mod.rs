//! The bidirectional cache and its building blocks.

pub mod eviction;
pub mod index;
pub mod lexical_cache;
pub mod slot_store;
