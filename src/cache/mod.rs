//! Cache Module
//!
//! Bounded LRU memoization used by [`crate::pipeline::CultureMap`] to avoid
//! recomputing distance matrices for an unchanged selection.

mod lru;

pub use lru::{CacheEntry, CacheStats, LruCache};
