//! Cache Module
//!
//! Provides a bounded, thread-safe in-memory cache with LRU eviction.
//!
//! The slot-indexed recency list behind [`LruCache`] is internal; callers
//! only address entries by key.
//!
//! ```compile_fail
//! use concurrent_lru::cache::RecencyList;
//! ```

mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::{EvictionCallback, LruCache};
