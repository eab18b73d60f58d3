//! Concurrent LRU - A bounded, thread-safe in-memory cache
//!
//! Pairs a hash index with a recency-ordered list under a single lock and
//! evicts the least recently used entry once capacity is exceeded.

pub mod bench;
pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheEntry, CacheStats, LruCache};
pub use config::BenchConfig;
pub use error::{LruError, Result};
