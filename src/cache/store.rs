//! Cache Store Module
//!
//! Main cache engine: a hash index fused with a recency list under one lock.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::cache::lru::{Handle, RecencyList};
use crate::cache::stats::CacheEvent;
use crate::cache::{CacheEntry, CacheStats};
use crate::error::{LruError, Result};

/// Upper bound on slots reserved up front; larger caches grow on demand.
const MAX_PREALLOCATED: usize = 1024;

/// Hook invoked with each entry evicted for exceeding capacity.
pub type EvictionCallback<K, V> = Box<dyn Fn(K, V) + Send + Sync>;

// == Locked State ==
/// Index and recency list, always mutated together.
///
/// The index holds exactly one handle per key in the list, and that handle
/// points at the node carrying the same key.
#[derive(Debug)]
struct CacheState<K, V> {
    index: HashMap<K, Handle>,
    recency: RecencyList<K, V>,
    stats: CacheStats,
}

impl<K, V> CacheState<K, V>
where
    K: Hash + Eq + Clone,
{
    fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.min(MAX_PREALLOCATED);
        Self {
            index: HashMap::with_capacity(capacity),
            recency: RecencyList::with_capacity(capacity),
            stats: CacheStats::default(),
        }
    }

    /// Inserts at the head and returns the entry evicted from the tail, if any.
    fn insert(&mut self, key: K, value: V, capacity: usize) -> Option<CacheEntry<K, V>> {
        // Overwrite drops the old value without counting as an eviction
        if let Some(handle) = self.index.remove(&key) {
            self.recency.remove(handle);
            self.stats.record(CacheEvent::Overwrite);
        }

        let handle = self.recency.push_front(CacheEntry::new(key.clone(), value));
        self.index.insert(key, handle);

        if self.recency.len() <= capacity {
            return None;
        }

        let evicted = self.recency.pop_back()?;
        self.index.remove(&evicted.key);
        self.stats.record(CacheEvent::Eviction);
        Some(evicted)
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    #[cfg(test)]
    fn assert_consistent(&self, capacity: usize) {
        assert_eq!(self.index.len(), self.recency.len());
        assert!(self.index.len() <= capacity);
        for (key, &handle) in &self.index {
            assert!(self.recency.get(handle).key == *key);
        }
        assert_eq!(self.recency.iter().count(), self.index.len());
    }
}

// == LRU Cache ==
/// Bounded, thread-safe cache that evicts the least recently used entry.
///
/// Every operation takes a single exclusive lock for its whole critical
/// section, so calls are linearizable. The eviction callback runs after
/// that lock is released and may call back into the cache.
///
/// # Example
/// ```
/// use concurrent_lru::LruCache;
///
/// let cache = LruCache::new(2).unwrap();
/// cache.put("a", 1);
/// cache.put("b", 2);
/// cache.get("a");
/// cache.put("c", 3);
///
/// assert_eq!(cache.get("b"), None);
/// assert_eq!(cache.get("a"), Some(1));
/// ```
pub struct LruCache<K, V> {
    capacity: usize,
    state: Mutex<CacheState<K, V>>,
    on_evict: Option<EvictionCallback<K, V>>,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// A capacity of zero is accepted: every put is evicted straight away.
    ///
    /// # Errors
    /// Returns [`LruError::InvalidArgument`] if `capacity` is negative.
    pub fn new(capacity: i64) -> Result<Self> {
        Self::build(capacity, None)
    }

    /// Creates an empty cache that calls `on_evict` with every entry evicted
    /// for exceeding `capacity`.
    ///
    /// Overwrites, [`remove`](Self::remove) and [`clear`](Self::clear) do not
    /// invoke the callback.
    ///
    /// # Errors
    /// Returns [`LruError::InvalidArgument`] if `capacity` is negative.
    pub fn with_eviction_callback<F>(capacity: i64, on_evict: F) -> Result<Self>
    where
        F: Fn(K, V) + Send + Sync + 'static,
    {
        Self::build(capacity, Some(Box::new(on_evict)))
    }

    fn build(capacity: i64, on_evict: Option<EvictionCallback<K, V>>) -> Result<Self> {
        let capacity = usize::try_from(capacity).map_err(|_| {
            LruError::InvalidArgument(format!(
                "capacity must be non-negative, got {}",
                capacity
            ))
        })?;

        debug!("Created LRU cache with capacity {}", capacity);
        Ok(Self {
            capacity,
            state: Mutex::new(CacheState::with_capacity(capacity)),
            on_evict,
        })
    }

    // == Put ==
    /// Inserts or overwrites `key` and marks it most recently used.
    ///
    /// If the cache then holds more than `capacity` entries, the least
    /// recently used one is removed and handed to the eviction callback.
    /// At most one entry is evicted per call.
    pub fn put(&self, key: K, value: V) {
        let evicted = {
            let mut state = self.state.lock();
            state.insert(key, value, self.capacity)
        };

        if let Some(entry) = evicted {
            trace!("Evicted least recently used entry (capacity {})", self.capacity);
            if let Some(on_evict) = &self.on_evict {
                on_evict(entry.key, entry.value);
            }
        }
    }

    // == Get ==
    /// Returns a copy of the value for `key` and marks it most recently used.
    ///
    /// Returns None without touching recency order if the key is absent.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut state = self.state.lock();
        match state.index.get(key).copied() {
            Some(handle) => {
                state.recency.move_to_front(handle);
                state.stats.record(CacheEvent::Hit);
                Some(state.recency.get(handle).value.clone())
            }
            None => {
                state.stats.record(CacheEvent::Miss);
                None
            }
        }
    }

    // == Remove ==
    /// Removes `key` and returns its value, or None if it was absent.
    ///
    /// Explicit removal is not an eviction; the callback is not invoked.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut state = self.state.lock();
        let handle = state.index.remove(key)?;
        state.stats.record(CacheEvent::Removal);
        Some(state.recency.remove(handle).value)
    }

    // == Clear ==
    /// Discards every entry without invoking the eviction callback.
    pub fn clear(&self) {
        let discarded = {
            let mut state = self.state.lock();
            let discarded = state.len();
            state.index.clear();
            state.recency.clear();
            state.stats.record(CacheEvent::Clear { discarded });
            discarded
        };
        debug!("Cleared {} entries from LRU cache", discarded);
    }

    /// Returns true if `key` is present, without changing recency order.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.state.lock().index.contains_key(key)
    }

    // == Length ==
    /// Returns the current number of entries. Never exceeds [`capacity`](Self::capacity).
    pub fn len(&self) -> usize {
        self.state.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Snapshot ==
    /// Returns an owned copy of all entries, most recently used first.
    ///
    /// The returned pairs share nothing with the cache.
    pub fn snapshot(&self) -> Vec<(K, V)> {
        let state = self.state.lock();
        state
            .recency
            .iter()
            .map(|entry| (entry.key.clone(), entry.value.clone()))
            .collect()
    }

    // == Stats ==
    /// Returns a point-in-time copy of the usage counters.
    pub fn stats(&self) -> CacheStats {
        let state = self.state.lock();
        state.stats.snapshot(state.len())
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("len", &self.state.lock().recency.len())
            .field("has_eviction_callback", &self.on_evict.is_some())
            .finish()
    }
}
