//! Cache Statistics Module
//!
//! Counts how entries arrive in and leave the cache. Capacity-driven
//! evictions are kept apart from overwrites, explicit removals and clears,
//! since only evictions reach the eviction callback.

use serde::Serialize;

/// Something that happened to the cache under its lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CacheEvent {
    /// Lookup found its key
    Hit,
    /// Lookup for an absent key
    Miss,
    /// Put replaced the value of a present key
    Overwrite,
    /// Put pushed the least recently used entry out
    Eviction,
    /// Explicit removal of a present key
    Removal,
    /// Clear discarded this many entries
    Clear { discarded: usize },
}

// == Cache Stats ==
/// Usage counters of an [`LruCache`](crate::LruCache).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Entries dropped for exceeding capacity; equals the number of callback invocations
    pub evictions: u64,
    /// Puts that replaced an existing value
    pub overwrites: u64,
    /// Successful explicit removals
    pub removals: u64,
    /// Entries discarded by clear, summed over all calls
    pub cleared: u64,
    /// Entries present when the snapshot was taken
    pub total_entries: usize,
}

impl CacheStats {
    pub(crate) fn record(&mut self, event: CacheEvent) {
        match event {
            CacheEvent::Hit => self.hits += 1,
            CacheEvent::Miss => self.misses += 1,
            CacheEvent::Overwrite => self.overwrites += 1,
            CacheEvent::Eviction => self.evictions += 1,
            CacheEvent::Removal => self.removals += 1,
            CacheEvent::Clear { discarded } => self.cleared += discarded as u64,
        }
    }

    /// Returns a copy with `total_entries` set to `count`.
    pub(crate) fn snapshot(&self, count: usize) -> Self {
        Self {
            total_entries: count,
            ..self.clone()
        }
    }

    // == Hit Rate ==
    /// Fraction of lookups that found their key, or None before the first lookup.
    pub fn hit_rate(&self) -> Option<f64> {
        let lookups = self.hits + self.misses;
        (lookups > 0).then(|| self.hits as f64 / lookups as f64)
    }

    /// Entries that left the cache by any route.
    pub fn departures(&self) -> u64 {
        self.evictions + self.removals + self.cleared
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default_is_zeroed() {
        let stats = CacheStats::default();
        assert_eq!(stats.departures(), 0);
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.hit_rate(), None);
    }

    #[test]
    fn test_record_routes_each_event() {
        let mut stats = CacheStats::default();
        stats.record(CacheEvent::Hit);
        stats.record(CacheEvent::Miss);
        stats.record(CacheEvent::Overwrite);
        stats.record(CacheEvent::Eviction);
        stats.record(CacheEvent::Removal);
        stats.record(CacheEvent::Clear { discarded: 4 });

        assert_eq!(
            stats,
            CacheStats {
                hits: 1,
                misses: 1,
                evictions: 1,
                overwrites: 1,
                removals: 1,
                cleared: 4,
                total_entries: 0,
            }
        );
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::default();
        stats.record(CacheEvent::Hit);
        stats.record(CacheEvent::Hit);
        stats.record(CacheEvent::Hit);
        stats.record(CacheEvent::Miss);
        assert_eq!(stats.hit_rate(), Some(0.75));
    }

    #[test]
    fn test_departures_exclude_overwrites() {
        let mut stats = CacheStats::default();
        stats.record(CacheEvent::Overwrite);
        stats.record(CacheEvent::Eviction);
        stats.record(CacheEvent::Removal);
        stats.record(CacheEvent::Clear { discarded: 2 });
        assert_eq!(stats.departures(), 4);
    }

    #[test]
    fn test_snapshot_keeps_counters() {
        let mut stats = CacheStats::default();
        stats.record(CacheEvent::Eviction);

        let snapshot = stats.snapshot(42);
        assert_eq!(snapshot.total_entries, 42);
        assert_eq!(snapshot.evictions, 1);
        assert_eq!(stats.total_entries, 0);
    }
}
