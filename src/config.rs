//! Configuration Module
//!
//! Loads benchmark driver settings from environment variables.

use std::env;
use std::str::FromStr;

/// Benchmark driver configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    /// Capacity of the benchmarked cache; negative values are rejected when the cache is built
    pub capacity: i64,
    /// Number of parallel workers
    pub threads: usize,
    /// Put calls issued by each worker
    pub puts_per_thread: usize,
    /// Give each worker its own key range instead of sharing `0..puts_per_thread`
    pub disjoint_keys: bool,
}

impl BenchConfig {
    /// Creates a new BenchConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `LRU_CAPACITY` - Cache capacity (default: 10)
    /// - `LRU_BENCH_THREADS` - Parallel workers (default: 100)
    /// - `LRU_BENCH_PUTS` - Puts per worker (default: 100)
    /// - `LRU_BENCH_DISJOINT` - Disjoint key ranges per worker (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: env_or("LRU_CAPACITY", defaults.capacity),
            threads: env_or("LRU_BENCH_THREADS", defaults.threads),
            puts_per_thread: env_or("LRU_BENCH_PUTS", defaults.puts_per_thread),
            disjoint_keys: env_or("LRU_BENCH_DISJOINT", defaults.disjoint_keys),
        }
    }

    /// Number of distinct keys the workers will insert.
    pub fn distinct_keys(&self) -> usize {
        if self.disjoint_keys {
            self.threads * self.puts_per_thread
        } else if self.threads == 0 {
            0
        } else {
            self.puts_per_thread
        }
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            capacity: 10,
            threads: 100,
            puts_per_thread: 100,
            disjoint_keys: false,
        }
    }
}

/// Parses `name` from the environment, falling back to `default` when unset or malformed.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
