//! Parallel Put Benchmark
//!
//! Hammers one shared cache from many blocking workers and reports timing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::cache::{CacheStats, LruCache};
use crate::config::BenchConfig;

/// Outcome of one benchmark run.
#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    /// Wall-clock start in RFC 3339
    pub started_at: String,
    pub capacity: usize,
    pub threads: usize,
    pub puts_per_thread: usize,
    pub disjoint_keys: bool,
    pub elapsed_ms: u64,
    /// Entries left in the cache once every worker finished
    pub final_count: usize,
    /// Evictions counted by the eviction callback
    pub evictions_observed: u64,
    pub stats: CacheStats,
}

/// Runs `config.threads` workers in parallel, each issuing
/// `config.puts_per_thread` puts against a single shared cache.
///
/// Workers run on the tokio blocking pool since every cache call is
/// synchronous.
///
/// # Errors
/// Fails if the configured capacity is negative or a worker panics.
pub async fn run_put_benchmark(config: &BenchConfig) -> anyhow::Result<BenchReport> {
    let evictions = Arc::new(AtomicU64::new(0));
    let counter = Arc::clone(&evictions);
    let cache = LruCache::with_eviction_callback(config.capacity, move |_: usize, _: usize| {
        counter.fetch_add(1, Ordering::Relaxed);
    })
    .context("Failed to build benchmark cache")?;
    let cache = Arc::new(cache);

    info!(
        "Starting put benchmark: capacity={}, threads={}, puts_per_thread={}, disjoint_keys={}",
        cache.capacity(),
        config.threads,
        config.puts_per_thread,
        config.disjoint_keys
    );

    let started_at = Utc::now();
    let start = Instant::now();

    let mut handles = Vec::with_capacity(config.threads);
    for worker in 0..config.threads {
        let cache = Arc::clone(&cache);
        let puts = config.puts_per_thread;
        let offset = if config.disjoint_keys { worker * puts } else { 0 };

        handles.push(tokio::task::spawn_blocking(move || {
            for i in 0..puts {
                let key = offset + i;
                cache.put(key, key);
            }
        }));
    }

    for handle in handles {
        handle.await.context("Benchmark worker panicked")?;
    }

    let elapsed = start.elapsed();
    let report = BenchReport {
        started_at: started_at.to_rfc3339(),
        capacity: cache.capacity(),
        threads: config.threads,
        puts_per_thread: config.puts_per_thread,
        disjoint_keys: config.disjoint_keys,
        elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        final_count: cache.len(),
        evictions_observed: evictions.load(Ordering::Relaxed),
        stats: cache.stats(),
    };

    info!(
        "Put benchmark finished in {} ms: final_count={}, evictions={}",
        report.elapsed_ms, report.final_count, report.evictions_observed
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(capacity: i64, threads: usize, puts: usize, disjoint_keys: bool) -> BenchConfig {
        BenchConfig {
            capacity,
            threads,
            puts_per_thread: puts,
            disjoint_keys,
        }
    }

    #[tokio::test]
    async fn test_shared_keys_fill_to_capacity() {
        let config = config(10, 8, 100, false);

        let report = run_put_benchmark(&config).await.unwrap();

        assert_eq!(report.final_count, 10);
        assert_eq!(report.stats.total_entries, 10);
        assert_eq!(report.evictions_observed, report.stats.evictions);
        assert!(report.evictions_observed > 0);
    }

    #[tokio::test]
    async fn test_disjoint_keys_below_capacity() {
        let config = config(1_000, 4, 50, true);

        let report = run_put_benchmark(&config).await.unwrap();

        assert_eq!(report.final_count, 200);
        assert_eq!(report.evictions_observed, 0);
    }

    #[tokio::test]
    async fn test_disjoint_keys_evict_exact_overflow() {
        let config = config(64, 6, 40, true);

        let report = run_put_benchmark(&config).await.unwrap();

        // Every key is new, so every put past capacity evicts exactly one entry
        assert_eq!(report.final_count, 64);
        assert_eq!(report.evictions_observed, (6 * 40 - 64) as u64);
    }

    #[tokio::test]
    async fn test_negative_capacity_fails() {
        let config = config(-1, 2, 10, false);

        let err = run_put_benchmark(&config).await.unwrap_err();
        assert!(err.to_string().contains("Failed to build benchmark cache"));
    }

    #[tokio::test]
    async fn test_report_serializes() {
        let config = config(4, 2, 8, false);

        let report = run_put_benchmark(&config).await.unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["capacity"], 4);
        assert_eq!(json["threads"], 2);
        assert_eq!(json["final_count"], 4);
        assert!(json["stats"]["evictions"].is_u64());
        assert!(json["started_at"].is_string());
    }
}
