//! LRU bench - parallel Put benchmark for the concurrent LRU cache
//!
//! Runs the configured number of workers against one shared cache and
//! prints a JSON report on stdout.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use concurrent_lru::bench::run_put_benchmark;
use concurrent_lru::BenchConfig;

/// Main entry point for the benchmark driver.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Run the parallel put benchmark
/// 4. Print the report as JSON
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "concurrent_lru=info,lru_bench=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = BenchConfig::from_env();
    info!(
        "Configuration loaded: capacity={}, threads={}, puts_per_thread={}, disjoint_keys={}",
        config.capacity, config.threads, config.puts_per_thread, config.disjoint_keys
    );

    let report = run_put_benchmark(&config).await?;

    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    println!("{}", json);
    Ok(())
}
