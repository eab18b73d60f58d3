//! Benchmark Module
//!
//! Parallel Put driver used by the `lru_bench` binary.

mod driver;

pub use driver::{run_put_benchmark, BenchReport};
