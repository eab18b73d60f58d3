//! Error types for the LRU cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == LRU Error Enum ==
/// Errors surfaced by the cache.
///
/// Lookups and removals of absent keys are not errors; they return `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LruError {
    /// A constructor argument was out of range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, LruError>;
