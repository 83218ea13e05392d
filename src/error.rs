//! Error types for the cache backends
//!
//! Provides unified error handling using thiserror.
//!
//! A missing key is never an error anywhere in this crate: `get` reports it
//! as `Ok(None)` and `delete` is a silent no-op.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache backends.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The backing store failed or rejected an operation. Propagated
    /// unchanged; this crate adds no retry policy of its own.
    #[error("backing store error: {0}")]
    Store(#[from] redis::RedisError),

    /// Backend construction failed (malformed URL, unreachable store).
    /// Surfaced at construction time, never deferred to the first operation.
    #[error("cache configuration error: {0}")]
    Config(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache backends.
pub type Result<T> = std::result::Result<T, CacheError>;
