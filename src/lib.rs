//! Varcache - pluggable key-value cache backends for an HTTP caching layer
//!
//! Provides a uniform storage contract ([`Cache`]) over multiple backends and
//! a two-part key scheme that lets one logical resource be cached both as a
//! shared ("public") entry and as a variant entry scoped to extra context,
//! e.g. a per-credential suffix.

pub mod cache;
pub mod config;
pub mod error;
pub mod key;

pub use cache::{Cache, MemoryCache, RedisCache, StoreClient};
pub use config::Config;
pub use error::{CacheError, Result};
