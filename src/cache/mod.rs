//! Cache Backends Module
//!
//! Defines the storage contract shared by every backend and re-exports the
//! backend implementations. Backends are selected at configuration time (see
//! [`crate::config`]); consumers hold a `Box<dyn Cache>` and never branch on
//! the concrete backend.

mod memory;
mod redis;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use self::redis::{RedisCache, StoreClient};
pub use memory::MemoryCache;

use chrono::{DateTime, Utc};

use crate::error::Result;

// == Cache Contract ==
/// Storage contract implemented by every cache backend.
///
/// Values are opaque byte payloads; the cache never inspects or transforms
/// them. All methods are called synchronously from caller threads; backends
/// spawn no background work of their own.
pub trait Cache: Send + Sync {
    /// Returns the stored value, or `None` if the key is absent.
    ///
    /// A missing key is never an error. Composite-key-aware backends may
    /// consult related keys (see [`RedisCache`]).
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` under `key`, silently overwriting any previous entry.
    ///
    /// `expires` is an absolute instant; backends without TTL support ignore
    /// it. There is no versioning - concurrent writers are last-write-wins.
    fn set(&self, key: &str, value: &[u8], expires: Option<DateTime<Utc>>) -> Result<()>;

    /// Removes the entry for `key`. No error if the key does not exist.
    ///
    /// Composite-key-aware backends remove every entry related to the key's
    /// prefix, not just the literal key (see [`RedisCache`]).
    fn delete(&self, key: &str) -> Result<()>;

    /// Releases backend resources.
    ///
    /// Backends whose connections are pooled externally keep this a no-op;
    /// callers must not assume anything was torn down.
    fn close(&self) -> Result<()> {
        Ok(())
    }
}
