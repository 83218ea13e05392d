//! In-Memory Backend Module
//!
//! A concurrency-safe guarded mapping implementing the cache contract
//! directly. Keys are opaque strings to this backend: no prefix/suffix
//! awareness and no TTL support. It exists to validate the contract in
//! isolation and as a low-dependency default.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::cache::Cache;
use crate::error::Result;

// == Memory Cache ==
/// In-memory cache backend backed by an instance-owned guarded mapping.
///
/// Each instance is independently constructible and disposable; there is no
/// process-wide state. Writers serialize on the lock, readers take the
/// shared lock and clone the payload (values are immutable once written).
#[derive(Debug, Default)]
pub struct MemoryCache {
    /// Key-value storage
    data: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryCache {
    // == Constructors ==
    /// Creates an empty in-memory cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an in-memory cache pre-populated with `entries`.
    pub fn with_entries(entries: HashMap<String, Vec<u8>>) -> Self {
        Self {
            data: RwLock::new(entries),
        }
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A poisoned lock only means another thread panicked mid-operation; the
    // map itself stays valid for our insert/remove/get usage, so recover.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Vec<u8>>> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Vec<u8>>> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }
}

// == Cache Implementation ==
impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.read().get(key).cloned())
    }

    /// Stores `value` under `key`. This backend has no TTL support, so
    /// `expires` is ignored.
    fn set(&self, key: &str, value: &[u8], expires: Option<DateTime<Utc>>) -> Result<()> {
        if expires.is_some() {
            debug!(key, "memory backend ignores expiration");
        }
        self.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.write().remove(key);
        Ok(())
    }
}
