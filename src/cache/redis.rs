//! Redis-Backed Backend Module
//!
//! Implements the cache contract on top of a Redis-style key-value client.
//! This is the only backend that interprets composite keys: reads consult
//! both the bare prefix and the full key, writes convert an absolute expiry
//! to a relative TTL, and deletes cascade across every key sharing the
//! prefix.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::cache::Cache;
use crate::error::{CacheError, Result};
use crate::key;

// == Store Client ==
/// Minimal command surface the Redis backend needs from its client.
///
/// Implemented for [`redis::Connection`]; in-memory doubles implement it for
/// tests. Transient store failures propagate unchanged through every method.
pub trait StoreClient: Send {
    /// Fetches several keys at once; an absent key yields `None` at the same
    /// position in the returned list.
    fn mget(&mut self, keys: &[&str]) -> Result<Vec<Option<Vec<u8>>>>;

    /// Stores `value` under `key` with no expiration.
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;

    /// Stores `value` under `key`, expiring after `ttl_seconds`.
    fn set_with_ttl(&mut self, key: &str, ttl_seconds: u64, value: &[u8]) -> Result<()>;

    /// Lists every key matching the glob-style `pattern`.
    fn keys(&mut self, pattern: &str) -> Result<Vec<String>>;

    /// Removes `key`; absent keys are a silent no-op.
    fn del(&mut self, key: &str) -> Result<()>;
}

impl StoreClient for redis::Connection {
    fn mget(&mut self, keys: &[&str]) -> Result<Vec<Option<Vec<u8>>>> {
        // Explicit MGET keeps the reply an array even for a single key
        Ok(redis::cmd("MGET").arg(keys).query(self)?)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        redis::cmd("SET").arg(key).arg(value).query::<()>(self)?;
        Ok(())
    }

    fn set_with_ttl(&mut self, key: &str, ttl_seconds: u64, value: &[u8]) -> Result<()> {
        redis::cmd("SETEX")
            .arg(key)
            .arg(ttl_seconds)
            .arg(value)
            .query::<()>(self)?;
        Ok(())
    }

    fn keys(&mut self, pattern: &str) -> Result<Vec<String>> {
        Ok(redis::cmd("KEYS").arg(pattern).query(self)?)
    }

    fn del(&mut self, key: &str) -> Result<()> {
        redis::cmd("DEL").arg(key).query::<()>(self)?;
        Ok(())
    }
}

// == Redis Cache ==
/// Redis-backed cache with composite-key semantics.
///
/// A bare key (`prefix`) holds the public entry for a resource; a scoped key
/// (`prefix` + delimiter + `suffix`) holds a variant entry. `get` prefers
/// the public entry, `delete` invalidates the whole family.
pub struct RedisCache<C: StoreClient = redis::Connection> {
    /// The backing store client; serialized because the sync client needs
    /// exclusive access per command
    conn: Mutex<C>,
    /// Delimiter separating prefix and suffix in composite keys
    delimiter: char,
}

impl RedisCache<redis::Connection> {
    // == Connect ==
    /// Connects to the Redis instance at `url`.
    ///
    /// A malformed URL or unreachable store fails here, at construction
    /// time, so misconfiguration never masquerades as a cache miss later.
    pub fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| CacheError::Config(format!("invalid redis url {url:?}: {e}")))?;
        let conn = client
            .get_connection()
            .map_err(|e| CacheError::Config(format!("cannot reach redis at {url:?}: {e}")))?;

        info!(url, "connected to redis backend");
        Ok(Self::new(conn))
    }
}

impl<C: StoreClient> RedisCache<C> {
    // == Constructor ==
    /// Wraps an already-constructed store client, using the default key
    /// delimiter.
    pub fn new(conn: C) -> Self {
        Self {
            conn: Mutex::new(conn),
            delimiter: key::DEFAULT_DELIMITER,
        }
    }

    /// Replaces the key delimiter. The delimiter is part of the stored key
    /// format, so every process reading the same store must agree on it.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    // == Keys ==
    /// Lists every key in the store matching the glob-style `pattern`.
    pub fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        self.lock().keys(pattern)
    }

    // == Clear ==
    /// Deletes every key in the store. Maintenance/test helper - never
    /// invoked implicitly by normal cache operations. Use with caution!
    pub fn clear(&self) -> Result<()> {
        self.clear_matching("*")
    }

    /// Deletes every key matching the glob-style `pattern`.
    pub fn clear_matching(&self, pattern: &str) -> Result<()> {
        let mut conn = self.lock();
        // Scan then delete: two separate store operations, not a
        // transaction. A concurrent set racing the scan can survive; a cache
        // tolerates that staleness.
        let keys = conn.keys(pattern)?;
        debug!(pattern, count = keys.len(), "bulk delete");
        for key in &keys {
            conn.del(key)?;
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, C> {
        // A poisoned lock means a caller thread panicked mid-command; the
        // next command either works or surfaces a store error of its own.
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// == Cache Implementation ==
impl<C: StoreClient> Cache for RedisCache<C> {
    /// Fetches `key`, letting the bare-prefix entry shadow the scoped one.
    ///
    /// A key may be of the form `foo;bar` (with `;` the default delimiter).
    /// The read issues `MGET foo foo;bar` and returns the first present
    /// value in that order: a refreshed public entry wins over a stale
    /// scoped entry, while the scoped path still resolves when no public
    /// entry exists. Presence is decided by the store's missing sentinel,
    /// never by value content - stored empty bytes count as present.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let (prefix, _) = key::decompose_with(key, self.delimiter);

        let mut values = self.lock().mget(&[prefix, key])?.into_iter();
        let public = values.next().flatten();
        let scoped = values.next().flatten();

        let value = public.or(scoped);
        debug!(key, hit = value.is_some(), "get");
        Ok(value)
    }

    /// Stores `value` under `key`, converting an absolute expiry instant to
    /// a relative TTL in whole seconds, clamped at zero so the store never
    /// sees a negative or fractional TTL.
    fn set(&self, key: &str, value: &[u8], expires: Option<DateTime<Utc>>) -> Result<()> {
        let mut conn = self.lock();
        match expires {
            None => conn.set(key, value),
            Some(expires) => {
                let ttl_seconds = (expires - Utc::now()).num_seconds().max(0) as u64;
                debug!(key, ttl_seconds, "set with ttl");
                conn.set_with_ttl(key, ttl_seconds, value)
            }
        }
    }

    /// Removes every key sharing the prefix of `key`.
    ///
    /// Deleting means invalidating the whole logical resource family:
    /// deleting the bare key removes all scoped siblings, and deleting any
    /// scoped key removes the bare key too. Implemented as a `prefix*`
    /// pattern scan followed by per-key deletes (see [`clear_matching`] for
    /// the documented scan/delete race).
    ///
    /// [`clear_matching`]: RedisCache::clear_matching
    fn delete(&self, key: &str) -> Result<()> {
        let (prefix, _) = key::decompose_with(key, self.delimiter);
        self.clear_matching(&format!("{prefix}*"))
    }

    /// Redis connections are pooled by the client, so there is nothing to
    /// release here; documented no-op.
    fn close(&self) -> Result<()> {
        Ok(())
    }
}
