//! Configuration Module
//!
//! Selects and constructs a cache backend from environment variables. This
//! is the dependency-injection point: consumers build a `Box<dyn Cache>`
//! here once and never branch on the concrete backend afterwards.

use std::env;

use tracing::info;

use crate::cache::{Cache, MemoryCache, RedisCache};
use crate::error::Result;
use crate::key;

// == Backend Selection ==
/// Which backend implementation to construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    /// In-memory guarded mapping; no TTL, no composite-key awareness
    Memory,
    /// Redis instance at the given URL
    Redis { url: String },
}

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Selected backend
    pub backend: Backend,
    /// Composite-key delimiter used by composite-key-aware backends
    pub delimiter: char,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_BACKEND` - `memory` or `redis` (default: memory)
    /// - `REDIS_URL` - Redis connection URL (default: redis://127.0.0.1:6379)
    /// - `CACHE_KEY_DELIMITER` - single delimiter character (default: `;`)
    pub fn from_env() -> Self {
        let backend = match env::var("CACHE_BACKEND").ok().as_deref() {
            Some("redis") => Backend::Redis {
                url: env::var("REDIS_URL")
                    .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            },
            _ => Backend::Memory,
        };

        let delimiter = env::var("CACHE_KEY_DELIMITER")
            .ok()
            .and_then(|v| v.chars().next())
            .unwrap_or(key::DEFAULT_DELIMITER);

        Self { backend, delimiter }
    }

    // == Build ==
    /// Constructs the configured backend.
    ///
    /// Redis construction failures (malformed URL, unreachable store)
    /// surface here as configuration errors rather than on first use.
    pub fn build(&self) -> Result<Box<dyn Cache>> {
        match &self.backend {
            Backend::Memory => {
                info!("using in-memory cache backend");
                Ok(Box::new(MemoryCache::new()))
            }
            Backend::Redis { url } => {
                let cache = RedisCache::connect(url)?.with_delimiter(self.delimiter);
                Ok(Box::new(cache))
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::Memory,
            delimiter: key::DEFAULT_DELIMITER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.backend, Backend::Memory);
        assert_eq!(config.delimiter, ';');
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("CACHE_BACKEND");
        env::remove_var("REDIS_URL");
        env::remove_var("CACHE_KEY_DELIMITER");

        let config = Config::from_env();
        assert_eq!(config.backend, Backend::Memory);
        assert_eq!(config.delimiter, ';');
    }

    #[test]
    fn test_config_build_memory_backend() {
        let cache = Config::default().build().unwrap();

        cache.set("key1", b"value1", None).unwrap();
        assert_eq!(cache.get("key1").unwrap(), Some(b"value1".to_vec()));
    }

    #[test]
    fn test_config_build_rejects_bad_redis_url() {
        let config = Config {
            backend: Backend::Redis {
                url: "not-a-redis-url".to_string(),
            },
            delimiter: ';',
        };

        assert!(config.build().is_err());
    }
}
