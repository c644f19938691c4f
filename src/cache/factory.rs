// ABOUTME: Cache store factory for environment-based backend selection
// ABOUTME: Enum dispatch between the in-memory and Redis backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Store factory.
//!
//! The physical backend is always constructed here, by the caller, and
//! passed into the proxies; the caching layer never instantiates a backend
//! internally. Backend selection follows the configured URL: a Redis URL
//! selects the Redis store, otherwise the in-memory store is used.

use super::{memory::MemoryStore, redis::RedisStore, CacheStore, StoreConfig};
use crate::errors::AppResult;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Environment variable selecting the Redis backend
pub const ENV_REDIS_URL: &str = "RESULT_CACHE_REDIS_URL";
/// Environment variable overriding the physical key prefix
pub const ENV_KEY_PREFIX: &str = "RESULT_CACHE_KEY_PREFIX";

/// Store instance wrapper that delegates to the selected backend
#[derive(Clone)]
pub enum Store {
    /// Unbounded in-process store
    Memory(MemoryStore),
    /// Shared Redis-backed store
    Redis(RedisStore),
}

impl Store {
    /// Get a descriptive string for the current store backend
    #[must_use]
    pub const fn backend_info(&self) -> &'static str {
        match self {
            Self::Memory(_) => "in-memory (process-local)",
            Self::Redis(_) => "Redis (shared)",
        }
    }

    /// Create a new store instance based on the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the Redis backend is selected and the connection
    /// cannot be established.
    pub async fn new(config: StoreConfig) -> AppResult<Self> {
        let store = if config.redis_url.is_some() {
            Self::Redis(RedisStore::new(&config).await?)
        } else {
            Self::Memory(MemoryStore::new())
        };
        info!("Initialized result cache store: {}", store.backend_info());
        Ok(store)
    }

    /// Create a store from environment variables
    ///
    /// Reads `RESULT_CACHE_REDIS_URL` (backend selection) and
    /// `RESULT_CACHE_KEY_PREFIX` (namespace override).
    ///
    /// # Errors
    ///
    /// Returns an error if store initialization fails.
    pub async fn from_env() -> AppResult<Self> {
        let config = StoreConfig {
            redis_url: std::env::var(ENV_REDIS_URL).ok(),
            key_prefix: std::env::var(ENV_KEY_PREFIX)
                .unwrap_or_else(|_| super::DEFAULT_KEY_PREFIX.to_owned()),
        };
        Self::new(config).await
    }
}

#[async_trait::async_trait]
impl CacheStore for Store {
    async fn load<T: for<'de> Deserialize<'de>>(&self, key: &str) -> AppResult<Option<T>> {
        match self {
            Self::Memory(store) => store.load(key).await,
            Self::Redis(store) => store.load(key).await,
        }
    }

    async fn save<T: Serialize + Send + Sync>(&self, key: &str, value: &T) -> AppResult<()> {
        match self {
            Self::Memory(store) => store.save(key, value).await,
            Self::Redis(store) => store.save(key, value).await,
        }
    }
}
