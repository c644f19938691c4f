// ABOUTME: Redis cache store with connection pooling via ConnectionManager
// ABOUTME: Prefix-namespaced GET/SET of JSON payloads, no TTL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use super::{CacheStore, StoreConfig};
use crate::errors::{AppError, AppResult};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Redis cache store
///
/// Uses the redis `ConnectionManager` for automatic reconnection. All keys
/// are namespaced under the configured prefix. Entries are written without
/// expiration: the no-TTL contract of the result cache applies to this
/// backend as well, so entries live until the Redis instance drops them.
#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
    key_prefix: String,
}

impl RedisStore {
    /// Connect a new Redis store
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when no Redis URL is configured and a
    /// `CacheBackendError` when the connection cannot be established.
    pub async fn new(config: &StoreConfig) -> AppResult<Self> {
        let redis_url = config
            .redis_url
            .as_ref()
            .ok_or_else(|| AppError::config("Redis URL is required for the Redis store backend"))?;

        info!("Connecting to Redis at {redis_url}");

        let client = redis::Client::open(redis_url.as_str())
            .map_err(|e| AppError::cache_backend(format!("Failed to create Redis client: {e}")))?;

        let manager = client.get_connection_manager().await.map_err(|e| {
            AppError::cache_backend(format!("Failed to connect to Redis: {e}"))
        })?;

        info!("Successfully connected to Redis");

        Ok(Self {
            manager,
            key_prefix: config.key_prefix.clone(),
        })
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}:{key}", self.key_prefix)
    }
}

#[async_trait::async_trait]
impl CacheStore for RedisStore {
    async fn load<T: for<'de> Deserialize<'de>>(&self, key: &str) -> AppResult<Option<T>> {
        let mut conn = self.manager.clone();
        let payload: Option<Vec<u8>> = conn
            .get(self.namespaced(key))
            .await
            .map_err(|e| AppError::cache_backend(format!("Redis GET failed: {e}")))?;

        match payload {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn save<T: Serialize + Send + Sync>(&self, key: &str, value: &T) -> AppResult<()> {
        let payload = serde_json::to_vec(value)?;
        let mut conn = self.manager.clone();
        let () = conn
            .set(self.namespaced(key), payload)
            .await
            .map_err(|e| AppError::cache_backend(format!("Redis SET failed: {e}")))?;
        Ok(())
    }
}
