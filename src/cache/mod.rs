// ABOUTME: Cache abstraction layer for result-set caching with pluggable backends
// ABOUTME: Store trait, cached-entry model, and the keyed ResultCache facade
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

/// Cache store factory for backend selection
pub mod factory;
/// In-memory store implementation
pub mod memory;
/// Redis store implementation
pub mod redis;

use crate::driver::ExecutionOutcome;
use crate::errors::AppResult;
use crate::row::Row;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default namespace prefix for physical cache keys
pub const DEFAULT_KEY_PREFIX: &str = "resultset_cache";

/// Physical cache backend trait for pluggable store implementations
///
/// The contract is deliberately thin: `load` and `save`, keyed by opaque
/// strings, unconditional overwrite, no merge, no expiry, no size bound.
/// Entries live for the backend's lifetime. A failing backend is surfaced
/// to the caller as a `CacheBackendError` and never retried here.
#[async_trait::async_trait]
pub trait CacheStore: Send + Sync + Clone {
    /// Retrieve a value from the store
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or deserialization fails.
    async fn load<T: for<'de> Deserialize<'de>>(&self, key: &str) -> AppResult<Option<T>>;

    /// Store a value, overwriting any existing entry wholesale
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend fails.
    async fn save<T: Serialize + Send + Sync>(&self, key: &str, value: &T) -> AppResult<()>;
}

/// Store backend configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Redis connection URL; `None` selects the in-memory backend
    pub redis_url: Option<String>,
    /// Namespace prefix applied to every physical key
    pub key_prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            redis_url: None,
            key_prefix: DEFAULT_KEY_PREFIX.to_owned(),
        }
    }
}

/// One cached result set: the full row set plus the original execution
/// outcome, replayed verbatim on every subsequent hit
///
/// Written once per miss, never mutated, overwritten wholesale on re-save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Complete row set captured from the real statement
    pub rows: Vec<Row>,
    /// Driver execution report captured alongside the rows
    pub outcome: ExecutionOutcome,
}

/// Thin keyed facade over a [`CacheStore`], typed to [`CacheEntry`]
///
/// Used by both the connection-level and statement-level caching paths.
#[derive(Clone)]
pub struct ResultCache<S: CacheStore> {
    store: S,
}

impl<S: CacheStore> ResultCache<S> {
    /// Wrap a caller-constructed store
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the entry stored under `key`, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub async fn load(&self, key: &str) -> AppResult<Option<CacheEntry>> {
        let entry = self.store.load::<CacheEntry>(key).await?;
        match &entry {
            Some(found) => debug!(key, rows = found.rows.len(), "result cache hit"),
            None => debug!(key, "result cache miss"),
        }
        Ok(entry)
    }

    /// Save `entry` under `key`, replacing any previous entry
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub async fn save(&self, key: &str, entry: &CacheEntry) -> AppResult<()> {
        self.store.save(key, entry).await?;
        debug!(key, rows = entry.rows.len(), "result cache entry saved");
        Ok(())
    }
}
