// ABOUTME: In-memory cache store over a shared hash map of serialized entries
// ABOUTME: Unbounded, no expiry, unconditional overwrite on save
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use super::CacheStore;
use crate::errors::AppResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory cache store
///
/// Values are held as serialized JSON bytes in an `Arc<RwLock<HashMap>>`
/// so cloned handles share one store. There is no eviction, no TTL, and no
/// background task: entries live for the store's lifetime and every
/// operation runs to completion inline.
#[derive(Clone, Default)]
pub struct MemoryStore {
    store: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Whether the store holds no entries
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl CacheStore for MemoryStore {
    async fn load<T: for<'de> Deserialize<'de>>(&self, key: &str) -> AppResult<Option<T>> {
        let store = self.store.read().await;
        match store.get(key) {
            Some(bytes) => {
                let value: T = serde_json::from_slice(bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn save<T: Serialize + Send + Sync>(&self, key: &str, value: &T) -> AppResult<()> {
        let serialized = serde_json::to_vec(value)?;
        self.store.write().await.insert(key.to_owned(), serialized);
        Ok(())
    }
}
