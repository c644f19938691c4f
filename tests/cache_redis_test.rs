// ABOUTME: Integration tests for the Redis cache store (CI-only)
// ABOUTME: Runs against a real Redis instance; skipped when REDIS_URL is unset
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, missing_docs)]

mod common;

use anyhow::Result;
use common::sample_rows;
use resultset_cache::cache::factory::Store;
use resultset_cache::cache::{CacheEntry, CacheStore, StoreConfig};
use resultset_cache::driver::ExecutionOutcome;
use resultset_cache::key::digest;

/// Helper: Create a Redis-backed store from the `REDIS_URL` environment
/// variable. Returns None if `REDIS_URL` is not set (allows skipping tests
/// in non-Redis environments)
async fn create_redis_store() -> Result<Option<Store>> {
    let Ok(redis_url) = std::env::var("REDIS_URL") else {
        println!("REDIS_URL not set, skipping Redis store tests");
        return Ok(None);
    };

    let config = StoreConfig {
        redis_url: Some(redis_url),
        key_prefix: "resultset_cache_test".to_owned(),
    };
    Ok(Some(Store::new(config).await?))
}

/// Helper macro to skip test if Redis is not available
macro_rules! require_redis {
    ($store:expr) => {
        match $store {
            Some(store) => store,
            None => {
                println!("Skipping test: Redis not available");
                return Ok(());
            }
        }
    };
}

#[tokio::test]
async fn redis_store_round_trips_entries() -> Result<()> {
    let store = require_redis!(create_redis_store().await?);
    let key = digest("SELECT * FROM redis_round_trip");
    let entry = CacheEntry {
        rows: sample_rows(),
        outcome: ExecutionOutcome::ok(),
    };

    store.save(&key, &entry).await?;
    let loaded: Option<CacheEntry> = store.load(&key).await?;
    assert_eq!(loaded, Some(entry));
    Ok(())
}

#[tokio::test]
async fn redis_store_overwrites_wholesale() -> Result<()> {
    let store = require_redis!(create_redis_store().await?);
    let key = digest("SELECT * FROM redis_overwrite");

    let first = CacheEntry {
        rows: sample_rows(),
        outcome: ExecutionOutcome::ok(),
    };
    let second = CacheEntry {
        rows: Vec::new(),
        outcome: ExecutionOutcome::failed(),
    };

    store.save(&key, &first).await?;
    store.save(&key, &second).await?;

    let loaded: Option<CacheEntry> = store.load(&key).await?;
    assert_eq!(loaded, Some(second));
    Ok(())
}

#[tokio::test]
async fn redis_store_reports_absent_keys() -> Result<()> {
    let store = require_redis!(create_redis_store().await?);
    let key = digest("SELECT * FROM never_written");

    let loaded: Option<CacheEntry> = store.load(&key).await?;
    assert_eq!(loaded, None);
    Ok(())
}

#[tokio::test]
async fn backend_info_reports_redis() -> Result<()> {
    let store = require_redis!(create_redis_store().await?);
    assert_eq!(store.backend_info(), "Redis (shared)");
    Ok(())
}
