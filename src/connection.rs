// ABOUTME: Connection proxy producing cached statements and the ad-hoc query path
// ABOUTME: Prepared statements key by resolved text; ad-hoc queries by literal text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Connection-level caching proxy.
//!
//! [`CachedConnection`] wraps one driver connection and a caller-supplied
//! cache store. `prepare` returns a [`CachedStatement`] that performs its
//! own key resolution at execute time; `query` is the ad-hoc path, keyed by
//! the literal statement text since ad-hoc statements carry no placeholders
//! by convention.

use crate::cache::{CacheEntry, CacheStore, ResultCache};
use crate::driver::{ConnectionDriver, ExecutionOutcome, StatementDriver};
use crate::errors::AppResult;
use crate::key;
use crate::statement::CachedStatement;
use tracing::debug;

/// Caching proxy around one database connection
pub struct CachedConnection<C: ConnectionDriver, S: CacheStore> {
    driver: C,
    cache: ResultCache<S>,
}

impl<C: ConnectionDriver, S: CacheStore> CachedConnection<C, S> {
    /// Wrap a driver connection with a caller-constructed cache store
    ///
    /// The store is injected, never instantiated internally: the physical
    /// backend is an external collaborator of this layer.
    pub const fn new(driver: C, store: S) -> Self {
        Self {
            driver,
            cache: ResultCache::new(store),
        }
    }

    /// Prepare a statement and wrap it in a caching proxy
    ///
    /// Preparation itself has no caching semantics.
    ///
    /// # Errors
    ///
    /// Returns the driver's preparation failure unchanged.
    pub async fn prepare(&self, query: &str) -> AppResult<CachedStatement<C::Statement, S>> {
        let statement = self.driver.prepare(query).await?;
        Ok(CachedStatement::new(
            statement,
            self.cache.clone(),
            query.to_owned(),
        ))
    }

    /// Execute an ad-hoc statement, serving the row set from the cache when
    /// its literal text has been seen before
    ///
    /// Always returns the cached wrapper. On a hit the statement is
    /// prepared on the driver but not executed, and the wrapper is
    /// preloaded with the cached rows and outcome. On a miss the driver
    /// executes, the complete row set is captured and saved, and the same
    /// wrapper is returned.
    ///
    /// # Errors
    ///
    /// Propagates driver faults and cache backend failures.
    pub async fn query(&self, statement: &str) -> AppResult<CachedStatement<C::Statement, S>> {
        let cache_key = key::digest(statement);

        if let Some(entry) = self.cache.load(&cache_key).await? {
            debug!(statement, "serving ad-hoc query from cache");
            let driver_statement = self.driver.prepare(statement).await?;
            let mut wrapped = CachedStatement::new(
                driver_statement,
                self.cache.clone(),
                statement.to_owned(),
            );
            wrapped.install_cached(entry);
            return Ok(wrapped);
        }

        let mut driver_statement = self.driver.query(statement).await?;
        let rows = driver_statement.fetch_all().await?;
        let entry = CacheEntry {
            rows,
            outcome: ExecutionOutcome::ok(),
        };
        self.cache.save(&cache_key, &entry).await?;

        let mut wrapped = CachedStatement::new(
            driver_statement,
            self.cache.clone(),
            statement.to_owned(),
        );
        wrapped.install_cached(entry);
        Ok(wrapped)
    }
}
