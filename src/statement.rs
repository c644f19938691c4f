// ABOUTME: Statement proxy owning bound parameters, cached rows, and the fetch cursor
// ABOUTME: Serves execute/fetch/fetchAll/rowCount from the cache or the real driver
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Statement-level caching proxy.
//!
//! [`CachedStatement`] wraps exactly one driver statement. Bind calls are
//! recorded locally and forwarded unchanged so the real statement stays
//! usable on a miss. `execute` resolves the template against the recorded
//! parameters, digests it into a cache key, and either replays the cached
//! entry or delegates, captures the full row set, and saves it. All
//! subsequent single-row and whole-set fetches are served from the
//! in-memory row set without touching the driver.
//!
//! A statement instance is not meant for concurrent use: parameters and the
//! cursor mutate in place, and callers must serialize access themselves.

use crate::cache::{CacheEntry, CacheStore, ResultCache};
use crate::driver::{ExecutionOutcome, StatementDriver};
use crate::errors::{AppError, AppResult};
use crate::fetch::{self, CursorOrientation, FetchStyle};
use crate::key;
use crate::row::Row;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Caching proxy around one prepared statement
pub struct CachedStatement<D: StatementDriver, S: CacheStore> {
    driver: D,
    cache: ResultCache<S>,
    template: String,
    params: BTreeMap<String, Value>,
    rows: Option<Vec<Row>>,
    cursor: usize,
    last_outcome: Option<ExecutionOutcome>,
}

impl<D: StatementDriver, S: CacheStore> CachedStatement<D, S> {
    /// Wrap a freshly prepared driver statement
    pub(crate) fn new(driver: D, cache: ResultCache<S>, template: String) -> Self {
        Self {
            driver,
            cache,
            template,
            params: BTreeMap::new(),
            rows: None,
            cursor: 0,
            last_outcome: None,
        }
    }

    /// Install a previously cached entry, as used by the ad-hoc query path
    pub(crate) fn install_cached(&mut self, entry: CacheEntry) {
        self.rows = Some(entry.rows);
        self.cursor = 0;
        self.last_outcome = Some(entry.outcome);
    }

    /// The immutable query template this statement was prepared from
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Current cursor offset into the cached row set
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Outcome returned by the most recent execute, if any
    #[must_use]
    pub fn last_outcome(&self) -> Option<&ExecutionOutcome> {
        self.last_outcome.as_ref()
    }

    /// Bind a value to a named parameter and forward the bind to the driver
    ///
    /// Only the local parameter map and the real statement are touched; no
    /// caching decision happens here.
    ///
    /// # Errors
    ///
    /// Propagates transport-level driver faults.
    pub async fn bind_value(
        &mut self,
        identifier: &str,
        value: Value,
    ) -> AppResult<ExecutionOutcome> {
        self.params
            .insert(key::normalize_identifier(identifier), value.clone());
        self.driver.bind_value(identifier, &value).await
    }

    /// Bind a parameter; recorded identically to [`bind_value`](Self::bind_value)
    ///
    /// # Errors
    ///
    /// Propagates transport-level driver faults.
    pub async fn bind_param(
        &mut self,
        identifier: &str,
        value: Value,
    ) -> AppResult<ExecutionOutcome> {
        self.params
            .insert(key::normalize_identifier(identifier), value.clone());
        self.driver.bind_param(identifier, &value).await
    }

    /// Bind an output column and forward the bind to the driver
    ///
    /// # Errors
    ///
    /// Propagates transport-level driver faults.
    pub async fn bind_column(
        &mut self,
        identifier: &str,
        value: Value,
    ) -> AppResult<ExecutionOutcome> {
        self.params
            .insert(key::normalize_identifier(identifier), value.clone());
        self.driver.bind_column(identifier, &value).await
    }

    /// Execute the statement, serving from the cache when possible
    ///
    /// Execute-time parameters are merged over previously bound ones
    /// (execute-time values win on shared identifiers, earlier binds are
    /// kept otherwise). On a hit the real statement is not touched. On a
    /// miss the driver executes; a statement-level failure is returned
    /// verbatim and nothing is cached. The entry is saved only after the
    /// complete row set has been fetched from the driver.
    ///
    /// # Errors
    ///
    /// Propagates driver transport faults and cache backend failures.
    pub async fn execute(
        &mut self,
        extra_params: &BTreeMap<String, Value>,
    ) -> AppResult<ExecutionOutcome> {
        for (identifier, value) in extra_params {
            self.params
                .insert(key::normalize_identifier(identifier), value.clone());
        }

        let resolved = key::resolve(&self.template, &self.params);
        let cache_key = key::digest(&resolved);

        if let Some(entry) = self.cache.load(&cache_key).await? {
            debug!(template = %self.template, "serving execute from cache");
            let outcome = entry.outcome.clone();
            self.install_cached(entry);
            return Ok(outcome);
        }

        let outcome = self.driver.execute(extra_params).await?;
        if !outcome.success {
            // Nothing is cached for a failed execute; rows and cursor keep
            // their prior state so a later identical execute retries the
            // driver instead of replaying a failure.
            return Ok(outcome);
        }

        let rows = self.driver.fetch_all().await?;
        self.rows = Some(rows.clone());
        self.cursor = 0;
        self.last_outcome = Some(outcome.clone());

        let entry = CacheEntry {
            rows,
            outcome: outcome.clone(),
        };
        self.cache.save(&cache_key, &entry).await?;
        Ok(outcome)
    }

    /// Fetch a single row at the cursor in the requested shape
    ///
    /// Returns `None` at the end of the cached set without advancing the
    /// cursor; a statement that never executed behaves as an empty set.
    ///
    /// # Errors
    ///
    /// Rejects any orientation other than `Next`, any nonzero offset, and
    /// any unsupported fetch style, before the cursor is touched.
    pub fn fetch(
        &mut self,
        style: FetchStyle,
        orientation: CursorOrientation,
        offset: i64,
    ) -> AppResult<Option<Row>> {
        if orientation != CursorOrientation::Next {
            return Err(AppError::unsupported_option(format!(
                "cursor orientation {orientation:?} is not supported"
            )));
        }
        if offset != 0 {
            return Err(AppError::unsupported_option(format!(
                "nonzero cursor offset {offset} is not supported"
            )));
        }
        fetch::ensure_style_supported(style)?;

        let Some(rows) = self.rows.as_ref() else {
            return Ok(None);
        };
        if self.cursor >= rows.len() {
            return Ok(None);
        }
        let projected = fetch::project_row(&rows[self.cursor], style)?;
        self.cursor += 1;
        Ok(Some(projected))
    }

    /// Fetch the entire cached row set in the requested shape
    ///
    /// The cursor does not move.
    ///
    /// # Errors
    ///
    /// Rejects a present fetch argument, non-empty constructor args, and
    /// any unsupported fetch style.
    pub fn fetch_all(
        &self,
        style: FetchStyle,
        fetch_argument: Option<&Value>,
        ctor_args: &[Value],
    ) -> AppResult<Vec<Row>> {
        if fetch_argument.is_some() {
            return Err(AppError::unsupported_option(
                "fetchAll fetch arguments are not supported",
            ));
        }
        if !ctor_args.is_empty() {
            return Err(AppError::unsupported_option(
                "fetchAll constructor arguments are not supported",
            ));
        }
        let rows = self.rows.as_deref().unwrap_or(&[]);
        fetch::project_rows(rows, style)
    }

    /// Fetch a single column value directly from the driver
    ///
    /// Deliberately not served from the cache.
    ///
    /// # Errors
    ///
    /// Propagates driver faults.
    pub async fn fetch_column(&mut self, index: u64) -> AppResult<Option<Value>> {
        self.driver.fetch_column(index).await
    }

    /// Number of rows in the cached result set
    ///
    /// A statement that has executed answers from its cached rows,
    /// including an honest zero for an empty result. Only a statement that
    /// never executed delegates to the driver's own count.
    ///
    /// # Errors
    ///
    /// Propagates driver faults on the delegated path.
    pub async fn row_count(&self) -> AppResult<u64> {
        match self.rows.as_ref() {
            Some(rows) => Ok(rows.len() as u64),
            None => self.driver.row_count().await,
        }
    }
}
