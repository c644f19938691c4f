// ABOUTME: Narrow capability traits for the underlying database driver
// ABOUTME: Statement and connection seams consumed by the caching proxies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Driver abstraction layer.
//!
//! The caching proxies never subclass a concrete driver; they own exactly
//! one implementation of these narrow traits and delegate through it. An
//! `Err` from any trait method is a transport-level fault and propagates
//! unchanged. A statement-level failure (the driver ran but the statement
//! did not succeed) travels inside [`ExecutionOutcome`] instead, so the two
//! outcomes stay distinguishable to callers.

use crate::errors::AppResult;
use crate::row::Row;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Driver-reported result of executing a statement
///
/// `success` mirrors the driver's success/failure report; `detail` carries
/// any driver-defined scalar (affected-row counts, status words) and is
/// cached and replayed byte-for-byte alongside the rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    /// Whether the driver reported success
    pub success: bool,
    /// Driver-defined scalar attached to the report, if any
    pub detail: Option<Value>,
}

impl ExecutionOutcome {
    /// Successful outcome with no driver detail
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            success: true,
            detail: None,
        }
    }

    /// Failed outcome with no driver detail
    #[must_use]
    pub const fn failed() -> Self {
        Self {
            success: false,
            detail: None,
        }
    }

    /// Attach a driver-defined scalar to the outcome
    #[must_use]
    pub fn with_detail(mut self, detail: Value) -> Self {
        self.detail = Some(detail);
        self
    }
}

/// Capability interface of one underlying prepared statement
///
/// The statement proxy forwards `bind_*` calls transparently so the real
/// statement stays usable on a cache miss, and reaches for `execute` /
/// `fetch_all` / `row_count` only when the cache cannot answer.
#[async_trait]
pub trait StatementDriver: Send + Sync {
    /// Execute the statement with execute-time parameters
    ///
    /// # Errors
    ///
    /// Returns an error only for transport-level faults; statement-level
    /// failure is reported through the returned outcome.
    async fn execute(&mut self, params: &BTreeMap<String, Value>) -> AppResult<ExecutionOutcome>;

    /// Fetch the complete remaining row set in the dual name+position shape
    ///
    /// # Errors
    ///
    /// Returns an error if the driver cannot produce the row set.
    async fn fetch_all(&mut self) -> AppResult<Vec<Row>>;

    /// Fetch a single column value from the next row
    ///
    /// # Errors
    ///
    /// Returns an error if the driver cannot advance its own cursor.
    async fn fetch_column(&mut self, index: u64) -> AppResult<Option<Value>>;

    /// Number of rows reported by the driver for the last executed statement
    ///
    /// # Errors
    ///
    /// Returns an error if the driver cannot report a count.
    async fn row_count(&self) -> AppResult<u64>;

    /// Bind a value to a named parameter
    ///
    /// # Errors
    ///
    /// Returns an error for transport-level faults.
    async fn bind_value(&mut self, identifier: &str, value: &Value) -> AppResult<ExecutionOutcome>;

    /// Bind a parameter (by-reference semantics collapse to a value bind)
    ///
    /// # Errors
    ///
    /// Returns an error for transport-level faults.
    async fn bind_param(&mut self, identifier: &str, value: &Value) -> AppResult<ExecutionOutcome>;

    /// Bind an output column
    ///
    /// # Errors
    ///
    /// Returns an error for transport-level faults.
    async fn bind_column(&mut self, identifier: &str, value: &Value)
        -> AppResult<ExecutionOutcome>;
}

/// Capability interface of one underlying database connection
#[async_trait]
pub trait ConnectionDriver: Send + Sync {
    /// Concrete statement type produced by this connection
    type Statement: StatementDriver;

    /// Prepare a statement without executing it
    ///
    /// # Errors
    ///
    /// Returns the driver's preparation failure unchanged.
    async fn prepare(&self, query: &str) -> AppResult<Self::Statement>;

    /// Prepare and immediately execute an ad-hoc statement
    ///
    /// # Errors
    ///
    /// Returns the driver's failure unchanged.
    async fn query(&self, statement: &str) -> AppResult<Self::Statement>;
}
