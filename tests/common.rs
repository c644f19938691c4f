// ABOUTME: Shared test fixtures: a scripted driver with observable call counters
// ABOUTME: Row builders and store helpers used across integration tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, missing_docs, dead_code)]

use async_trait::async_trait;
use resultset_cache::cache::memory::MemoryStore;
use resultset_cache::driver::{ConnectionDriver, ExecutionOutcome, StatementDriver};
use resultset_cache::errors::AppResult;
use resultset_cache::row::Row;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Shared observers so tests can inspect driver traffic after handing a
/// statement over to the caching proxy
#[derive(Clone, Default)]
pub struct DriverCounters {
    pub prepares: Arc<AtomicUsize>,
    pub queries: Arc<AtomicUsize>,
    pub executes: Arc<AtomicUsize>,
    pub fetch_alls: Arc<AtomicUsize>,
    pub binds: Arc<Mutex<Vec<(String, Value)>>>,
}

impl DriverCounters {
    pub fn prepares(&self) -> usize {
        self.prepares.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn executes(&self) -> usize {
        self.executes.load(Ordering::SeqCst)
    }

    pub fn fetch_alls(&self) -> usize {
        self.fetch_alls.load(Ordering::SeqCst)
    }

    pub fn bound(&self) -> Vec<(String, Value)> {
        self.binds.lock().unwrap().clone()
    }
}

/// Scripted driver statement: serves a fixed row set and execution outcome,
/// counting every call that reaches it
pub struct ScriptedStatement {
    rows: Vec<Row>,
    outcome: ExecutionOutcome,
    driver_row_count: u64,
    column_value: Option<Value>,
    counters: DriverCounters,
}

#[async_trait]
impl StatementDriver for ScriptedStatement {
    async fn execute(&mut self, _params: &BTreeMap<String, Value>) -> AppResult<ExecutionOutcome> {
        self.counters.executes.fetch_add(1, Ordering::SeqCst);
        Ok(self.outcome.clone())
    }

    async fn fetch_all(&mut self) -> AppResult<Vec<Row>> {
        self.counters.fetch_alls.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.clone())
    }

    async fn fetch_column(&mut self, _index: u64) -> AppResult<Option<Value>> {
        Ok(self.column_value.clone())
    }

    async fn row_count(&self) -> AppResult<u64> {
        Ok(self.driver_row_count)
    }

    async fn bind_value(&mut self, identifier: &str, value: &Value) -> AppResult<ExecutionOutcome> {
        self.counters
            .binds
            .lock()
            .unwrap()
            .push((identifier.to_owned(), value.clone()));
        Ok(ExecutionOutcome::ok())
    }

    async fn bind_param(&mut self, identifier: &str, value: &Value) -> AppResult<ExecutionOutcome> {
        self.bind_value(identifier, value).await
    }

    async fn bind_column(
        &mut self,
        identifier: &str,
        value: &Value,
    ) -> AppResult<ExecutionOutcome> {
        self.bind_value(identifier, value).await
    }
}

/// Scripted driver connection producing [`ScriptedStatement`]s that all
/// report to one shared set of counters
#[derive(Clone)]
pub struct ScriptedConnection {
    rows: Vec<Row>,
    outcome: ExecutionOutcome,
    driver_row_count: u64,
    column_value: Option<Value>,
    pub counters: DriverCounters,
}

impl ScriptedConnection {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows,
            outcome: ExecutionOutcome::ok(),
            driver_row_count: 0,
            column_value: None,
            counters: DriverCounters::default(),
        }
    }

    pub fn with_outcome(mut self, outcome: ExecutionOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn with_driver_row_count(mut self, count: u64) -> Self {
        self.driver_row_count = count;
        self
    }

    pub fn with_column_value(mut self, value: Value) -> Self {
        self.column_value = Some(value);
        self
    }

    fn statement(&self) -> ScriptedStatement {
        ScriptedStatement {
            rows: self.rows.clone(),
            outcome: self.outcome.clone(),
            driver_row_count: self.driver_row_count,
            column_value: self.column_value.clone(),
            counters: self.counters.clone(),
        }
    }
}

#[async_trait]
impl ConnectionDriver for ScriptedConnection {
    type Statement = ScriptedStatement;

    async fn prepare(&self, _query: &str) -> AppResult<Self::Statement> {
        self.counters.prepares.fetch_add(1, Ordering::SeqCst);
        Ok(self.statement())
    }

    async fn query(&self, _statement: &str) -> AppResult<Self::Statement> {
        self.counters.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.statement())
    }
}

/// Build one BOTH-shape row from an id and a name
pub fn both_row(id: i64, name: &str) -> Row {
    Row::from_columns([("id", json!(id)), ("name", json!(name))])
}

/// Two-row sample result set used across tests
pub fn sample_rows() -> Vec<Row> {
    vec![both_row(1, "a"), both_row(2, "b")]
}

/// Fresh unbounded in-memory store
pub fn memory_store() -> MemoryStore {
    MemoryStore::new()
}

/// Install a tracing subscriber once so cache hit/miss logs show up under
/// `--nocapture`; later calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
