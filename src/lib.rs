// ABOUTME: Library entry point for the transparent result-set caching layer
// ABOUTME: Wires the key builder, row model, cache stores, and caching proxies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # resultset-cache
//!
//! A transparent caching layer placed in front of a prepared-statement
//! database interface. Statement preparation, parameter binding, execution,
//! and result retrieval are intercepted; statements whose fully resolved
//! query text has been seen before are served from a cached row set,
//! bypassing the database round trip entirely.
//!
//! ## Architecture
//!
//! - **[`key`]**: deterministic cache-key construction: placeholder
//!   substitution plus a SHA-256 digest of the resolved text
//! - **[`row`] / [`fetch`]**: the dual name+position row model and the
//!   BOTH/ASSOC/NUM shape projections over it
//! - **[`cache`]**: the pluggable physical store (in-memory or Redis) and
//!   the keyed `ResultCache` facade
//! - **[`driver`]**: narrow capability traits for the underlying driver;
//!   the proxies compose against these, never against a concrete driver
//! - **[`statement`] / [`connection`]**: the caching proxies themselves
//!
//! ## Example
//!
//! ```rust,no_run
//! use resultset_cache::cache::factory::Store;
//! use resultset_cache::cache::StoreConfig;
//! use resultset_cache::connection::CachedConnection;
//! use resultset_cache::fetch::{CursorOrientation, FetchStyle};
//! use std::collections::BTreeMap;
//! # use resultset_cache::driver::ConnectionDriver;
//! # async fn example<C: ConnectionDriver>(db: C) -> resultset_cache::errors::AppResult<()> {
//!
//! // The store is constructed by the caller and injected.
//! let store = Store::new(StoreConfig::default()).await?;
//! let conn = CachedConnection::new(db, store);
//!
//! let mut stmt = conn.prepare("SELECT * FROM users WHERE id = :id").await?;
//! stmt.bind_value("id", serde_json::json!(42)).await?;
//! stmt.execute(&BTreeMap::new()).await?;
//!
//! while let Some(row) = stmt.fetch(FetchStyle::Assoc, CursorOrientation::Next, 0)? {
//!     println!("{row:?}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Caching model
//!
//! Cache keys are digests of resolved query text only: no semantic
//! equivalence, no whitespace normalization, no invalidation, no expiry.
//! Entries are written whole after a successful execute-and-fetch and
//! overwritten whole on re-save. Failed executions are never cached.

/// Cache store abstraction, entry model, and pluggable backends
pub mod cache;

/// Connection-level caching proxy
pub mod connection;

/// Narrow capability traits for the underlying database driver
pub mod driver;

/// Unified error handling
pub mod errors;

/// Fetch styles and row-shape projections
pub mod fetch;

/// Deterministic cache-key construction
pub mod key;

/// Dual-keyed row model
pub mod row;

/// Statement-level caching proxy
pub mod statement;
