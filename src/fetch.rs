// ABOUTME: Fetch styles, cursor orientations, and pure row-shape projections
// ABOUTME: BOTH/ASSOC/NUM are filters over the dual-keyed row; other styles reject
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Fetch-shape conversion.
//!
//! The cached row set is stored in the BOTH shape. Projections here derive
//! the requested shape as pure filters over that single source of truth.
//! Unsupported options are rejected with an
//! [`ErrorCode::UnsupportedOption`](crate::errors::ErrorCode) error before
//! any partial result is produced, so callers can pattern-match the outcome
//! instead of catching.

use crate::errors::{AppError, AppResult};
use crate::row::{ColumnSelector, Row};
use serde::{Deserialize, Serialize};

/// Shape in which a result row is returned to the caller
///
/// Only [`Both`](Self::Both), [`Assoc`](Self::Assoc) and [`Num`](Self::Num)
/// are served from the cache; the remaining recognized styles always reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FetchStyle {
    /// Dual name+position shape (default)
    #[default]
    Both,
    /// Name-only shape
    Assoc,
    /// Position-only shape
    Num,
    /// Single-column fetch (not served from cache)
    Column,
    /// Object-mapping fetch (not served from cache)
    Object,
    /// Key/value-pair fetch (not served from cache)
    KeyPair,
}

/// Direction of movement for a single-row fetch relative to the cursor
///
/// Only [`Next`](Self::Next) is supported by the fetch emulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorOrientation {
    /// Advance to the next row (default)
    #[default]
    Next,
    /// Move to the previous row
    Prior,
    /// Move to the first row
    First,
    /// Move to the last row
    Last,
    /// Move to an absolute offset
    Absolute,
    /// Move by a relative offset
    Relative,
}

/// Reject any fetch style the cached-row projection cannot serve
///
/// # Errors
///
/// Returns an `UnsupportedOption` error for any style other than
/// `Both`, `Assoc`, or `Num`.
pub fn ensure_style_supported(style: FetchStyle) -> AppResult<()> {
    match style {
        FetchStyle::Both | FetchStyle::Assoc | FetchStyle::Num => Ok(()),
        other => Err(AppError::unsupported_option(format!(
            "fetch style {other:?} is not supported by the result cache"
        ))),
    }
}

/// Project one cached row into the requested shape
///
/// BOTH returns the row unchanged; ASSOC keeps only name-selected pairs;
/// NUM keeps only position-selected pairs.
///
/// # Errors
///
/// Returns an `UnsupportedOption` error for any other style; no partial
/// result is produced.
pub fn project_row(row: &Row, style: FetchStyle) -> AppResult<Row> {
    match style {
        FetchStyle::Both => Ok(row.clone()),
        FetchStyle::Assoc => Ok(filter_pairs(row, |selector| {
            matches!(selector, ColumnSelector::Name(_))
        })),
        FetchStyle::Num => Ok(filter_pairs(row, |selector| {
            matches!(selector, ColumnSelector::Index(_))
        })),
        other => Err(AppError::unsupported_option(format!(
            "fetch style {other:?} is not supported by the result cache"
        ))),
    }
}

/// Project a full cached row set into the requested shape
///
/// # Errors
///
/// Returns an `UnsupportedOption` error for styles other than
/// `Both`/`Assoc`/`Num`.
pub fn project_rows(rows: &[Row], style: FetchStyle) -> AppResult<Vec<Row>> {
    ensure_style_supported(style)?;
    rows.iter().map(|row| project_row(row, style)).collect()
}

fn filter_pairs(row: &Row, keep: impl Fn(&ColumnSelector) -> bool) -> Row {
    Row::from_pairs(
        row.pairs()
            .iter()
            .filter(|(selector, _)| keep(selector))
            .cloned()
            .collect(),
    )
}
