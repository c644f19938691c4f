// ABOUTME: Dual-keyed row model where each value is reachable by name and position
// ABOUTME: Single ordered association list; ASSOC/NUM views are filters over it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Row representation for cached result sets.
//!
//! A [`Row`] is one ordered sequence of `(selector, value)` pairs. In the
//! canonical BOTH shape every logical column contributes two adjacent pairs:
//! one keyed by column name, one keyed by zero-based position, both mapping
//! to the same value. Name-only and position-only views are derived by
//! filtering this sequence down to one selector kind (see [`crate::fetch`]).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a value inside a row is addressed
///
/// Serialized untagged so cached rows round-trip through JSON: a string
/// selector is a column name, a number is a zero-based position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnSelector {
    /// Zero-based column position
    Index(u64),
    /// Column name
    Name(String),
}

/// One result row as an ordered association list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pairs: Vec<(ColumnSelector, Value)>,
}

impl Row {
    /// Create an empty row
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Build a row in the canonical BOTH shape from named column values
    #[must_use]
    pub fn from_columns<I, N>(columns: I) -> Self
    where
        I: IntoIterator<Item = (N, Value)>,
        N: Into<String>,
    {
        let mut row = Self::new();
        for (name, value) in columns {
            row.push_column(name, value);
        }
        row
    }

    /// Append one logical column: a Name pair immediately followed by an
    /// Index pair carrying the same value
    pub fn push_column(&mut self, name: impl Into<String>, value: Value) {
        let index = self.column_count() as u64;
        self.pairs
            .push((ColumnSelector::Name(name.into()), value.clone()));
        self.pairs.push((ColumnSelector::Index(index), value));
    }

    /// Construct a row directly from selector/value pairs
    ///
    /// Used by the fetch projections; no dual-shape invariant is enforced.
    #[must_use]
    pub fn from_pairs(pairs: Vec<(ColumnSelector, Value)>) -> Self {
        Self { pairs }
    }

    /// The underlying ordered selector/value pairs
    #[must_use]
    pub fn pairs(&self) -> &[(ColumnSelector, Value)] {
        &self.pairs
    }

    /// Number of selector/value pairs (a BOTH row has two per column)
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the row holds no pairs
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of logical columns (pairs with a positional selector)
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.pairs
            .iter()
            .filter(|(selector, _)| matches!(selector, ColumnSelector::Index(_)))
            .count()
    }

    /// Look up a value by column name
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&Value> {
        self.pairs.iter().find_map(|(selector, value)| match selector {
            ColumnSelector::Name(n) if n == name => Some(value),
            _ => None,
        })
    }

    /// Look up a value by zero-based position
    #[must_use]
    pub fn get_by_index(&self, index: u64) -> Option<&Value> {
        self.pairs.iter().find_map(|(selector, value)| match selector {
            ColumnSelector::Index(i) if *i == index => Some(value),
            _ => None,
        })
    }
}
