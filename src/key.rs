// ABOUTME: Deterministic cache-key construction from a query template and bound values
// ABOUTME: Textual placeholder substitution followed by a SHA-256 digest
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Cache-key construction.
//!
//! A statement's cache key is the hex-encoded SHA-256 digest of its
//! *resolved* query text: the template with every `:name` placeholder
//! textually replaced by the bound value's literal form. Resolution is the
//! sole basis for cache hits: no semantic equivalence, no whitespace
//! normalization.

use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Placeholder marker prefixing named parameters in query templates
pub const PLACEHOLDER_MARKER: char = ':';

/// Normalize a parameter identifier to always carry the leading marker
#[must_use]
pub fn normalize_identifier(identifier: &str) -> String {
    if identifier.starts_with(PLACEHOLDER_MARKER) {
        identifier.to_owned()
    } else {
        format!("{PLACEHOLDER_MARKER}{identifier}")
    }
}

/// Literal text form of a bound value as interpolated into the resolved query
///
/// Strings render raw (unquoted), numbers as printed, `true` as `1`,
/// `false` and null as the empty string. Composite values fall back to
/// their JSON text.
#[must_use]
pub fn literal_text(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Bool(true) => "1".to_owned(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        composite => composite.to_string(),
    }
}

/// Resolve a query template against a bound-parameter map
///
/// Every occurrence of each normalized identifier is replaced textually by
/// the value's literal form, in the map's iteration order (`BTreeMap`, so
/// deterministic). Replacement is plain text substitution: when one
/// identifier is a textual prefix of another (`:id` next to `:identifier`),
/// the shorter identifier's replacement corrupts the longer placeholder.
/// That hazard is inherited behavior and deliberately not detected here.
#[must_use]
pub fn resolve(template: &str, params: &BTreeMap<String, Value>) -> String {
    let mut resolved = template.to_owned();
    for (identifier, value) in params {
        let placeholder = normalize_identifier(identifier);
        resolved = resolved.replace(&placeholder, &literal_text(value));
    }
    resolved
}

/// Digest a resolved query into a fixed-length cache key
///
/// Hex-encoded SHA-256: deterministic, collision-resistant, one-way.
/// Identical resolved strings always produce identical keys.
#[must_use]
pub fn digest(resolved: &str) -> String {
    hex::encode(Sha256::digest(resolved.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn literal_text_follows_string_coercion() {
        assert_eq!(literal_text(&json!("abc")), "abc");
        assert_eq!(literal_text(&json!(5)), "5");
        assert_eq!(literal_text(&json!(2.5)), "2.5");
        assert_eq!(literal_text(&json!(true)), "1");
        assert_eq!(literal_text(&json!(false)), "");
        assert_eq!(literal_text(&Value::Null), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        assert_eq!(normalize_identifier("id"), ":id");
        assert_eq!(normalize_identifier(":id"), ":id");
    }
}
