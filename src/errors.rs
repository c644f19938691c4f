// ABOUTME: Unified error handling for the result-set caching layer
// ABOUTME: Defines error codes, the AppError type, and constructor helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Unified Error Handling
//!
//! Centralized error types for the caching layer. Every failure surfaces
//! synchronously to the immediate caller; nothing in this crate retries.
//! A statement-level execution failure is *not* an error; the driver
//! reports it through [`crate::driver::ExecutionOutcome`] and it is returned
//! verbatim to the caller.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the caching layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// A fetch option outside the supported set was requested
    #[serde(rename = "UNSUPPORTED_OPTION")]
    UnsupportedOption,
    /// Transport-level fault reported by the underlying driver
    #[serde(rename = "DRIVER_ERROR")]
    DriverError,
    /// The physical cache backend failed a load or save
    #[serde(rename = "CACHE_BACKEND_ERROR")]
    CacheBackendError,
    /// Cached entry could not be serialized or deserialized
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError,
    /// Backend selection or connection configuration is invalid
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError,
}

impl ErrorCode {
    /// Get a human-readable description of this error code
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::UnsupportedOption => "Unsupported fetch option",
            Self::DriverError => "Underlying driver fault",
            Self::CacheBackendError => "Cache backend operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
            Self::ConfigError => "Invalid configuration",
        }
    }

    /// Whether this code represents a caller programming error rather than
    /// a runtime fault
    #[must_use]
    pub const fn is_programming_error(&self) -> bool {
        matches!(self, Self::UnsupportedOption)
    }
}

/// Unified error type for the caching layer
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Convenience functions for creating common errors
impl AppError {
    /// Unsupported fetch style, cursor orientation, offset, or argument
    pub fn unsupported_option(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnsupportedOption, message)
    }

    /// Transport-level driver fault
    pub fn driver(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DriverError, message)
    }

    /// Cache backend failure
    pub fn cache_backend(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CacheBackendError, message)
    }

    /// Serialization failure
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code_description() {
        let err = AppError::unsupported_option("cursor orientation Prior");
        assert_eq!(
            err.to_string(),
            "Unsupported fetch option: cursor orientation Prior"
        );
    }

    #[test]
    fn unsupported_option_is_programming_error() {
        assert!(ErrorCode::UnsupportedOption.is_programming_error());
        assert!(!ErrorCode::CacheBackendError.is_programming_error());
    }
}
