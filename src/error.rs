//! # Error Handling
//!
//! This module provides the crate-level error type for cache and
//! instrumentation operations.
//!
//! ## 🎯 Design Philosophy
//!
//! Errors are categorized by what the caller can do about them:
//!
//! | Error Type | When It Occurs | How to Fix |
//! |------------|----------------|------------|
//! | `Store` | A store adapter call failed | Check the backing service and connection |
//! | `Format` | A coercion met bytes of the wrong shape | Read with the coercion that matches what was stored |
//! | `Operation` | A wrapped operation failed in its own logic | Check the operation's inputs and implementation |
//! | `Generic` | Anything else | Check the specific message |
//!
//! Two conditions are deliberately **not** errors:
//!
//! - A missing key: `retrieve` returns `Ok(None)`. Absence is a normal
//!   outcome of a cache read, and callers are expected to check for it.
//! - Diverging call-log lengths after a partial failure: replay pairs the
//!   overlapping prefix and reports the surplus instead of failing.
//!
//! ## 🔗 Store Error Integration
//!
//! [`StoreError`](crate::store::StoreError) values convert automatically, so
//! adapter failures flow through `?` unmodified in meaning:
//!
//! ```rust
//! use recall::{RecallResult, MemoryStore, StoreAdapter};
//!
//! async fn example(store: &MemoryStore) -> RecallResult<Option<Vec<u8>>> {
//!     // StoreError is converted to RecallError::Store by `?`
//!     let value = store.get("key").await?;
//!     Ok(value)
//! }
//! ```

/// Crate-level error type for cache and instrumentation operations
///
/// Store-level failures are propagated to the immediate caller unmodified in
/// meaning: nothing in this crate retries or suppresses them. Note that an
/// instrumented operation may have already incremented its call counter and
/// appended its input-log entry by the time a failure surfaces; those
/// mutations are never rolled back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecallError {
    /// A store adapter call failed (connection lost, timeout, wrong type)
    ///
    /// Carries the underlying store failure's message. The retry policy, if
    /// any, belongs to the adapter or a higher layer - never to this crate.
    Store(String),

    /// A coercion was applied to bytes of the wrong shape
    ///
    /// Raised by the integer coercion on non-numeric content and by the
    /// text coercion on invalid UTF-8.
    Format(String),

    /// A wrapped operation failed in its own logic
    ///
    /// Use this from custom [`Operation`](crate::instrument::Operation)
    /// implementations for failures that are neither store nor format
    /// related.
    Operation(String),

    /// General-purpose error for other scenarios
    Generic(String),
}

impl RecallError {
    /// Create a new store error
    pub fn store<S: Into<String>>(msg: S) -> Self {
        RecallError::Store(msg.into())
    }

    /// Create a new format error
    pub fn format<S: Into<String>>(msg: S) -> Self {
        RecallError::Format(msg.into())
    }

    /// Create a new operation error
    pub fn operation<S: Into<String>>(msg: S) -> Self {
        RecallError::Operation(msg.into())
    }

    /// Create a new generic error
    pub fn generic<S: Into<String>>(msg: S) -> Self {
        RecallError::Generic(msg.into())
    }

    /// Get the error message as a string slice
    pub fn message(&self) -> &str {
        match self {
            RecallError::Store(msg) => msg,
            RecallError::Format(msg) => msg,
            RecallError::Operation(msg) => msg,
            RecallError::Generic(msg) => msg,
        }
    }

    /// Get the error category as a string
    pub fn category(&self) -> &'static str {
        match self {
            RecallError::Store(_) => "store",
            RecallError::Format(_) => "format",
            RecallError::Operation(_) => "operation",
            RecallError::Generic(_) => "generic",
        }
    }
}

impl std::fmt::Display for RecallError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecallError::Store(msg) => write!(f, "Store error: {msg}"),
            RecallError::Format(msg) => write!(f, "Format error: {msg}"),
            RecallError::Operation(msg) => write!(f, "Operation error: {msg}"),
            RecallError::Generic(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for RecallError {}

// Conversion traits for ergonomic error handling

impl From<crate::store::error::StoreError> for RecallError {
    fn from(err: crate::store::error::StoreError) -> Self {
        RecallError::store(err.to_string())
    }
}

impl From<&str> for RecallError {
    fn from(err: &str) -> Self {
        RecallError::Generic(err.to_string())
    }
}

impl From<String> for RecallError {
    fn from(err: String) -> Self {
        RecallError::Generic(err)
    }
}

/// Convenient Result type alias for recall operations
///
/// The recommended return type for everything in this crate that can fail,
/// including custom [`Operation`](crate::instrument::Operation)
/// implementations handed to the instrumentation wrappers.
pub type RecallResult<T> = Result<T, RecallError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = RecallError::operation("Test error");
        assert_eq!(error.message(), "Test error");
        assert_eq!(error.category(), "operation");
    }

    #[test]
    fn test_error_display() {
        let error = RecallError::Format("not a number".to_string());
        assert_eq!(format!("{error}"), "Format error: not a number");
    }

    #[test]
    fn test_error_conversions() {
        let error1: RecallError = "Test error".into();
        let error2: RecallError = "Test error".to_string().into();

        match (&error1, &error2) {
            (RecallError::Generic(msg1), RecallError::Generic(msg2)) => {
                assert_eq!(msg1, msg2);
            }
            _ => panic!("Expected Generic errors"),
        }
    }

    #[test]
    fn test_store_error_conversion() {
        use crate::store::error::StoreError;

        let store_error = StoreError::unavailable("connection refused");
        let error: RecallError = store_error.into();

        match &error {
            RecallError::Store(msg) => {
                assert!(msg.contains("connection refused"));
            }
            _ => panic!("Expected store error variant"),
        }
        assert_eq!(error.category(), "store");

        let store_error = StoreError::wrong_type("counter key holds a list");
        let error: RecallError = store_error.into();
        assert_eq!(error.category(), "store");
        assert!(error.message().contains("counter key holds a list"));
    }
}
