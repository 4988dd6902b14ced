//! # Store Error Types
//!
//! Error types specific to store adapter operations. These describe failures
//! of the external key-value service or of a backend implementation, before
//! any cache-level interpretation.

use std::fmt;

/// Error type for store adapter operations
///
/// ## Error Categories
///
/// - `Unavailable`: the backing service could not be reached or timed out
/// - `WrongType`: a key holds a value incompatible with the operation
///   (counter ops on list keys, list ops on plain values)
/// - `Lock`: an in-process backend failed to acquire its lock
/// - `Generic`: general store errors with custom messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing service could not be reached
    ///
    /// Covers connection failures, timeouts and protocol-level errors.
    /// Callers get this unmodified - the adapter does not retry.
    Unavailable(String),

    /// A key holds a value of the wrong kind for the requested operation
    ///
    /// Counters are plain decimal values and call logs are lists; mixing
    /// the two key kinds produces this error rather than silent coercion.
    WrongType(String),

    /// Failed to acquire a lock in an in-process backend
    ///
    /// Only produced by backends with in-process state, such as
    /// [`MemoryStore`](super::MemoryStore) when its lock is poisoned.
    Lock(String),

    /// General store error with custom message
    Generic(String),
}

impl StoreError {
    /// Create a new unavailable error
    pub fn unavailable<S: Into<String>>(msg: S) -> Self {
        StoreError::Unavailable(msg.into())
    }

    /// Create a new wrong type error
    pub fn wrong_type<S: Into<String>>(msg: S) -> Self {
        StoreError::WrongType(msg.into())
    }

    /// Create a new lock error
    pub fn lock_error<S: Into<String>>(msg: S) -> Self {
        StoreError::Lock(msg.into())
    }

    /// Create a new generic store error
    pub fn generic<S: Into<String>>(msg: S) -> Self {
        StoreError::Generic(msg.into())
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(msg) => write!(f, "Store unavailable: {msg}"),
            StoreError::WrongType(msg) => write!(f, "Wrong type: {msg}"),
            StoreError::Lock(msg) => write!(f, "Lock error: {msg}"),
            StoreError::Generic(msg) => write!(f, "store error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}
