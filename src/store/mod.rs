//! # Store Adapters
//!
//! This module defines the contract the cache consumes from an external
//! key-value service, plus the backends that fulfil it.
//!
//! ## 🎯 Purpose
//!
//! The cache does not implement storage, networking or persistence of its
//! own. Everything it needs from the outside world is six operations over a
//! flat key namespace, and this module pins those six down as the
//! [`StoreAdapter`] trait:
//!
//! - plain values for cached payloads and call counters
//! - ordered lists for call-history logs
//!
//! ## 🔧 Available Backends
//!
//! ### MemoryStore (Included)
//!
//! A thread-safe, in-memory backend ready for immediate use. Ideal for
//! tests, benchmarks and single-process use where persistence across
//! restarts is not needed.
//!
//! ### RedisStore (feature `redis-backend`)
//!
//! An adapter over a real Redis service at a fixed default address. Counter
//! and list semantics map directly onto `INCR`, `RPUSH` and `LRANGE`.
//!
//! ### Custom Backends
//!
//! Implement [`StoreAdapter`] for anything else that can honor the
//! contract. The only hard requirement beyond the method semantics is that
//! `incr` is atomic: the instrumentation layer leans on it for exact call
//! counts under concurrency and does not add locking of its own.

use async_trait::async_trait;

pub mod error;
pub mod memory;

#[cfg(feature = "redis-backend")]
pub mod redis;

/// Type alias for store operation results
pub type StoreResult<T> = Result<T, error::StoreError>;

/// Contract over an external key-value service
///
/// ## 📋 Method Reference
///
/// | Method | Purpose | Semantics |
/// |--------|---------|-----------|
/// | `set` | Write a value | Unconditional overwrite |
/// | `get` | Read a value | `Ok(None)` when the key is absent |
/// | `incr` | Bump a counter | Atomic; missing key counts from 0; returns the new value |
/// | `append` | Push onto a list | Appends at the tail; creates the list if absent |
/// | `list_range` | Read a list slice | Inclusive; negative indices count from the tail |
/// | `flush_all` | Wipe the namespace | Deletes every key |
///
/// ## Ordering
///
/// Operations on the *same* key issued sequentially by one caller apply in
/// call order. No ordering is guaranteed across different keys or across
/// concurrent callers; consumers that need a total order must not assume
/// one here.
///
/// ## Absence Is Not an Error
///
/// `get` returns `Ok(None)` for a missing key. Backends reserve errors for
/// actual failures: unreachable service, incompatible key kind, poisoned
/// lock.
#[async_trait]
pub trait StoreAdapter: Send + Sync {
    /// Write `value` under `key`, overwriting any previous value.
    async fn set(&self, key: &str, value: Vec<u8>) -> StoreResult<()>;

    /// Read the raw bytes under `key`, or `None` if the key is absent.
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Atomically increment the counter under `key` and return the new value.
    ///
    /// A missing key counts from 0, so the first `incr` returns 1. A key
    /// holding non-numeric content fails with
    /// [`StoreError::WrongType`](error::StoreError::WrongType).
    async fn incr(&self, key: &str) -> StoreResult<i64>;

    /// Append `value` at the tail of the list under `key`, creating the
    /// list if the key is absent.
    async fn append(&self, key: &str, value: Vec<u8>) -> StoreResult<()>;

    /// Read the inclusive range `start..=stop` of the list under `key`.
    ///
    /// Negative indices count from the tail, so `(0, -1)` reads the whole
    /// list. A missing key reads as an empty list.
    async fn list_range(&self, key: &str, start: i64, stop: i64) -> StoreResult<Vec<Vec<u8>>>;

    /// Delete every key in the namespace.
    async fn flush_all(&self) -> StoreResult<()>;
}

pub use error::StoreError;
pub use memory::MemoryStore;

#[cfg(feature = "redis-backend")]
pub use redis::RedisStore;
