//! # Recall: Instrumented Caching over a Key-Value Store
//!
//! Recall is a small caching facade with a memory: it stores scalar values
//! under generated keys, reads them back with named coercions, and records
//! every instrumented call - how many times an operation ran, what went in
//! and what came out - in the same external store, so the history survives
//! process restarts and can be replayed later as a readable transcript.
//!
//! ## 🚀 Quick Start
//!
//! Create a store backend, wrap it in a [`Cache`], and use `store` /
//! `retrieve`. The cache's `store` operation is instrumented out of the
//! box; [`Cache::replay_store_calls`] turns its recorded history into a
//! [`CallTranscript`].
//!
//! ```rust
//! use recall::{Cache, MemoryStore};
//! use std::sync::Arc;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let cache = Cache::new(Arc::new(MemoryStore::new())).await.unwrap();
//!
//! let key = cache.store("hello").await.unwrap();
//! assert_eq!(cache.retrieve_text(&key).await.unwrap(), Some("hello".to_string()));
//!
//! let transcript = cache.replay_store_calls().await.unwrap();
//! println!("{transcript}");
//! # });
//! ```
//!
//! ## 🎯 Core Concepts
//!
//! ### Store Adapters - the External Service
//!
//! All persistence is delegated to an external key-value service behind the
//! [`StoreAdapter`] trait: plain values, atomic counters, ordered lists and
//! a namespace flush. [`MemoryStore`] ships for tests and single-process
//! use; a Redis backend is available behind the `redis-backend` feature.
//! There is no in-process shared mutable state - the store is the sole
//! synchronization point.
//!
//! ### Instrumentation - Counting and Call History
//!
//! The [`instrument`](mod@crate::instrument) module wraps any [`Operation`]
//! with composable decorator objects: [`CallCounter`] counts invocations
//! through the store's atomic increment, [`CallHistory`] appends rendered
//! inputs and outputs to persistent logs. Every record is keyed by an
//! explicit [`OperationId`] - no reflection, no name introspection.
//!
//! ### Replay - Reading the History Back
//!
//! [`replay`](crate::replay::replay) reconstructs an operation's counter
//! and paired input/output records into a [`CallTranscript`] that renders
//! as one summary line plus one line per invocation.
//!
//! ## ⚠️ Destructive Bootstrap
//!
//! Constructing a [`Cache`] **flushes the entire store namespace**. Use a
//! dedicated database for the cache, never a shared production store.
//!
//! ## 📚 Module Overview
//!
//! - **[`cache`]**: The [`Cache`] facade - store, retrieve, replay
//! - **[`value`]**: The [`CacheValue`] scalar set and named [`Coercion`]
//!   strategies
//! - **[`instrument`](mod@crate::instrument)**: [`Operation`],
//!   [`OperationId`] and the stacking wrappers
//! - **[`replay`](mod@crate::replay)**: [`CallTranscript`] reconstruction
//!   and rendering
//! - **[`store`]**: The [`StoreAdapter`] contract and backends
//! - **[`error`]**: [`RecallError`] and the [`RecallResult`] alias
//!
//! ## Feature Flags
//!
//! - `redis-backend`: a `RedisStore` adapter over a real Redis service
//! - `tracing`: debug-level spans and events around instrumentation and
//!   cache bootstrap

pub mod cache;
pub mod error;
pub mod instrument;
pub mod replay;
pub mod store;
pub mod value;

// Core public API - simplified imports
pub use cache::Cache;
pub use error::{RecallError, RecallResult};
pub use instrument::{CallCounter, CallHistory, Operation, OperationId, Recordable, instrument};
pub use replay::{CallRecord, CallTranscript, replay};
pub use store::{MemoryStore, StoreAdapter, StoreError};
pub use value::{CacheValue, Coercion, Retrieved};

#[cfg(feature = "redis-backend")]
pub use store::RedisStore;

// Convenience re-exports for common patterns
pub mod prelude {
    //! Simplified imports for common usage patterns
    //!
    //! Use `use recall::prelude::*;` to import the most commonly used types
    //! and traits.

    pub use crate::{
        Cache, CacheValue, CallCounter, CallHistory, CallTranscript, Coercion, MemoryStore,
        Operation, OperationId, RecallError, RecallResult, Recordable, Retrieved, StoreAdapter,
        StoreError, instrument, replay,
    };

    // Re-export async_trait for convenience
    pub use async_trait::async_trait;
}
