//! # Cache Facade
//!
//! This module provides [`Cache`], the user-facing facade over a store
//! adapter: store scalar values under generated keys, read them back with
//! named coercions, and replay the recorded history of the instrumented
//! `store` operation.
//!
//! ## ⚠️ Destructive Construction
//!
//! **Constructing a `Cache` flushes the entire store namespace.** Every key
//! in the adapter's database is deleted, including instrumentation records
//! from previous runs. Point the adapter at a dedicated cache/demo
//! namespace, never at a shared production store.
//!
//! ## 🚀 Quick Start
//!
//! ```rust
//! use recall::{Cache, MemoryStore};
//! use std::sync::Arc;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let cache = Cache::new(Arc::new(MemoryStore::new())).await.unwrap();
//!
//! let key = cache.store("foo").await.unwrap();
//! assert_eq!(cache.retrieve_text(&key).await.unwrap(), Some("foo".to_string()));
//!
//! let transcript = cache.replay_store_calls().await.unwrap();
//! assert_eq!(transcript.count(), 1);
//! # });
//! ```

use crate::error::RecallResult;
use crate::instrument::{CallCounter, CallHistory, Operation, OperationId, instrument};
use crate::replay::{CallTranscript, replay};
use crate::store::StoreAdapter;
use crate::value::{CacheValue, Coercion, Retrieved, decode_text, parse_integer};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

#[cfg(feature = "tracing")]
use tracing::info;

/// The uninstrumented core of `Cache::store`: generate a key, write the
/// value, return the key.
struct StoreOp {
    adapter: Arc<dyn StoreAdapter>,
}

#[async_trait]
impl Operation for StoreOp {
    type Input = (CacheValue,);
    type Output = String;

    async fn invoke(&self, (value,): (CacheValue,)) -> RecallResult<String> {
        let key = Uuid::new_v4().to_string();
        self.adapter.set(&key, value.into_bytes()).await?;
        Ok(key)
    }
}

/// Instrumented caching facade over a [`StoreAdapter`]
///
/// `store` puts a scalar value under a fresh globally-unique key and is
/// instrumented under the identity [`Cache::STORE_OPERATION`]: every call
/// bumps a persistent counter and appends to persistent input/output logs,
/// which [`Cache::replay_store_calls`] reads back. The `retrieve` family
/// reads values by key, optionally through a named [`Coercion`].
///
/// Generated keys are uuid-v4 strings, so they cannot collide with
/// operation identities in the shared flat namespace.
///
/// # ⚠️ Construction Wipes the Namespace
///
/// See [`Cache::new`]. Use a dedicated store database.
pub struct Cache {
    adapter: Arc<dyn StoreAdapter>,
    store_op: CallCounter<CallHistory<StoreOp>>,
}

impl Cache {
    /// Identity under which `store` calls are recorded.
    pub const STORE_OPERATION: &'static str = "Cache::store";

    /// Create a cache over `adapter`.
    ///
    /// **Destructive**: flushes every key in the adapter's namespace,
    /// including instrumentation records from previous runs. Only hand this
    /// a store dedicated to the cache.
    pub async fn new(adapter: Arc<dyn StoreAdapter>) -> RecallResult<Self> {
        adapter.flush_all().await?;

        #[cfg(feature = "tracing")]
        info!("cache constructed, store namespace flushed");

        let store_op = instrument(
            Self::STORE_OPERATION,
            Arc::clone(&adapter),
            StoreOp {
                adapter: Arc::clone(&adapter),
            },
        );

        Ok(Self { adapter, store_op })
    }

    /// Store a scalar value and return its generated key.
    ///
    /// Accepts anything convertible into [`CacheValue`] - `&str`, `String`,
    /// `Vec<u8>`, `&[u8]`, `i64`, `f64`. The call is instrumented: counter
    /// and call logs are updated as documented in
    /// [`crate::instrument`](mod@crate::instrument).
    pub async fn store(&self, value: impl Into<CacheValue>) -> RecallResult<String> {
        self.store_op.invoke((value.into(),)).await
    }

    /// Read the raw bytes under `key`, or `None` if the key is absent.
    ///
    /// Absence is a normal outcome, not an error - keys disappear whenever
    /// a new `Cache` flushes the namespace.
    pub async fn retrieve(&self, key: &str) -> RecallResult<Option<Vec<u8>>> {
        Ok(self.adapter.get(key).await?)
    }

    /// Read the value under `key` through a named coercion.
    pub async fn retrieve_with(
        &self,
        key: &str,
        coercion: Coercion,
    ) -> RecallResult<Option<Retrieved>> {
        match self.adapter.get(key).await? {
            None => Ok(None),
            Some(raw) => coercion.apply(raw).map(Some),
        }
    }

    /// Read the value under `key` as UTF-8 text.
    pub async fn retrieve_text(&self, key: &str) -> RecallResult<Option<String>> {
        match self.adapter.get(key).await? {
            None => Ok(None),
            Some(raw) => decode_text(raw).map(Some),
        }
    }

    /// Read the value under `key` as a decimal integer.
    pub async fn retrieve_int(&self, key: &str) -> RecallResult<Option<i64>> {
        match self.adapter.get(key).await? {
            None => Ok(None),
            Some(raw) => parse_integer(&raw).map(Some),
        }
    }

    /// Reconstruct the transcript of this cache's instrumented `store`
    /// operation.
    pub async fn replay_store_calls(&self) -> RecallResult<CallTranscript> {
        replay(
            self.adapter.as_ref(),
            &OperationId::new(Self::STORE_OPERATION),
        )
        .await
    }

    /// Shared handle to the underlying store adapter.
    pub fn adapter(&self) -> Arc<dyn StoreAdapter> {
        Arc::clone(&self.adapter)
    }
}
