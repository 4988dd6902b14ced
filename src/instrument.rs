//! # Call Instrumentation
//!
//! This module wraps operations to record how they are used: how many times
//! they ran, and what went in and came out of every call. The records live
//! in the external store, so they survive process restarts and are shared by
//! every process pointing at the same namespace.
//!
//! ## 🎯 Core Concepts
//!
//! ### Operations
//!
//! An [`Operation`] is anything invokable with one logical argument tuple
//! and one result. The trait is deliberately small - the wrappers in this
//! module implement it themselves, which is what makes them stack.
//!
//! ### Operation Identity
//!
//! Every instrumented operation is named by an explicit [`OperationId`],
//! supplied by the caller at wrapper construction time. The identity is the
//! key prefix for all of the operation's records:
//!
//! | Key | Contents |
//! |-----|----------|
//! | `"{id}"` | invocation counter, decimal text |
//! | `"{id}:inputs"` | list of rendered argument tuples |
//! | `"{id}:outputs"` | list of rendered results |
//!
//! Identities must be unique per operation across the process. Two
//! operations sharing an identity interleave their records and corrupt each
//! other's history; nothing here detects that.
//!
//! ### Wrappers
//!
//! [`CallCounter`] counts invocations; [`CallHistory`] logs inputs and
//! outputs. Counting and logging are independent concerns, so each is its
//! own wrapper and both can stack freely with any other [`Operation`].
//!
//! ## 🔒 Ordering and Failure Policy
//!
//! The canonical composition built by [`instrument`] is
//! `CallCounter<CallHistory<T>>`, which fixes one deterministic order per
//! invocation:
//!
//! 1. increment the counter
//! 2. append the rendered input to the inputs log
//! 3. run the wrapped operation
//! 4. append the rendered output to the outputs log
//!
//! The counter increment and the input append happen *before* the wrapped
//! operation runs and are never rolled back. A failing operation therefore
//! leaves `counter == len(inputs) == len(outputs) + 1` - a permanent,
//! bounded asymmetry that replay tolerates by pairing the overlapping
//! prefix. Errors from the wrapped operation propagate unmodified.

use crate::error::RecallResult;
use crate::store::StoreAdapter;
use crate::value::CacheValue;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::debug;

/// Stable name for an instrumented operation
///
/// The identity is caller-supplied - no reflection, no qualified-name
/// introspection. It doubles as the counter key; the input and output log
/// keys are derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationId(String);

impl OperationId {
    /// Create an identity from a stable operation name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The operation name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Store key of the invocation counter
    pub fn counter_key(&self) -> &str {
        &self.0
    }

    /// Store key of the inputs log
    pub fn inputs_key(&self) -> String {
        format!("{}:inputs", self.0)
    }

    /// Store key of the outputs log
    pub fn outputs_key(&self) -> String {
        format!("{}:outputs", self.0)
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OperationId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for OperationId {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Canonical call-log text for inputs and outputs
///
/// The rendering is for human-readable replay, not for parsing back into
/// typed values: stable across calls with equal arguments, and unambiguous
/// enough to read in a transcript.
///
/// Argument tuples render in literal form - `("a",)` for one argument,
/// `("a", "b")` for two. Plain strings render verbatim (operation results
/// such as generated keys read better unquoted); typed cache values render
/// quoted and escaped.
pub trait Recordable {
    /// Render this value into its call-log text
    fn to_record(&self) -> String;
}

impl Recordable for CacheValue {
    fn to_record(&self) -> String {
        match self {
            CacheValue::Text(s) => format!("{s:?}"),
            CacheValue::Bytes(b) => format!("{b:?}"),
            CacheValue::Int(n) => n.to_string(),
            CacheValue::Float(x) => x.to_string(),
        }
    }
}

impl Recordable for String {
    fn to_record(&self) -> String {
        self.clone()
    }
}

impl Recordable for &str {
    fn to_record(&self) -> String {
        (*self).to_string()
    }
}

impl Recordable for i64 {
    fn to_record(&self) -> String {
        self.to_string()
    }
}

impl Recordable for Vec<u8> {
    fn to_record(&self) -> String {
        format!("{self:?}")
    }
}

impl<T: Recordable> Recordable for Option<T> {
    fn to_record(&self) -> String {
        match self {
            Some(value) => value.to_record(),
            None => "None".to_string(),
        }
    }
}

impl<A: Recordable> Recordable for (A,) {
    fn to_record(&self) -> String {
        format!("({},)", self.0.to_record())
    }
}

impl<A: Recordable, B: Recordable> Recordable for (A, B) {
    fn to_record(&self) -> String {
        format!("({}, {})", self.0.to_record(), self.1.to_record())
    }
}

/// An invokable operation with recordable input and output
///
/// Implement this for anything the wrappers should instrument. The input is
/// the operation's full argument tuple; multi-argument operations use a
/// tuple type.
///
/// # Example
///
/// ```rust
/// use recall::prelude::*;
///
/// struct Shout;
///
/// #[async_trait]
/// impl Operation for Shout {
///     type Input = (CacheValue,);
///     type Output = String;
///
///     async fn invoke(&self, (value,): (CacheValue,)) -> RecallResult<String> {
///         Ok(value.type_name().to_uppercase())
///     }
/// }
/// ```
#[async_trait]
pub trait Operation: Send + Sync {
    /// The argument tuple type
    type Input: Recordable + Send + 'static;

    /// The result type
    type Output: Recordable + Send + 'static;

    /// Run the operation
    async fn invoke(&self, input: Self::Input) -> RecallResult<Self::Output>;
}

/// Wrapper that counts invocations of an operation
///
/// Increments the counter under the identity's counter key through the
/// store's atomic `incr`, then delegates. Counting is unconditional: the
/// increment lands before the inner operation runs and stays even when the
/// inner operation fails. The count is therefore "times invoked", not
/// "times succeeded".
pub struct CallCounter<T> {
    id: OperationId,
    store: Arc<dyn StoreAdapter>,
    inner: T,
}

impl<T> CallCounter<T> {
    /// Wrap `inner`, counting invocations under `id`
    pub fn new(id: impl Into<OperationId>, store: Arc<dyn StoreAdapter>, inner: T) -> Self {
        Self {
            id: id.into(),
            store,
            inner,
        }
    }

    /// The identity this wrapper records under
    pub fn id(&self) -> &OperationId {
        &self.id
    }
}

#[async_trait]
impl<T: Operation> Operation for CallCounter<T> {
    type Input = T::Input;
    type Output = T::Output;

    async fn invoke(&self, input: T::Input) -> RecallResult<T::Output> {
        let _count = self.store.incr(self.id.counter_key()).await?;

        #[cfg(feature = "tracing")]
        debug!(operation = %self.id, count = _count, "call counted");

        self.inner.invoke(input).await
    }
}

/// Wrapper that logs the input and output of every invocation
///
/// Appends the rendered argument tuple to the inputs log, runs the inner
/// operation, and appends the rendered result to the outputs log. The input
/// append happens before execution and is never rolled back; the output
/// append happens only on success. A failing inner operation thus leaves
/// the two logs diverging by exactly one entry, which replay reports rather
/// than rejects.
pub struct CallHistory<T> {
    id: OperationId,
    store: Arc<dyn StoreAdapter>,
    inner: T,
}

impl<T> CallHistory<T> {
    /// Wrap `inner`, logging calls under `id`
    pub fn new(id: impl Into<OperationId>, store: Arc<dyn StoreAdapter>, inner: T) -> Self {
        Self {
            id: id.into(),
            store,
            inner,
        }
    }

    /// The identity this wrapper records under
    pub fn id(&self) -> &OperationId {
        &self.id
    }
}

#[async_trait]
impl<T: Operation> Operation for CallHistory<T> {
    type Input = T::Input;
    type Output = T::Output;

    async fn invoke(&self, input: T::Input) -> RecallResult<T::Output> {
        let rendered = input.to_record();
        self.store
            .append(&self.id.inputs_key(), rendered.into_bytes())
            .await?;

        let output = self.inner.invoke(input).await?;

        self.store
            .append(&self.id.outputs_key(), output.to_record().into_bytes())
            .await?;

        #[cfg(feature = "tracing")]
        debug!(operation = %self.id, "call history recorded");

        Ok(output)
    }
}

/// Canonical instrumentation for an operation: counting outside, history
/// inside.
///
/// Per invocation this fixes the order documented at the module level:
/// counter increment, input append, execution, output append. Both wrappers
/// record under the same `id`.
pub fn instrument<T: Operation>(
    id: impl Into<OperationId>,
    store: Arc<dyn StoreAdapter>,
    op: T,
) -> CallCounter<CallHistory<T>> {
    let id = id.into();
    let history = CallHistory::new(id.clone(), Arc::clone(&store), op);
    CallCounter::new(id, store, history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecallError;
    use crate::store::MemoryStore;

    /// Test operation: names the type of the value it was given.
    struct TagOp;

    #[async_trait]
    impl Operation for TagOp {
        type Input = (CacheValue,);
        type Output = String;

        async fn invoke(&self, (value,): (CacheValue,)) -> RecallResult<String> {
            Ok(value.type_name().to_string())
        }
    }

    /// Test operation that always fails.
    struct FailingOp;

    #[async_trait]
    impl Operation for FailingOp {
        type Input = (CacheValue,);
        type Output = String;

        async fn invoke(&self, _input: (CacheValue,)) -> RecallResult<String> {
            Err(RecallError::operation("wrapped operation failed"))
        }
    }

    fn shared_store() -> Arc<dyn StoreAdapter> {
        Arc::new(MemoryStore::new())
    }

    async fn list_len(store: &dyn StoreAdapter, key: &str) -> usize {
        store.list_range(key, 0, -1).await.unwrap().len()
    }

    #[test]
    fn test_operation_id_keys() {
        let id = OperationId::new("Cache::store");
        assert_eq!(id.as_str(), "Cache::store");
        assert_eq!(id.counter_key(), "Cache::store");
        assert_eq!(id.inputs_key(), "Cache::store:inputs");
        assert_eq!(id.outputs_key(), "Cache::store:outputs");
        assert_eq!(format!("{id}"), "Cache::store");
    }

    #[test]
    fn test_argument_tuples_render_in_literal_form() {
        let single = (CacheValue::from("a"),);
        assert_eq!(single.to_record(), "(\"a\",)");

        let pair = (CacheValue::Int(7), CacheValue::from("b"));
        assert_eq!(pair.to_record(), "(7, \"b\")");
    }

    #[test]
    fn test_value_rendering() {
        assert_eq!(CacheValue::from("a").to_record(), "\"a\"");
        assert_eq!(CacheValue::Bytes(vec![1, 2]).to_record(), "[1, 2]");
        assert_eq!(CacheValue::Int(-3).to_record(), "-3");
        assert_eq!(CacheValue::Float(1.5).to_record(), "1.5");
        assert_eq!("key".to_string().to_record(), "key");
        assert_eq!(Some("key".to_string()).to_record(), "key");
        assert_eq!(None::<String>.to_record(), "None");
    }

    #[tokio::test]
    async fn test_counter_counts_without_logging() {
        let store = shared_store();
        let op = CallCounter::new("op", Arc::clone(&store), TagOp);

        for _ in 0..3 {
            op.invoke((CacheValue::from("x"),)).await.unwrap();
        }

        assert_eq!(store.get("op").await.unwrap(), Some(b"3".to_vec()));
        assert_eq!(list_len(store.as_ref(), "op:inputs").await, 0);
        assert_eq!(list_len(store.as_ref(), "op:outputs").await, 0);
    }

    #[tokio::test]
    async fn test_history_logs_without_counting() {
        let store = shared_store();
        let op = CallHistory::new("op", Arc::clone(&store), TagOp);

        let output = op.invoke((CacheValue::from("x"),)).await.unwrap();
        assert_eq!(output, "text");

        assert_eq!(store.get("op").await.unwrap(), None);

        let inputs = store.list_range("op:inputs", 0, -1).await.unwrap();
        assert_eq!(inputs, vec![b"(\"x\",)".to_vec()]);
        let outputs = store.list_range("op:outputs", 0, -1).await.unwrap();
        assert_eq!(outputs, vec![b"text".to_vec()]);
    }

    #[tokio::test]
    async fn test_instrumented_invocations_keep_counter_and_logs_aligned() {
        let store = shared_store();
        let op = instrument("op", Arc::clone(&store), TagOp);

        op.invoke((CacheValue::from("a"),)).await.unwrap();
        op.invoke((CacheValue::Int(2),)).await.unwrap();
        op.invoke((CacheValue::Float(0.5),)).await.unwrap();

        assert_eq!(store.get("op").await.unwrap(), Some(b"3".to_vec()));

        let inputs = store.list_range("op:inputs", 0, -1).await.unwrap();
        assert_eq!(
            inputs,
            vec![
                b"(\"a\",)".to_vec(),
                b"(2,)".to_vec(),
                b"(0.5,)".to_vec(),
            ]
        );

        let outputs = store.list_range("op:outputs", 0, -1).await.unwrap();
        assert_eq!(
            outputs,
            vec![b"text".to_vec(), b"int".to_vec(), b"float".to_vec()]
        );
    }

    #[tokio::test]
    async fn test_failure_leaves_counter_and_input_log_advanced() {
        let store = shared_store();
        let op = instrument("op", Arc::clone(&store), FailingOp);

        let result = op.invoke((CacheValue::from("a"),)).await;
        match result.unwrap_err() {
            RecallError::Operation(msg) => assert_eq!(msg, "wrapped operation failed"),
            other => panic!("expected Operation error, got {other:?}"),
        }

        // counter and inputs committed, outputs not
        assert_eq!(store.get("op").await.unwrap(), Some(b"1".to_vec()));
        assert_eq!(list_len(store.as_ref(), "op:inputs").await, 1);
        assert_eq!(list_len(store.as_ref(), "op:outputs").await, 0);
    }

    #[tokio::test]
    async fn test_wrappers_stack_with_independent_identities() {
        let store = shared_store();
        let inner = CallCounter::new("inner", Arc::clone(&store), TagOp);
        let outer = CallCounter::new("outer", Arc::clone(&store), inner);

        outer.invoke((CacheValue::from("x"),)).await.unwrap();
        outer.invoke((CacheValue::from("y"),)).await.unwrap();

        assert_eq!(store.get("outer").await.unwrap(), Some(b"2".to_vec()));
        assert_eq!(store.get("inner").await.unwrap(), Some(b"2".to_vec()));
    }

    #[tokio::test]
    async fn test_concurrent_invocations_count_exactly() {
        let store = shared_store();
        let op = Arc::new(instrument("op", Arc::clone(&store), TagOp));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let op = Arc::clone(&op);
            handles.push(tokio::spawn(async move {
                for _ in 0..25 {
                    op.invoke((CacheValue::from("x"),)).await.unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.get("op").await.unwrap(), Some(b"200".to_vec()));
        assert_eq!(list_len(store.as_ref(), "op:inputs").await, 200);
        assert_eq!(list_len(store.as_ref(), "op:outputs").await, 200);
    }
}
