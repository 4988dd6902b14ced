use super::{StoreAdapter, StoreResult, error::StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// A key is either a plain value or an ordered list, never both.
#[derive(Debug, Clone)]
enum Entry {
    Value(Vec<u8>),
    List(Vec<Vec<u8>>),
}

/// Thread-safe in-memory store backend
///
/// `MemoryStore` keeps the whole namespace in a `HashMap` wrapped in
/// `Arc<RwLock<_>>`. Cloning is cheap and clones share the same data, so a
/// single store can be handed to many tasks.
///
/// ## Semantics
///
/// Keys follow the two-kind model of the [`StoreAdapter`] contract: plain
/// values (`set`/`get`/`incr`) and lists (`append`/`list_range`). Using a
/// key of one kind with an operation of the other kind fails with
/// [`StoreError::WrongType`].
///
/// ## Atomicity
///
/// Every operation takes the lock exactly once, so `incr` and `append` are
/// atomic with respect to each other and to all other operations. Multiple
/// readers proceed concurrently; writers get exclusive access.
#[derive(Default, Clone)]
pub struct MemoryStore {
    data: Arc<RwLock<HashMap<String, Entry>>>,
}

impl MemoryStore {
    /// Create a new empty MemoryStore instance
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of keys currently in the namespace
    pub fn len(&self) -> StoreResult<usize> {
        let data = self
            .data
            .read()
            .map_err(|_| StoreError::lock_error("Failed to acquire read lock on store"))?;
        Ok(data.len())
    }

    /// Check whether the namespace is empty
    pub fn is_empty(&self) -> StoreResult<bool> {
        self.len().map(|len| len == 0)
    }
}

/// Inclusive redis-style range over a list of `len` items.
///
/// Negative indices count from the tail; out-of-bounds ends clamp to the
/// list. Returns `None` when the normalized range selects nothing.
fn normalize_range(len: usize, start: i64, stop: i64) -> Option<(usize, usize)> {
    let len = len as i64;
    if len == 0 {
        return None;
    }
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };
    if start > stop || start >= len || stop < 0 {
        return None;
    }
    Some((start as usize, stop as usize))
}

#[async_trait]
impl StoreAdapter for MemoryStore {
    async fn set(&self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|_| StoreError::lock_error("Failed to acquire write lock on store"))?;

        data.insert(key.to_string(), Entry::Value(value));
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let data = self
            .data
            .read()
            .map_err(|_| StoreError::lock_error("Failed to acquire read lock on store"))?;

        match data.get(key) {
            None => Ok(None),
            Some(Entry::Value(bytes)) => Ok(Some(bytes.clone())),
            Some(Entry::List(_)) => Err(StoreError::wrong_type(format!(
                "key '{key}' holds a list, not a plain value"
            ))),
        }
    }

    async fn incr(&self, key: &str) -> StoreResult<i64> {
        let mut data = self
            .data
            .write()
            .map_err(|_| StoreError::lock_error("Failed to acquire write lock on store"))?;

        let next = match data.get(key) {
            None => 1,
            Some(Entry::Value(bytes)) => {
                let current = std::str::from_utf8(bytes)
                    .ok()
                    .and_then(|s| s.parse::<i64>().ok())
                    .ok_or_else(|| {
                        StoreError::wrong_type(format!(
                            "key '{key}' does not hold a decimal integer"
                        ))
                    })?;
                current + 1
            }
            Some(Entry::List(_)) => {
                return Err(StoreError::wrong_type(format!(
                    "key '{key}' holds a list, not a counter"
                )));
            }
        };

        data.insert(key.to_string(), Entry::Value(next.to_string().into_bytes()));
        Ok(next)
    }

    async fn append(&self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|_| StoreError::lock_error("Failed to acquire write lock on store"))?;

        match data.get_mut(key) {
            None => {
                data.insert(key.to_string(), Entry::List(vec![value]));
                Ok(())
            }
            Some(Entry::List(items)) => {
                items.push(value);
                Ok(())
            }
            Some(Entry::Value(_)) => Err(StoreError::wrong_type(format!(
                "key '{key}' holds a plain value, not a list"
            ))),
        }
    }

    async fn list_range(&self, key: &str, start: i64, stop: i64) -> StoreResult<Vec<Vec<u8>>> {
        let data = self
            .data
            .read()
            .map_err(|_| StoreError::lock_error("Failed to acquire read lock on store"))?;

        match data.get(key) {
            None => Ok(Vec::new()),
            Some(Entry::List(items)) => match normalize_range(items.len(), start, stop) {
                None => Ok(Vec::new()),
                Some((lo, hi)) => Ok(items[lo..=hi].to_vec()),
            },
            Some(Entry::Value(_)) => Err(StoreError::wrong_type(format!(
                "key '{key}' holds a plain value, not a list"
            ))),
        }
    }

    async fn flush_all(&self) -> StoreResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|_| StoreError::lock_error("Failed to acquire write lock on store"))?;

        data.clear();
        Ok(())
    }
}
