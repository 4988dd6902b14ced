//! Redis-backed store adapter.
//!
//! Maps the [`StoreAdapter`] contract directly onto the Redis command set:
//! `SET`/`GET` for plain values, `INCR` for counters, `RPUSH`/`LRANGE` for
//! call logs and `FLUSHDB` for namespace wipes. Atomicity of `incr` and
//! per-key append order come from the server itself.
//!
//! Available behind the `redis-backend` feature.

use super::{StoreAdapter, StoreResult, error::StoreError};
use async_trait::async_trait;
use redis::AsyncCommands;

/// Store adapter over a Redis service
///
/// The connection is multiplexed: cloning the adapter (or calling it from
/// many tasks) shares one underlying connection, which matches the flat
/// single-namespace model this crate assumes.
///
/// Point it at a dedicated database. The cache flushes the whole namespace
/// on construction, and `FLUSHDB` means exactly that.
#[derive(Clone)]
pub struct RedisStore {
    conn: redis::aio::MultiplexedConnection,
}

impl RedisStore {
    /// Default service address, matching an unconfigured local Redis.
    pub const DEFAULT_URL: &'static str = "redis://127.0.0.1/";

    /// Connect to the service at [`Self::DEFAULT_URL`].
    pub async fn connect() -> StoreResult<Self> {
        Self::connect_url(Self::DEFAULT_URL).await
    }

    /// Connect to the service at `url` (e.g. `redis://127.0.0.1:6380/2`).
    pub async fn connect_url(url: &str) -> StoreResult<Self> {
        let client = redis::Client::open(url).map_err(map_err)?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(map_err)?;
        Ok(Self { conn })
    }
}

fn map_err(err: redis::RedisError) -> StoreError {
    if err.kind() == redis::ErrorKind::TypeError {
        StoreError::wrong_type(err.to_string())
    } else {
        StoreError::unavailable(err.to_string())
    }
}

#[async_trait]
impl StoreAdapter for RedisStore {
    async fn set(&self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.set(key, value).await.map_err(map_err)?;
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let value: Option<Vec<u8>> = conn.get(key).await.map_err(map_err)?;
        Ok(value)
    }

    async fn incr(&self, key: &str) -> StoreResult<i64> {
        let mut conn = self.conn.clone();
        let count: i64 = conn.incr(key, 1i64).await.map_err(map_err)?;
        Ok(count)
    }

    async fn append(&self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        let _: i64 = conn.rpush(key, value).await.map_err(map_err)?;
        Ok(())
    }

    async fn list_range(&self, key: &str, start: i64, stop: i64) -> StoreResult<Vec<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let items: Vec<Vec<u8>> = conn
            .lrange(key, start as isize, stop as isize)
            .await
            .map_err(map_err)?;
        Ok(items)
    }

    async fn flush_all(&self) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("FLUSHDB")
            .query_async(&mut conn)
            .await
            .map_err(map_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Needs a disposable local Redis; run with
    // `cargo test --features redis-backend -- --ignored`.
    #[tokio::test]
    #[ignore]
    async fn test_round_trip_against_local_redis() {
        let store = RedisStore::connect().await.unwrap();
        store.flush_all().await.unwrap();

        store.set("key", b"value".to_vec()).await.unwrap();
        assert_eq!(store.get("key").await.unwrap(), Some(b"value".to_vec()));
        assert_eq!(store.get("missing").await.unwrap(), None);

        assert_eq!(store.incr("counter").await.unwrap(), 1);
        assert_eq!(store.incr("counter").await.unwrap(), 2);

        store.append("list", b"a".to_vec()).await.unwrap();
        store.append("list", b"b".to_vec()).await.unwrap();
        assert_eq!(
            store.list_range("list", 0, -1).await.unwrap(),
            vec![b"a".to_vec(), b"b".to_vec()]
        );

        store.flush_all().await.unwrap();
        assert_eq!(store.get("key").await.unwrap(), None);
    }
}
