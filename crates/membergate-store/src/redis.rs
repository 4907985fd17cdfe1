//! Redis-backed refresh-token store.
//!
//! Wire contract: `SET key value EX <seconds>` on put, `GET` on read,
//! `DEL` on delete, and a single Lua script for the compare-and-swap used
//! by rotation. Every operation runs under a bounded timeout so a slow
//! store fails the request with a retryable error instead of hanging it.

use std::time::Duration;

use redis::{AsyncCommands, Client, Script, aio::ConnectionManager};
use tracing::{debug, instrument};

use crate::{RefreshStore, StoreError, keys};

/// Replaces the stored token only when it still equals the presented one.
/// Runs atomically on the store, which is what closes the read-then-write
/// rotation race.
const SWAP_IF_CURRENT: &str = r#"
if redis.call('GET', KEYS[1]) == ARGV[1] then
    redis.call('SET', KEYS[1], ARGV[2], 'EX', ARGV[3])
    return 1
end
return 0
"#;

/// Refresh-token store over a managed Redis connection.
#[derive(Clone)]
pub struct RedisRefreshStore {
    conn: ConnectionManager,
    op_timeout: Duration,
}

impl std::fmt::Debug for RedisRefreshStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisRefreshStore")
            .field("op_timeout", &self.op_timeout)
            .finish_non_exhaustive()
    }
}

impl RedisRefreshStore {
    /// Connects to Redis and wraps the connection in a reconnecting manager.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the initial connection fails.
    pub async fn new(redis_url: &str, op_timeout: Duration) -> Result<Self, StoreError> {
        let client = Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;

        Ok(Self { conn, op_timeout })
    }

    async fn bounded<T>(
        &self,
        op: impl Future<Output = redis::RedisResult<T>>,
    ) -> Result<T, StoreError> {
        match tokio::time::timeout(self.op_timeout, op).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(StoreError::Unavailable(e)),
            Err(_) => Err(StoreError::Timeout(self.op_timeout)),
        }
    }
}

impl RefreshStore for RedisRefreshStore {
    #[instrument(skip(self, token), fields(store.operation = "SETEX"))]
    async fn put(&self, member_id: i64, token: &str, ttl: Duration) -> Result<(), StoreError> {
        let key = keys::refresh_token(member_id);
        let mut conn = self.conn.clone();

        self.bounded(conn.set_ex::<_, _, ()>(&key, token, ttl.as_secs()))
            .await?;

        debug!(store.key = %key, store.ttl_secs = %ttl.as_secs(), "Refresh record written");

        Ok(())
    }

    #[instrument(skip(self), fields(store.operation = "GET"))]
    async fn get(&self, member_id: i64) -> Result<String, StoreError> {
        let key = keys::refresh_token(member_id);
        let mut conn = self.conn.clone();

        self.bounded(conn.get::<_, Option<String>>(&key))
            .await?
            .ok_or(StoreError::NotFound)
    }

    #[instrument(skip(self), fields(store.operation = "DEL"))]
    async fn delete(&self, member_id: i64) -> Result<(), StoreError> {
        let key = keys::refresh_token(member_id);
        let mut conn = self.conn.clone();

        self.bounded(conn.del::<_, ()>(&key)).await?;

        debug!(store.key = %key, "Refresh record deleted");

        Ok(())
    }

    #[instrument(skip(self, expected, replacement), fields(store.operation = "CAS"))]
    async fn swap_if_current(
        &self,
        member_id: i64,
        expected: &str,
        replacement: &str,
        ttl: Duration,
    ) -> Result<bool, StoreError> {
        let key = keys::refresh_token(member_id);
        let mut conn = self.conn.clone();

        let script = Script::new(SWAP_IF_CURRENT);
        let swapped: i64 = self
            .bounded(
                script
                    .key(&key)
                    .arg(expected)
                    .arg(replacement)
                    .arg(ttl.as_secs())
                    .invoke_async(&mut conn),
            )
            .await?;

        debug!(store.key = %key, store.swapped = %(swapped == 1), "Refresh record rotation attempt");

        Ok(swapped == 1)
    }
}
