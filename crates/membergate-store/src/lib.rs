//! # Membergate Store
//!
//! The refresh-token record store: a TTL-bounded mapping from a member's
//! lookup key to the refresh token currently on record for them. The
//! stored value is the sole source of truth for refresh validity; a
//! well-signed, unexpired refresh token that is no longer the one on
//! record is stale and must be rejected.
//!
//! - [`RefreshStore`]: the store interface, including the atomic
//!   compare-and-swap used by rotation
//! - [`RedisRefreshStore`]: production implementation over Redis
//! - [`InMemoryRefreshStore`]: process-local implementation for tests and
//!   local development

use std::future::Future;
use std::time::Duration;

pub mod keys;
pub mod memory;
pub mod redis;

pub use self::memory::InMemoryRefreshStore;
pub use self::redis::RedisRefreshStore;

/// Error type for store operations.
///
/// `Unavailable` and `Timeout` are retryable infrastructure failures and
/// are never to be conflated with `NotFound` ("no session, log in again").
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no refresh record for key")]
    NotFound,

    #[error("refresh store unavailable: {0}")]
    Unavailable(#[from] ::redis::RedisError),

    #[error("refresh store operation timed out after {0:?}")]
    Timeout(Duration),
}

/// TTL-bounded refresh-token record store, keyed by member id.
///
/// At most one record is live per member; `put` and `swap_if_current`
/// reset the TTL, `delete` is idempotent, and an untouched record lapses
/// when its TTL elapses.
pub trait RefreshStore: Send + Sync {
    /// Upserts the record, overwriting any prior value and resetting the TTL.
    fn put(
        &self,
        member_id: i64,
        token: &str,
        ttl: Duration,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Returns the token currently on record.
    ///
    /// Fails with [`StoreError::NotFound`] when the record is absent or its
    /// TTL has elapsed.
    fn get(&self, member_id: i64) -> impl Future<Output = Result<String, StoreError>> + Send;

    /// Removes the record. Deleting a missing record is not an error.
    fn delete(&self, member_id: i64) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Atomically replaces the record with `replacement` if and only if the
    /// stored value equals `expected`, resetting the TTL.
    ///
    /// Returns `false` when the record is absent or holds a different
    /// token; the caller treats that as a stale or replayed rotation
    /// attempt. The comparison and write happen as one step on the store,
    /// so two concurrent rotations for the same member leave exactly one
    /// winner.
    fn swap_if_current(
        &self,
        member_id: i64,
        expected: &str,
        replacement: &str,
        ttl: Duration,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;
}
