//! Process-local refresh-token store.
//!
//! Implements the same contract as the Redis store over a mutexed map,
//! including TTL lapse and compare-and-swap. Used by unit tests and local
//! development; nothing here survives a process restart.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::{RefreshStore, StoreError};

#[derive(Debug, Clone)]
struct Entry {
    token: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// In-memory [`RefreshStore`] implementation.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRefreshStore {
    entries: Arc<Mutex<HashMap<i64, Entry>>>,
}

impl InMemoryRefreshStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RefreshStore for InMemoryRefreshStore {
    async fn put(&self, member_id: i64, token: &str, ttl: Duration) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().expect("store mutex poisoned");
        entries.insert(
            member_id,
            Entry {
                token: token.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn get(&self, member_id: i64) -> Result<String, StoreError> {
        let mut entries = self.entries.lock().expect("store mutex poisoned");
        match entries.get(&member_id) {
            Some(entry) if entry.is_live() => Ok(entry.token.clone()),
            Some(_) => {
                // Lapsed entry: drop it, same observable outcome as Redis TTL.
                entries.remove(&member_id);
                Err(StoreError::NotFound)
            }
            None => Err(StoreError::NotFound),
        }
    }

    async fn delete(&self, member_id: i64) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().expect("store mutex poisoned");
        entries.remove(&member_id);
        Ok(())
    }

    async fn swap_if_current(
        &self,
        member_id: i64,
        expected: &str,
        replacement: &str,
        ttl: Duration,
    ) -> Result<bool, StoreError> {
        let mut entries = self.entries.lock().expect("store mutex poisoned");
        match entries.get(&member_id) {
            Some(entry) if entry.is_live() && entry.token == expected => {
                entries.insert(
                    member_id,
                    Entry {
                        token: replacement.to_string(),
                        expires_at: Instant::now() + ttl,
                    },
                );
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn test_put_overwrites_prior_value() {
        let store = InMemoryRefreshStore::new();
        store.put(1, "first", TTL).await.unwrap();
        store.put(1, "second", TTL).await.unwrap();
        assert_eq!(store.get(1).await.unwrap(), "second");
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let store = InMemoryRefreshStore::new();
        assert!(matches!(store.get(7).await, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_lapsed_entry_is_not_found() {
        let store = InMemoryRefreshStore::new();
        store.put(1, "short-lived", Duration::ZERO).await.unwrap();
        assert!(matches!(store.get(1).await, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = InMemoryRefreshStore::new();
        store.put(1, "token", TTL).await.unwrap();
        store.delete(1).await.unwrap();
        store.delete(1).await.unwrap();
        assert!(matches!(store.get(1).await, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_swap_if_current_happy_path() {
        let store = InMemoryRefreshStore::new();
        store.put(1, "current", TTL).await.unwrap();
        assert!(store.swap_if_current(1, "current", "next", TTL).await.unwrap());
        assert_eq!(store.get(1).await.unwrap(), "next");
    }

    #[tokio::test]
    async fn test_swap_if_current_rejects_mismatch_and_absence() {
        let store = InMemoryRefreshStore::new();
        assert!(!store.swap_if_current(1, "anything", "next", TTL).await.unwrap());

        store.put(1, "current", TTL).await.unwrap();
        assert!(!store.swap_if_current(1, "stale", "next", TTL).await.unwrap());
        assert_eq!(store.get(1).await.unwrap(), "current");
    }
}
