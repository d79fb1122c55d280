//! Per-user memory of the last list result.

use async_trait::async_trait;
use catalogbot_types::DirectionSummary;
use dashmap::DashMap;
use tracing::trace;

/// Keyed store for each user's most recent list result.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, user_id: u64) -> Option<Vec<DirectionSummary>>;
    async fn put(&self, user_id: u64, rows: Vec<DirectionSummary>);
}

/// Process-local store. Entries live until restart; there is no eviction.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: DashMap<u64, Vec<DirectionSummary>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with a stored list.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, user_id: u64) -> Option<Vec<DirectionSummary>> {
        self.entries.get(&user_id).map(|rows| rows.clone())
    }

    async fn put(&self, user_id: u64, rows: Vec<DirectionSummary>) {
        trace!(target: "catalogbot::session", user_id, rows = rows.len(), "storing last list");
        self.entries.insert(user_id, rows);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<DirectionSummary> {
        (0..n)
            .map(|i| DirectionSummary {
                journal_name: Some(format!("J{}", i)),
                ..Default::default()
            })
            .collect()
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let store = MemorySessionStore::new();
        assert!(store.get(1).await.is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_put_overwrites_previous_list() {
        let store = MemorySessionStore::new();
        store.put(7, rows(3)).await;
        store.put(7, rows(1)).await;
        assert_eq!(store.get(7).await.unwrap().len(), 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let store = MemorySessionStore::new();
        store.put(1, rows(2)).await;
        store.put(2, rows(5)).await;
        assert_eq!(store.get(1).await.unwrap().len(), 2);
        assert_eq!(store.get(2).await.unwrap().len(), 5);
    }
}
