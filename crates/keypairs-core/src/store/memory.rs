// ABOUTME: In-process keypair store behind a tokio RwLock.
// ABOUTME: Used by tests and embedders that don't need durability.

use super::{duplicate, not_found, KeypairStore, Result};
use crate::model::Keypair;
use async_trait::async_trait;
use std::collections::{btree_map::Entry, BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Records by user, then by name (BTreeMap keeps list order stable).
type Records = HashMap<String, BTreeMap<String, Keypair>>;

#[derive(Debug, Clone, Default)]
pub struct MemoryKeypairStore {
    records: Arc<RwLock<Records>>,
}

impl MemoryKeypairStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeypairStore for MemoryKeypairStore {
    async fn get(&self, user_id: &str, name: &str) -> Result<Keypair> {
        let records = self.records.read().await;
        records
            .get(user_id)
            .and_then(|by_name| by_name.get(name))
            .cloned()
            .ok_or_else(|| not_found(user_id, name))
    }

    async fn list(&self, user_id: &str) -> Result<Vec<Keypair>> {
        let records = self.records.read().await;
        Ok(records
            .get(user_id)
            .map(|by_name| by_name.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn create(&self, keypair: &Keypair) -> Result<()> {
        // Check and insert under one write guard.
        let mut records = self.records.write().await;
        match records
            .entry(keypair.user_id.clone())
            .or_default()
            .entry(keypair.name.clone())
        {
            Entry::Occupied(_) => Err(duplicate(keypair)),
            Entry::Vacant(slot) => {
                slot.insert(keypair.clone());
                Ok(())
            }
        }
    }

    async fn delete(&self, user_id: &str, name: &str) -> Result<()> {
        let mut records = self.records.write().await;
        let by_name = records
            .get_mut(user_id)
            .ok_or_else(|| not_found(user_id, name))?;
        by_name.remove(name).ok_or_else(|| not_found(user_id, name))?;
        if by_name.is_empty() {
            records.remove(user_id);
        }
        Ok(())
    }

    async fn count(&self, user_id: &str) -> Result<usize> {
        let records = self.records.read().await;
        Ok(records.get(user_id).map_or(0, BTreeMap::len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use chrono::Utc;

    fn keypair(user: &str, name: &str) -> Keypair {
        Keypair {
            user_id: user.to_string(),
            name: name.to_string(),
            public_key: format!("ssh-ed25519 AAAA{name}"),
            fingerprint: format!("fp:{name}"),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_crud() {
        let store = MemoryKeypairStore::new();
        store.create(&keypair("u1", "b")).await.unwrap();
        store.create(&keypair("u1", "a")).await.unwrap();

        let fetched = store.get("u1", "a").await.unwrap();
        assert_eq!(fetched.fingerprint, "fp:a");

        let names: Vec<String> = store
            .list("u1")
            .await
            .unwrap()
            .into_iter()
            .map(|k| k.name)
            .collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(store.count("u1").await.unwrap(), 2);

        store.delete("u1", "a").await.unwrap();
        assert!(matches!(
            store.get("u1", "a").await,
            Err(StoreError::NotFound { .. })
        ));
        assert_eq!(store.count("u1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_rejected_and_original_kept() {
        let store = MemoryKeypairStore::new();
        store.create(&keypair("u1", "a")).await.unwrap();

        let mut second = keypair("u1", "a");
        second.fingerprint = "fp:other".to_string();
        assert!(matches!(
            store.create(&second).await,
            Err(StoreError::DuplicateName { .. })
        ));
        assert_eq!(store.get("u1", "a").await.unwrap().fingerprint, "fp:a");
    }

    #[tokio::test]
    async fn test_same_name_different_users() {
        let store = MemoryKeypairStore::new();
        store.create(&keypair("u1", "a")).await.unwrap();
        store.create(&keypair("u2", "a")).await.unwrap();
        assert_eq!(store.count("u1").await.unwrap(), 1);
        assert_eq!(store.count("u2").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_missing_user_is_empty() {
        let store = MemoryKeypairStore::new();
        assert!(store.list("nobody").await.unwrap().is_empty());
        assert_eq!(store.count("nobody").await.unwrap(), 0);
        assert!(matches!(
            store.delete("nobody", "x").await,
            Err(StoreError::NotFound { .. })
        ));
    }
}
