//! In-memory store, for tests and embedded use.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::types::{BuyEvent, ClaimEvent, StoreOp, User};
use super::{EntityStore, StoreError};

#[derive(Default)]
struct Tables {
    users: HashMap<String, User>,
    claim_events: HashMap<String, ClaimEvent>,
    buy_events: HashMap<String, BuyEvent>,
}

/// Hash-map backed [`EntityStore`].
///
/// The lock is held only for the duration of a synchronous map access, never
/// across an await point.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_count(&self) -> usize {
        self.tables.read().expect("store lock poisoned").users.len()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn load_user(&self, id: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().expect("store lock poisoned");
        Ok(tables.users.get(id).cloned())
    }

    async fn load_claim_event(&self, id: &str) -> Result<Option<ClaimEvent>, StoreError> {
        let tables = self.tables.read().expect("store lock poisoned");
        Ok(tables.claim_events.get(id).cloned())
    }

    async fn load_buy_event(&self, id: &str) -> Result<Option<BuyEvent>, StoreError> {
        let tables = self.tables.read().expect("store lock poisoned");
        Ok(tables.buy_events.get(id).cloned())
    }

    async fn apply(&self, ops: Vec<StoreOp>) -> Result<(), StoreError> {
        let mut tables = self.tables.write().expect("store lock poisoned");
        for op in ops {
            match op {
                StoreOp::SaveUser(user) => {
                    tables.users.insert(user.id.clone(), user);
                }
                StoreOp::SaveClaimEvent(event) => {
                    tables.claim_events.insert(event.id.clone(), event);
                }
                StoreOp::SaveBuyEvent(event) => {
                    tables.buy_events.insert(event.id.clone(), event);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::U256;

    use super::*;

    #[tokio::test]
    async fn test_load_missing_is_none() {
        let store = MemoryStore::new();
        assert!(store.load_user("alice").await.unwrap().is_none());
        assert!(store.load_claim_event("r1").await.unwrap().is_none());
        assert!(store.load_buy_event("r1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let store = MemoryStore::new();
        store
            .apply(vec![StoreOp::SaveUser(User::new("alice"))])
            .await
            .unwrap();

        let user = store.load_user("alice").await.unwrap().unwrap();
        assert_eq!(user, User::new("alice"));
    }

    #[tokio::test]
    async fn test_same_key_overwrites() {
        let store = MemoryStore::new();
        let mut user = User::new("alice");
        store
            .apply(vec![StoreOp::SaveUser(user.clone())])
            .await
            .unwrap();

        user.claimed = U256::from(42u64);
        store
            .apply(vec![StoreOp::SaveUser(user.clone())])
            .await
            .unwrap();

        assert_eq!(store.user_count(), 1);
        let loaded = store.load_user("alice").await.unwrap().unwrap();
        assert_eq!(loaded.claimed, U256::from(42u64));
    }
}
