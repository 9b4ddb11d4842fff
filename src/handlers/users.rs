//! User directory: lookup-or-create for per-address aggregate records.

use crate::store::{EntityStore, StoreOp, User};

use super::error::HandlerError;

/// Resolve the canonical record for an address.
///
/// On a miss the fresh zeroed record's save op is pushed before returning,
/// so it reaches the store ahead of any event record that references it.
pub async fn resolve_user(
    store: &dyn EntityStore,
    ops: &mut Vec<StoreOp>,
    address: &str,
) -> Result<User, HandlerError> {
    if let Some(user) = store.load_user(address).await? {
        return Ok(user);
    }

    let user = User::new(address);
    ops.push(StoreOp::SaveUser(user.clone()));
    Ok(user)
}

#[cfg(test)]
mod tests {
    use crate::store::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_miss_creates_zeroed_record() {
        let store = MemoryStore::new();
        let mut ops = Vec::new();

        let user = resolve_user(&store, &mut ops, "alice").await.unwrap();

        assert_eq!(user, User::new("alice"));
        assert_eq!(ops, vec![StoreOp::SaveUser(User::new("alice"))]);
    }

    #[tokio::test]
    async fn test_hit_returns_existing_without_ops() {
        let store = MemoryStore::new();
        store
            .apply(vec![StoreOp::SaveUser(User::new("alice"))])
            .await
            .unwrap();

        let mut ops = Vec::new();
        let user = resolve_user(&store, &mut ops, "alice").await.unwrap();

        assert_eq!(user.id, "alice");
        assert!(ops.is_empty());
        assert_eq!(store.user_count(), 1);
    }
}
