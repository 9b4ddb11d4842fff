pub mod error;
pub mod memory;
pub mod migrations;
pub mod postgres;
pub mod types;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use types::{BuyEvent, ClaimEvent, StoreOp, User};

use async_trait::async_trait;

/// The store boundary: keyed load plus transactional save application.
///
/// The engine assumes read-after-write consistency — an op applied for one
/// dispatch is visible to loads in the next dispatch of the same receipt.
/// Durability and query serving are the implementation's concern.
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn load_user(&self, id: &str) -> Result<Option<User>, StoreError>;

    async fn load_claim_event(&self, id: &str) -> Result<Option<ClaimEvent>, StoreError>;

    async fn load_buy_event(&self, id: &str) -> Result<Option<BuyEvent>, StoreError>;

    /// Apply the operations in order, atomically.
    async fn apply(&self, ops: Vec<StoreOp>) -> Result<(), StoreError>;
}
