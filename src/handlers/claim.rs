use async_trait::async_trait;

use crate::store::{ClaimEvent, EntityStore, StoreOp};

use super::context::HandlerContext;
use super::error::HandlerError;
use super::traits::{EventHandler, EventTrigger, ReceiptHandler};
use super::users::resolve_user;

/// Claim path: every `ft_mint` event credits the minted amount to the
/// owner's running total and records the mint in the claim ledger.
pub struct ClaimHandler;

#[async_trait]
impl ReceiptHandler for ClaimHandler {
    fn name(&self) -> &'static str {
        "ClaimHandler"
    }

    async fn handle(&self, ctx: &HandlerContext<'_>) -> Result<Vec<StoreOp>, HandlerError> {
        let owner_id = ctx.event.str_field("owner_id")?;
        let amount = super::parse_amount("amount", ctx.event.str_field("amount")?)?;

        let mut ops = Vec::new();
        let mut user = resolve_user(ctx.store(), &mut ops, owner_id).await?;

        user.claimed = user
            .claimed
            .checked_add(amount)
            .ok_or(HandlerError::Overflow { field: "claimed" })?;

        let claim = ClaimEvent {
            id: ctx.receipt_id.to_string(),
            user: user.id.clone(),
            amount,
            timestamp: ctx.block_timestamp,
        };
        user.claim_events.push(claim.id.clone());

        // Event record first: the ledger entry on the user is only valid
        // once the event it points at exists.
        ops.push(StoreOp::SaveClaimEvent(claim));
        ops.push(StoreOp::SaveUser(user));

        Ok(ops)
    }

    async fn initialize(&self, _store: &dyn EntityStore) -> Result<(), HandlerError> {
        tracing::info!("ClaimHandler initialized");
        Ok(())
    }
}

impl EventHandler for ClaimHandler {
    fn triggers(&self) -> Vec<EventTrigger> {
        vec![EventTrigger::new("ft_mint")]
    }
}
