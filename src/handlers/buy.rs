use async_trait::async_trait;
use serde_json::Value;

use crate::decoding::EventParseError;
use crate::store::{BuyEvent, EntityStore, StoreOp};

use super::context::HandlerContext;
use super::error::HandlerError;
use super::traits::{MethodHandler, MethodTrigger, ReceiptHandler};
use super::users::resolve_user;

/// Transfer path: a `buy_asset` invocation whose log carries ownership
/// fields records the transfer in the seller's buy ledger.
///
/// The new owner is kept as a plain address string; no directory record is
/// created for it.
pub struct BuyAssetHandler;

#[async_trait]
impl ReceiptHandler for BuyAssetHandler {
    fn name(&self) -> &'static str {
        "BuyAssetHandler"
    }

    async fn handle(&self, ctx: &HandlerContext<'_>) -> Result<Vec<StoreOp>, HandlerError> {
        let old_owner_id = ctx.event.str_field("old_owner_id")?;
        let new_owner_id = ctx.event.str_field("new_owner_id")?;
        let amount = super::parse_amount("amount", ctx.event.str_field("amount")?)?;

        // The asset id lives in the invocation arguments, not the log.
        let asset_id = parse_asset_id(ctx.args)?;

        tracing::debug!(
            receipt_id = %ctx.receipt_id,
            asset_id,
            "buy_asset invocation"
        );

        let mut ops = Vec::new();
        let mut user = resolve_user(ctx.store(), &mut ops, old_owner_id).await?;

        let buy = BuyEvent {
            id: ctx.receipt_id.to_string(),
            asset_id,
            amount,
            old_owner_id: old_owner_id.to_string(),
            new_owner_id: new_owner_id.to_string(),
            timestamp: ctx.block_timestamp,
        };
        user.buy_events.push(buy.id.clone());

        ops.push(StoreOp::SaveBuyEvent(buy));
        ops.push(StoreOp::SaveUser(user));

        Ok(ops)
    }

    async fn initialize(&self, _store: &dyn EntityStore) -> Result<(), HandlerError> {
        tracing::info!("BuyAssetHandler initialized");
        Ok(())
    }
}

impl MethodHandler for BuyAssetHandler {
    fn triggers(&self) -> Vec<MethodTrigger> {
        vec![MethodTrigger::new("buy_asset")]
    }
}

fn parse_asset_id(args: &[u8]) -> Result<i64, HandlerError> {
    let value: Value = serde_json::from_slice(args).map_err(EventParseError::from)?;
    let object = value.as_object().ok_or(EventParseError::NotAnObject)?;
    let asset_id = object
        .get("asset_id")
        .ok_or(EventParseError::MissingKey("asset_id"))?;

    asset_id.as_i64().ok_or_else(|| HandlerError::Format {
        field: "asset_id",
        value: asset_id.to_string(),
    })
}
