//! Indexer engine that drives handler execution.
//!
//! The engine receives finalized receipts, scans their function-call
//! actions for `EVENT_JSON:` log lines, and invokes registered handlers.
//! Ops from each handler invocation are applied before the next one runs,
//! so later logs in the same receipt observe earlier writes.

use std::sync::Arc;

use tokio::sync::mpsc::Receiver;

use crate::decoding::{parse_event_log, EVENT_JSON_PREFIX};
use crate::handlers::{HandlerContext, HandlerError, HandlerRegistry};
use crate::store::EntityStore;
use crate::types::{Action, ReceiptContext};

/// The engine processes receipts one at a time, in the order presented.
///
/// The host runtime owns scheduling and chain ordering; each receipt is
/// fully processed (or fails fatally) before control returns.
pub struct IndexerEngine {
    registry: Arc<HandlerRegistry>,
    store: Arc<dyn EntityStore>,
}

impl IndexerEngine {
    pub fn new(registry: Arc<HandlerRegistry>, store: Arc<dyn EntityStore>) -> Self {
        Self { registry, store }
    }

    /// Run handler initialization once at startup.
    pub async fn initialize(&self) -> Result<(), HandlerError> {
        for handler in self.registry.all_handlers() {
            tracing::debug!("Initializing handler: {}", handler.name());
            handler.initialize(self.store.as_ref()).await?;
        }
        Ok(())
    }

    /// Process one finalized receipt.
    ///
    /// Actions are visited in their given order, never reordered or
    /// deduplicated. Any parse or store failure aborts the remainder of
    /// the receipt and surfaces to the caller; ops already applied by
    /// earlier successful dispatches stay applied.
    pub async fn on_receipt(&self, receipt: &ReceiptContext) -> Result<(), HandlerError> {
        for action in &receipt.actions {
            self.handle_action(action, receipt).await?;
        }
        Ok(())
    }

    async fn handle_action(
        &self,
        action: &Action,
        receipt: &ReceiptContext,
    ) -> Result<(), HandlerError> {
        let Action::FunctionCall { method_name, args } = action else {
            return Ok(());
        };

        let receipt_id = receipt.id.to_base58();

        for log in &receipt.logs {
            if !log.starts_with(EVENT_JSON_PREFIX) {
                continue;
            }

            let event = parse_event_log(log)?;
            tracing::debug!(event = %event.event, receipt_id = %receipt_id, "decoded event log");

            let ctx = HandlerContext::new(
                &receipt_id,
                receipt.block_timestamp,
                method_name,
                args,
                &event,
                self.store.as_ref(),
            );

            // The two lookups are independent: one log line can fire an
            // event handler and, through its enclosing call, a method
            // handler as well.
            for handler in self.registry.handlers_for_event(&event.event) {
                let ops = handler.handle(&ctx).await?;
                self.store.apply(ops).await?;
            }

            for handler in self.registry.handlers_for_method(method_name) {
                let ops = handler.handle(&ctx).await?;
                self.store.apply(ops).await?;
            }
        }

        Ok(())
    }

    /// Consume receipts from the host runtime until the channel closes.
    ///
    /// Single-consumer sequential processing: the next receipt is not read
    /// until the current one completes.
    pub async fn run(&self, mut receipts: Receiver<ReceiptContext>) -> Result<(), HandlerError> {
        while let Some(receipt) = receipts.recv().await {
            self.on_receipt(&receipt).await?;
        }
        tracing::info!("Receipt stream closed, engine shutting down");
        Ok(())
    }
}
