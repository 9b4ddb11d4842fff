//! Core traits for receipt handlers.
//!
//! Handlers implement these traits to receive decoded event logs, transform
//! the data, and produce store operations.

use async_trait::async_trait;

use crate::store::{EntityStore, StoreOp};

use super::context::HandlerContext;
use super::error::HandlerError;

/// Core trait that all receipt handlers must implement.
///
/// Handlers are registered at compile-time and invoked when a decoded log
/// line (or its enclosing function call) matches one of their triggers.
#[async_trait]
pub trait ReceiptHandler: Send + Sync + 'static {
    /// Unique name for this handler (used in logging).
    fn name(&self) -> &'static str;

    /// Process one decoded event log. Returns the store operations to apply
    /// transactionally; a handler that errors must have produced no effects.
    async fn handle(&self, ctx: &HandlerContext<'_>) -> Result<Vec<StoreOp>, HandlerError>;

    /// Optional: called once at startup for initialization.
    #[allow(unused_variables)]
    async fn initialize(&self, store: &dyn EntityStore) -> Result<(), HandlerError> {
        Ok(())
    }
}

/// Trigger for event-type-based handlers.
#[derive(Debug, Clone)]
pub struct EventTrigger {
    /// NEP-297 event discriminator (e.g. "ft_mint").
    pub event_type: String,
}

impl EventTrigger {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
        }
    }
}

/// Trigger for method-name-based handlers.
#[derive(Debug, Clone)]
pub struct MethodTrigger {
    /// Function-call method name (e.g. "buy_asset").
    pub method_name: String,
}

impl MethodTrigger {
    pub fn new(method_name: impl Into<String>) -> Self {
        Self {
            method_name: method_name.into(),
        }
    }
}

/// Marker trait for handlers keyed on the decoded event type.
pub trait EventHandler: ReceiptHandler {
    /// Event triggers this handler responds to.
    fn triggers(&self) -> Vec<EventTrigger>;
}

/// Marker trait for handlers keyed on the invoked method name.
pub trait MethodHandler: ReceiptHandler {
    /// Method triggers this handler responds to.
    fn triggers(&self) -> Vec<MethodTrigger>;
}
