//! Handler registration system.
//!
//! The registry maintains a mapping from event/method triggers to their
//! handlers. The two tables are looked up independently per log line: a
//! single line can match an event handler AND the enclosing call can match
//! a method handler.

use std::collections::HashMap;
use std::sync::Arc;

use super::traits::{EventHandler, MethodHandler, ReceiptHandler};

/// Registry of all receipt handlers, built at startup.
pub struct HandlerRegistry {
    /// Event handlers indexed by NEP-297 event type
    event_handlers: HashMap<String, Vec<Arc<dyn EventHandler>>>,
    /// Method handlers indexed by function-call method name
    method_handlers: HashMap<String, Vec<Arc<dyn MethodHandler>>>,
    /// All handlers for initialization (registration order)
    all_handlers: Vec<Arc<dyn ReceiptHandler>>,
}

impl HandlerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            event_handlers: HashMap::new(),
            method_handlers: HashMap::new(),
            all_handlers: Vec::new(),
        }
    }

    /// Register an event handler.
    ///
    /// The handler will be invoked for every decoded log whose event type
    /// matches one of its triggers.
    pub fn register_event_handler<H: EventHandler + 'static>(&mut self, handler: H) {
        let handler = Arc::new(handler);

        for trigger in handler.triggers() {
            self.event_handlers
                .entry(trigger.event_type)
                .or_default()
                .push(handler.clone());
        }

        self.all_handlers.push(handler);
    }

    /// Register a method handler.
    ///
    /// The handler will be invoked for every decoded log inside a function
    /// call whose method name matches one of its triggers.
    pub fn register_method_handler<H: MethodHandler + 'static>(&mut self, handler: H) {
        let handler = Arc::new(handler);

        for trigger in handler.triggers() {
            self.method_handlers
                .entry(trigger.method_name)
                .or_default()
                .push(handler.clone());
        }

        self.all_handlers.push(handler);
    }

    /// Get handlers for a specific event type.
    pub fn handlers_for_event(&self, event_type: &str) -> Vec<Arc<dyn EventHandler>> {
        self.event_handlers
            .get(event_type)
            .cloned()
            .unwrap_or_default()
    }

    /// Get handlers for a specific method name.
    pub fn handlers_for_method(&self, method_name: &str) -> Vec<Arc<dyn MethodHandler>> {
        self.method_handlers
            .get(method_name)
            .cloned()
            .unwrap_or_default()
    }

    /// Get all handlers for initialization.
    pub fn all_handlers(&self) -> &[Arc<dyn ReceiptHandler>] {
        &self.all_handlers
    }

    /// Check if any handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.all_handlers.is_empty()
    }

    /// Get count of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.all_handlers.len()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
