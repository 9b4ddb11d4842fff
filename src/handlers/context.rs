//! Per-dispatch handler context.
//!
//! One context covers one decoded log line within one function-call action:
//! the receipt identity, the invocation that produced the log, the decoded
//! event, and read access to the store.

use crate::decoding::EventLog;
use crate::store::EntityStore;

/// Context provided to receipt handlers for a single dispatch.
pub struct HandlerContext<'a> {
    /// Base58 receipt id; the key for any event record this dispatch writes.
    pub receipt_id: &'a str,
    /// Block timestamp in nanoseconds.
    pub block_timestamp: u64,
    /// Method name of the enclosing function-call action.
    pub method_name: &'a str,
    /// Raw argument payload of the enclosing function-call action.
    pub args: &'a [u8],
    /// The decoded event log being dispatched.
    pub event: &'a EventLog,

    store: &'a dyn EntityStore,
}

impl<'a> HandlerContext<'a> {
    pub fn new(
        receipt_id: &'a str,
        block_timestamp: u64,
        method_name: &'a str,
        args: &'a [u8],
        event: &'a EventLog,
        store: &'a dyn EntityStore,
    ) -> Self {
        Self {
            receipt_id,
            block_timestamp,
            method_name,
            args,
            event,
            store,
        }
    }

    /// Read access to the store. Writes go through the returned op list.
    pub fn store(&self) -> &dyn EntityStore {
        self.store
    }
}
