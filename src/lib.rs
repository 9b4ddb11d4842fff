//! Receipt-driven indexer for the HOT game event stream on NEAR.
//!
//! The host runtime feeds finalized receipts, one at a time and in chain
//! order, into [`IndexerEngine::on_receipt`] (or a channel consumed by
//! [`IndexerEngine::run`]). The engine scans each receipt's function-call
//! actions, decodes `EVENT_JSON:` log lines, and dispatches them to the
//! registered handlers, which emit store operations that maintain per-user
//! aggregates plus claim/buy event ledgers.

pub mod decoding;
pub mod engine;
pub mod handlers;
pub mod store;
pub mod types;

pub use engine::IndexerEngine;
pub use handlers::build_registry;
