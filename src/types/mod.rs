pub mod config;
pub mod receipt;

pub use receipt::{Action, CryptoHash, ReceiptContext};
