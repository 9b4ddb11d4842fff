//! Handler error types.

use thiserror::Error;

use crate::decoding::EventParseError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Event parse error: {0}")]
    Parse(#[from] EventParseError),

    #[error("Field '{field}' is not a valid integer: '{value}'")]
    Format { field: &'static str, value: String },

    #[error("Accumulating '{field}' overflowed 256 bits")]
    Overflow { field: &'static str },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
