//! Receipt context handed over by the host runtime.
//!
//! The indexer does not fetch or order chain data itself: the host presents
//! one finalized receipt at a time, already in chain order. These types are
//! the wire shape of that handoff.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A 32-byte content-addressed hash, shown canonically as base58.
///
/// Receipt ids of this form key the claim/buy event records.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CryptoHash(pub [u8; 32]);

#[derive(Debug, Error)]
pub enum HashParseError {
    #[error("invalid base58: {0}")]
    Base58(#[from] bs58::decode::Error),

    #[error("expected 32 bytes, got {0}")]
    Length(usize),
}

impl CryptoHash {
    pub fn to_base58(&self) -> String {
        bs58::encode(&self.0).into_string()
    }
}

impl fmt::Display for CryptoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for CryptoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CryptoHash({})", self.to_base58())
    }
}

impl FromStr for CryptoHash {
    type Err = HashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s).into_vec()?;
        let hash: [u8; 32] = bytes
            .try_into()
            .map_err(|v: Vec<u8>| HashParseError::Length(v.len()))?;
        Ok(CryptoHash(hash))
    }
}

impl Serialize for CryptoHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for CryptoHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One action requested within a receipt.
///
/// Only function calls carry data the indexer cares about; every other
/// variant is skipped without side effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    FunctionCall {
        method_name: String,
        /// Raw argument payload, expected to be JSON. Base64 on the wire.
        #[serde(with = "base64_bytes")]
        args: Vec<u8>,
    },
    Transfer,
    Other,
}

/// A single finalized receipt plus its execution outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptContext {
    pub id: CryptoHash,
    /// Block timestamp in nanoseconds.
    pub block_timestamp: u64,
    pub actions: Vec<Action>,
    /// Log lines emitted during execution, in emission order.
    pub logs: Vec<String>,
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base58_roundtrip() {
        let hash = CryptoHash([7u8; 32]);
        let encoded = hash.to_base58();
        let decoded: CryptoHash = encoded.parse().unwrap();
        assert_eq!(hash, decoded);
    }

    #[test]
    fn test_hash_rejects_wrong_length() {
        // base58 of fewer than 32 bytes
        let short = bs58::encode(&[1u8, 2, 3]).into_string();
        match short.parse::<CryptoHash>() {
            Err(HashParseError::Length(3)) => {}
            other => panic!("expected length error, got {:?}", other),
        }
    }

    #[test]
    fn test_receipt_wire_shape() {
        let json = format!(
            r#"{{
                "id": "{}",
                "block_timestamp": 1700000000000000000,
                "actions": [
                    {{"kind": "transfer"}},
                    {{"kind": "function_call", "method_name": "buy_asset", "args": "eyJhc3NldF9pZCI6N30="}}
                ],
                "logs": ["EVENT_JSON:{{\"event\":\"x\",\"data\":[{{}}]}}"]
            }}"#,
            CryptoHash([9u8; 32]).to_base58()
        );

        let receipt: ReceiptContext = serde_json::from_str(&json).unwrap();
        assert_eq!(receipt.id, CryptoHash([9u8; 32]));
        assert_eq!(receipt.actions.len(), 2);
        match &receipt.actions[1] {
            Action::FunctionCall { method_name, args } => {
                assert_eq!(method_name, "buy_asset");
                assert_eq!(args, br#"{"asset_id":7}"#);
            }
            other => panic!("expected function call, got {:?}", other),
        }
    }
}
