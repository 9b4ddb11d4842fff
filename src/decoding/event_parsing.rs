//! NEP-297 structured event extraction from execution log lines.
//!
//! Contracts announce application-level events by emitting log lines of the
//! form `EVENT_JSON:{...}`. The JSON object carries an `event` discriminator
//! and a `data` array of payload objects.

use serde_json::{Map, Value};
use thiserror::Error;

/// Marker prefix identifying a structured event log line.
pub const EVENT_JSON_PREFIX: &str = "EVENT_JSON:";

#[derive(Debug, Error)]
pub enum EventParseError {
    #[error("log line does not start with the event marker")]
    MissingMarker,

    #[error("invalid event JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("payload is not a JSON object")]
    NotAnObject,

    #[error("missing required key: {0}")]
    MissingKey(&'static str),

    #[error("key '{key}' has unexpected type (expected {expected})")]
    WrongType {
        key: &'static str,
        expected: &'static str,
    },

    #[error("'data' array is empty")]
    EmptyData,
}

/// A decoded event: the type discriminator plus the first `data` element.
///
/// Only `data[0]` is consumed; trailing elements are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct EventLog {
    pub event: String,
    pub data: Map<String, Value>,
}

impl EventLog {
    /// Required string field from the data object.
    pub fn str_field(&self, key: &'static str) -> Result<&str, EventParseError> {
        let value = self.data.get(key).ok_or(EventParseError::MissingKey(key))?;
        value.as_str().ok_or(EventParseError::WrongType {
            key,
            expected: "string",
        })
    }
}

/// Strip the `EVENT_JSON:` marker and decode the remainder.
///
/// The caller filters on the marker; a line without it is a contract
/// violation here, not a skip. Any malformed or incomplete payload is an
/// error — there is no partial recovery for a marked line.
pub fn parse_event_log(log: &str) -> Result<EventLog, EventParseError> {
    let payload = log
        .strip_prefix(EVENT_JSON_PREFIX)
        .ok_or(EventParseError::MissingMarker)?;

    let value: Value = serde_json::from_str(payload)?;
    let object = value.as_object().ok_or(EventParseError::NotAnObject)?;

    let event = object
        .get("event")
        .ok_or(EventParseError::MissingKey("event"))?
        .as_str()
        .ok_or(EventParseError::WrongType {
            key: "event",
            expected: "string",
        })?
        .to_string();

    let data = object
        .get("data")
        .ok_or(EventParseError::MissingKey("data"))?
        .as_array()
        .ok_or(EventParseError::WrongType {
            key: "data",
            expected: "array",
        })?;

    let first = data.first().ok_or(EventParseError::EmptyData)?;
    let data = first
        .as_object()
        .cloned()
        .ok_or(EventParseError::WrongType {
            key: "data[0]",
            expected: "object",
        })?;

    Ok(EventLog { event, data })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ft_mint_log() {
        let log = r#"EVENT_JSON:{"event":"ft_mint","data":[{"owner_id":"alice","amount":"100"}]}"#;
        let parsed = parse_event_log(log).unwrap();

        assert_eq!(parsed.event, "ft_mint");
        assert_eq!(parsed.str_field("owner_id").unwrap(), "alice");
        assert_eq!(parsed.str_field("amount").unwrap(), "100");
    }

    #[test]
    fn test_extra_data_elements_ignored() {
        let log = r#"EVENT_JSON:{"event":"ft_mint","data":[{"owner_id":"a"},{"owner_id":"b"}]}"#;
        let parsed = parse_event_log(log).unwrap();

        assert_eq!(parsed.str_field("owner_id").unwrap(), "a");
    }

    #[test]
    fn test_standard_metadata_tolerated() {
        // NEP-297 lines carry standard/version keys; they are passed over.
        let log = r#"EVENT_JSON:{"standard":"nep141","version":"1.0.0","event":"ft_mint","data":[{"owner_id":"alice","amount":"1"}]}"#;
        let parsed = parse_event_log(log).unwrap();
        assert_eq!(parsed.event, "ft_mint");
    }

    #[test]
    fn test_missing_marker() {
        assert!(matches!(
            parse_event_log(r#"{"event":"x","data":[{}]}"#),
            Err(EventParseError::MissingMarker)
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            parse_event_log("EVENT_JSON:{not json"),
            Err(EventParseError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_missing_event_key() {
        assert!(matches!(
            parse_event_log(r#"EVENT_JSON:{"data":[{}]}"#),
            Err(EventParseError::MissingKey("event"))
        ));
    }

    #[test]
    fn test_missing_data_key() {
        assert!(matches!(
            parse_event_log(r#"EVENT_JSON:{"event":"x"}"#),
            Err(EventParseError::MissingKey("data"))
        ));
    }

    #[test]
    fn test_empty_data_array() {
        assert!(matches!(
            parse_event_log(r#"EVENT_JSON:{"event":"x","data":[]}"#),
            Err(EventParseError::EmptyData)
        ));
    }

    #[test]
    fn test_non_object_first_element() {
        assert!(matches!(
            parse_event_log(r#"EVENT_JSON:{"event":"x","data":["s"]}"#),
            Err(EventParseError::WrongType { key: "data[0]", .. })
        ));
    }

    #[test]
    fn test_str_field_wrong_type() {
        let log = r#"EVENT_JSON:{"event":"x","data":[{"amount":5}]}"#;
        let parsed = parse_event_log(log).unwrap();
        assert!(matches!(
            parsed.str_field("amount"),
            Err(EventParseError::WrongType { key: "amount", .. })
        ));
    }
}
