pub mod event_parsing;

pub use event_parsing::{parse_event_log, EventLog, EventParseError, EVENT_JSON_PREFIX};
