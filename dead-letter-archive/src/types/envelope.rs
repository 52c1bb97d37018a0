use serde_json::{Map, Value};

/// Keys under which a queue record carries its payload: `body` on event-source
/// records, `Body` on messages received through the SDK.
const BODY_KEYS: [&str; 2] = ["body", "Body"];
const ERROR_KEY: &str = "error";

/// One decoded layer of a dead letter envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordLayer {
    /// A queue record whose consumer attached a failure.
    Failure { error: Option<String>, body: Value },
    /// A queue record with no failure attached.
    Queue { body: Value },
    /// Not a queue record. This is where unwrapping stops.
    Payload(Value),
}

impl RecordLayer {
    /// Decode a single layer. Never fails: anything that is not a queue record is a `Payload`.
    pub fn decode(value: Value) -> Self {
        let Value::Object(map) = value else {
            return RecordLayer::Payload(value);
        };
        let Some(raw_body) = body_of(&map) else {
            return RecordLayer::Payload(Value::Object(map));
        };
        let body = parse_body(raw_body);

        match map.get(ERROR_KEY) {
            Some(error) => RecordLayer::Failure { error: error_text(error), body },
            None => RecordLayer::Queue { body },
        }
    }

    pub fn is_queue_record(value: &Value) -> bool {
        value.as_object().is_some_and(Self::is_queue_record_fields)
    }

    pub fn is_queue_record_fields(fields: &Map<String, Value>) -> bool {
        body_of(fields).is_some()
    }
}

fn body_of(map: &Map<String, Value>) -> Option<&Value> {
    BODY_KEYS.iter().find_map(|key| map.get(*key))
}

/// Bodies arrive JSON-encoded as strings or already decoded. A string that is
/// not JSON stays a plain string payload.
fn parse_body(body: &Value) -> Value {
    match body {
        Value::String(raw) => serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.clone())),
        other => other.clone(),
    }
}

fn error_text(error: &Value) -> Option<String> {
    match error {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
