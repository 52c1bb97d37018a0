use crate::archive::unwrap::UnwrappedPayload;
use crate::types::event::WorkflowStatusEvent;
use serde_json::Value;
use tracing::{debug, error};

#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    StatusChange(WorkflowStatusEvent),
    Unrecognized,
}

impl Classification {
    pub fn event(&self) -> Option<&WorkflowStatusEvent> {
        match self {
            Classification::StatusChange(event) => Some(event),
            Classification::Unrecognized => None,
        }
    }
}

/// Decide whether the unwrapped payload is a workflow status event.
/// A miss is logged and is not an error.
pub fn classify(payload: &UnwrappedPayload) -> Classification {
    match payload {
        UnwrappedPayload::Innermost(value) => match WorkflowStatusEvent::decode(value) {
            Some(event) => {
                debug!(
                    detail_type = event.detail_type.as_deref().unwrap_or("-"),
                    source = event.source.as_deref().unwrap_or("-"),
                    execution_arn = event.execution_arn().unwrap_or("-"),
                    "Classified workflow status event"
                );
                Classification::StatusChange(event)
            }
            None => {
                error!(
                    payload_kind = value_kind(value),
                    "Could not parse details from dead letter message body, expected a workflow status event"
                );
                Classification::Unrecognized
            }
        },
        UnwrappedPayload::DepthExceeded { max_depth } => {
            error!(max_depth, "Could not parse details from dead letter message body, envelope too deep");
            Classification::Unrecognized
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
