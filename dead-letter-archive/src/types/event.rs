use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A workflow execution "status changed" event.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WorkflowStatusEvent {
    #[serde(default, deserialize_with = "lenient_string")]
    pub time: Option<String>,
    #[serde(default, rename = "detail-type", deserialize_with = "lenient_string")]
    pub detail_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub source: Option<String>,
    pub detail: ExecutionDetail,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionDetail {
    #[serde(default, deserialize_with = "lenient_string")]
    pub execution_arn: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub state_machine_arn: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    /// JSON-encoded workflow message the execution started with.
    #[serde(default, deserialize_with = "lenient_string")]
    pub input: Option<String>,
    /// JSON-encoded workflow message the execution finished with.
    #[serde(default, deserialize_with = "lenient_string")]
    pub output: Option<String>,
}

impl WorkflowStatusEvent {
    /// Decode `payload` as a status event. Requires an object with an object-valued
    /// `detail`; individual fields of the wrong type decode as `None`.
    pub fn decode(payload: &Value) -> Option<Self> {
        if !payload.get("detail").is_some_and(Value::is_object) {
            return None;
        }
        WorkflowStatusEvent::deserialize(payload).ok()
    }

    pub fn execution_arn(&self) -> Option<&str> {
        self.detail.execution_arn.as_deref()
    }
}

/// Accept any JSON value, keeping it only when it is a string.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => Some(value),
        _ => None,
    })
}
