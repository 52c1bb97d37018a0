use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The full workflow message of an execution. Only the parts the archiver reads
/// are typed; everything else stays as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct WorkflowMessage {
    #[serde(default)]
    pub meta: Value,
    #[serde(default)]
    pub payload: Value,
}

impl WorkflowMessage {
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    /// Collection name and version, when both are present as strings.
    pub fn collection(&self) -> Option<(&str, &str)> {
        let collection = self.meta.get("collection")?;
        let name = collection.get("name")?.as_str()?;
        let version = collection.get("version")?.as_str()?;
        Some((name, version))
    }

    /// The `granules` list of the execution payload, if there is one.
    pub fn granules(&self) -> Option<&Vec<Value>> {
        self.payload.get("granules")?.as_array()
    }

    pub fn is_provider_bearing(&self) -> bool {
        self.meta.get("provider").is_some_and(|provider| !provider.is_null())
    }

    pub fn provider_id(&self) -> Option<&str> {
        self.meta.get("provider")?.get("id")?.as_str()
    }
}
