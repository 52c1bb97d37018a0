use crate::archive::resolver::WorkflowMessageResolver;
use crate::types::event::WorkflowStatusEvent;
use crate::types::message::WorkflowMessage;
use crate::utils::collection::construct_collection_id;
use serde_json::Value;
use tracing::{debug, error};

/// Identifiers pulled out of a resolved workflow message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageMetadata {
    pub collection_id: Option<String>,
    /// `None` when the payload has no granule list at all, as opposed to an empty one.
    pub granules: Option<Vec<Option<String>>>,
    pub provider_id: Option<String>,
}

impl MessageMetadata {
    pub fn from_message(message: &WorkflowMessage) -> Self {
        let collection_id = message.collection().map(|(name, version)| construct_collection_id(name, version));
        let granules = message.granules().map(|granules| granules.iter().map(granule_id).collect());
        let provider_id =
            if message.is_provider_bearing() { message.provider_id().map(str::to_string) } else { None };
        Self { collection_id, granules, provider_id }
    }
}

fn granule_id(granule: &Value) -> Option<String> {
    granule.get("granuleId").and_then(Value::as_str).map(str::to_string)
}

/// Resolve the event's workflow message and extract its identifiers.
/// Resolution failures are logged and yield empty metadata.
pub async fn extract_metadata(resolver: &dyn WorkflowMessageResolver, event: &WorkflowStatusEvent) -> MessageMetadata {
    match resolver.resolve(event).await {
        Ok(message) => {
            let metadata = MessageMetadata::from_message(&message);
            debug!(
                collection_id = ?metadata.collection_id,
                provider_id = ?metadata.provider_id,
                granule_count = metadata.granules.as_ref().map(Vec::len),
                "Resolved workflow message"
            );
            metadata
        }
        Err(e) => {
            error!(
                execution_arn = event.execution_arn().unwrap_or("-"),
                error = %e,
                "Failed to resolve workflow message from execution event"
            );
            MessageMetadata::default()
        }
    }
}
