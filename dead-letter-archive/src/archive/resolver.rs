use crate::core::client::storage::StorageClient;
use crate::core::client::workflow::ExecutionHistoryClient;
use crate::error::ResolveError;
use crate::types::constant::{RUNNING_STATUS, SUCCEEDED_STATUS, UNKNOWN_EXECUTION};
use crate::types::event::WorkflowStatusEvent;
use crate::types::history::failed_step_message;
use crate::types::message::WorkflowMessage;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

const REMOTE_POINTER_KEY: &str = "replace";
const ROOT_TARGET_PATH: &str = "$";

/// Reconstructs the full workflow message referenced by an execution event.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkflowMessageResolver: Send + Sync {
    async fn resolve(&self, event: &WorkflowStatusEvent) -> Result<WorkflowMessage, ResolveError>;
}

/// Pointer to a message body that was too large to travel inline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RemoteMessagePointer {
    pub bucket: String,
    pub key: String,
    #[serde(default)]
    pub target_path: Option<String>,
}

impl RemoteMessagePointer {
    pub fn from_message(message: &Value) -> Result<Option<Self>, ResolveError> {
        match message.get(REMOTE_POINTER_KEY) {
            None | Some(Value::Null) => Ok(None),
            Some(pointer) => {
                serde_json::from_value(pointer.clone()).map(Some).map_err(ResolveError::InvalidRemotePointer)
            }
        }
    }
}

/// Resolves the workflow message of an execution event, following remote
/// pointers through the storage client.
///
/// With an execution history client, executions that ended without succeeding
/// resolve to the message of their last failed step. The message carried inline
/// by the event is used when there is no history client or the history has no
/// usable failed step.
pub struct ExecutionEventResolver {
    storage: Arc<dyn StorageClient>,
    history: Option<Arc<dyn ExecutionHistoryClient>>,
}

impl ExecutionEventResolver {
    pub fn new(storage: Arc<dyn StorageClient>) -> Self {
        Self { storage, history: None }
    }

    pub fn with_history(mut self, history: Arc<dyn ExecutionHistoryClient>) -> Self {
        self.history = Some(history);
        self
    }

    /// The last failed step's message, for executions that neither run nor succeeded.
    /// History lookup failures are logged and yield `None`.
    async fn failed_step_message(&self, event: &WorkflowStatusEvent) -> Option<String> {
        let history = self.history.as_ref()?;
        if matches!(event.detail.status.as_deref(), Some(RUNNING_STATUS) | Some(SUCCEEDED_STATUS)) {
            return None;
        }
        let execution_arn = event.execution_arn()?;

        match history.get_execution_history(execution_arn).await {
            Ok(events) => {
                let message = failed_step_message(&events).map(str::to_string);
                if message.is_none() {
                    debug!(execution_arn = %execution_arn, "No failed step message in execution history");
                }
                message
            }
            Err(e) => {
                warn!(
                    execution_arn = %execution_arn,
                    error = %e,
                    "Failed to read execution history, using the event's inline message"
                );
                None
            }
        }
    }

    /// Succeeded executions carry their final message in `output`; every other
    /// status only has the `input` they started with.
    fn select_message(event: &WorkflowStatusEvent) -> Result<&str, ResolveError> {
        let detail = &event.detail;
        let raw = match detail.status.as_deref() {
            Some(SUCCEEDED_STATUS) => detail.output.as_deref().or(detail.input.as_deref()),
            _ => detail.input.as_deref(),
        };
        raw.ok_or_else(|| ResolveError::MissingMessage {
            execution_arn: detail.execution_arn.clone().unwrap_or_else(|| UNKNOWN_EXECUTION.to_string()),
        })
    }

    async fn load_remote(&self, mut message: Value, pointer: RemoteMessagePointer) -> Result<Value, ResolveError> {
        debug!(bucket = %pointer.bucket, key = %pointer.key, "Fetching remote workflow message");
        let data = self.storage.get_data_from_bucket(&pointer.bucket, &pointer.key).await?;
        let remote: Value = serde_json::from_slice(&data).map_err(ResolveError::MalformedMessage)?;

        match pointer.target_path.as_deref() {
            None | Some(ROOT_TARGET_PATH) => Ok(remote),
            Some(path) => {
                if let Some(fields) = message.as_object_mut() {
                    fields.remove(REMOTE_POINTER_KEY);
                }
                set_at_path(&mut message, path, remote)?;
                Ok(message)
            }
        }
    }
}

#[async_trait]
impl WorkflowMessageResolver for ExecutionEventResolver {
    async fn resolve(&self, event: &WorkflowStatusEvent) -> Result<WorkflowMessage, ResolveError> {
        let mut message: Value = match self.failed_step_message(event).await {
            Some(raw) => serde_json::from_str(&raw),
            None => serde_json::from_str(Self::select_message(event)?),
        }
        .map_err(ResolveError::MalformedMessage)?;

        if let Some(pointer) = RemoteMessagePointer::from_message(&message)? {
            message = self.load_remote(message, pointer).await?;
        }
        WorkflowMessage::from_value(message).map_err(ResolveError::MalformedMessage)
    }
}

/// Write `value` at a `$.a.b` style path, creating intermediate objects.
pub(crate) fn set_at_path(target: &mut Value, path: &str, value: Value) -> Result<(), ResolveError> {
    let unsupported = || ResolveError::UnsupportedTargetPath(path.to_string());
    let segments = path.strip_prefix("$.").ok_or_else(unsupported)?;
    if segments.split('.').any(str::is_empty) {
        return Err(unsupported());
    }

    let (parents, leaf) = match segments.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, segments),
    };
    let mut cursor = target;
    for segment in parents.into_iter().flat_map(|p| p.split('.')) {
        cursor = cursor
            .as_object_mut()
            .ok_or_else(unsupported)?
            .entry(segment)
            .or_insert_with(|| Value::Object(Map::new()));
    }
    cursor.as_object_mut().ok_or_else(unsupported)?.insert(leaf.to_string(), value);
    Ok(())
}
