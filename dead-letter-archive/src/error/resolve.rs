use crate::core::client::storage::StorageError;
use thiserror::Error;

/// Failure to reconstruct the workflow message behind an execution event.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Execution event for {execution_arn} carries no workflow message")]
    MissingMessage { execution_arn: String },

    #[error("Workflow message is not valid JSON: {0}")]
    MalformedMessage(#[source] serde_json::Error),

    #[error("Invalid remote message pointer: {0}")]
    InvalidRemotePointer(#[source] serde_json::Error),

    #[error("Failed to fetch remote workflow message: {0}")]
    RemoteMessage(#[from] StorageError),

    #[error("Unsupported remote message target path: {0}")]
    UnsupportedTargetPath(String),
}
