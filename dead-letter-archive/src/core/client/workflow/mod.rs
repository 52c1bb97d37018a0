pub mod error;
pub mod sfn;

use crate::types::history::ExecutionHistoryEvent;
use async_trait::async_trait;
pub use error::WorkflowClientError;

/// Read access to the event history of workflow executions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExecutionHistoryClient: Send + Sync {
    /// Every event of the execution, oldest first.
    async fn get_execution_history(&self, execution_arn: &str)
        -> Result<Vec<ExecutionHistoryEvent>, WorkflowClientError>;
}
