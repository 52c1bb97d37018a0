use aws_sdk_sfn::error::SdkError;
use aws_sdk_sfn::operation::get_execution_history::GetExecutionHistoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkflowClientError {
    #[error("Failed to get execution history: {0}")]
    GetExecutionHistory(#[from] SdkError<GetExecutionHistoryError>),
}
