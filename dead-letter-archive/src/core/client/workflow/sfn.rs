use crate::core::client::workflow::{ExecutionHistoryClient, WorkflowClientError};
use crate::types::history::{ExecutionHistoryEvent, HistoryEventKind};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sfn::types::{HistoryEvent, HistoryEventType};
use aws_sdk_sfn::Client;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct AWSStepFunctions {
    client: Arc<Client>,
}

impl AWSStepFunctions {
    /// Creates a new Step Functions client.
    ///
    /// # Arguments
    /// * `aws_config` - The AWS configuration.
    pub fn new(aws_config: &SdkConfig) -> Self {
        Self { client: Arc::new(Client::new(aws_config)) }
    }
}

#[async_trait]
impl ExecutionHistoryClient for AWSStepFunctions {
    async fn get_execution_history(
        &self,
        execution_arn: &str,
    ) -> Result<Vec<ExecutionHistoryEvent>, WorkflowClientError> {
        // The paginator follows `next_token` until the history is exhausted
        let events = self
            .client
            .get_execution_history()
            .execution_arn(execution_arn)
            .into_paginator()
            .items()
            .send()
            .try_collect()
            .await?;
        Ok(events.iter().map(to_history_event).collect())
    }
}

fn to_history_event(event: &HistoryEvent) -> ExecutionHistoryEvent {
    let (kind, data) = match event.r#type() {
        HistoryEventType::LambdaFunctionScheduled => (
            HistoryEventKind::StepScheduled,
            event.lambda_function_scheduled_event_details().and_then(|d| d.input()).map(str::to_string),
        ),
        HistoryEventType::ActivityScheduled => (
            HistoryEventKind::StepScheduled,
            event.activity_scheduled_event_details().and_then(|d| d.input()).map(str::to_string),
        ),
        HistoryEventType::TaskScheduled => (
            HistoryEventKind::StepScheduled,
            event.task_scheduled_event_details().map(|d| d.parameters().to_string()),
        ),
        HistoryEventType::LambdaFunctionFailed
        | HistoryEventType::ActivityFailed
        | HistoryEventType::TaskFailed => (HistoryEventKind::StepFailed, None),
        HistoryEventType::TaskStateExited => (
            HistoryEventKind::StepExited,
            event.state_exited_event_details().and_then(|d| d.output()).map(str::to_string),
        ),
        _ => (HistoryEventKind::Other, None),
    };
    ExecutionHistoryEvent { id: event.id(), previous_event_id: event.previous_event_id(), kind, data }
}
