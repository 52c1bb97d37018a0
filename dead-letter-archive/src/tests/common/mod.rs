use crate::archive::resolver::MockWorkflowMessageResolver;
use crate::config::{ArchiveConfig, Config};
use crate::core::client::storage::MockStorageClient;
use rstest::fixture;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const TEST_STACK_NAME: &str = "test-stack";
pub const TEST_BUCKET: &str = "test-system-bucket";
pub const TEST_EXECUTION_ARN: &str = "arn:aws:states:us-east-1:123456789012:execution:IngestGranule:exec-1";
pub const TEST_STATE_MACHINE_ARN: &str = "arn:aws:states:us-east-1:123456789012:stateMachine:IngestGranule";
pub const TEST_EVENT_TIME: &str = "2024-03-14T15:09:26Z";

/// Archived documents captured by a recording storage mock, as (key, document).
pub type Writes = Arc<Mutex<Vec<(String, Value)>>>;

#[fixture]
pub fn archive_config() -> ArchiveConfig {
    ArchiveConfig::new(TEST_STACK_NAME, TEST_BUCKET).expect("test config is valid")
}

/// A workflow message with a collection, two granules and a provider.
#[fixture]
pub fn workflow_message() -> Value {
    json!({
        "cumulus_meta": { "execution_name": "exec-1" },
        "meta": {
            "collection": { "name": "MOD09", "version": "006" },
            "provider": { "id": "prov-1", "protocol": "s3" }
        },
        "payload": {
            "granules": [{ "granuleId": "G1" }, { "granuleId": "G2" }]
        }
    })
}

/// An execution status event whose detail carries `message` as its input.
pub fn status_event(execution_arn: &str, status: &str, message: Option<&Value>) -> Value {
    json!({
        "version": "0",
        "id": Uuid::new_v4().to_string(),
        "detail-type": "Step Functions Execution Status Change",
        "source": "aws.states",
        "time": TEST_EVENT_TIME,
        "detail": {
            "executionArn": execution_arn,
            "stateMachineArn": TEST_STATE_MACHINE_ARN,
            "status": status,
            "input": message.map(|m| m.to_string()),
        }
    })
}

/// A queue record carrying `body` JSON-encoded, as delivered by the queue.
pub fn queue_record(body: &Value) -> Value {
    json!({
        "messageId": Uuid::new_v4().to_string(),
        "receiptHandle": "handle",
        "body": body.to_string(),
        "attributes": { "ApproximateReceiveCount": "3" },
        "eventSource": "aws:sqs"
    })
}

/// A queue record whose consumer attached `error`.
pub fn failure_record(body: &Value, error: &str) -> Value {
    let mut record = queue_record(body);
    record["error"] = Value::String(error.to_string());
    record
}

/// Wrap `payload` in `layers` queue records.
pub fn nest(payload: Value, layers: usize) -> Value {
    (0..layers).fold(payload, |inner, _| queue_record(&inner))
}

/// Storage mock that records every archived document.
pub fn recording_storage(writes: Writes) -> MockStorageClient {
    let mut storage = MockStorageClient::new();
    storage.expect_put_data().returning(move |data, key| {
        let document: Value = serde_json::from_slice(&data).expect("archived document is JSON");
        writes.lock().unwrap().push((key.to_string(), document));
        Ok(())
    });
    storage
}

pub fn build_config(
    params: ArchiveConfig,
    storage: MockStorageClient,
    resolver: MockWorkflowMessageResolver,
) -> Arc<Config> {
    Arc::new(Config::new(params, Arc::new(storage), Arc::new(resolver)))
}
