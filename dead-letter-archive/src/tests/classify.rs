use crate::archive::classify::{classify, Classification};
use crate::archive::unwrap::UnwrappedPayload;
use crate::tests::common::{status_event, TEST_EVENT_TIME, TEST_EXECUTION_ARN, TEST_STATE_MACHINE_ARN};
use rstest::rstest;
use serde_json::{json, Value};
use tracing_test::traced_test;

#[rstest]
fn classify_recognizes_status_event() {
    let payload = UnwrappedPayload::Innermost(status_event(TEST_EXECUTION_ARN, "RUNNING", None));

    let classification = classify(&payload);

    let event = classification.event().expect("status event should be recognized");
    assert_eq!(event.detail.execution_arn.as_deref(), Some(TEST_EXECUTION_ARN));
    assert_eq!(event.detail.state_machine_arn.as_deref(), Some(TEST_STATE_MACHINE_ARN));
    assert_eq!(event.detail.status.as_deref(), Some("RUNNING"));
    assert_eq!(event.time.as_deref(), Some(TEST_EVENT_TIME));
    assert_eq!(event.detail.input, None);
    assert_eq!(event.detail_type.as_deref(), Some("Step Functions Execution Status Change"));
    assert_eq!(event.source.as_deref(), Some("aws.states"));
}

#[rstest]
fn classify_defaults_missing_fields_to_none() {
    let payload = UnwrappedPayload::Innermost(json!({ "detail": {} }));

    let event = classify(&payload).event().cloned().expect("detail object is enough to match");

    assert_eq!(event.time, None);
    assert_eq!(event.detail.execution_arn, None);
    assert_eq!(event.detail.state_machine_arn, None);
    assert_eq!(event.detail.status, None);
}

#[rstest]
fn classify_ignores_fields_of_wrong_type() {
    let payload = UnwrappedPayload::Innermost(json!({
        "time": 1710428966,
        "detail": { "executionArn": 42, "status": ["FAILED"], "stateMachineArn": "arn:sm" }
    }));

    let event = classify(&payload).event().cloned().expect("event should still match");

    assert_eq!(event.time, None);
    assert_eq!(event.detail.execution_arn, None);
    assert_eq!(event.detail.status, None);
    assert_eq!(event.detail.state_machine_arn.as_deref(), Some("arn:sm"));
}

#[rstest]
#[case::string(json!("plain text"))]
#[case::array(json!([{ "detail": {} }]))]
#[case::no_detail(json!({ "time": "2024-01-01T00:00:00Z" }))]
#[case::detail_not_object(json!({ "detail": "executionArn" }))]
#[case::detail_array(json!({ "detail": [] }))]
#[case::null(Value::Null)]
fn classify_rejects_other_shapes(#[case] value: Value) {
    assert_eq!(classify(&UnwrappedPayload::Innermost(value)), Classification::Unrecognized);
}

#[rstest]
fn classify_rejects_envelope_beyond_max_depth() {
    let payload = UnwrappedPayload::DepthExceeded { max_depth: 4 };
    assert_eq!(classify(&payload), Classification::Unrecognized);
}

#[test]
#[traced_test]
fn classify_logs_classification_miss() {
    classify(&UnwrappedPayload::Innermost(json!({ "unexpected": true })));

    assert!(logs_contain("expected a workflow status event"));
    assert!(logs_contain("payload_kind=\"object\"") || logs_contain("payload_kind=object"));
}

#[test]
#[traced_test]
fn classify_logs_event_origin() {
    classify(&UnwrappedPayload::Innermost(status_event(TEST_EXECUTION_ARN, "FAILED", None)));

    assert!(logs_contain("Classified workflow status event"));
    assert!(logs_contain("aws.states"));
}
