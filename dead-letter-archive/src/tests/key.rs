use crate::types::key::{archive_date, ArchivalKey};
use chrono::{NaiveDate, TimeZone, Utc};
use rstest::rstest;
use uuid::Uuid;

const PREFIX: &str = "test-stack/dead-letter-archive/sqs";

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn key_carries_date_execution_and_token() {
    let token = Uuid::parse_str("6f1c0a52-3b8e-4b5a-9d7e-1f2a3b4c5d6e").unwrap();
    let key = ArchivalKey::new(PREFIX, date(2024, 3, 4), Some("arn:aws:states:us-east-1:1:execution:sm:e1"), token);
    assert_eq!(
        key.as_str(),
        "test-stack/dead-letter-archive/sqs/2024-03-04/arn:aws:states:us-east-1:1:execution:sm:e1-6f1c0a52-3b8e-4b5a-9d7e-1f2a3b4c5d6e.json"
    );
    assert_eq!(key.to_string(), key.as_str());
}

#[rstest]
#[case::absent(None)]
#[case::empty(Some(""))]
fn missing_execution_is_unknown(#[case] execution_arn: Option<&str>) {
    let token = Uuid::new_v4();
    let key = ArchivalKey::new(PREFIX, date(2024, 1, 1), execution_arn, token);
    assert_eq!(key.as_str(), format!("{}/2024-01-01/unknown-{}.json", PREFIX, token));
}

#[test]
fn generated_keys_are_unique() {
    let first = ArchivalKey::generate(PREFIX, date(2024, 1, 1), Some("exec"));
    let second = ArchivalKey::generate(PREFIX, date(2024, 1, 1), Some("exec"));
    assert_ne!(first, second);
}

#[rstest]
#[case::utc("2024-03-14T15:09:26Z", date(2024, 3, 14))]
#[case::offset_crosses_midnight("2024-03-14T23:30:00-02:00", date(2024, 3, 15))]
#[case::fractional_seconds("2024-12-31T23:59:59.999Z", date(2024, 12, 31))]
#[case::date_only("2024-03-14", date(2024, 3, 14))]
#[case::no_offset("2024-03-14T15:09:26", date(2024, 3, 14))]
#[case::no_offset_fractional("2024-03-14T23:59:59.500", date(2024, 3, 14))]
#[case::compact_offset("2024-03-14T15:09:26.000+0000", date(2024, 3, 14))]
#[case::compact_positive_offset("2024-03-14T22:00:00+0500", date(2024, 3, 14))]
#[case::compact_negative_offset("2024-03-14T22:00:00-0500", date(2024, 3, 15))]
fn event_time_is_filed_under_its_utc_date(#[case] time: &str, #[case] expected: NaiveDate) {
    let now = Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap();
    assert_eq!(archive_date(Some(time), now), expected);
}

#[rstest]
#[case::absent(None)]
#[case::garbage(Some("not-a-time"))]
#[case::empty(Some(""))]
#[case::impossible_date(Some("2024-02-30"))]
fn unusable_time_falls_back_to_now(#[case] time: Option<&str>) {
    let now = Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap();
    assert_eq!(archive_date(time, now), date(2030, 6, 1));
}
