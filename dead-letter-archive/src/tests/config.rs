use crate::cli::{Cli, Commands};
use crate::config::ArchiveConfig;
use crate::core::client::storage::s3::AWSS3;
use crate::error::ArchiveError;
use crate::tests::common::{archive_config, TEST_BUCKET, TEST_STACK_NAME};
use crate::types::params::{ArchiveArgs, StorageArgs};
use clap::Parser;
use rstest::rstest;
use std::time::Duration;

fn parse_archive_cmd(args: &[&str]) -> crate::cli::ArchiveCmd {
    let mut argv = vec!["dead-letter-archive", "archive", "--aws", "--aws-s3"];
    argv.extend_from_slice(args);
    match Cli::try_parse_from(argv).expect("arguments parse").command {
        Commands::Archive { archive_command } => *archive_command,
    }
}

#[rstest]
#[case::blank_stack("  ", TEST_BUCKET)]
#[case::empty_stack("", TEST_BUCKET)]
#[case::blank_bucket(TEST_STACK_NAME, " ")]
#[case::empty_bucket(TEST_STACK_NAME, "")]
fn blank_destination_is_rejected(#[case] stack_name: &str, #[case] bucket: &str) {
    let result = ArchiveConfig::new(stack_name, bucket);
    assert!(matches!(result, Err(ArchiveError::ConfigError(_))));
}

#[rstest]
fn archive_prefix_is_scoped_to_stack(archive_config: ArchiveConfig) {
    assert_eq!(archive_config.archive_prefix(), "test-stack/dead-letter-archive/sqs");
    assert_eq!(archive_config.bucket(), TEST_BUCKET);
    assert_eq!(archive_config.max_unwrap_depth(), 32);
    assert_eq!(archive_config.invocation_timeout(), Duration::from_secs(300));
}

#[rstest]
fn zero_limits_are_rejected(archive_config: ArchiveConfig) {
    assert!(matches!(archive_config.clone().with_max_unwrap_depth(0), Err(ArchiveError::ConfigError(_))));
    assert!(matches!(archive_config.with_invocation_timeout(Duration::ZERO), Err(ArchiveError::ConfigError(_))));
}

#[test]
fn archive_cmd_converts_to_config() {
    let cmd = parse_archive_cmd(&[
        "--stack-name",
        "prod",
        "--bucket-identifier",
        "system-bucket",
        "--max-unwrap-depth",
        "8",
        "--invocation-timeout-seconds",
        "60",
        "--input",
        "batch.json",
    ]);
    let storage_args = StorageArgs::try_from(&cmd).unwrap();
    let archive_args = ArchiveArgs::try_from(&cmd).unwrap();
    let config = ArchiveConfig::from_args(&archive_args, &storage_args).unwrap();

    assert_eq!(cmd.input, "batch.json");
    assert_eq!(config.stack_name(), "prod");
    assert_eq!(config.bucket(), "system-bucket");
    assert_eq!(config.max_unwrap_depth(), 8);
    assert_eq!(config.invocation_timeout(), Duration::from_secs(60));
    assert_eq!(config.archive_prefix(), "prod/dead-letter-archive/sqs");
}

#[rstest]
#[case::plain_name("system-bucket", "dev-system-bucket")]
#[case::arn("arn:aws:s3:::system-bucket", "arn:aws:s3:::system-bucket")]
fn aws_prefix_applies_to_plain_bucket_names(#[case] bucket: &str, #[case] expected: &str) {
    let cmd = parse_archive_cmd(&["--stack-name", "prod", "--bucket-identifier", bucket, "--aws-prefix", "dev"]);
    let storage_args = StorageArgs::try_from(&cmd).unwrap();
    assert_eq!(storage_args.bucket_identifier, expected);
}

#[test]
fn missing_stack_name_is_a_config_error() {
    let mut cmd = parse_archive_cmd(&["--bucket-identifier", "system-bucket"]);
    cmd.archive_args.stack_name = None;
    assert!(matches!(ArchiveArgs::try_from(&cmd), Err(ArchiveError::ConfigError(_))));
}

#[test]
fn missing_bucket_is_a_config_error() {
    let mut cmd = parse_archive_cmd(&["--stack-name", "prod"]);
    cmd.aws_s3_args.bucket_identifier = None;
    assert!(matches!(StorageArgs::try_from(&cmd), Err(ArchiveError::ConfigError(_))));
}

#[rstest]
#[case::zero_depth(&["--max-unwrap-depth", "0"])]
#[case::zero_timeout(&["--invocation-timeout-seconds", "0"])]
#[case::not_a_number(&["--max-unwrap-depth", "many"])]
fn non_positive_limits_fail_to_parse(#[case] args: &[&str]) {
    let mut argv = vec!["dead-letter-archive", "archive", "--aws", "--aws-s3"];
    argv.extend_from_slice(args);
    assert!(Cli::try_parse_from(argv).is_err());
}

#[test]
fn provider_flags_are_required() {
    let result = Cli::try_parse_from(["dead-letter-archive", "archive", "--stack-name", "prod"]);
    assert!(result.is_err());
}

#[rstest]
#[case::plain_name("system-bucket", "system-bucket", None)]
#[case::global_arn("arn:aws:s3:::system-bucket", "system-bucket", None)]
#[case::regional_arn("arn:aws:s3:us-west-2:123456789012:bucket/system-bucket", "system-bucket", Some("us-west-2"))]
fn bucket_identifier_is_parsed(#[case] identifier: &str, #[case] bucket: &str, #[case] region: Option<&str>) {
    let (bucket_name, parsed_region) = AWSS3::parse_bucket_identifier(identifier);
    assert_eq!(bucket_name, bucket);
    assert_eq!(parsed_region.as_deref(), region);
}
