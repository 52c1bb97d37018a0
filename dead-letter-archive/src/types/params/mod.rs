use crate::cli::ArchiveCmd;
use crate::error::ArchiveError;
use std::time::Duration;

/// StorageArgs - Arguments used to build the archive storage client
#[derive(Debug, Clone)]
pub struct StorageArgs {
    /// Bucket name or S3 ARN
    pub bucket_identifier: String,
}

/// ArchiveArgs - Destination and limits of an archive invocation
#[derive(Debug, Clone)]
pub struct ArchiveArgs {
    pub stack_name: String,
    pub max_unwrap_depth: usize,
    pub invocation_timeout: Duration,
}

fn required(value: Option<&String>, name: &str) -> Result<String, ArchiveError> {
    match value.map(|v| v.trim()) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ArchiveError::ConfigError(format!("{} is required", name))),
    }
}

impl TryFrom<&ArchiveCmd> for StorageArgs {
    type Error = ArchiveError;
    fn try_from(cmd: &ArchiveCmd) -> Result<Self, Self::Error> {
        let bucket = required(cmd.aws_s3_args.bucket_identifier.as_ref(), "S3 bucket identifier")?;
        // ARNs already name the exact bucket, the prefix only applies to plain names
        let bucket_identifier = match cmd.aws_config_args.aws_prefix.as_deref().map(str::trim) {
            Some(prefix) if !prefix.is_empty() && !bucket.starts_with("arn:") => format!("{}-{}", prefix, bucket),
            _ => bucket,
        };
        Ok(Self { bucket_identifier })
    }
}

impl TryFrom<&ArchiveCmd> for ArchiveArgs {
    type Error = ArchiveError;
    fn try_from(cmd: &ArchiveCmd) -> Result<Self, Self::Error> {
        Ok(Self {
            stack_name: required(cmd.archive_args.stack_name.as_ref(), "Stack name")?,
            max_unwrap_depth: cmd.archive_args.max_unwrap_depth,
            invocation_timeout: Duration::from_secs(cmd.archive_args.invocation_timeout_seconds),
        })
    }
}
