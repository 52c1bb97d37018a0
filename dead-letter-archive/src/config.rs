use crate::archive::resolver::{ExecutionEventResolver, WorkflowMessageResolver};
use crate::cli::ArchiveCmd;
use crate::core::client::storage::s3::AWSS3;
use crate::core::client::storage::StorageClient;
use crate::core::client::workflow::sfn::AWSStepFunctions;
use crate::core::cloud::CloudProvider;
use crate::error::{ArchiveError, ArchiveResult};
use crate::types::constant::{ARCHIVE_ROOT_DIR, DEFAULT_INVOCATION_TIMEOUT_SECS, DEFAULT_MAX_UNWRAP_DEPTH};
use crate::types::params::{ArchiveArgs, StorageArgs};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Validated destination and limits for one archive invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveConfig {
    stack_name: String,
    bucket: String,
    max_unwrap_depth: usize,
    invocation_timeout: Duration,
}

impl ArchiveConfig {
    /// Fails with [`ArchiveError::ConfigError`] when either destination identifier is blank.
    pub fn new(stack_name: impl Into<String>, bucket: impl Into<String>) -> ArchiveResult<Self> {
        let stack_name = stack_name.into();
        let bucket = bucket.into();
        if stack_name.trim().is_empty() {
            return Err(ArchiveError::ConfigError("Stack name is required".to_string()));
        }
        if bucket.trim().is_empty() {
            return Err(ArchiveError::ConfigError("S3 bucket identifier is required".to_string()));
        }
        Ok(Self {
            stack_name,
            bucket,
            max_unwrap_depth: DEFAULT_MAX_UNWRAP_DEPTH,
            invocation_timeout: Duration::from_secs(DEFAULT_INVOCATION_TIMEOUT_SECS),
        })
    }

    pub fn with_max_unwrap_depth(mut self, max_unwrap_depth: usize) -> ArchiveResult<Self> {
        if max_unwrap_depth == 0 {
            return Err(ArchiveError::ConfigError("Max unwrap depth must be greater than 0".to_string()));
        }
        self.max_unwrap_depth = max_unwrap_depth;
        Ok(self)
    }

    pub fn with_invocation_timeout(mut self, invocation_timeout: Duration) -> ArchiveResult<Self> {
        if invocation_timeout.is_zero() {
            return Err(ArchiveError::ConfigError("Invocation timeout must be greater than 0".to_string()));
        }
        self.invocation_timeout = invocation_timeout;
        Ok(self)
    }

    pub fn from_args(archive_args: &ArchiveArgs, storage_args: &StorageArgs) -> ArchiveResult<Self> {
        Self::new(archive_args.stack_name.clone(), storage_args.bucket_identifier.clone())?
            .with_max_unwrap_depth(archive_args.max_unwrap_depth)?
            .with_invocation_timeout(archive_args.invocation_timeout)
    }

    pub fn stack_name(&self) -> &str {
        &self.stack_name
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn max_unwrap_depth(&self) -> usize {
        self.max_unwrap_depth
    }

    pub fn invocation_timeout(&self) -> Duration {
        self.invocation_timeout
    }

    /// `<stack-name>/dead-letter-archive/sqs`
    pub fn archive_prefix(&self) -> String {
        format!("{}/{}", self.stack_name, ARCHIVE_ROOT_DIR)
    }
}

/// The assembled archiver: configuration plus the clients it writes and resolves through.
pub struct Config {
    params: ArchiveConfig,
    storage: Arc<dyn StorageClient>,
    resolver: Arc<dyn WorkflowMessageResolver>,
}

impl Config {
    pub fn new(
        params: ArchiveConfig,
        storage: Arc<dyn StorageClient>,
        resolver: Arc<dyn WorkflowMessageResolver>,
    ) -> Self {
        Self { params, storage, resolver }
    }

    /// Validate the command's configuration and build the AWS-backed clients:
    /// S3 for the archive and remote messages, Step Functions for execution history.
    /// Configuration is checked before any AWS configuration is loaded.
    pub async fn from_archive_cmd(cmd: &ArchiveCmd) -> ArchiveResult<Self> {
        let storage_args = StorageArgs::try_from(cmd)?;
        let archive_args = ArchiveArgs::try_from(cmd)?;
        let params = ArchiveConfig::from_args(&archive_args, &storage_args)?;

        let provider = CloudProvider::AWS(Box::new(aws_config::from_env().load().await));
        let s3 = AWSS3::new(provider.get_aws_config(), &storage_args);
        debug!(
            provider = ?provider,
            bucket = %s3.bucket_name(),
            region = s3.region().unwrap_or("default"),
            "Storage client initialized"
        );

        let storage: Arc<dyn StorageClient> = Arc::new(s3);
        let history = Arc::new(AWSStepFunctions::new(provider.get_aws_config()));
        let resolver: Arc<dyn WorkflowMessageResolver> =
            Arc::new(ExecutionEventResolver::new(storage.clone()).with_history(history));
        Ok(Self::new(params, storage, resolver))
    }

    pub fn params(&self) -> &ArchiveConfig {
        &self.params
    }

    pub fn storage(&self) -> &dyn StorageClient {
        self.storage.as_ref()
    }

    pub fn resolver(&self) -> &dyn WorkflowMessageResolver {
        self.resolver.as_ref()
    }
}
