use clap::Args;

/// Parameters used to config AWS.
#[derive(Debug, Clone, Args)]
pub struct AWSConfigCliArgs {
    /// Use this flag to enable the AWS provider.
    #[arg(long)]
    pub aws: bool,

    /// Prefix added to the start of the bucket name, if available.
    #[arg(env = "DEAD_LETTER_ARCHIVE_AWS_PREFIX", long, default_value = None)]
    pub aws_prefix: Option<String>,
}
