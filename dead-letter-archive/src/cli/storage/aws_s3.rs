use clap::Args;

/// Parameters used to config AWS S3.
#[derive(Debug, Clone, Args)]
pub struct AWSS3CliArgs {
    /// Use the AWS S3 client
    #[arg(long)]
    pub aws_s3: bool,

    /// The ARN / Name of the system bucket the archive is written to.
    /// ARN: arn:aws:s3:::name
    #[arg(env = "DEAD_LETTER_ARCHIVE_AWS_S3_BUCKET_IDENTIFIER", long)]
    pub bucket_identifier: Option<String>,
}
