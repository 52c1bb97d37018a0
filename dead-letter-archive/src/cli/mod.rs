use clap::{ArgGroup, Parser, Subcommand};

pub mod archive;
pub mod provider;
pub mod storage;

#[derive(Parser, Debug)]
#[command(
    name = "dead-letter-archive",
    about = "Archive dead letter workflow messages to object storage",
    long_about = "Unwraps records from a workflow dead letter queue, enriches them with execution, \
    collection, granule and provider identifiers, and writes one archive object per record."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Archive a batch of dead letter records
    #[command(long_about = "Archive a batch of dead letter records.\n\n\
        The batch is either a queue event ({\"Records\": [...]}) or a JSON array of records.\n\n\
        Examples:\n  \
        dead-letter-archive archive --aws --aws-s3 --stack-name my-stack --bucket-identifier my-bucket --input batch.json\n  \
        cat batch.json | dead-letter-archive archive --aws --aws-s3")]
    Archive {
        #[command(flatten)]
        archive_command: Box<ArchiveCmd>,
    },
}

#[derive(Parser, Debug, Clone)]
#[clap(
    group(
        ArgGroup::new("provider")
            .args(&["aws"])
            .required(true)
            .multiple(false)
    ),
    group(
        ArgGroup::new("storage")
            .args(&["aws_s3"])
            .required(true)
            .multiple(false)
            .requires("provider")
    ),
)]
pub struct ArchiveCmd {
    /// Path of the batch file, or `-` for stdin
    #[arg(long, short, value_name = "PATH", default_value = "-")]
    pub input: String,

    #[clap(flatten)]
    pub aws_config_args: provider::aws::AWSConfigCliArgs,

    #[clap(flatten)]
    pub aws_s3_args: storage::aws_s3::AWSS3CliArgs,

    #[clap(flatten)]
    pub archive_args: archive::ArchiveCliArgs,
}
