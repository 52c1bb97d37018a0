use clap::Parser as _;
use dead_letter_archive::archive::ArchiveWriter;
use dead_letter_archive::cli::{ArchiveCmd, Cli, Commands};
use dead_letter_archive::config::Config;
use dead_letter_archive::types::DeadLetterBatch;
use dead_letter_archive::utils::logging::init_logging;
use dead_letter_archive::ArchiveResult;
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Archive { archive_command } => match run_archive(archive_command).await {
            Ok(archived) => {
                info!(archived, "Dead letter archive completed successfully");
            }
            Err(e) => {
                error!(
                    error = %e,
                    error_chain = ?e,
                    "Failed to archive dead letter batch"
                );
                panic!("Failed to archive dead letter batch: {}", e);
            }
        },
    }
}

async fn run_archive(archive_cmd: &ArchiveCmd) -> ArchiveResult<usize> {
    let config = Arc::new(Config::from_archive_cmd(archive_cmd).await?);
    debug!(prefix = %config.params().archive_prefix(), "Configuration initialized");

    let batch = DeadLetterBatch::read_from(&archive_cmd.input).await?;
    info!(input = %archive_cmd.input, records = batch.len(), "Read dead letter batch");

    let keys = ArchiveWriter::new(config).archive_batch(batch.into_records()).await?;
    for key in &keys {
        debug!(key = %key, "Archive object written");
    }
    Ok(keys.len())
}
