use crate::types::constant::{DEFAULT_INVOCATION_TIMEOUT_SECS, DEFAULT_MAX_UNWRAP_DEPTH};
use clap::Args;

fn parse_positive_usize(s: &str) -> Result<usize, String> {
    let value: usize = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if value == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(value)
}

fn parse_positive_u64(s: &str) -> Result<u64, String> {
    let value: u64 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if value == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(value)
}

#[derive(Debug, Clone, Args)]
pub struct ArchiveCliArgs {
    /// Name of the deployment stack. Archived records live under `<stack>/dead-letter-archive/sqs/`.
    #[arg(env = "DEAD_LETTER_ARCHIVE_STACK_NAME", long)]
    pub stack_name: Option<String>,

    /// Maximum number of envelope layers peeled from a single record.
    #[arg(env = "DEAD_LETTER_ARCHIVE_MAX_UNWRAP_DEPTH", long, default_value_t = DEFAULT_MAX_UNWRAP_DEPTH, value_parser = parse_positive_usize)]
    pub max_unwrap_depth: usize,

    /// Deadline in seconds for archiving a whole batch.
    #[arg(env = "DEAD_LETTER_ARCHIVE_INVOCATION_TIMEOUT_SECONDS", long, default_value_t = DEFAULT_INVOCATION_TIMEOUT_SECS, value_parser = parse_positive_u64)]
    pub invocation_timeout_seconds: u64,
}
