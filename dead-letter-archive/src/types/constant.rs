/// Directory under the stack name that holds archived dead letter records.
pub const ARCHIVE_ROOT_DIR: &str = "dead-letter-archive/sqs";

/// Key token used when a record has no execution identifier.
pub const UNKNOWN_EXECUTION: &str = "unknown";

pub const ARCHIVE_OBJECT_EXTENSION: &str = "json";

/// Separator between collection name and version in a collection id.
pub const COLLECTION_ID_SEPARATOR: &str = "___";

pub const DEFAULT_MAX_UNWRAP_DEPTH: usize = 32;

pub const DEFAULT_INVOCATION_TIMEOUT_SECS: u64 = 300;

/// Execution status whose event carries the final workflow message in `output`.
pub const SUCCEEDED_STATUS: &str = "SUCCEEDED";

/// Execution status whose event carries the message the execution started with.
pub const RUNNING_STATUS: &str = "RUNNING";
