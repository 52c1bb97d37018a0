pub mod storage;
pub mod workflow;

pub use storage::{s3::AWSS3, StorageClient};
pub use workflow::{sfn::AWSStepFunctions, ExecutionHistoryClient};
