use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::operation::put_object::PutObjectError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to put object: {0}")]
    UnableToPutObject(#[from] SdkError<PutObjectError>),
    #[error("Failed to get object: {0}")]
    GetObjectError(#[from] SdkError<GetObjectError>),
    #[error("Failed to stream object: {0}")]
    ObjectStreamError(String),
    #[error("Invalid bucket name: {0}")]
    InvalidBucketName(String),
}
