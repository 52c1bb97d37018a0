pub mod error;
pub mod s3;

use async_trait::async_trait;
use bytes::Bytes;
pub use error::StorageError;

/// Object storage operations needed by the archiver.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Write `data` under `key` in the archive bucket.
    async fn put_data(&self, data: Bytes, key: &str) -> Result<(), StorageError>;

    /// Read an object from an arbitrary bucket. Used to follow remote message pointers.
    async fn get_data_from_bucket(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError>;
}
