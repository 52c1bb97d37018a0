use crate::core::client::storage::{StorageClient, StorageError};
use crate::types::params::StorageArgs;
use async_trait::async_trait;
use aws_config::{Region, SdkConfig};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use std::sync::Arc;

const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Clone, Debug)]
pub struct AWSS3 {
    client: Arc<Client>,
    bucket_name: String,
    region: Option<String>,
}

impl AWSS3 {
    /// Creates a new S3 client bound to the archive bucket.
    ///
    /// # Arguments
    /// * `aws_config` - The AWS configuration.
    /// * `args` - The storage arguments, with the bucket given by name or ARN.
    pub fn new(aws_config: &SdkConfig, args: &StorageArgs) -> Self {
        // The identifier is either a plain bucket name or an S3 ARN
        let (bucket_name, region) = Self::parse_bucket_identifier(&args.bucket_identifier);

        let mut s3_config_builder = aws_sdk_s3::config::Builder::from(aws_config);

        // Only override the environment's region when the ARN names one explicitly
        if let Some(region) = &region {
            s3_config_builder = s3_config_builder.region(Region::new(region.clone()));
        }

        s3_config_builder = s3_config_builder
            .use_arn_region(true) // ARN-specified regions win over the client region
            .force_path_style(true);

        let client = Client::from_conf(s3_config_builder.build());
        Self { client: Arc::new(client), bucket_name, region }
    }

    /// Split a bucket identifier (plain name or S3 ARN) into bucket name and optional region.
    pub(crate) fn parse_bucket_identifier(identifier: &str) -> (String, Option<String>) {
        if let Some(rest) = identifier.strip_prefix("arn:aws:s3:") {
            // rest = region:account-id:resource, region and account are empty for global ARNs
            let parts: Vec<&str> = rest.splitn(3, ':').collect();
            if parts.len() == 3 {
                let region = Some(parts[0]).filter(|r| !r.is_empty()).map(str::to_string);
                let resource = parts[2];
                let bucket_name = match resource.split_once('/') {
                    // arn:aws:s3:region:account-id:bucket/bucket-name
                    Some(("bucket", name)) if !name.is_empty() => name.to_string(),
                    // arn:aws:s3:::bucket-name
                    _ => resource.to_string(),
                };
                return (bucket_name, region);
            }
        }

        // Not an ARN, or not one we can split: use it as the bucket name
        (identifier.to_string(), None)
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    /// Returns the region extracted from the bucket ARN, if one was given.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

#[async_trait]
impl StorageClient for AWSS3 {
    /// Put the data into the archive bucket under `key`, typed as JSON.
    async fn put_data(&self, data: Bytes, key: &str) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .content_type(JSON_CONTENT_TYPE)
            .body(ByteStream::from(data))
            .send()
            .await?;
        Ok(())
    }

    /// Get an object from `bucket`, which need not be the archive bucket.
    async fn get_data_from_bucket(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError> {
        if bucket.is_empty() {
            return Err(StorageError::InvalidBucketName("bucket name is empty".to_string()));
        }
        let output = self.client.get_object().bucket(bucket).key(key).send().await?;
        let data = output.body.collect().await.map_err(|e| StorageError::ObjectStreamError(e.to_string()))?;
        Ok(data.into_bytes())
    }
}
