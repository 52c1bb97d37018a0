use crate::archive::classify::{classify, Classification};
use crate::archive::extract::{extract_metadata, MessageMetadata};
use crate::archive::unwrap::EnvelopeUnwrapper;
use crate::config::Config;
use crate::error::{ArchiveError, ArchiveResult};
use crate::types::envelope::RecordLayer;
use crate::types::key::{archive_date, ArchivalKey};
use crate::types::record::{EnrichedArchivalRecord, RecordMetadata};
use bytes::Bytes;
use chrono::Utc;
use futures::future::join_all;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, info_span, Instrument};

/// Enriches dead letter records and writes each one to the archive.
pub struct ArchiveWriter {
    config: Arc<Config>,
    unwrapper: EnvelopeUnwrapper,
}

impl ArchiveWriter {
    pub fn new(config: Arc<Config>) -> Self {
        let unwrapper = EnvelopeUnwrapper::new(config.params().max_unwrap_depth());
        Self { config, unwrapper }
    }

    /// Archive every record of the batch concurrently.
    ///
    /// All writes are allowed to settle before the result is decided. The batch
    /// succeeds only if every write succeeded; otherwise the first failure in
    /// batch order is returned and the others are logged. The whole batch is
    /// bounded by the configured invocation timeout.
    ///
    /// # Returns
    /// * `ArchiveResult<Vec<ArchivalKey>>` - The keys written, in batch order.
    pub async fn archive_batch(&self, records: Vec<Value>) -> ArchiveResult<Vec<ArchivalKey>> {
        let timeout = self.config.params().invocation_timeout();
        let total = records.len();
        info!(records = total, "Archiving dead letter batch");

        let pending = records.into_iter().enumerate().map(|(index, record)| self.archive_record(index, record));
        let results = tokio::time::timeout(timeout, join_all(pending))
            .await
            .map_err(|_| ArchiveError::DeadlineExceeded(timeout))?;

        let mut keys = Vec::with_capacity(total);
        let mut first_failure = None;
        for result in results {
            match result {
                Ok(key) => keys.push(key),
                Err(e) => {
                    error!(error = %e, "Failed to archive dead letter record");
                    if first_failure.is_none() {
                        first_failure = Some(e);
                    }
                }
            }
        }

        match first_failure {
            Some(e) => {
                error!(archived = keys.len(), failed = total - keys.len(), "Dead letter batch archived partially");
                Err(e)
            }
            None => {
                info!(archived = keys.len(), "Dead letter batch archived");
                Ok(keys)
            }
        }
    }

    async fn archive_record(&self, index: usize, record: Value) -> ArchiveResult<ArchivalKey> {
        let message_id = message_id(&record).unwrap_or("-").to_string();
        let span = info_span!("archive_record", index, message_id = %message_id);

        async move {
            let enriched = self.build_record(record).await;
            let date = archive_date(enriched.time(), Utc::now());
            let key = ArchivalKey::generate(&self.config.params().archive_prefix(), date, enriched.execution_arn());
            let data = enriched.to_bytes()?;

            self.config
                .storage()
                .put_data(Bytes::from(data), key.as_str())
                .await
                .map_err(|source| ArchiveError::ArchiveWriteFailed { key: key.to_string(), source })?;
            debug!(key = %key, "Archived dead letter record");
            Ok(key)
        }
        .instrument(span)
        .await
    }

    /// Run unwrap, classify and extract for one record. Never fails: whatever
    /// cannot be resolved is left null.
    pub async fn build_record(&self, record: Value) -> EnrichedArchivalRecord {
        let original = match record {
            Value::Object(fields) if RecordLayer::is_queue_record_fields(&fields) => fields,
            other => {
                debug!("Record is not a queue record, archiving it unmodified");
                return EnrichedArchivalRecord::Opaque(other);
            }
        };

        let unwrapped = self.unwrapper.unwrap(Value::Object(original.clone()));
        let mut metadata = RecordMetadata { error: unwrapped.error, ..Default::default() };

        if let Classification::StatusChange(event) = classify(&unwrapped.payload) {
            let MessageMetadata { collection_id, granules, provider_id } =
                extract_metadata(self.config.resolver(), &event).await;
            metadata.collection_id = collection_id;
            metadata.granules = granules;
            metadata.provider_id = provider_id;
            metadata.status = event.detail.status;
            metadata.execution_arn = event.detail.execution_arn;
            metadata.state_machine_arn = event.detail.state_machine_arn;
            metadata.time = event.time;
        }

        EnrichedArchivalRecord::Enriched { original, metadata }
    }
}

fn message_id(record: &Value) -> Option<&str> {
    record.get("messageId").or_else(|| record.get("MessageId")).and_then(Value::as_str)
}
