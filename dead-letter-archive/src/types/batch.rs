use crate::error::{ArchiveError, ArchiveResult};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Input path that means "read the batch from stdin".
pub const STDIN_INPUT: &str = "-";

#[derive(Deserialize)]
#[serde(untagged)]
enum BatchDocument {
    Event {
        #[serde(rename = "Records")]
        records: Vec<Value>,
    },
    Records(Vec<Value>),
}

/// A batch of raw dead letter records, as delivered by the failure queue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeadLetterBatch {
    records: Vec<Value>,
}

impl DeadLetterBatch {
    pub fn new(records: Vec<Value>) -> Self {
        Self { records }
    }

    /// Decode either a queue event (`{"Records": [...]}`) or a bare array of records.
    pub fn from_slice(data: &[u8]) -> ArchiveResult<Self> {
        let document: Value = serde_json::from_slice(data)?;
        match serde_json::from_value::<BatchDocument>(document) {
            Ok(BatchDocument::Event { records }) | Ok(BatchDocument::Records(records)) => Ok(Self { records }),
            Err(_) => Err(ArchiveError::InvalidBatch(
                "expected an object with a `Records` array or an array of records".to_string(),
            )),
        }
    }

    /// Read a batch from a file, or from stdin when `input` is `-`.
    pub async fn read_from(input: &str) -> ArchiveResult<Self> {
        let data = if input == STDIN_INPUT {
            let mut data = Vec::new();
            tokio::io::stdin().read_to_end(&mut data).await?;
            data
        } else {
            tokio::fs::read(Path::new(input)).await?
        };
        Self::from_slice(&data)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<Value> {
        self.records
    }
}
