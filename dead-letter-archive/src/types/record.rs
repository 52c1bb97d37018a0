use serde::Serialize;
use serde_json::{Map, Value};

/// Normalized fields added to every enriched record. A field that could not be
/// resolved serializes as an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMetadata {
    pub collection_id: Option<String>,
    pub provider_id: Option<String>,
    pub granules: Option<Vec<Option<String>>>,
    pub execution_arn: Option<String>,
    pub state_machine_arn: Option<String>,
    pub status: Option<String>,
    pub time: Option<String>,
    pub error: Option<String>,
}

/// The unit written to the archive.
#[derive(Debug, Clone, PartialEq)]
pub enum EnrichedArchivalRecord {
    /// A queue record: its own fields plus the normalized metadata.
    Enriched { original: Map<String, Value>, metadata: RecordMetadata },
    /// A record that is not a queue record, archived as received.
    Opaque(Value),
}

impl EnrichedArchivalRecord {
    pub fn metadata(&self) -> Option<&RecordMetadata> {
        match self {
            EnrichedArchivalRecord::Enriched { metadata, .. } => Some(metadata),
            EnrichedArchivalRecord::Opaque(_) => None,
        }
    }

    pub fn execution_arn(&self) -> Option<&str> {
        self.metadata()?.execution_arn.as_deref()
    }

    pub fn time(&self) -> Option<&str> {
        self.metadata()?.time.as_deref()
    }

    /// Build the archived document. Normalized fields overwrite same-named
    /// fields of the original record.
    pub fn to_document(&self) -> serde_json::Result<Value> {
        match self {
            EnrichedArchivalRecord::Enriched { original, metadata } => {
                let mut document = original.clone();
                if let Value::Object(fields) = serde_json::to_value(metadata)? {
                    document.extend(fields);
                }
                Ok(Value::Object(document))
            }
            EnrichedArchivalRecord::Opaque(record) => Ok(record.clone()),
        }
    }

    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(&self.to_document()?)
    }
}
