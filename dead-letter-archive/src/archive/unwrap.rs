use crate::types::envelope::RecordLayer;
use crate::types::constant::DEFAULT_MAX_UNWRAP_DEPTH;
use serde_json::Value;
use tracing::warn;

/// Decodes one envelope layer. Implementations decide what counts as a queue record.
pub trait LayerDecoder: Send + Sync {
    /// Whether `value` is an envelope layer, without decoding it.
    fn is_layer(&self, value: &Value) -> bool;

    fn decode_layer(&self, value: Value) -> RecordLayer;
}

/// Decodes queue records carrying their payload under `body` / `Body`.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueueRecordDecoder;

impl LayerDecoder for QueueRecordDecoder {
    fn is_layer(&self, value: &Value) -> bool {
        RecordLayer::is_queue_record(value)
    }

    fn decode_layer(&self, value: Value) -> RecordLayer {
        RecordLayer::decode(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UnwrappedPayload {
    /// The first value that is no longer a queue record.
    Innermost(Value),
    /// The envelope was still nested after the maximum depth.
    DepthExceeded { max_depth: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnwrappedEnvelope {
    /// The outermost non-null failure error.
    pub error: Option<String>,
    pub payload: UnwrappedPayload,
    /// Number of layers peeled.
    pub depth: usize,
}

/// Peels envelope layers from the outside in until the payload is reached.
#[derive(Debug, Clone)]
pub struct EnvelopeUnwrapper<D = QueueRecordDecoder> {
    decoder: D,
    max_depth: usize,
}

impl EnvelopeUnwrapper {
    pub fn new(max_depth: usize) -> Self {
        Self::with_decoder(QueueRecordDecoder, max_depth)
    }
}

impl Default for EnvelopeUnwrapper {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UNWRAP_DEPTH)
    }
}

impl<D: LayerDecoder> EnvelopeUnwrapper<D> {
    pub fn with_decoder(decoder: D, max_depth: usize) -> Self {
        Self { decoder, max_depth }
    }

    pub fn unwrap(&self, record: Value) -> UnwrappedEnvelope {
        let mut error: Option<String> = None;
        let mut current = record;
        let mut depth = 0;

        loop {
            // A layer past the cap is never opened, so its error is not captured either
            if depth == self.max_depth && self.decoder.is_layer(&current) {
                warn!(max_depth = self.max_depth, "Dead letter envelope nested beyond maximum depth");
                return UnwrappedEnvelope {
                    error,
                    payload: UnwrappedPayload::DepthExceeded { max_depth: self.max_depth },
                    depth,
                };
            }

            let body = match self.decoder.decode_layer(current) {
                RecordLayer::Payload(payload) => {
                    return UnwrappedEnvelope { error, payload: UnwrappedPayload::Innermost(payload), depth };
                }
                RecordLayer::Failure { error: layer_error, body } => {
                    if error.is_none() {
                        error = layer_error;
                    }
                    body
                }
                RecordLayer::Queue { body } => body,
            };
            depth += 1;
            current = body;
        }
    }
}
