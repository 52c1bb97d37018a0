pub mod batch;
pub mod constant;
pub mod envelope;
pub mod event;
pub mod history;
pub mod key;
pub mod message;
pub mod params;
pub mod record;

pub use batch::DeadLetterBatch;
pub use envelope::RecordLayer;
pub use event::{ExecutionDetail, WorkflowStatusEvent};
pub use history::{ExecutionHistoryEvent, HistoryEventKind};
pub use key::ArchivalKey;
pub use message::WorkflowMessage;
pub use record::{EnrichedArchivalRecord, RecordMetadata};
