pub mod classify;
pub mod extract;
pub mod resolver;
pub mod unwrap;
pub mod writer;

pub use resolver::{ExecutionEventResolver, WorkflowMessageResolver};
pub use writer::ArchiveWriter;
