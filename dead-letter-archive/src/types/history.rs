/// What a history event means for recovering a failed step's message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryEventKind {
    /// A step was scheduled; `data` is its input.
    StepScheduled,
    /// A step failed.
    StepFailed,
    /// A task state exited; `data` is its output.
    StepExited,
    Other,
}

/// One event of an execution history, reduced to what the archiver reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionHistoryEvent {
    pub id: i64,
    pub previous_event_id: i64,
    pub kind: HistoryEventKind,
    pub data: Option<String>,
}

/// Recover the workflow message of the last failed step.
///
/// The output of the task state the failure exited through wins. Otherwise the
/// input the failed step was scheduled with is used, found by following
/// `previous_event_id` back from the failure.
pub fn failed_step_message(events: &[ExecutionHistoryEvent]) -> Option<&str> {
    let failed = events.iter().rev().find(|event| event.kind == HistoryEventKind::StepFailed)?;

    let exited = events
        .iter()
        .find(|event| event.kind == HistoryEventKind::StepExited && event.previous_event_id == failed.id)
        .and_then(|event| event.data.as_deref());
    if exited.is_some() {
        return exited;
    }

    // Bounded by the history length so a cyclic chain cannot loop forever
    let mut previous_id = failed.previous_event_id;
    for _ in 0..events.len() {
        let previous = events.iter().find(|event| event.id == previous_id)?;
        if previous.kind == HistoryEventKind::StepScheduled {
            return previous.data.as_deref();
        }
        previous_id = previous.previous_event_id;
    }
    None
}
