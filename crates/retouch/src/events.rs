use tokio::sync::mpsc;

/// Progress notifications for the caller's status display.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    CapturingPreview,
    ReadingLayers,
    RequestingPlan,
    PlanReady { plan_id: String, operations: usize },
    StepStarted { step: usize, total: usize },
    StepCompleted { step: usize },
    PlanCompleted { steps: usize },
    PlanFailed { step: usize, error: String },
}

impl ProgressEvent {
    pub fn message(&self) -> String {
        match self {
            ProgressEvent::CapturingPreview => "Capturing image...".to_string(),
            ProgressEvent::ReadingLayers => "Getting layers info...".to_string(),
            ProgressEvent::RequestingPlan => "Analyzing with AI...".to_string(),
            ProgressEvent::PlanReady { operations, .. } => {
                format!("Plan ready with {operations} operation(s)")
            }
            ProgressEvent::StepStarted { step, total } => {
                format!("Executing operation {step}/{total}...")
            }
            ProgressEvent::StepCompleted { step } => format!("Operation {step} done"),
            ProgressEvent::PlanCompleted { .. } => {
                "All operations completed successfully".to_string()
            }
            ProgressEvent::PlanFailed { error, .. } => format!("Execution failed: {error}"),
        }
    }
}

pub type ProgressSender = mpsc::UnboundedSender<ProgressEvent>;

pub(crate) fn emit(events: Option<&ProgressSender>, event: ProgressEvent) {
    if let Some(events) = events {
        // A dropped receiver only means nobody is watching.
        let _ = events.send(event);
    }
}
