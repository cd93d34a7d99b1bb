//! Analyze-confirm-execute lifecycle for one document.

use std::mem;

use retouch_llm::{InlineImage, ModelClient};

use crate::error::{CoreError, CoreResult};
use crate::events::{emit, ProgressEvent, ProgressSender};
use crate::host::HostEditor;
use crate::interpreter::{ExecutionReport, PlanInterpreter};
use crate::plan::EditPlan;
use crate::prompt::build_system_prompt;
use crate::summary::render_summary;

/// A plan waiting for the user's confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPlan {
    pub id: String,
    pub plan: EditPlan,
    /// Candidate model that produced the plan.
    pub model: String,
    pub document_name: String,
    pub created_at: String,
    /// Layer names the plan targets that the document did not have when
    /// the plan was made, in first-mention order.
    pub unknown_layers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Nothing analyzed yet.
    Idle,
    Pending(PendingPlan),
    Executing,
    /// The last plan was executed or cancelled.
    Empty,
}

/// Owns at most one pending plan. Executing borrows the session mutably, so
/// analysis and cancellation cannot overlap a running plan.
pub struct PlanSession {
    state: SessionState,
    events: Option<ProgressSender>,
}

impl Default for PlanSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            events: None,
        }
    }

    pub fn with_events(mut self, events: ProgressSender) -> Self {
        self.events = Some(events);
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn pending(&self) -> Option<&PendingPlan> {
        match &self.state {
            SessionState::Pending(pending) => Some(pending),
            _ => None,
        }
    }

    /// Confirmation text for the pending plan.
    pub fn summary(&self) -> Option<String> {
        self.pending().map(|pending| render_summary(&pending.plan))
    }

    /// Captures the document, asks the model for a plan and keeps it pending.
    ///
    /// A new plan replaces any pending one. On error the previous state is
    /// left untouched.
    pub async fn analyze(
        &mut self,
        host: &dyn HostEditor,
        client: &ModelClient,
        instruction: &str,
    ) -> CoreResult<&PendingPlan> {
        let instruction = instruction.trim();
        if instruction.is_empty() {
            return Err(CoreError::InvalidInput(
                "Please enter a description of what you want to do".to_string(),
            ));
        }

        emit(self.events.as_ref(), ProgressEvent::CapturingPreview);
        let preview = host.export_preview().await?;
        emit(self.events.as_ref(), ProgressEvent::ReadingLayers);
        let snapshot = host.snapshot().await?;

        let prompt = build_system_prompt(&snapshot, instruction);
        emit(self.events.as_ref(), ProgressEvent::RequestingPlan);
        tracing::info!(
            document = %snapshot.name,
            layers = snapshot.layers.len(),
            preview_bytes = preview.len(),
            "requesting edit plan"
        );
        let reply = client
            .generate_structured::<EditPlan>(&prompt, &InlineImage::jpeg(preview))
            .await?;

        let mut unknown_layers: Vec<String> = Vec::new();
        let targets = reply.value.operations.iter().filter_map(|op| op.target.name());
        for name in targets {
            let known = snapshot.layer_named(name).is_some();
            if !known && !unknown_layers.iter().any(|seen| seen == name) {
                unknown_layers.push(name.to_string());
            }
        }
        if !unknown_layers.is_empty() {
            tracing::warn!(layers = ?unknown_layers, "plan targets layers not in the document");
        }

        let pending = PendingPlan {
            id: uuid::Uuid::now_v7().to_string(),
            plan: reply.value,
            model: reply.model,
            document_name: snapshot.name,
            created_at: chrono::Utc::now().to_rfc3339(),
            unknown_layers,
        };
        tracing::info!(
            plan_id = %pending.id,
            model = %pending.model,
            operations = pending.plan.operations.len(),
            failed_attempts = reply.failures.len(),
            "edit plan ready"
        );
        emit(
            self.events.as_ref(),
            ProgressEvent::PlanReady {
                plan_id: pending.id.clone(),
                operations: pending.plan.operations.len(),
            },
        );

        self.state = SessionState::Pending(pending);
        self.pending().ok_or(CoreError::NoPendingPlan)
    }

    /// Runs the pending plan. On success the plan is cleared; on failure it
    /// stays pending so the caller can inspect or cancel it. Dropping the
    /// returned future mid-run also leaves the plan pending.
    pub async fn execute(&mut self, host: &dyn HostEditor) -> CoreResult<ExecutionReport> {
        let pending = match mem::replace(&mut self.state, SessionState::Executing) {
            SessionState::Pending(pending) => pending,
            other => {
                self.state = other;
                return Err(CoreError::NoPendingPlan);
            }
        };
        tracing::info!(plan_id = %pending.id, "executing edit plan");

        let mut interpreter = PlanInterpreter::new(host);
        if let Some(events) = &self.events {
            interpreter = interpreter.with_events(events.clone());
        }
        let mut guard = ExecutionGuard {
            state: &mut self.state,
            pending,
            completed: false,
        };
        let result = interpreter.run(&guard.pending.plan).await;
        if result.is_ok() {
            *guard.state = SessionState::Empty;
            guard.completed = true;
        }
        result
    }

    /// Discards the pending plan. Returns whether there was one.
    pub fn cancel(&mut self) -> bool {
        if let SessionState::Pending(pending) = &self.state {
            tracing::info!(plan_id = %pending.id, "edit plan cancelled");
            self.state = SessionState::Empty;
            return true;
        }
        false
    }
}

/// Restores the plan as pending unless execution completed.
struct ExecutionGuard<'s> {
    state: &'s mut SessionState,
    pending: PendingPlan,
    completed: bool,
}

impl Drop for ExecutionGuard<'_> {
    fn drop(&mut self) {
        if !self.completed {
            tracing::debug!(plan_id = %self.pending.id, "edit plan left pending");
            *self.state = SessionState::Pending(self.pending.clone());
        }
    }
}
