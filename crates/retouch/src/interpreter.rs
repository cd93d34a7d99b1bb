//! Sequential plan execution against the host.

use crate::error::{CoreError, CoreResult};
use crate::events::{emit, ProgressEvent, ProgressSender};
use crate::host::{apply_command, HostEditor};
use crate::plan::{EditPlan, LayerTarget, Operation, OperationKind};
use crate::translate::translate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    Idle,
    Running,
    Completed,
    Failed,
}

/// Outcome of a fully executed plan. Step numbers are 1-based.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    pub steps_total: usize,
    pub steps_applied: usize,
    /// Steps whose explicit layer selection was skipped because the subject
    /// layer created just before is already selected.
    pub skipped_selects: Vec<usize>,
    /// Steps with an unsupported operation type.
    pub ignored: Vec<usize>,
}

/// Replays an [`EditPlan`] one operation at a time.
///
/// Execution stops at the first failing step. Earlier steps are not rolled
/// back.
pub struct PlanInterpreter<'a> {
    host: &'a dyn HostEditor,
    events: Option<ProgressSender>,
    state: ExecutionState,
}

impl<'a> PlanInterpreter<'a> {
    pub fn new(host: &'a dyn HostEditor) -> Self {
        Self {
            host,
            events: None,
            state: ExecutionState::Idle,
        }
    }

    pub fn with_events(mut self, events: ProgressSender) -> Self {
        self.events = Some(events);
        self
    }

    pub fn state(&self) -> ExecutionState {
        self.state
    }

    pub async fn run(&mut self, plan: &EditPlan) -> CoreResult<ExecutionReport> {
        self.state = ExecutionState::Running;
        let total = plan.operations.len();
        let mut report = ExecutionReport {
            steps_total: total,
            ..ExecutionReport::default()
        };
        let mut subject_layer_created = false;

        for (index, operation) in plan.operations.iter().enumerate() {
            let step = index + 1;
            emit(self.events.as_ref(), ProgressEvent::StepStarted { step, total });
            tracing::info!(
                step,
                total,
                kind = operation.kind.type_name(),
                layer = operation.target.name().unwrap_or("<all>"),
                "executing operation"
            );

            if let Err(error) = self
                .run_step(index, operation, subject_layer_created, &mut report)
                .await
            {
                self.state = ExecutionState::Failed;
                tracing::warn!(step, "operation failed: {error}");
                emit(
                    self.events.as_ref(),
                    ProgressEvent::PlanFailed {
                        step,
                        error: error.to_string(),
                    },
                );
                return Err(CoreError::OperationFailed {
                    step,
                    source: Box::new(error),
                });
            }

            if operation.kind.is_select_subject() {
                subject_layer_created = true;
            }
            report.steps_applied += 1;
            emit(self.events.as_ref(), ProgressEvent::StepCompleted { step });
        }

        self.state = ExecutionState::Completed;
        emit(
            self.events.as_ref(),
            ProgressEvent::PlanCompleted {
                steps: report.steps_applied,
            },
        );
        Ok(report)
    }

    async fn run_step(
        &self,
        index: usize,
        operation: &Operation,
        subject_layer_created: bool,
        report: &mut ExecutionReport,
    ) -> CoreResult<()> {
        let document = match operation.kind {
            OperationKind::Crop(_) => Some(self.host.document_size().await?),
            _ => None,
        };
        // Validation happens here, before the step touches the document.
        let translation = translate(&operation.kind, document)?;
        if matches!(operation.kind, OperationKind::Unsupported { .. }) {
            report.ignored.push(index + 1);
        }

        if !operation.kind.is_select_subject() {
            if let LayerTarget::Named(name) = &operation.target {
                // Only the step directly after a leading selectSubject reuses
                // the freshly created layer.
                if subject_layer_created && index == 1 {
                    tracing::debug!(step = index + 1, layer = %name, "keeping subject layer selected");
                    report.skipped_selects.push(index + 1);
                } else {
                    self.host.select_layer(name).await?;
                }
            }
        }

        tracing::debug!(
            step = index + 1,
            label = translation.label,
            commands = translation.commands.len(),
            "applying host commands"
        );
        for command in &translation.commands {
            apply_command(self.host, command).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
