//! Host commands routed onto controller operations.

use serde_json::Value;
use tracing::debug;

use sw_core::ids::StepId;
use sw_core::wizard::{Advance, Rejection, ValidationResult, WizardController, WizardSnapshot};

#[derive(Debug, Clone, PartialEq)]
pub enum WizardCommand {
    /// Complete a step (current when `step` is `None`). Without `data`, the
    /// step's stored data is submitted.
    Complete {
        step: Option<StepId>,
        data: Option<Value>,
    },
    SetData {
        step: Option<StepId>,
        data: Value,
    },
    Skip(Option<StepId>),
    Next,
    Previous,
    GoTo(StepId),
    SaveDraft,
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Moved(StepId),
    Finished,
    DataUpdated(ValidationResult),
    DraftSaved(WizardSnapshot),
    Reset,
}

impl From<Advance> for CommandOutcome {
    fn from(advance: Advance) -> Self {
        match advance {
            Advance::Moved(step) => CommandOutcome::Moved(step),
            Advance::Finished => CommandOutcome::Finished,
        }
    }
}

impl WizardCommand {
    pub fn apply(self, controller: &mut WizardController) -> Result<CommandOutcome, Rejection> {
        debug!(command = ?self, "applying wizard command");
        match self {
            WizardCommand::Complete { step, data } => {
                let step = step.unwrap_or_else(|| controller.current_step_id().clone());
                let data = data
                    .or_else(|| controller.step_data(&step).cloned())
                    .unwrap_or(Value::Null);
                controller.complete_step(&step, data).map(Into::into)
            }
            WizardCommand::SetData { step, data } => {
                let step = step.unwrap_or_else(|| controller.current_step_id().clone());
                controller
                    .set_step_data(&step, data)
                    .map(CommandOutcome::DataUpdated)
            }
            WizardCommand::Skip(step) => {
                let step = step.unwrap_or_else(|| controller.current_step_id().clone());
                controller.skip_step(&step).map(Into::into)
            }
            WizardCommand::Next => controller.next_step().map(CommandOutcome::Moved),
            WizardCommand::Previous => controller.previous_step().map(CommandOutcome::Moved),
            WizardCommand::GoTo(step) => controller
                .set_current_step(&step)
                .map(|()| CommandOutcome::Moved(step)),
            WizardCommand::SaveDraft => controller
                .save_draft(None, None)
                .map(CommandOutcome::DraftSaved),
            WizardCommand::Reset => {
                controller.reset();
                Ok(CommandOutcome::Reset)
            }
        }
    }
}
