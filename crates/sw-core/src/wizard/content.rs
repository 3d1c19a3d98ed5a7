//! Step content providers.
//!
//! Each step may carry a [`StepContent`] implementation. The controller
//! hands it a [`StepContext`] scoped to the current step; the provider reads
//! data and validity from it and calls back to mutate state.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::ids::StepId;
use crate::wizard::controller::{Advance, WizardController};
use crate::wizard::error::Rejection;
use crate::wizard::snapshot::WizardSnapshot;
use crate::wizard::validation::ValidationResult;

/// Rendered output of a step, free of any UI toolkit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StepView {
    pub heading: String,
    pub lines: Vec<String>,
}

impl StepView {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            lines: Vec::new(),
        }
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }
}

/// Pluggable per-step behavior.
pub trait StepContent: Send + Sync {
    fn render(&self, ctx: &mut StepContext<'_>) -> StepView;
}

/// Mutable view of the controller for the step being rendered.
pub struct StepContext<'a> {
    controller: &'a mut WizardController,
    step_id: StepId,
}

impl<'a> StepContext<'a> {
    pub(crate) fn new(controller: &'a mut WizardController, step_id: StepId) -> Self {
        Self {
            controller,
            step_id,
        }
    }

    pub fn step_id(&self) -> &StepId {
        &self.step_id
    }

    pub fn current_data(&self) -> Option<&Value> {
        self.controller.step_data(&self.step_id)
    }

    pub fn all_data(&self) -> &BTreeMap<StepId, Value> {
        self.controller.wizard_data()
    }

    pub fn is_valid(&self) -> bool {
        self.controller.validation(&self.step_id).is_valid
    }

    pub fn errors(&self) -> Vec<String> {
        self.controller.validation(&self.step_id).errors
    }

    pub fn set_data(&mut self, data: Value) -> Result<ValidationResult, Rejection> {
        self.controller.set_step_data(&self.step_id, data)
    }

    /// Overrides the displayed validity only; completion still runs the
    /// step's own gate.
    pub fn set_valid(&mut self, valid: bool, errors: Vec<String>) {
        self.controller.override_validation(
            &self.step_id,
            ValidationResult {
                is_valid: valid,
                errors,
            },
        );
    }

    /// Complete the step with its stored data.
    pub fn on_complete(&mut self) -> Result<Advance, Rejection> {
        let data = self.current_data().cloned().unwrap_or(Value::Null);
        self.controller.complete_step(&self.step_id, data)
    }

    pub fn on_skip(&mut self) -> Result<Advance, Rejection> {
        self.controller.skip_step(&self.step_id)
    }

    pub fn save_draft(&mut self, data: Option<Value>) -> Result<WizardSnapshot, Rejection> {
        let step_id = self.step_id.clone();
        self.controller.save_draft(Some(&step_id), data)
    }
}
