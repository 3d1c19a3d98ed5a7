//! Wizard controller.
//!
//! The sole mutator of [`WizardState`]. Every operation runs synchronously
//! and either applies fully or is rejected with no change to the pointer,
//! the completed set or stored data.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::ids::StepId;
use crate::ports::{ClockPort, DraftSinkPort};
use crate::wizard::content::{StepContext, StepView};
use crate::wizard::error::{ConfigurationError, Rejection, WizardError};
use crate::wizard::progress::{ProgressPolicy, ProgressView};
use crate::wizard::registry::StepRegistry;
use crate::wizard::snapshot::WizardSnapshot;
use crate::wizard::state::{CompletedSteps, WizardState, WizardStatus};
use crate::wizard::step::StepDescriptor;
use crate::wizard::validation::ValidationResult;

/// Where the pointer went after a completion or skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Pointer moved to this step.
    Moved(StepId),
    /// Pointer advanced past the last step; the wizard is complete.
    Finished,
}

pub struct WizardController {
    registry: StepRegistry,
    state: WizardState,
    policy: ProgressPolicy,
    autosave: bool,
    draft_sink: Option<Arc<dyn DraftSinkPort>>,
    clock: Option<Arc<dyn ClockPort>>,
}

impl WizardController {
    /// Build a controller over `steps`.
    ///
    /// A restored snapshot wins over `initial_step_id` and is taken verbatim;
    /// its data is re-validated only when its step is entered again.
    pub fn initialize(
        steps: Vec<StepDescriptor>,
        initial_step_id: Option<StepId>,
        restored: Option<WizardSnapshot>,
    ) -> Result<Self, WizardError> {
        let registry = StepRegistry::new(steps)?;

        let state = match restored {
            Some(snapshot) => restore_state(&registry, snapshot)?,
            None => {
                let first = match initial_step_id {
                    Some(id) if registry.contains(&id) => id,
                    Some(id) => return Err(ConfigurationError::UnknownInitialStep(id).into()),
                    None => registry.first().id().clone(),
                };
                WizardState::fresh(first)
            }
        };

        debug!(
            steps = registry.len(),
            current = %state.current_step_id,
            status = ?state.status,
            "wizard initialized"
        );

        Ok(Self {
            registry,
            state,
            policy: ProgressPolicy::default(),
            autosave: true,
            draft_sink: None,
            clock: None,
        })
    }

    pub fn with_draft_sink(mut self, sink: Arc<dyn DraftSinkPort>) -> Self {
        self.draft_sink = Some(sink);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn ClockPort>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_progress_policy(mut self, policy: ProgressPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Emit a snapshot on every navigation (on by default).
    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    // ---------------------------------------------------------------------
    // Transitions
    // ---------------------------------------------------------------------

    /// Return-to-visited navigation: only the current step or a completed one.
    pub fn set_current_step(&mut self, id: &StepId) -> Result<(), Rejection> {
        self.require_registered(id)?;
        if *id != self.state.current_step_id && !self.state.completed_step_ids.contains(id) {
            return Err(self.reject(Rejection::NotReachable(id.clone())));
        }
        if *id != self.state.current_step_id {
            self.enter(id.clone());
            self.autosave_snapshot();
        }
        Ok(())
    }

    /// Replace a step's data and re-run its gate. Never advances or completes.
    pub fn set_step_data(&mut self, id: &StepId, data: Value) -> Result<ValidationResult, Rejection> {
        let result = self.descriptor(id)?.validate(&data);
        self.state.step_data.insert(id.clone(), data);
        self.state.validation.insert(id.clone(), result.clone());
        self.state.mark_started();
        debug!(step = %id, valid = result.is_valid, "step data updated");
        Ok(result)
    }

    /// Validate, store and mark a step done, then move past it.
    ///
    /// `id` must be the current step or an already completed one. Invalid
    /// data on a required step is rejected; the cached validation result is
    /// still updated so its errors stay visible.
    ///
    /// Re-completing an earlier step moves the pointer to the step right
    /// after it, even when the pointer was further along.
    pub fn complete_step(&mut self, id: &StepId, data: Value) -> Result<Advance, Rejection> {
        let descriptor = self.descriptor(id)?;
        let result = descriptor.validate(&data);
        let optional = descriptor.is_optional();

        if *id != self.state.current_step_id && !self.state.completed_step_ids.contains(id) {
            return Err(self.reject(Rejection::NotReachable(id.clone())));
        }

        self.state.validation.insert(id.clone(), result.clone());
        if !result.is_valid && !optional {
            return Err(self.reject(Rejection::Validation {
                step: id.clone(),
                errors: result.errors,
            }));
        }

        self.state.step_data.insert(id.clone(), data);
        self.state.mark_started();
        if self.state.completed_step_ids.insert(id.clone()) {
            debug!(step = %id, "step completed");
        }

        let advance = self.advance_past(id);
        self.autosave_snapshot();
        Ok(advance)
    }

    /// Move past the current step without marking it done.
    pub fn skip_step(&mut self, id: &StepId) -> Result<Advance, Rejection> {
        let skippable = self.descriptor(id)?.is_skippable();
        if *id != self.state.current_step_id {
            return Err(self.reject(Rejection::NotCurrentStep(id.clone())));
        }
        if !skippable {
            return Err(self.reject(Rejection::SkipNotAllowed(id.clone())));
        }

        self.state.mark_started();
        debug!(step = %id, "step skipped");
        let advance = self.advance_past(id);
        self.autosave_snapshot();
        Ok(advance)
    }

    pub fn previous_step(&mut self) -> Result<StepId, Rejection> {
        let previous = match self.registry.previous_before(&self.state.current_step_id) {
            Some(step) => step.id().clone(),
            None => return Err(self.reject(Rejection::NoPreviousStep)),
        };
        self.enter(previous.clone());
        self.autosave_snapshot();
        Ok(previous)
    }

    /// Requires the current step to be completed or optional.
    pub fn next_step(&mut self) -> Result<StepId, Rejection> {
        let current = self.state.current_step_id.clone();
        let done = self.state.completed_step_ids.contains(&current);
        if !done && !self.current_step().is_optional() {
            return Err(self.reject(Rejection::CurrentStepIncomplete(current)));
        }
        let next = match self.registry.next_after(&current) {
            Some(step) => step.id().clone(),
            None => return Err(self.reject(Rejection::NoNextStep)),
        };
        self.enter(next.clone());
        self.autosave_snapshot();
        Ok(next)
    }

    /// Export the full progress to the draft sink.
    ///
    /// `data` is overlaid on the exported copy for `id` (or the current step)
    /// without touching stored state; only the snapshot time is recorded.
    pub fn save_draft(
        &mut self,
        id: Option<&StepId>,
        data: Option<Value>,
    ) -> Result<WizardSnapshot, Rejection> {
        if let Some(id) = id {
            self.require_registered(id)?;
        }

        let mut snapshot = self.snapshot();
        if let Some(data) = data {
            let target = id.unwrap_or(&self.state.current_step_id).clone();
            snapshot.wizard_data.insert(target, data);
        }
        self.publish(&mut snapshot);
        info!(current = %snapshot.current_step_id, "wizard draft saved");
        Ok(snapshot)
    }

    /// Back to a fresh wizard at the first registered step.
    ///
    /// The draft sink, if any, is told to drop the stored draft. The clear is
    /// queued behind every snapshot emitted before it.
    pub fn reset(&mut self) {
        self.state = WizardState::fresh(self.registry.first().id().clone());
        if let Some(sink) = &self.draft_sink {
            sink.clear();
        }
        info!("wizard reset");
    }

    // ---------------------------------------------------------------------
    // Read API
    // ---------------------------------------------------------------------

    pub fn current_step_id(&self) -> &StepId {
        &self.state.current_step_id
    }

    pub fn current_step(&self) -> &StepDescriptor {
        // The pointer always resolves; fall back to the first step regardless.
        self.registry
            .get(&self.state.current_step_id)
            .unwrap_or_else(|| self.registry.first())
    }

    pub fn completed_step_ids(&self) -> &CompletedSteps {
        &self.state.completed_step_ids
    }

    pub fn is_completed(&self, id: &StepId) -> bool {
        self.state.completed_step_ids.contains(id)
    }

    pub fn wizard_data(&self) -> &BTreeMap<StepId, Value> {
        &self.state.step_data
    }

    pub fn step_data(&self, id: &StepId) -> Option<&Value> {
        self.state.step_data.get(id)
    }

    /// Latest validation for `id`; steps never checked read as valid.
    pub fn validation(&self, id: &StepId) -> ValidationResult {
        self.state
            .validation
            .get(id)
            .cloned()
            .unwrap_or_else(ValidationResult::valid)
    }

    pub fn status(&self) -> WizardStatus {
        self.state.status
    }

    pub fn is_wizard_complete(&self) -> bool {
        self.state.status == WizardStatus::Complete
    }

    pub fn progress(&self) -> ProgressView {
        ProgressView::compute(
            &self.registry,
            &self.state.completed_step_ids,
            self.state.status,
            self.policy,
        )
    }

    pub fn progress_percentage(&self) -> u8 {
        self.progress().percentage
    }

    pub fn progress_policy(&self) -> ProgressPolicy {
        self.policy
    }

    pub fn steps(&self) -> &[StepDescriptor] {
        self.registry.steps()
    }

    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn last_snapshot_at_ms(&self) -> Option<i64> {
        self.state.last_snapshot_at_ms
    }

    /// Current progress as a draft, without emitting it.
    pub fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot {
            current_step_id: self.state.current_step_id.clone(),
            completed_step_ids: self.state.completed_step_ids.to_vec(),
            wizard_data: self.state.step_data.clone(),
            saved_at_ms: self.state.last_snapshot_at_ms,
        }
    }

    // ---------------------------------------------------------------------
    // Content
    // ---------------------------------------------------------------------

    pub fn context_for_current(&mut self) -> StepContext<'_> {
        let step_id = self.state.current_step_id.clone();
        StepContext::new(self, step_id)
    }

    /// Render the current step's content, if it has any.
    pub fn render_current(&mut self) -> Option<StepView> {
        let content = self.current_step().content().cloned()?;
        let mut ctx = self.context_for_current();
        Some(content.render(&mut ctx))
    }

    pub(crate) fn override_validation(&mut self, id: &StepId, result: ValidationResult) {
        if self.registry.contains(id) {
            self.state.validation.insert(id.clone(), result);
        }
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn descriptor(&self, id: &StepId) -> Result<&StepDescriptor, Rejection> {
        match self.registry.get(id) {
            Some(step) => Ok(step),
            None => {
                warn!(step = %id, "operation on unknown step");
                Err(Rejection::UnknownStep(id.clone()))
            }
        }
    }

    fn require_registered(&self, id: &StepId) -> Result<(), Rejection> {
        self.descriptor(id).map(|_| ())
    }

    fn reject(&self, rejection: Rejection) -> Rejection {
        warn!(
            current = %self.state.current_step_id,
            reason = %rejection,
            "wizard operation rejected"
        );
        rejection
    }

    /// Point at `id` and re-check whatever data it already holds.
    fn enter(&mut self, id: StepId) {
        let revalidated = self
            .registry
            .get(&id)
            .zip(self.state.step_data.get(&id))
            .map(|(step, data)| step.validate(data));
        match revalidated {
            Some(result) => {
                self.state.validation.insert(id.clone(), result);
            }
            None => {
                self.state.validation.remove(&id);
            }
        }
        debug!(from = %self.state.current_step_id, to = %id, "wizard pointer moved");
        self.state.current_step_id = id;
    }

    fn advance_past(&mut self, id: &StepId) -> Advance {
        match self.registry.next_after(id).map(|step| step.id().clone()) {
            Some(next) => {
                self.enter(next.clone());
                Advance::Moved(next)
            }
            None => {
                self.state.current_step_id = id.clone();
                if self.state.status != WizardStatus::Complete {
                    info!(last = %id, "wizard complete");
                }
                self.state.status = WizardStatus::Complete;
                Advance::Finished
            }
        }
    }

    fn autosave_snapshot(&mut self) {
        if self.autosave && self.draft_sink.is_some() {
            let mut snapshot = self.snapshot();
            self.publish(&mut snapshot);
        }
    }

    fn publish(&mut self, snapshot: &mut WizardSnapshot) {
        if let Some(clock) = &self.clock {
            let now = clock.now_ms();
            snapshot.saved_at_ms = Some(now);
            self.state.last_snapshot_at_ms = Some(now);
        }
        if let Some(sink) = &self.draft_sink {
            sink.submit(snapshot.clone());
        }
    }
}

fn restore_state(
    registry: &StepRegistry,
    snapshot: WizardSnapshot,
) -> Result<WizardState, ConfigurationError> {
    let unknown = std::iter::once(&snapshot.current_step_id)
        .chain(snapshot.completed_step_ids.iter())
        .chain(snapshot.wizard_data.keys())
        .find(|id| !registry.contains(id));
    if let Some(id) = unknown {
        return Err(ConfigurationError::UnknownRestoredStep(id.clone()));
    }

    // Only completing the last step puts it in the completed set, so that
    // marks a finished wizard. A wizard finished by skipping its last step
    // restores as in progress.
    let finished = snapshot
        .completed_step_ids
        .iter()
        .any(|id| registry.is_last(id));
    let status = if snapshot.is_pristine() {
        WizardStatus::NotStarted
    } else if finished {
        WizardStatus::Complete
    } else {
        WizardStatus::InProgress
    };

    Ok(WizardState {
        current_step_id: snapshot.current_step_id,
        completed_step_ids: snapshot.completed_step_ids.into_iter().collect(),
        step_data: snapshot.wizard_data,
        validation: Default::default(),
        status,
        last_snapshot_at_ms: snapshot.saved_at_ms,
    })
}
