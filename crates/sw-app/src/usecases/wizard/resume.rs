use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};

use sw_core::ids::StepId;
use sw_core::ports::DraftRepositoryPort;
use sw_core::wizard::{ConfigurationError, StepDescriptor, WizardController, WizardError};

#[derive(Debug, thiserror::Error)]
pub enum ResumeWizardError {
    #[error("load wizard draft failed: {0}")]
    LoadDraft(#[source] anyhow::Error),
    #[error("clear stale wizard draft failed: {0}")]
    ClearDraft(#[source] anyhow::Error),
    #[error(transparent)]
    Wizard(#[from] WizardError),
}

/// Use case for starting a wizard from the stored draft, if there is one.
pub struct ResumeWizard {
    repository: Arc<dyn DraftRepositoryPort>,
    discard_stale: bool,
}

impl ResumeWizard {
    pub fn new(repository: Arc<dyn DraftRepositoryPort>) -> Self {
        Self {
            repository,
            discard_stale: false,
        }
    }

    pub fn from_ports(repository: Arc<dyn DraftRepositoryPort>) -> Self {
        Self::new(repository)
    }

    /// Clear drafts that reference unknown steps and start fresh instead of
    /// failing.
    pub fn discard_stale(mut self, discard: bool) -> Self {
        self.discard_stale = discard;
        self
    }

    pub async fn execute(
        &self,
        steps: Vec<StepDescriptor>,
        initial_step: Option<StepId>,
    ) -> Result<WizardController, ResumeWizardError> {
        let span = info_span!("usecase.wizard.resume");
        async {
            let draft = self
                .repository
                .load_draft()
                .await
                .map_err(ResumeWizardError::LoadDraft)?;

            let Some(draft) = draft else {
                info!("no wizard draft stored; starting fresh");
                return Ok(WizardController::initialize(steps, initial_step, None)?);
            };

            let current = draft.current_step_id.clone();
            match WizardController::initialize(steps.clone(), initial_step.clone(), Some(draft)) {
                Ok(controller) => {
                    info!(current = %current, "wizard resumed from draft");
                    Ok(controller)
                }
                Err(WizardError::Configuration(ConfigurationError::UnknownRestoredStep(step)))
                    if self.discard_stale =>
                {
                    warn!(step = %step, "stored draft references an unknown step; discarding it");
                    self.repository
                        .clear_draft()
                        .await
                        .map_err(ResumeWizardError::ClearDraft)?;
                    Ok(WizardController::initialize(steps, initial_step, None)?)
                }
                Err(err) => Err(err.into()),
            }
        }
        .instrument(span)
        .await
    }
}
