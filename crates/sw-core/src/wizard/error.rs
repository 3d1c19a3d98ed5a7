use thiserror::Error;

use crate::ids::StepId;

/// Construction-time failures. No usable controller exists afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("step registry is empty")]
    EmptyRegistry,

    #[error("duplicate step id: {0}")]
    DuplicateStep(StepId),

    #[error("initial step is not registered: {0}")]
    UnknownInitialStep(StepId),

    #[error("restored draft points at unregistered step: {0}")]
    UnknownRestoredStep(StepId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("wizard configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

/// Recoverable rejection of a single operation.
///
/// A rejected operation never changes the pointer, the completed set or
/// stored step data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("unknown step: {0}")]
    UnknownStep(StepId),

    #[error("step {step} failed validation: {}", errors.join(", "))]
    Validation { step: StepId, errors: Vec<String> },

    #[error("step {0} is neither current nor completed")]
    NotReachable(StepId),

    #[error("step {0} is not the current step")]
    NotCurrentStep(StepId),

    #[error("step {0} cannot be skipped")]
    SkipNotAllowed(StepId),

    #[error("already at the first step")]
    NoPreviousStep,

    #[error("already at the last step")]
    NoNextStep,

    #[error("current step {0} must be completed before moving on")]
    CurrentStepIncomplete(StepId),
}

impl Rejection {
    /// Validation errors carried by a rejected completion.
    pub fn validation_errors(&self) -> &[String] {
        match self {
            Rejection::Validation { errors, .. } => errors,
            _ => &[],
        }
    }
}
